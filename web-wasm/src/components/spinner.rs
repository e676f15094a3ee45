//! スピナーコンポーネント

use leptos::prelude::*;

/// 解析中インジケータ。表示中はAnalyzeコントロールを抑止する前提。
#[component]
pub fn Spinner() -> impl IntoView {
    view! {
        <div class="spinner-container">
            <div class="spinner"></div>
            <p class="spinner-text">"Analizando imagen..."</p>
        </div>
    }
}
