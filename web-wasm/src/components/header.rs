//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"PlantaAI - Identificador de Plantas"</h1>
        </header>
    }
}
