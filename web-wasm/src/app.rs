//! メインアプリケーションコンポーネント
//!
//! セッション状態（planta_ai_common::Session）を唯一のシグナルとして所有し、
//! 取り込み・解析・リセットのハンドラだけがそれを変更する。
//! 各コンポーネントは読み取りのみ。

use gloo::console;
use leptos::prelude::*;
use planta_ai_common::{encode, ImageData, Session};
use wasm_bindgen_futures::spawn_local;
use web_sys::File;

use crate::api::gemini;
use crate::components::{
    header::Header, image_uploader::ImageUploader, plant_details::PlantDetails,
    settings_panel::SettingsPanel, spinner::Spinner,
};
use crate::io::read_file_bytes;

/// MIMEタイプをブラウザが報告しない場合のフォールバック
const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let (api_key, set_api_key) = signal(String::new());
    let (session, set_session) = signal(Session::new());

    // 画像取り込み: バイト列を読み、Data URL化してReadyへ
    let on_image_selected = move |file: File| {
        let file_name = file.name();
        let mime_type = if file.type_().is_empty() {
            DEFAULT_MIME_TYPE.to_string()
        } else {
            file.type_()
        };
        spawn_local(async move {
            match read_file_bytes(&file).await {
                Ok(bytes) => {
                    let data_url = encode::to_data_url(&mime_type, &bytes);
                    set_session.update(|s| {
                        s.intake(ImageData {
                            file_name,
                            mime_type,
                            data_url,
                        })
                    });
                }
                Err(e) => {
                    // UIには汎用メッセージのみ。詳細はコンソールへ。
                    console::error!(format!("画像の読み込みに失敗: {}", e));
                    set_session.update(|s| s.intake_failed());
                }
            }
        });
    };

    // 解析開始: エンコード → Gemini呼び出し → 世代を照合して反映
    let on_analyze = move |_| {
        let mut started: Option<(u64, ImageData)> = None;
        set_session.update(|s| {
            if let Some(generation) = s.begin_analysis() {
                if let Some(image) = s.image().cloned() {
                    started = Some((generation, image));
                }
            }
        });

        // 画像未選択なら検証メッセージが積まれているだけで、推論は実行しない
        let Some((generation, image)) = started else {
            return;
        };
        let key = api_key.get_untracked();

        spawn_local(async move {
            let outcome = match encode::payload_from_data_url(&image.data_url) {
                Ok(payload) => gemini::identify_plant(&key, payload, &image.mime_type).await,
                Err(e) => Err(e),
            };
            if let Err(e) = &outcome {
                // UIには汎用メッセージのみ。詳細はコンソールへ。
                console::error!(format!("解析失敗 ({}): {}", image.file_name, e));
            }
            set_session.update(|s| s.resolve(generation, outcome));
        });
    };

    let on_reset = move |_| set_session.update(|s| s.reset());

    let preview_url = Signal::derive(move || {
        session.with(|s| s.preview_url().map(str::to_string))
    });

    view! {
        <div class="container">
            <Header />

            <SettingsPanel api_key=api_key set_api_key=set_api_key />

            <Show when=move || session.with(|s| s.image().is_none() && s.plant().is_none())>
                <h2 class="app-subtitle">"Descubre el mundo de tus plantas"</h2>
            </Show>

            <ImageUploader
                api_key=api_key
                preview_url=preview_url
                on_image_selected=on_image_selected
            />

            <Show when=move || session.with(|s| s.can_analyze())>
                <div class="action-row">
                    <button class="btn btn-primary" on:click=on_analyze>
                        "Analizar Planta"
                    </button>
                </div>
            </Show>

            <Show when=move || session.with(|s| s.is_loading())>
                <Spinner />
            </Show>

            {move || session.with(|s| s.display_message().map(str::to_string)).map(|msg| view! {
                <p class="error-text">{msg}</p>
            })}

            {move || session.with(|s| s.plant().cloned()).map(|data| view! {
                <PlantDetails data=data />
                <div class="action-row">
                    <button class="btn btn-secondary" on:click=on_reset>
                        "Analizar otra planta"
                    </button>
                </div>
            })}
        </div>
    }
}
