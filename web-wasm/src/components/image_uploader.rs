//! 画像アップロードコンポーネント
//!
//! ドラッグ&ドロップまたはクリックで画像を1枚選択する。
//! 選択済みの場合はプレビューを表示する。APIキー未入力の間は無効。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, File, FileList};

#[component]
pub fn ImageUploader<F>(
    api_key: ReadSignal<String>,
    preview_url: Signal<Option<String>>,
    on_image_selected: F,
) -> impl IntoView
where
    F: Fn(File) + 'static + Clone + Send + Sync,
{
    let (is_dragover, set_is_dragover) = signal(false);
    let is_enabled = move || !api_key.get().is_empty();

    let handle_files = {
        let on_image_selected = on_image_selected.clone();
        move |files: FileList| {
            // 単一画像解析のため先頭の1枚のみ採用
            if let Some(file) = files.get(0) {
                on_image_selected(file);
            }
        }
    };

    let on_drop = {
        let handle_files = handle_files.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            if !is_enabled() {
                return;
            }

            if let Some(dt) = ev.data_transfer() {
                if let Some(files) = dt.files() {
                    handle_files(files);
                }
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        if is_enabled() {
            set_is_dragover.set(true);
        }
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_click = {
        let handle_files = handle_files.clone();
        move |_| {
            if !is_enabled() {
                return;
            }

            // ファイル選択ダイアログを開く
            let document = web_sys::window().unwrap().document().unwrap();
            let input: web_sys::HtmlInputElement = document
                .create_element("input")
                .unwrap()
                .dyn_into()
                .unwrap();
            input.set_type("file");
            input.set_accept("image/*");

            let handle_files = handle_files.clone();
            let input_ref = input.clone();
            let closure = Closure::wrap(Box::new(move |_: web_sys::Event| {
                if let Some(files) = input_ref.files() {
                    handle_files(files);
                }
            }) as Box<dyn FnMut(_)>);

            input.set_onchange(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
            input.click();
        }
    };

    view! {
        <div
            class=move || {
                let mut classes = vec!["upload-area"];
                if is_dragover.get() {
                    classes.push("dragover");
                }
                if !is_enabled() {
                    classes.push("disabled");
                }
                classes.join(" ")
            }
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:click=on_click
        >
            <Show
                when=is_enabled
                fallback=|| view! {
                    <div class="upload-icon">"🔑"</div>
                    <p>"Introduce tu API Key para empezar"</p>
                    <p class="text-muted">"Configura arriba tu clave de Gemini para poder subir una foto"</p>
                }
            >
                <Show
                    when=move || preview_url.get().is_some()
                    fallback=|| view! {
                        <div class="upload-icon">"🌿"</div>
                        <p>"Arrastra una foto de tu planta o haz clic para seleccionarla"</p>
                        <p class="text-muted">"Formatos: JPEG, PNG, WebP"</p>
                    }
                >
                    {move || preview_url.get().map(|url| view! {
                        <img class="preview-image" src=url alt="Vista previa de la planta" />
                    })}
                </Show>
            </Show>
        </div>
    }
}
