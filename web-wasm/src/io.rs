//! ファイル読み込み（FileReaderのasyncラッパー）

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use js_sys::{ArrayBuffer, Uint8Array};
use planta_ai_common::{Error, Result};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{File, FileReader, ProgressEvent};

/// ファイル全体をバイト列として読み込む
///
/// コールバック形式のFileReaderをoneshotチャネルでasync化する。
/// 読み込み失敗はEncodeエラーとして返す。リトライはしない。
pub async fn read_file_bytes(file: &File) -> Result<Vec<u8>> {
    let reader = FileReader::new().map_err(read_err)?;
    let (tx, rx) = oneshot::channel::<Result<Vec<u8>>>();
    let tx = Rc::new(RefCell::new(Some(tx)));

    let onload = {
        let tx = Rc::clone(&tx);
        let reader = reader.clone();
        Closure::wrap(Box::new(move |_: ProgressEvent| {
            let outcome = reader
                .result()
                .map_err(read_err)
                .and_then(|value| value.dyn_into::<ArrayBuffer>().map_err(read_err))
                .map(|buffer| Uint8Array::new(&buffer).to_vec());
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(outcome);
            }
        }) as Box<dyn FnMut(_)>)
    };

    let onerror = {
        let tx = Rc::clone(&tx);
        Closure::wrap(Box::new(move |_: ProgressEvent| {
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(Err(Error::Encode(
                    "FileReaderがファイルを読み込めませんでした".to_string(),
                )));
            }
        }) as Box<dyn FnMut(_)>)
    };

    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    reader.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    reader.read_as_array_buffer(file).map_err(read_err)?;

    // クロージャ(onload/onerror)はこのスコープが生きている間有効
    rx.await
        .map_err(|_| Error::Encode("ファイル読み込みが中断されました".to_string()))?
}

fn read_err(e: JsValue) -> Error {
    Error::Encode(format!("{:?}", e))
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use planta_ai_common::encode;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn make_file(bytes: &[u8], name: &str) -> File {
        let parts = js_sys::Array::new();
        parts.push(&Uint8Array::from(bytes));
        File::new_with_u8_array_sequence(&parts, name).expect("File生成失敗")
    }

    #[wasm_bindgen_test]
    async fn wasm_read_file_bytes_roundtrip() {
        let bytes = b"\xff\xd8\xff\xe0fake jpeg body";
        let file = make_file(bytes, "monstera.jpg");

        let read = read_file_bytes(&file).await.expect("読み込み失敗");
        assert_eq!(read, bytes);

        // 読み込んだバイト列はData URL経由でもそのまま往復する
        let data_url = encode::to_data_url("image/jpeg", &read);
        let payload = encode::payload_from_data_url(&data_url).unwrap();
        assert_eq!(payload, encode::encode_bytes(bytes));
    }

    #[wasm_bindgen_test]
    async fn wasm_read_empty_file_yields_empty_payload() {
        // 0バイトのファイルも失敗せず、空のペイロードになる
        let file = make_file(&[], "empty.png");

        let read = read_file_bytes(&file).await.expect("読み込み失敗");
        assert!(read.is_empty());
        assert_eq!(encode::encode_bytes(&read), "");
    }
}
