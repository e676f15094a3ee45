//! Gemini API連携
//!
//! 画像1枚（Base64ペイロード + MIMEタイプ）を送信し、
//! 検証済みのPlantInfoを返す。1回の試行のみで、
//! リトライ・タイムアウト・キャンセルは行わない。

use planta_ai_common::{build_identify_prompt, parse_plant_response, Error, PlantInfo, Result};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

const GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent";

/// Gemini APIリクエスト
#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

/// Gemini APIレスポンス
#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Deserialize)]
struct ResponseContent {
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: String,
}

/// 入力検証（空のペイロード・MIMEタイプを拒否）
fn validate_inputs(payload: &str, mime_type: &str) -> Result<()> {
    if payload.is_empty() {
        return Err(Error::Api("空の画像ペイロード".to_string()));
    }
    if mime_type.is_empty() {
        return Err(Error::Api("MIMEタイプが未指定".to_string()));
    }
    Ok(())
}

fn api_err(e: JsValue) -> Error {
    Error::Api(format!("{:?}", e))
}

/// Gemini API呼び出し（fetch共通処理）
async fn call_gemini_api(api_key: &str, request: &GeminiRequest) -> Result<String> {
    let url = format!("{}?key={}", GEMINI_API_URL, api_key);
    let body = serde_json::to_string(request).map_err(|e| Error::Api(e.to_string()))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(&body));

    let request = Request::new_with_str_and_init(&url, &opts).map_err(api_err)?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(api_err)?;

    let window =
        web_sys::window().ok_or_else(|| Error::Api("windowが取得できません".to_string()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(api_err)?;
    let resp: Response = resp_value.dyn_into().map_err(api_err)?;

    if !resp.ok() {
        return Err(Error::Api(format!("API error: {}", resp.status())));
    }

    let json = JsFuture::from(resp.json().map_err(api_err)?)
        .await
        .map_err(api_err)?;
    let response: GeminiResponse =
        serde_wasm_bindgen::from_value(json).map_err(|e| Error::Api(e.to_string()))?;

    response
        .candidates
        .first()
        .and_then(|c| c.content.parts.first())
        .map(|p| p.text.clone())
        .ok_or_else(|| Error::Api("空のレスポンス".to_string()))
}

/// 植物を識別
///
/// プロンプトと画像のinline_dataを1リクエストにまとめて送信し、
/// レスポンスをPlantInfoスキーマとして厳密に検証する。
/// フィールド欠落・型不一致はParseエラーになる。
///
/// # Arguments
/// * `api_key` - Gemini API key
/// * `payload` - Base64エンコード済み画像（Data URLプレフィックスなし）
/// * `mime_type` - 画像のMIMEタイプ（例: "image/jpeg"）
pub async fn identify_plant(api_key: &str, payload: &str, mime_type: &str) -> Result<PlantInfo> {
    validate_inputs(payload, mime_type)?;

    let request = GeminiRequest {
        contents: vec![Content {
            parts: vec![
                Part::Text {
                    text: build_identify_prompt(),
                },
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: mime_type.to_string(),
                        data: payload.to_string(),
                    },
                },
            ],
        }],
        generation_config: GenerationConfig {
            temperature: 0.2,
            response_mime_type: "application/json".to_string(),
        },
    };

    let response_text = call_gemini_api(api_key, &request).await?;
    parse_plant_response(&response_text)
}
