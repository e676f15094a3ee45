//! 画像エンコード
//!
//! 画像バイト列とData URLの相互変換:
//! - encode_bytes: バイト列 → Base64ペイロード
//! - to_data_url: バイト列 → Data URL（プレビュー表示と送信の両方に使う）
//! - payload_from_data_url: Data URL → プレフィックスを除いたペイロード部分

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{Error, Result};

/// バイト列をBase64エンコードする
///
/// 空のバイト列も有効な（空の）ペイロードになる。
pub fn encode_bytes(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// バイト列からData URLを生成する
///
/// # Arguments
/// * `mime_type` - 画像のMIMEタイプ（例: "image/jpeg"）
/// * `bytes` - 画像の生バイト列
pub fn to_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, encode_bytes(bytes))
}

/// Data URLからBase64ペイロード部分を抽出する
///
/// `data:image/jpeg;base64,` のようなスキーム/MIMEタイプのプレフィックスを
/// 取り除き、ペイロードのみ返す。区切りのカンマがない文字列はEncodeエラー。
///
/// # Examples
/// ```
/// use planta_ai_common::payload_from_data_url;
///
/// let payload = payload_from_data_url("data:image/png;base64,iVBORw0KGgo=").unwrap();
/// assert_eq!(payload, "iVBORw0KGgo=");
/// ```
pub fn payload_from_data_url(data_url: &str) -> Result<&str> {
    data_url
        .split(',')
        .nth(1)
        .ok_or_else(|| Error::Encode(format!("Data URLではありません: {:.32}", data_url)))
}
