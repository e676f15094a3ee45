//! APIレスポンスパーサー
//!
//! 推論サービスのレスポンステキストからJSONを抽出し、
//! PlantInfoスキーマとして厳密に検証する。
//! 検証済みのPlantInfoかParseエラーのどちらかしか返さない。

use crate::error::{Error, Result};
use crate::types::PlantInfo;

/// APIレスポンスからJSON部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 生の {...} オブジェクトまたは [...] 配列
/// 3. エラー
///
/// # Examples
/// ```
/// use planta_ai_common::extract_json;
///
/// let response = "resultado: {\"commonName\": \"Monstera\"}";
/// let json = extract_json(response).unwrap();
/// assert_eq!(json, "{\"commonName\": \"Monstera\"}");
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    // ```json ... ``` ブロックを探す
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7; // "```json" の長さ
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    // 生の {...} / [...] を探す
    if let Some(start) = response.find(|c| c == '{' || c == '[') {
        let close = if response[start..].starts_with('[') { ']' } else { '}' };
        if let Some(end) = response.rfind(close) {
            if end >= start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(Error::Parse("JSONが見つかりません".into()))
}

/// 推論レスポンスをパースしてPlantInfoを返す
///
/// フィールド欠落・型不一致はすべてParseエラー。
/// 配列で返ってきた場合は先頭要素を採用する。
pub fn parse_plant_response(response: &str) -> Result<PlantInfo> {
    let json_str = extract_json(response)?;
    let value: serde_json::Value = serde_json::from_str(json_str.trim())
        .map_err(|e| Error::Parse(format!("JSONパースエラー: {}", e)))?;

    let value = match value {
        serde_json::Value::Array(mut items) if !items.is_empty() => items.remove(0),
        serde_json::Value::Array(_) => return Err(Error::Parse("空のJSON配列".into())),
        other => other,
    };

    serde_json::from_value(value)
        .map_err(|e| Error::Parse(format!("PlantInfoスキーマ不一致: {}", e)))
}
