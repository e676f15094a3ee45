//! エラー型定義

use thiserror::Error;

/// 共通エラー型
///
/// UIにはこの詳細を出さず、汎用メッセージに畳み込む（詳細はコンソールログ行き）。
#[derive(Error, Debug)]
pub enum Error {
    /// ファイル読み込み・Data URL処理の失敗
    #[error("Encode error: {0}")]
    Encode(String),

    /// レスポンスのJSON抽出・スキーマ検証の失敗
    #[error("Parse error: {0}")]
    Parse(String),

    /// 通信・HTTPステータス・空レスポンスなどAPI側の失敗
    #[error("API error: {0}")]
    Api(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_encode() {
        let error = Error::Encode("ファイルが読めません".to_string());
        let display = format!("{}", error);
        assert_eq!(display, "Encode error: ファイルが読めません");
    }

    #[test]
    fn test_error_display_parse() {
        let error = Error::Parse("missing field `origin`".to_string());
        let display = format!("{}", error);
        assert!(display.contains("Parse error"));
        assert!(display.contains("origin"));
    }

    #[test]
    fn test_error_display_api() {
        let error = Error::Api("API error: 403".to_string());
        let display = format!("{}", error);
        assert!(display.starts_with("API error"));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::Parse("テスト".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("Parse"));
        assert!(debug.contains("テスト"));
    }
}
