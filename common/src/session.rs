//! セッション状態マシン
//!
//! UI表示の唯一の情報源。フェーズをタグ付きenumで表現し、
//! 「ローディング中かつエラーあり」のような不正な組み合わせを型で排除する。
//! 世代カウンタで、リセット・再取り込み後に届く古い解析結果を無視する。

use crate::error::Result;
use crate::types::PlantInfo;

/// 画像未選択時の検証メッセージ
pub const MSG_SELECT_IMAGE: &str = "Por favor, selecciona una imagen primero.";

/// 解析失敗時の汎用メッセージ（エンコード失敗とAPI失敗を区別しない）
pub const MSG_ANALYZE_FAILED: &str =
    "No se pudo analizar la imagen. Por favor, inténtalo de nuevo.";

/// 選択中の画像
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    pub file_name: String,
    pub mime_type: String,
    /// プレビュー表示とエンコード済みペイロードの供給元を兼ねるData URL
    pub data_url: String,
}

/// セッションのフェーズ
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Phase {
    /// 画像未選択
    #[default]
    Idle,
    /// 画像選択済み・未解析
    Ready,
    /// 解析中（この間、結果もエラーも存在しない）
    Loading,
    /// 解析成功
    Result(PlantInfo),
    /// 解析失敗（ユーザー向けメッセージ）
    Failed(String),
}

/// セッション状態
///
/// 変更はすべてこの型のメソッド経由。Presentationは読み取り用
/// アクセサのみ使用する。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    /// 解析呼び出しの世代。intake/begin_analysis/resetで進む。
    generation: u64,
    image: Option<ImageData>,
    phase: Phase,
    /// 検証メッセージ（状態遷移を伴わない一時的な通知）
    notice: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// 画像取り込み
    ///
    /// どのフェーズからでも合法。結果・エラー・通知をクリアしてReadyへ。
    /// 世代が進むため、進行中だった解析の結果は到着しても無視される。
    pub fn intake(&mut self, image: ImageData) {
        self.generation += 1;
        self.image = Some(image);
        self.phase = Phase::Ready;
        self.notice = None;
    }

    /// 画像取り込み失敗の反映
    ///
    /// 読めなかったファイルは保持せず、直前の画像はそのまま残す。
    /// ユーザーには解析失敗と同じ汎用メッセージを表示する
    /// （エンコード失敗とAPI失敗を区別しないのと同じ方針）。
    /// 世代が進むため、進行中だった解析の結果は無視される。
    pub fn intake_failed(&mut self) {
        self.generation += 1;
        self.phase = Phase::Failed(MSG_ANALYZE_FAILED.to_string());
        self.notice = None;
    }

    /// 解析開始。開始できた場合はこの解析の世代番号を返す。
    ///
    /// 画像未選択時は検証メッセージを通知に積んでNone（状態遷移なし、
    /// 呼び出し側は推論を実行しない）。すでにLoadingの場合もNone。
    pub fn begin_analysis(&mut self) -> Option<u64> {
        if matches!(self.phase, Phase::Loading) {
            return None;
        }
        if self.image.is_none() {
            self.notice = Some(MSG_SELECT_IMAGE.to_string());
            return None;
        }
        self.generation += 1;
        self.phase = Phase::Loading;
        self.notice = None;
        Some(self.generation)
    }

    /// 解析完了の反映
    ///
    /// 世代が現在値と一致し、かつLoading中の場合のみ状態を更新する。
    /// 失敗はエンコード由来でもAPI由来でも同じ汎用メッセージに畳む
    /// （詳細なエラーは呼び出し側がログに出す）。
    pub fn resolve(&mut self, generation: u64, outcome: Result<PlantInfo>) {
        if generation != self.generation || !matches!(self.phase, Phase::Loading) {
            return;
        }
        self.phase = match outcome {
            Ok(info) => Phase::Result(info),
            Err(_) => Phase::Failed(MSG_ANALYZE_FAILED.to_string()),
        };
    }

    /// リセット。全フィールドを初期状態に戻す。
    ///
    /// 進行中の解析は中断しないが、世代が進むため結果は捨てられる。
    pub fn reset(&mut self) {
        *self = Session {
            generation: self.generation + 1,
            ..Session::new()
        };
    }

    // =============================================
    // 読み取り用アクセサ
    // =============================================

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn image(&self) -> Option<&ImageData> {
        self.image.as_ref()
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.image.as_ref().map(|i| i.data_url.as_str())
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }

    pub fn plant(&self) -> Option<&PlantInfo> {
        match &self.phase {
            Phase::Result(info) => Some(info),
            _ => None,
        }
    }

    /// 表示すべきメッセージ（失敗メッセージまたは検証通知）
    pub fn display_message(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(msg) => Some(msg),
            _ => self.notice.as_deref(),
        }
    }

    /// 解析ボタンを表示するか（画像あり・結果なし・非ローディング）
    pub fn can_analyze(&self) -> bool {
        self.image.is_some() && matches!(self.phase, Phase::Ready | Phase::Failed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn sample_image() -> ImageData {
        ImageData {
            file_name: "monstera.jpg".to_string(),
            mime_type: "image/jpeg".to_string(),
            data_url: "data:image/jpeg;base64,/9j/4AAQ".to_string(),
        }
    }

    fn monstera() -> PlantInfo {
        PlantInfo {
            common_name: "Monstera".to_string(),
            scientific_name: "Monstera deliciosa".to_string(),
            origin: "Central America".to_string(),
            description: "Planta trepadora de hojas perforadas".to_string(),
            is_healthy: true,
            health_assessment: "Leaves healthy".to_string(),
            care_recommendations: vec![
                "Water weekly".to_string(),
                "Bright indirect light".to_string(),
            ],
        }
    }

    /// 観測可能な状態が初期状態と一致するか（世代は内部カウンタなので除外）
    fn assert_observably_initial(session: &Session) {
        assert_eq!(session.phase(), &Phase::Idle);
        assert!(session.image().is_none());
        assert!(session.preview_url().is_none());
        assert!(session.plant().is_none());
        assert!(session.display_message().is_none());
        assert!(!session.is_loading());
        assert!(!session.can_analyze());
    }

    // =============================================
    // 基本遷移テスト
    // =============================================

    #[test]
    fn test_initial_state_is_idle() {
        assert_observably_initial(&Session::new());
    }

    #[test]
    fn test_intake_moves_to_ready_with_preview() {
        let mut session = Session::new();
        session.intake(sample_image());
        assert_eq!(session.phase(), &Phase::Ready);
        assert_eq!(session.preview_url(), Some("data:image/jpeg;base64,/9j/4AAQ"));
        assert!(session.can_analyze());
        assert!(session.display_message().is_none());
    }

    #[test]
    fn test_analyze_success_scenario() {
        // intake(A) → Ready → analyze → Loading → 成功レスポンス → Result
        let mut session = Session::new();
        session.intake(sample_image());

        let generation = session.begin_analysis().expect("画像選択済みなので開始できる");
        assert!(session.is_loading());
        assert!(session.plant().is_none());
        assert!(session.display_message().is_none());
        assert!(!session.can_analyze());

        session.resolve(generation, Ok(monstera()));
        assert_eq!(session.plant(), Some(&monstera()));
        assert!(!session.is_loading());
        assert!(session.display_message().is_none());
    }

    #[test]
    fn test_analyze_without_image_sets_notice_only() {
        let mut session = Session::new();
        let before_phase = session.phase().clone();

        assert_eq!(session.begin_analysis(), None);

        // 状態遷移なし、通知のみ
        assert_eq!(session.phase(), &before_phase);
        assert!(!session.is_loading());
        assert_eq!(session.display_message(), Some(MSG_SELECT_IMAGE));
    }

    #[test]
    fn test_analyze_failure_then_reset() {
        let mut session = Session::new();
        session.intake(sample_image());

        let generation = session.begin_analysis().unwrap();
        session.resolve(generation, Err(Error::Api("API error: 500".to_string())));

        assert_eq!(session.display_message(), Some(MSG_ANALYZE_FAILED));
        assert!(session.plant().is_none());
        assert!(!session.is_loading());
        // 失敗後もアップロード/解析コントロールは使える
        assert!(session.can_analyze());

        session.reset();
        assert_observably_initial(&session);
    }

    #[test]
    fn test_encode_failure_collapses_to_same_message() {
        let mut session = Session::new();
        session.intake(sample_image());
        let generation = session.begin_analysis().unwrap();
        session.resolve(generation, Err(Error::Encode("no data url".to_string())));
        assert_eq!(session.display_message(), Some(MSG_ANALYZE_FAILED));
    }

    #[test]
    fn test_intake_clears_previous_outcome() {
        let mut session = Session::new();
        session.intake(sample_image());
        let generation = session.begin_analysis().unwrap();
        session.resolve(generation, Ok(monstera()));

        let replacement = ImageData {
            file_name: "aloe.png".to_string(),
            mime_type: "image/png".to_string(),
            data_url: "data:image/png;base64,iVBORw0KGgo=".to_string(),
        };
        session.intake(replacement.clone());

        assert_eq!(session.phase(), &Phase::Ready);
        assert!(session.plant().is_none());
        assert!(session.display_message().is_none());
        assert_eq!(session.image(), Some(&replacement));
    }

    #[test]
    fn test_intake_failed_shows_generic_message() {
        // 読めないファイルを選んだ場合も、ユーザーに見える失敗になる
        let mut session = Session::new();
        session.intake_failed();

        assert_eq!(session.display_message(), Some(MSG_ANALYZE_FAILED));
        assert!(session.image().is_none());
        assert!(!session.is_loading());
        assert!(session.plant().is_none());
    }

    #[test]
    fn test_intake_failed_keeps_previous_image_and_drops_pending_call() {
        let mut session = Session::new();
        session.intake(sample_image());
        let stale_generation = session.begin_analysis().unwrap();

        // 解析中に読めないファイルを選択。古い解析の結果は反映されない。
        session.intake_failed();
        session.resolve(stale_generation, Ok(monstera()));

        assert_eq!(session.display_message(), Some(MSG_ANALYZE_FAILED));
        assert!(session.plant().is_none());
        // 直前の画像は残り、そのまま再解析できる
        assert_eq!(session.image(), Some(&sample_image()));
        assert!(session.can_analyze());
    }

    #[test]
    fn test_intake_analyze_reset_returns_to_initial() {
        let mut session = Session::new();
        session.intake(sample_image());
        let generation = session.begin_analysis().unwrap();
        session.resolve(generation, Ok(monstera()));
        session.reset();
        assert_observably_initial(&session);
    }

    // =============================================
    // 世代カウンタ（古い結果の無視）テスト
    // =============================================

    #[test]
    fn test_resolve_after_reset_is_ignored() {
        let mut session = Session::new();
        session.intake(sample_image());
        let generation = session.begin_analysis().unwrap();

        // Loading中にリセット。後から届く結果は捨てられる。
        session.reset();
        session.resolve(generation, Ok(monstera()));

        assert_observably_initial(&session);
    }

    #[test]
    fn test_resolve_after_new_intake_is_ignored() {
        let mut session = Session::new();
        session.intake(sample_image());
        let stale_generation = session.begin_analysis().unwrap();

        // 解析中に別の画像を取り込む。古い解析の結果は反映されない。
        session.intake(sample_image());
        session.resolve(stale_generation, Ok(monstera()));

        assert_eq!(session.phase(), &Phase::Ready);
        assert!(session.plant().is_none());
    }

    #[test]
    fn test_resolve_with_wrong_generation_is_ignored() {
        let mut session = Session::new();
        session.intake(sample_image());
        let generation = session.begin_analysis().unwrap();

        session.resolve(generation + 1, Ok(monstera()));
        assert!(session.is_loading());

        session.resolve(generation, Ok(monstera()));
        assert_eq!(session.plant(), Some(&monstera()));
    }

    #[test]
    fn test_double_begin_analysis_is_guarded() {
        let mut session = Session::new();
        session.intake(sample_image());

        let first = session.begin_analysis();
        assert!(first.is_some());
        // Loading中の再開始は拒否され、状態はそのまま
        assert_eq!(session.begin_analysis(), None);
        assert!(session.is_loading());

        session.resolve(first.unwrap(), Ok(monstera()));
        assert_eq!(session.plant(), Some(&monstera()));
    }

    // =============================================
    // 表示の排他性テスト
    // =============================================

    #[test]
    fn test_loading_excludes_result_and_error() {
        let mut session = Session::new();
        session.intake(sample_image());
        session.begin_analysis().unwrap();

        assert!(session.is_loading());
        assert!(session.plant().is_none());
        assert!(session.display_message().is_none());
    }

    #[test]
    fn test_result_and_error_never_coexist() {
        let mut session = Session::new();
        session.intake(sample_image());
        let generation = session.begin_analysis().unwrap();
        session.resolve(generation, Err(Error::Parse("missing field".to_string())));

        assert!(session.display_message().is_some());
        assert!(session.plant().is_none());

        let generation = session.begin_analysis().unwrap();
        session.resolve(generation, Ok(monstera()));
        assert!(session.plant().is_some());
        assert!(session.display_message().is_none());
    }
}
