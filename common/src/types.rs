//! 解析結果の型定義

use serde::{Deserialize, Serialize};

/// AI解析結果: 植物1株の識別情報
///
/// 推論1回の成功時にのみ生成される不変の値オブジェクト。
/// serdeデフォルトを一切付けないことで、7フィールドのうち1つでも
/// 欠けたレスポンスはデシリアライズ失敗（= 推論エラー）になる。
/// 部分的に埋まったPlantInfoは存在しない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantInfo {
    pub common_name: String,
    pub scientific_name: String,
    pub origin: String,
    pub description: String,
    pub is_healthy: bool,
    pub health_assessment: String,
    /// 推奨ケア（順序付き、空は許可・nullは不許可）
    pub care_recommendations: Vec<String>,
}
