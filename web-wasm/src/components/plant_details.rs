//! 植物詳細コンポーネント
//!
//! 解析成功時にPlantInfoの全フィールドを表示する。

use leptos::prelude::*;
use planta_ai_common::PlantInfo;

#[component]
pub fn PlantDetails(data: PlantInfo) -> impl IntoView {
    let health_class = if data.is_healthy {
        "health-badge healthy"
    } else {
        "health-badge attention"
    };
    let health_label = if data.is_healthy {
        "Saludable"
    } else {
        "Necesita atención"
    };

    view! {
        <div class="plant-details">
            <div class="plant-names">
                <h2>{data.common_name}</h2>
                <p class="scientific-name"><i>{data.scientific_name}</i></p>
            </div>

            <div class="plant-section">
                <h3>"Origen"</h3>
                <p>{data.origin}</p>
            </div>

            <div class="plant-section">
                <h3>"Descripción"</h3>
                <p>{data.description}</p>
            </div>

            <div class="plant-section">
                <h3>"Estado de salud"</h3>
                <span class=health_class>{health_label}</span>
                <p>{data.health_assessment}</p>
            </div>

            <div class="plant-section">
                <h3>"Cuidados recomendados"</h3>
                <ul class="care-list">
                    {data
                        .care_recommendations
                        .into_iter()
                        .map(|item| view! { <li>{item}</li> })
                        .collect_view()}
                </ul>
            </div>
        </div>
    }
}
