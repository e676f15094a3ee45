//! プロンプト生成モジュール

/// 植物識別プロンプト生成
///
/// PlantInfoスキーマの7キーを厳密なJSONで返すよう指示する。
/// 回答言語はスペイン語。
pub fn build_identify_prompt() -> String {
    r#"Eres un botánico experto. Analiza la planta de la fotografía adjunta y responde únicamente con un objeto JSON con exactamente esta forma:

{
  "commonName": "nombre común de la planta",
  "scientificName": "nombre científico (género y especie)",
  "origin": "región de origen de la especie",
  "description": "descripción breve de la planta",
  "isHealthy": true/false (si la planta de la foto se ve sana),
  "healthAssessment": "evaluación del estado de salud observado en la foto",
  "careRecommendations": ["lista ordenada de cuidados recomendados"]
}

Reglas:
- Responde en español.
- Incluye siempre las siete claves; careRecommendations puede ser una lista vacía pero nunca null.
- No inventes datos que no puedas deducir de la imagen o de la especie.
- Devuelve solo el JSON, sin texto adicional ni markdown."#
        .to_string()
}
