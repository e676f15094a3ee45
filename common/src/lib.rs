//! PlantaAI Common Library
//!
//! Web(WASM)から利用される型とコアロジック。
//! WASM非依存のため、ネイティブの `cargo test` でそのまま検証できる。

pub mod encode;
pub mod error;
pub mod parser;
pub mod prompts;
pub mod session;
pub mod types;

pub use encode::{encode_bytes, payload_from_data_url, to_data_url};
pub use error::{Error, Result};
pub use parser::{extract_json, parse_plant_response};
pub use prompts::build_identify_prompt;
pub use session::{ImageData, Phase, Session, MSG_ANALYZE_FAILED, MSG_SELECT_IMAGE};
pub use types::PlantInfo;
