use serde::Serialize;
use serde_json::{Value, json};

use crate::engine::catalog::wage_filing_config;

/// Structured response for the `catalog` subcommand.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CatalogCommandResponse {
    pub exit_code: i32,
    pub payload: Value,
}

/// Emits the built-in wage-filing rules document, in the same shape the
/// `--rules` flag accepts.
pub fn run() -> CatalogCommandResponse {
    match serde_json::to_value(wage_filing_config()) {
        Ok(payload) => CatalogCommandResponse {
            exit_code: 0,
            payload,
        },
        Err(_) => CatalogCommandResponse {
            exit_code: 1,
            payload: json!({
                "error": "internal_error",
                "message": "failed to serialize built-in catalog"
            }),
        },
    }
}
