// Typed errors with thiserror. Everything here is local and non-fatal: a bad
// counter is skipped, a bad config surfaces at the WASM boundary.

use thiserror::Error;

/// Engine error types.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Counter text is not a plain integer: {text:?}")]
    CounterParse { text: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Serialization(err.to_string())
    }
}
