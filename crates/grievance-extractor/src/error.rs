//! Error types for the extraction layer

use thiserror::Error;

/// Errors that can occur while parsing LLM extraction output
///
/// These never reach a caller of the intake flow: a parse failure is
/// recovered locally by the regex fallback.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Response did not contain the expected JSON shape
    #[error("Invalid extraction format: {0}")]
    InvalidFormat(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}
