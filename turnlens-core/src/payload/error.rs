//! Payload error types

use thiserror::Error;

/// Result type for payload parsing
pub type PayloadResult<T> = Result<T, PayloadError>;

/// Errors raised while turning raw host input into a [`Payload`].
///
/// Only the envelope boundary can fail; normalization past it never does.
///
/// [`Payload`]: super::Payload
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The delivered text is not JSON
    #[error("Invalid payload JSON at line {line}, column {column}: {message}")]
    InvalidJson {
        line: usize,
        column: usize,
        message: String,
    },

    /// The delivered value is JSON but not an envelope object
    #[error("Payload must be a JSON object, got {found}")]
    NotAnObject { found: &'static str },
}

impl From<serde_json::Error> for PayloadError {
    fn from(err: serde_json::Error) -> Self {
        PayloadError::InvalidJson {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}

/// Name of a JSON value's kind for error messages
pub(crate) fn kind_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
