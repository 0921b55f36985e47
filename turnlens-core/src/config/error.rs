//! Errors raised while loading and checking a turnlens config file

use thiserror::Error;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Failure to produce a usable [`TurnlensConfig`].
///
/// [`TurnlensConfig`]: super::TurnlensConfig
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Syntax or schema mismatch reported by the YAML/JSON deserializer
    #[error("Config '{path}' is malformed near {}:{}: {message}",
            .line.unwrap_or(0), .column.unwrap_or(0))]
    ParseError {
        path: String,
        line: Option<usize>,
        column: Option<usize>,
        message: String,
    },

    #[error(transparent)]
    ValidationError(#[from] ValidationError),

    #[error("Config references unset environment variable '{var}'")]
    EnvVarNotFound { var: String },

    #[error("Config '{path}' needs a .yaml, .yml or .json extension")]
    UnsupportedFormat { path: String },
}

/// A config that parsed but breaks a rule, located by its field path
#[derive(Debug, Error)]
#[error("Invalid config at '{field_path}': {kind}{}",
        .context.as_ref().map(|c| format!(" ({})", c)).unwrap_or_default())]
pub struct ValidationError {
    /// Dotted path with list indices, e.g. `endpoints.dataset.accept_types[1]`
    pub field_path: String,
    pub kind: ValidationErrorKind,
    pub context: Option<String>,
}

#[derive(Debug, Error)]
pub enum ValidationErrorKind {
    #[error("value is required")]
    RequiredFieldMissing,

    #[error("version {actual} is not supported, expected {expected}")]
    UnsupportedVersion { expected: String, actual: String },

    #[error("payload type '{value}' is listed more than once")]
    DuplicateAcceptType { value: String },

    #[error("'{value}' is not a lowercase payload type name")]
    InvalidTypeName { value: String },

    #[error("separator must be at most one character, got {chars}")]
    SeparatorTooLong { chars: usize },
}

impl ValidationError {
    pub fn new(field_path: impl Into<String>, kind: ValidationErrorKind) -> Self {
        Self {
            field_path: field_path.into(),
            kind,
            context: None,
        }
    }

    /// Attach a human-readable hint
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn required(field_path: impl Into<String>) -> Self {
        Self::new(field_path, ValidationErrorKind::RequiredFieldMissing)
    }
}
