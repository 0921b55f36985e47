//! Configuration module for turnlens
//!
//! This module provides the configuration schema and validation for the
//! endpoints that receive host payloads and for display formatting.

mod env;
mod error;
mod schema;
mod validator;

pub use env::{interpolate_env_vars, referenced_env_vars};
pub use error::{ConfigError, ConfigResult, ValidationError, ValidationErrorKind};
pub use schema::{DisplayConfig, EndpointConfig, EndpointsConfig, TurnlensConfig, CONFIG_VERSION};
pub use validator::ConfigValidator;

use std::fs;
use std::path::Path;
use tracing::{debug, trace};

fn read_config(path: &Path) -> ConfigResult<String> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;

    trace!(path = %path.display(), vars = ?env::referenced_env_vars(&content), "Interpolating config");
    env::interpolate_env_vars(&content)
}

fn finish(config: TurnlensConfig, path: &Path) -> ConfigResult<TurnlensConfig> {
    ConfigValidator::new().validate(&config)?;
    debug!(path = %path.display(), version = %config.version, "Loaded turnlens config");
    Ok(config)
}

/// Parse a configuration from a YAML string
pub fn from_yaml_str(content: &str) -> ConfigResult<TurnlensConfig> {
    let interpolated = env::interpolate_env_vars(content)?;
    let config: TurnlensConfig =
        serde_yaml::from_str(&interpolated).map_err(|e| ConfigError::ParseError {
            path: "<inline>".to_string(),
            line: e.location().map(|l| l.line()),
            column: e.location().map(|l| l.column()),
            message: e.to_string(),
        })?;

    ConfigValidator::new().validate(&config)?;
    Ok(config)
}

/// Load a configuration from a YAML file
pub fn load_from_yaml<P: AsRef<Path>>(path: P) -> ConfigResult<TurnlensConfig> {
    let path = path.as_ref();
    let interpolated = read_config(path)?;

    let config: TurnlensConfig =
        serde_yaml::from_str(&interpolated).map_err(|e| ConfigError::ParseError {
            path: path.to_string_lossy().to_string(),
            line: e.location().map(|l| l.line()),
            column: e.location().map(|l| l.column()),
            message: e.to_string(),
        })?;

    finish(config, path)
}

/// Load a configuration from a JSON file
pub fn load_from_json<P: AsRef<Path>>(path: P) -> ConfigResult<TurnlensConfig> {
    let path = path.as_ref();
    let interpolated = read_config(path)?;

    let config: TurnlensConfig =
        serde_json::from_str(&interpolated).map_err(|e| ConfigError::ParseError {
            path: path.to_string_lossy().to_string(),
            line: Some(e.line()),
            column: Some(e.column()),
            message: e.to_string(),
        })?;

    finish(config, path)
}

/// Load a configuration, picking the format from the file extension
pub fn load_from_path<P: AsRef<Path>>(path: P) -> ConfigResult<TurnlensConfig> {
    let path = path.as_ref();
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => load_from_yaml(path),
        Some("json") => load_from_json(path),
        _ => Err(ConfigError::UnsupportedFormat {
            path: path.to_string_lossy().to_string(),
        }),
    }
}
