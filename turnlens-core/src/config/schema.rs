//! Configuration schema structures with serde support

use super::error::{ValidationError, ValidationErrorKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Only supported schema version
pub const CONFIG_VERSION: &str = "0.1";

/// Root configuration structure for turnlens
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TurnlensConfig {
    /// Schema version (required - no default)
    pub version: String,

    /// Acceptance rules for each host endpoint
    #[serde(default)]
    pub endpoints: EndpointsConfig,

    /// Display formatting
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Default for TurnlensConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            endpoints: EndpointsConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

/// Per-endpoint acceptance rules.
///
/// Each section in a config file is laid over that endpoint's built-in
/// rules, so omitted keys keep the endpoint's own defaults.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(from = "EndpointSections")]
pub struct EndpointsConfig {
    /// Annotation queue view: message arrays only
    pub annotation_queue: EndpointConfig,

    /// Dataset view: run outputs and reference outputs
    pub dataset: EndpointConfig,

    /// Medical record view
    pub medical: EndpointConfig,
}

/// `endpoints` as written in a config file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct EndpointSections {
    #[serde(default)]
    annotation_queue: Option<EndpointOverrides>,
    #[serde(default)]
    dataset: Option<EndpointOverrides>,
    #[serde(default)]
    medical: Option<EndpointOverrides>,
}

/// One endpoint section; absent keys fall back to the endpoint's rules
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct EndpointOverrides {
    accept_types: Option<Vec<String>>,
    require_messages: Option<bool>,
}

impl EndpointOverrides {
    fn over(self, base: EndpointConfig) -> EndpointConfig {
        EndpointConfig {
            accept_types: self.accept_types.unwrap_or(base.accept_types),
            require_messages: self.require_messages.unwrap_or(base.require_messages),
        }
    }
}

impl From<EndpointSections> for EndpointsConfig {
    fn from(sections: EndpointSections) -> Self {
        let merge = |section: Option<EndpointOverrides>, base: EndpointConfig| {
            section.unwrap_or_default().over(base)
        };

        Self {
            annotation_queue: merge(sections.annotation_queue, EndpointConfig::annotation_queue()),
            dataset: merge(sections.dataset, EndpointConfig::dataset()),
            medical: merge(sections.medical, EndpointConfig::dataset()),
        }
    }
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            annotation_queue: EndpointConfig::annotation_queue(),
            dataset: EndpointConfig::dataset(),
            medical: EndpointConfig::dataset(),
        }
    }
}

impl EndpointsConfig {
    /// Iterate endpoints with their config path names
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &EndpointConfig)> {
        [
            ("annotation_queue", &self.annotation_queue),
            ("dataset", &self.dataset),
            ("medical", &self.medical),
        ]
        .into_iter()
    }
}

/// Which payloads an endpoint keeps as its latest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointConfig {
    /// Accepted envelope `type` values
    pub accept_types: Vec<String>,

    /// Also require `data.messages` to be present
    pub require_messages: bool,
}

impl EndpointConfig {
    /// Defaults for the annotation queue endpoint
    pub fn annotation_queue() -> Self {
        Self {
            accept_types: vec!["output".to_string()],
            require_messages: true,
        }
    }

    /// Defaults for the dataset and medical endpoints
    pub fn dataset() -> Self {
        Self {
            accept_types: default_accept_types(),
            require_messages: false,
        }
    }

    /// Whether an envelope type is accepted
    pub fn accepts_type(&self, payload_type: &str) -> bool {
        self.accept_types.iter().any(|t| t == payload_type)
    }

    /// Validate endpoint configuration
    pub fn validate(&self, path: &str) -> Result<(), ValidationError> {
        if self.accept_types.is_empty() {
            return Err(ValidationError::required(format!("{}.accept_types", path))
                .with_context("An endpoint must accept at least one payload type"));
        }

        let mut seen = HashSet::new();
        for (i, accepted) in self.accept_types.iter().enumerate() {
            let type_path = format!("{}.accept_types[{}]", path, i);

            if accepted.is_empty() {
                return Err(ValidationError::required(type_path));
            }

            if !seen.insert(accepted) {
                return Err(ValidationError::new(
                    type_path,
                    ValidationErrorKind::DuplicateAcceptType {
                        value: accepted.clone(),
                    },
                ));
            }
        }

        Ok(())
    }
}

/// Display formatting
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    /// Digit group separator for token counts (empty disables grouping)
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            thousands_separator: default_thousands_separator(),
        }
    }
}

// Default value functions for serde
fn default_accept_types() -> Vec<String> {
    vec!["output".to_string(), "reference".to_string()]
}
fn default_thousands_separator() -> String {
    ",".to_string()
}

impl TurnlensConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.version.is_empty() {
            return Err(ValidationError::required("version"));
        }

        if self.version != CONFIG_VERSION {
            return Err(ValidationError::new(
                "version",
                ValidationErrorKind::UnsupportedVersion {
                    expected: CONFIG_VERSION.to_string(),
                    actual: self.version.clone(),
                },
            ));
        }

        for (name, endpoint) in self.endpoints.iter() {
            endpoint.validate(&format!("endpoints.{}", name))?;
        }

        Ok(())
    }
}
