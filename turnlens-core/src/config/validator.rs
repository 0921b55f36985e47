//! Configuration validation utilities

use super::error::{ValidationError, ValidationErrorKind};
use super::schema::TurnlensConfig;
use regex::Regex;

/// Configuration validator with additional validation rules
pub struct ConfigValidator {
    /// Pattern accepted for envelope type names
    type_name_pattern: Regex,
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigValidator {
    /// Create a new validator
    pub fn new() -> Self {
        Self {
            type_name_pattern: Regex::new(r"^[a-z][a-z0-9_-]*$").expect("valid type name pattern"),
        }
    }

    /// Validate a configuration with extended rules
    pub fn validate(&self, config: &TurnlensConfig) -> Result<(), ValidationError> {
        // First run the built-in validation
        config.validate()?;

        self.validate_type_names(config)?;
        self.validate_display(config)?;

        Ok(())
    }

    /// Envelope types are lowercase identifiers as the host sends them
    fn validate_type_names(&self, config: &TurnlensConfig) -> Result<(), ValidationError> {
        for (name, endpoint) in config.endpoints.iter() {
            for (i, accepted) in endpoint.accept_types.iter().enumerate() {
                if !self.is_valid_type_name(accepted) {
                    return Err(ValidationError::new(
                        format!("endpoints.{}.accept_types[{}]", name, i),
                        ValidationErrorKind::InvalidTypeName {
                            value: accepted.clone(),
                        },
                    ));
                }
            }
        }

        Ok(())
    }

    fn validate_display(&self, config: &TurnlensConfig) -> Result<(), ValidationError> {
        let chars = config.display.thousands_separator.chars().count();
        if chars > 1 {
            return Err(ValidationError::new(
                "display.thousands_separator",
                ValidationErrorKind::SeparatorTooLong { chars },
            )
            .with_context("Use an empty string to disable grouping"));
        }

        Ok(())
    }

    /// Check an envelope type name
    pub fn is_valid_type_name(&self, name: &str) -> bool {
        self.type_name_pattern.is_match(name)
    }
}
