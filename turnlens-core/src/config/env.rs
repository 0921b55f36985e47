//! Environment variable interpolation for configuration

use super::error::ConfigError;
use regex::Regex;
use std::env;
use std::sync::LazyLock;

static ENV_VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("valid env var pattern"));

/// Interpolate `${VAR}` references in a configuration string
pub fn interpolate_env_vars(content: &str) -> Result<String, ConfigError> {
    let mut missing_vars = Vec::new();

    let result = ENV_VAR_PATTERN.replace_all(content, |cap: &regex::Captures<'_>| {
        match env::var(&cap[1]) {
            Ok(value) => value,
            Err(_) => {
                missing_vars.push(cap[1].to_string());
                String::new()
            }
        }
    });

    // Report the first missing variable
    if let Some(var) = missing_vars.into_iter().next() {
        return Err(ConfigError::EnvVarNotFound { var });
    }

    Ok(result.into_owned())
}

/// Names of all variables referenced in a string
pub fn referenced_env_vars(content: &str) -> Vec<String> {
    ENV_VAR_PATTERN
        .captures_iter(content)
        .map(|cap| cap[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_env_vars() {
        env::set_var("TURNLENS_TEST_SEP", ".");

        let content = "thousands_separator: \"${TURNLENS_TEST_SEP}\"";
        let result = interpolate_env_vars(content).unwrap();
        assert_eq!(result, "thousands_separator: \".\"");

        env::remove_var("TURNLENS_TEST_SEP");
    }

    #[test]
    fn test_missing_env_var() {
        let content = "version: ${TURNLENS_MISSING_VAR}";
        let result = interpolate_env_vars(content);

        if let Err(ConfigError::EnvVarNotFound { var }) = result {
            assert_eq!(var, "TURNLENS_MISSING_VAR");
        } else {
            panic!("Expected EnvVarNotFound error");
        }
    }

    #[test]
    fn test_referenced_env_vars() {
        let vars = referenced_env_vars("a: ${FIRST}, b: ${SECOND}, c: $NOT_BRACED");
        assert_eq!(vars, vec!["FIRST".to_string(), "SECOND".to_string()]);
    }
}
