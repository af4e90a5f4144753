//! Configuration loading from TOML text.

use thiserror::Error;

use crate::config::schema::ParserConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Deserialize and validate a configuration.
pub fn load_config(content: &str) -> Result<ParserConfig, ConfigError> {
    let config: ParserConfig = toml::from_str(content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    tracing::debug!(
        default_method = %config.default_method,
        extra_methods = config.extra_methods.len(),
        strict = config.strict,
        "Parser configuration loaded"
    );
    Ok(config)
}
