//! Configuration validation.
//!
//! # Responsibilities
//! - Method names must be RFC 9110 tokens
//! - The default method must be one the parser recognises
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ParserConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::ParserConfig;
use crate::request::method::is_token;

/// A single semantic problem in a [`ParserConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("default_method `{0}` is not a valid method token")]
    InvalidDefaultMethod(String),

    #[error("default_method `{0}` is not a recognised method")]
    UnknownDefaultMethod(String),

    #[error("extra_methods[{index}] `{name}` is not a valid method token")]
    InvalidExtraMethod { index: usize, name: String },
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &ParserConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (index, name) in config.extra_methods.iter().enumerate() {
        if !is_token(name) {
            errors.push(ValidationError::InvalidExtraMethod {
                index,
                name: name.clone(),
            });
        }
    }

    if !is_token(&config.default_method) {
        errors.push(ValidationError::InvalidDefaultMethod(
            config.default_method.clone(),
        ));
    } else if !config.method_table().contains(&config.default_method) {
        errors.push(ValidationError::UnknownDefaultMethod(
            config.default_method.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
