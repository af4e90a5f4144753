//! Parser configuration.
//!
//! # Data Flow
//! ```text
//! TOML text
//!     → loader.rs (deserialize)
//!     → validation.rs (semantic checks)
//!     → ParserConfig (validated, immutable)
//!     → Parser::with_config
//! ```
//!
//! # Design Decisions
//! - Config is immutable once a parser is built from it
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::ParserConfig;
pub use validation::{validate_config, ValidationError};
