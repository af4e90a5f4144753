//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

use crate::config::loader::{load_config, ConfigError};
use crate::request::method::MethodTable;

/// Construction options for a [`Parser`](crate::request::Parser).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Method used when the request line names none.
    pub default_method: String,

    /// Methods recognised in addition to the standard table (e.g. WebDAV).
    pub extra_methods: Vec<String>,

    /// Reject header-section lines that are not comments, directives or
    /// headers. When false they are logged and skipped.
    pub strict: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            default_method: "GET".to_string(),
            extra_methods: Vec::new(),
            strict: true,
        }
    }
}

impl ParserConfig {
    /// Load and validate a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        load_config(content)
    }

    /// Standard methods plus `extra_methods`.
    pub fn method_table(&self) -> MethodTable {
        MethodTable::standard().with_methods(self.extra_methods.iter().cloned())
    }
}
