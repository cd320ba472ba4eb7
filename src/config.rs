//! Pipe configuration.
//!
//! Settings load from TOML:
//!
//! ```toml
//! unknown_fields = "reject"
//! coerce_primitives = true
//! ```
//!
//! Missing keys fall back to [`PipeConfig::default`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// What to do with object keys a shape does not declare.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnknownFields {
    /// Drop them from the validated output.
    #[default]
    Strip,
    /// Report each one as an `unknown_field` violation.
    Reject,
    /// Copy them into the output without validating them.
    Keep,
}

/// Pipe-wide validation settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(default, deny_unknown_fields)]
pub struct PipeConfig {
    pub unknown_fields: UnknownFields,
    pub coerce_primitives: bool,
}

impl PipeConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Reads and parses a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Sets the pipe-wide unknown-field policy.
    pub fn with_unknown_fields(mut self, policy: UnknownFields) -> Self {
        self.unknown_fields = policy;
        self
    }

    /// Enables or disables parsing of numeric and boolean strings.
    pub fn with_coerce_primitives(mut self, coerce: bool) -> Self {
        self.coerce_primitives = coerce;
        self
    }
}
