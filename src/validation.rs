//! Per-call validation settings.
//!
//! [`ValidationContext`] carries the pipe-wide policies down through nested
//! shapes so an object five levels deep applies the same unknown-field and
//! coercion rules as the top-level payload.

use crate::config::{PipeConfig, UnknownFields};

/// Settings consulted by shapes while validating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationContext {
    unknown_fields: UnknownFields,
    coerce_primitives: bool,
}

impl ValidationContext {
    /// Creates a context from an unknown-field policy and the coercion flag.
    pub fn new(unknown_fields: UnknownFields, coerce_primitives: bool) -> Self {
        Self {
            unknown_fields,
            coerce_primitives,
        }
    }

    /// Policy for object keys no shape declares, unless the object overrides it.
    pub fn unknown_fields(&self) -> UnknownFields {
        self.unknown_fields
    }

    /// Whether number and boolean shapes accept their string spellings
    /// (`"42"`, `"true"`), as query and path parameters arrive as text.
    pub fn coerce_primitives(&self) -> bool {
        self.coerce_primitives
    }
}

impl From<&PipeConfig> for ValidationContext {
    fn from(config: &PipeConfig) -> Self {
        Self::new(config.unknown_fields, config.coerce_primitives)
    }
}
