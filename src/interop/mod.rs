//! Interoperability with other schema formats.

pub mod json_schema;
