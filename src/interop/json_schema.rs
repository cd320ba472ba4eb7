//! JSON Schema export.
//!
//! Shapes render themselves through [`ShapeLike::to_json_schema`]; this
//! module wraps those fragments into draft 2020-12 documents for API
//! documentation tooling.
//!
//! [`ShapeLike::to_json_schema`]: crate::ShapeLike::to_json_schema

use serde_json::{json, Map, Value};

/// The dialect every exported document declares.
pub const DIALECT: &str = "https://json-schema.org/draft/2020-12/schema";

/// Wraps named shape schemas into a document under `$defs`.
pub fn document(defs: Map<String, Value>) -> Value {
    json!({
        "$schema": DIALECT,
        "$defs": defs,
    })
}

/// Marks a single shape schema as a standalone document.
pub fn standalone(schema: Value) -> Value {
    let Value::Object(fields) = schema else {
        return schema;
    };
    let mut doc = Map::new();
    doc.insert("$schema".to_string(), json!(DIALECT));
    doc.extend(fields);
    Value::Object(doc)
}
