//! Object shapes, the descriptors of request DTOs.
//!
//! [`ObjectShape`] holds its fields in declaration order. Validation walks
//! them in that order, then deals with keys the shape does not declare
//! according to the [`UnknownFields`] policy, so violation lists come out
//! the same way on every call.

use indexmap::IndexMap;
use serde_json::{json, Map, Value};
use stillwater::Validation;

use crate::config::UnknownFields;
use crate::error::{Violation, Violations};
use crate::path::FieldPath;
use crate::validation::ValidationContext;

use super::traits::{finish, invalid_type, ShapeLike};

/// A declared field of an object shape.
struct FieldDef {
    shape: Box<dyn ShapeLike>,
    required: bool,
    default: Option<Value>,
}

/// A shape for JSON objects.
///
/// Missing and `null` values are treated alike: a required field reports a
/// `required` violation, an optional one is left out, and a defaulted one
/// takes its default.
///
/// # Example
///
/// ```rust
/// use intake::{FieldPath, Shape, ShapeLike};
/// use serde_json::json;
///
/// let create_user = Shape::object()
///     .field("name", Shape::string().not_empty())
///     .field("email", Shape::string().email())
///     .optional("nickname", Shape::string())
///     .with_default("role", Shape::string().one_of(["user", "admin"]), json!("user"));
///
/// let result = create_user.validate(
///     &json!({"name": "", "email": "invalid-email", "admin": true}),
///     &FieldPath::root(),
/// );
///
/// let violations = result.into_result().unwrap_err();
/// assert_eq!(
///     violations.messages(),
///     ["name should not be empty", "email must be an email"]
/// );
/// ```
pub struct ObjectShape {
    fields: IndexMap<String, FieldDef>,
    unknown_fields: Option<UnknownFields>,
    type_message: Option<String>,
}

impl ObjectShape {
    /// Creates an object shape with no fields.
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
            unknown_fields: None,
            type_message: None,
        }
    }

    /// Declares a required field.
    pub fn field<S>(self, name: impl Into<String>, shape: S) -> Self
    where
        S: ShapeLike + 'static,
    {
        self.insert(name.into(), Box::new(shape), true, None)
    }

    /// Declares a field that may be absent or `null`.
    pub fn optional<S>(self, name: impl Into<String>, shape: S) -> Self
    where
        S: ShapeLike + 'static,
    {
        self.insert(name.into(), Box::new(shape), false, None)
    }

    /// Declares a field that takes `default` when absent or `null`. The
    /// default is inserted as is, without running the field's constraints.
    pub fn with_default<S>(self, name: impl Into<String>, shape: S, default: Value) -> Self
    where
        S: ShapeLike + 'static,
    {
        self.insert(name.into(), Box::new(shape), false, Some(default))
    }

    /// Overrides the pipe-wide policy for undeclared keys on this object.
    pub fn unknown_fields(mut self, policy: UnknownFields) -> Self {
        self.unknown_fields = Some(policy);
        self
    }

    /// Overrides the message reported when the value is not an object.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.type_message = Some(message.into());
        self
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    // Redeclaring a name replaces the shape but keeps its original position.
    fn insert(
        mut self,
        name: String,
        shape: Box<dyn ShapeLike>,
        required: bool,
        default: Option<Value>,
    ) -> Self {
        self.fields.insert(
            name,
            FieldDef {
                shape,
                required,
                default,
            },
        );
        self
    }
}

impl Default for ObjectShape {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeLike for ObjectShape {
    fn validate_with_context(
        &self,
        value: &Value,
        path: &FieldPath,
        context: &ValidationContext,
    ) -> Validation<Value, Violations> {
        let Some(obj) = value.as_object() else {
            return Validation::Failure(invalid_type(
                path,
                &self.type_message,
                "object",
                || format!("{} must be an object", path.field_name()),
                value,
            ));
        };

        let mut violations = Vec::new();
        let mut validated = Map::new();

        for (name, def) in &self.fields {
            let field_path = path.push_field(name);

            match obj.get(name).filter(|v| !v.is_null()) {
                Some(field_value) => {
                    match def.shape.validate_with_context(field_value, &field_path, context) {
                        Validation::Success(v) => {
                            validated.insert(name.clone(), v);
                        }
                        Validation::Failure(e) => violations.extend(e),
                    }
                }
                None if def.required => violations.push(
                    Violation::new(field_path, format!("{} should not be null or undefined", name))
                        .with_code("required")
                        .with_expected(def.shape.kind()),
                ),
                None => {
                    if let Some(default) = &def.default {
                        validated.insert(name.clone(), default.clone());
                    }
                }
            }
        }

        let policy = self.unknown_fields.unwrap_or(context.unknown_fields());
        for (key, extra) in obj {
            if self.fields.contains_key(key) {
                continue;
            }
            match policy {
                UnknownFields::Strip => {}
                UnknownFields::Keep => {
                    validated.insert(key.clone(), extra.clone());
                }
                UnknownFields::Reject => violations.push(
                    Violation::new(path.push_field(key), format!("property {} should not exist", key))
                        .with_code("unknown_field"),
                ),
            }
        }

        finish(Value::Object(validated), violations)
    }

    fn kind(&self) -> &'static str {
        "object"
    }

    fn to_json_schema(&self) -> Value {
        self.to_json_schema_with_context(&ValidationContext::default())
    }

    fn to_json_schema_with_context(&self, context: &ValidationContext) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|(name, def)| {
                let mut schema = def.shape.to_json_schema_with_context(context);
                if let Some(default) = &def.default {
                    schema["default"] = default.clone();
                }
                (name.clone(), schema)
            })
            .collect();
        let required: Vec<&str> = self
            .fields
            .iter()
            .filter(|(_, def)| def.required)
            .map(|(name, _)| name.as_str())
            .collect();

        let mut schema = json!({
            "type": "object",
            "properties": properties,
        });
        if !required.is_empty() {
            schema["required"] = json!(required);
        }
        if self.unknown_fields.unwrap_or(context.unknown_fields()) == UnknownFields::Reject {
            schema["additionalProperties"] = json!(false);
        }
        schema
    }
}
