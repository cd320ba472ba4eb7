//! Boolean shapes.

use serde_json::{json, Value};
use stillwater::Validation;

use crate::error::Violations;
use crate::path::FieldPath;
use crate::validation::ValidationContext;

use super::traits::{invalid_type, ShapeLike};

/// A shape for boolean fields. With primitive coercion on, the strings
/// `"true"` and `"false"` are accepted as well.
#[derive(Clone, Default)]
pub struct BooleanShape {
    type_message: Option<String>,
}

impl BooleanShape {
    /// Creates a boolean shape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the type-check message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.type_message = Some(message.into());
        self
    }
}

impl ShapeLike for BooleanShape {
    fn validate_with_context(
        &self,
        value: &Value,
        path: &FieldPath,
        context: &ValidationContext,
    ) -> Validation<Value, Violations> {
        let coerced = match value {
            Value::Bool(b) => Some(*b),
            Value::String(s) if context.coerce_primitives() => match s.as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        };

        match coerced {
            Some(b) => Validation::Success(Value::Bool(b)),
            None => Validation::Failure(invalid_type(
                path,
                &self.type_message,
                "boolean",
                || format!("{} must be a boolean value", path.field_name()),
                value,
            )),
        }
    }

    fn kind(&self) -> &'static str {
        "boolean"
    }

    fn to_json_schema(&self) -> Value {
        json!({ "type": "boolean" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UnknownFields;

    #[test]
    fn test_plain_booleans() {
        let shape = BooleanShape::new();
        assert_eq!(
            shape.validate(&json!(true), &FieldPath::root()).into_result().unwrap(),
            json!(true)
        );

        let errors = shape
            .validate(&json!("true"), &FieldPath::from_field("active"))
            .into_result()
            .unwrap_err();
        assert_eq!(errors.first().message, "active must be a boolean value");
    }

    #[test]
    fn test_coerced_strings() {
        let shape = BooleanShape::new();
        let context = ValidationContext::new(UnknownFields::Strip, true);

        let result = shape.validate_with_context(&json!("false"), &FieldPath::root(), &context);
        assert_eq!(result.into_result().unwrap(), json!(false));

        let result = shape.validate_with_context(&json!("yes"), &FieldPath::root(), &context);
        assert!(result.is_failure());
    }
}
