//! The trait every shape implements.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{Violation, Violations};
use crate::path::FieldPath;
use crate::validation::ValidationContext;

/// A declared shape a payload can be validated against.
///
/// Shapes are immutable once built and `Send + Sync`, so a registry can hand
/// the same `Arc<dyn ShapeLike>` to every request.
///
/// # Example
///
/// ```rust
/// use intake::{FieldPath, Shape, ShapeLike};
/// use serde_json::json;
///
/// let shape = Shape::object()
///     .field("name", Shape::string().not_empty())
///     .field("email", Shape::string().email());
///
/// let result = shape.validate(
///     &json!({"name": "John Doe", "email": "john@example.com"}),
///     &FieldPath::root(),
/// );
/// assert!(result.is_success());
/// ```
pub trait ShapeLike: Send + Sync {
    /// Validates `value` under `context`, returning the coerced value or every
    /// violation found.
    fn validate_with_context(
        &self,
        value: &Value,
        path: &FieldPath,
        context: &ValidationContext,
    ) -> Validation<Value, Violations>;

    /// Validates with the default context (strip unknown fields, no
    /// primitive coercion).
    fn validate(&self, value: &Value, path: &FieldPath) -> Validation<Value, Violations> {
        self.validate_with_context(value, path, &ValidationContext::default())
    }

    /// The JSON type this shape accepts (`string`, `number`, `object`, ...).
    fn kind(&self) -> &'static str;

    /// Renders this shape as a JSON Schema (draft 2020-12) fragment.
    fn to_json_schema(&self) -> Value;

    /// Renders the schema as seen by a pipe running under `context`, so
    /// objects inheriting a `reject` policy advertise
    /// `additionalProperties: false`.
    fn to_json_schema_with_context(&self, _context: &ValidationContext) -> Value {
        self.to_json_schema()
    }
}

/// A declared constraint plus the optional message overriding its default text.
#[derive(Clone)]
pub(crate) struct Rule<K> {
    pub(crate) kind: K,
    pub(crate) message: Option<String>,
}

impl<K> Rule<K> {
    pub(crate) fn new(kind: K) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    pub(crate) fn message_or(&self, default: impl FnOnce() -> String) -> String {
        self.message.clone().unwrap_or_else(default)
    }
}

/// Sets the message of the most recently declared rule, or the type message
/// when no rule exists yet.
pub(crate) fn set_last_message<K>(
    rules: &mut [Rule<K>],
    type_message: &mut Option<String>,
    message: String,
) {
    match rules.last_mut() {
        Some(rule) => rule.message = Some(message),
        None => *type_message = Some(message),
    }
}

/// Builds the single violation reported when a value has the wrong JSON type.
pub(crate) fn invalid_type(
    path: &FieldPath,
    type_message: &Option<String>,
    expected: &'static str,
    default: impl FnOnce() -> String,
    value: &Value,
) -> Violations {
    let message = type_message.clone().unwrap_or_else(default);
    Violations::single(
        Violation::new(path.clone(), message)
            .with_code("invalid_type")
            .with_expected(expected)
            .with_got(value_type_name(value)),
    )
}

/// Turns collected violations into a `Validation`, succeeding with `value`
/// only when none were found.
pub(crate) fn finish(value: Value, violations: Vec<Violation>) -> Validation<Value, Violations> {
    match Violations::from_vec(violations) {
        None => Validation::Success(value),
        Some(violations) => Validation::Failure(violations),
    }
}

/// Returns the JSON type name of a value, for `invalid_type` violations.
pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
