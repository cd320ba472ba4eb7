//! Array shapes.
//!
//! [`ArrayShape`] checks item counts first, then validates every item against
//! the item shape. Item violations carry indexed paths (`tags[2]`).

use serde_json::{json, Value};
use stillwater::Validation;

use crate::error::{Violation, Violations};
use crate::path::FieldPath;
use crate::validation::ValidationContext;

use super::traits::{finish, invalid_type, set_last_message, Rule, ShapeLike};

#[derive(Clone)]
enum ArrayRule {
    MinItems(usize),
    MaxItems(usize),
}

/// A shape for list fields.
///
/// # Example
///
/// ```rust
/// use intake::{FieldPath, Shape, ShapeLike};
/// use serde_json::json;
///
/// let tags = Shape::array(Shape::string().not_empty()).min_items(1).max_items(5);
///
/// assert!(tags.validate(&json!(["rust"]), &FieldPath::from_field("tags")).is_success());
///
/// let errors = tags
///     .validate(&json!(["rust", ""]), &FieldPath::from_field("tags"))
///     .into_result()
///     .unwrap_err();
/// assert_eq!(errors.first().path.to_string(), "tags[1]");
/// ```
pub struct ArrayShape {
    items: Box<dyn ShapeLike>,
    rules: Vec<Rule<ArrayRule>>,
    type_message: Option<String>,
}

impl ArrayShape {
    /// Creates an array shape whose items must match `items`.
    pub fn new<S>(items: S) -> Self
    where
        S: ShapeLike + 'static,
    {
        Self {
            items: Box::new(items),
            rules: Vec::new(),
            type_message: None,
        }
    }

    /// Requires at least `min` items.
    pub fn min_items(mut self, min: usize) -> Self {
        self.rules.push(Rule::new(ArrayRule::MinItems(min)));
        self
    }

    /// Allows at most `max` items.
    pub fn max_items(mut self, max: usize) -> Self {
        self.rules.push(Rule::new(ArrayRule::MaxItems(max)));
        self
    }

    /// Overrides the message of the constraint declared just before, or of
    /// the type check when called before any constraint.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        set_last_message(&mut self.rules, &mut self.type_message, message.into());
        self
    }
}

impl ShapeLike for ArrayShape {
    fn validate_with_context(
        &self,
        value: &Value,
        path: &FieldPath,
        context: &ValidationContext,
    ) -> Validation<Value, Violations> {
        let Some(items) = value.as_array() else {
            return Validation::Failure(invalid_type(
                path,
                &self.type_message,
                "array",
                || format!("{} must be an array", path.field_name()),
                value,
            ));
        };

        let field = path.field_name();
        let count = items.len();
        let mut violations = Vec::new();

        for rule in &self.rules {
            match rule.kind {
                ArrayRule::MinItems(min) if count < min => violations.push(
                    Violation::new(
                        path.clone(),
                        rule.message_or(|| {
                            format!("{} must contain at least {} elements", field, min)
                        }),
                    )
                    .with_code("min_items")
                    .with_expected(format!("at least {} items", min))
                    .with_got(format!("{} items", count)),
                ),
                ArrayRule::MaxItems(max) if count > max => violations.push(
                    Violation::new(
                        path.clone(),
                        rule.message_or(|| {
                            format!("{} must contain no more than {} elements", field, max)
                        }),
                    )
                    .with_code("max_items")
                    .with_expected(format!("at most {} items", max))
                    .with_got(format!("{} items", count)),
                ),
                _ => {}
            }
        }

        let mut validated = Vec::with_capacity(count);
        for (index, item) in items.iter().enumerate() {
            let item_path = path.push_index(index);
            match self.items.validate_with_context(item, &item_path, context) {
                Validation::Success(v) => validated.push(v),
                Validation::Failure(e) => violations.extend(e),
            }
        }

        finish(Value::Array(validated), violations)
    }

    fn kind(&self) -> &'static str {
        "array"
    }

    fn to_json_schema(&self) -> Value {
        self.to_json_schema_with_context(&ValidationContext::default())
    }

    fn to_json_schema_with_context(&self, context: &ValidationContext) -> Value {
        let mut schema = json!({
            "type": "array",
            "items": self.items.to_json_schema_with_context(context),
        });
        for rule in &self.rules {
            match rule.kind {
                ArrayRule::MinItems(min) => schema["minItems"] = json!(min),
                ArrayRule::MaxItems(max) => schema["maxItems"] = json!(max),
            }
        }
        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{NumberShape, StringShape};

    #[test]
    fn test_rejects_non_array() {
        let shape = ArrayShape::new(StringShape::new());
        let errors = shape
            .validate(&json!("a,b"), &FieldPath::from_field("tags"))
            .into_result()
            .unwrap_err();

        assert_eq!(errors.first().message, "tags must be an array");
    }

    #[test]
    fn test_validates_items_with_indexed_paths() {
        let shape = ArrayShape::new(NumberShape::new().positive());
        let errors = shape
            .validate(&json!([1, -2, 3, 0]), &FieldPath::from_field("ids"))
            .into_result()
            .unwrap_err();

        let paths: Vec<_> = errors.iter().map(|v| v.path.to_string()).collect();
        assert_eq!(paths, ["ids[1]", "ids[3]"]);
    }

    #[test]
    fn test_count_rules_come_before_items() {
        let shape = ArrayShape::new(StringShape::new().not_empty()).max_items(1);
        let errors = shape
            .validate(&json!(["", "b"]), &FieldPath::from_field("tags"))
            .into_result()
            .unwrap_err();

        let codes: Vec<_> = errors.iter().map(|v| v.code.as_str()).collect();
        assert_eq!(codes, ["max_items", "not_empty"]);
    }

    #[test]
    fn test_returns_coerced_items() {
        let shape = ArrayShape::new(StringShape::new().trim());
        let result = shape.validate(&json!([" a ", "b "]), &FieldPath::root());
        assert_eq!(result.into_result().unwrap(), json!(["a", "b"]));
    }

    #[test]
    fn test_json_schema() {
        let shape = ArrayShape::new(StringShape::new()).min_items(1);
        assert_eq!(
            shape.to_json_schema(),
            json!({"type": "array", "items": {"type": "string"}, "minItems": 1})
        );
    }
}
