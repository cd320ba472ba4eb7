//! Numeric shapes.
//!
//! [`NumberShape`] accepts JSON numbers and, when the pipe coerces
//! primitives, their string spellings. Bounds are inclusive.

use serde_json::{json, Number, Value};
use stillwater::Validation;

use crate::error::{Violation, Violations};
use crate::path::FieldPath;
use crate::validation::ValidationContext;

use super::traits::{finish, invalid_type, set_last_message, Rule, ShapeLike};

#[derive(Clone)]
enum NumberRule {
    Min(f64),
    Max(f64),
    Positive,
    NonNegative,
    Integer,
}

/// A shape for numeric fields.
///
/// # Example
///
/// ```rust
/// use intake::{FieldPath, Shape, ShapeLike};
/// use serde_json::json;
///
/// let age = Shape::integer().min(18.0).max(130.0);
///
/// assert!(age.validate(&json!(42), &FieldPath::from_field("age")).is_success());
/// assert!(age.validate(&json!(16), &FieldPath::from_field("age")).is_failure());
/// assert!(age.validate(&json!(42.5), &FieldPath::from_field("age")).is_failure());
/// ```
#[derive(Clone, Default)]
pub struct NumberShape {
    rules: Vec<Rule<NumberRule>>,
    type_message: Option<String>,
}

impl NumberShape {
    /// Creates an unconstrained number shape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inclusive lower bound.
    pub fn min(mut self, min: f64) -> Self {
        self.rules.push(Rule::new(NumberRule::Min(min)));
        self
    }

    /// Inclusive upper bound.
    pub fn max(mut self, max: f64) -> Self {
        self.rules.push(Rule::new(NumberRule::Max(max)));
        self
    }

    /// Requires a value greater than zero.
    pub fn positive(mut self) -> Self {
        self.rules.push(Rule::new(NumberRule::Positive));
        self
    }

    /// Requires a value of zero or more.
    pub fn non_negative(mut self) -> Self {
        self.rules.push(Rule::new(NumberRule::NonNegative));
        self
    }

    /// Rejects values with a fractional part. Integral floats such as `2.0`
    /// validate to integers.
    pub fn integer(mut self) -> Self {
        self.rules.push(Rule::new(NumberRule::Integer));
        self
    }

    /// Overrides the message of the constraint declared just before, or of
    /// the type check when called before any constraint.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        set_last_message(&mut self.rules, &mut self.type_message, message.into());
        self
    }

    fn is_integer(&self) -> bool {
        self.rules
            .iter()
            .any(|rule| matches!(rule.kind, NumberRule::Integer))
    }
}

impl ShapeLike for NumberShape {
    fn validate_with_context(
        &self,
        value: &Value,
        path: &FieldPath,
        context: &ValidationContext,
    ) -> Validation<Value, Violations> {
        let coerced = match value {
            Value::Number(_) => Some(value.clone()),
            Value::String(s) if context.coerce_primitives() => parse_number(s),
            _ => None,
        };
        let Some(number) = coerced else {
            return Validation::Failure(invalid_type(
                path,
                &self.type_message,
                "number",
                || format!("{} must be a number", path.field_name()),
                value,
            ));
        };
        // Every JSON number converts to f64.
        let n = number.as_f64().unwrap_or_default();

        let violations: Vec<Violation> = self
            .rules
            .iter()
            .filter_map(|rule| check_rule(rule, n, path))
            .collect();

        if violations.is_empty() && self.is_integer() {
            return Validation::Success(integral(number, n));
        }
        finish(number, violations)
    }

    fn kind(&self) -> &'static str {
        if self.is_integer() {
            "integer"
        } else {
            "number"
        }
    }

    fn to_json_schema(&self) -> Value {
        let mut schema = json!({ "type": self.kind() });
        for rule in &self.rules {
            match rule.kind {
                NumberRule::Min(min) => schema["minimum"] = json!(min),
                NumberRule::Max(max) => schema["maximum"] = json!(max),
                NumberRule::Positive => schema["exclusiveMinimum"] = json!(0),
                NumberRule::NonNegative => schema["minimum"] = json!(0),
                NumberRule::Integer => {}
            }
        }
        schema
    }
}

/// Parses the text of a query or path parameter. Integral text stays an
/// integer so `"42"` validates to `42`, not `42.0`.
fn parse_number(text: &str) -> Option<Value> {
    let text = text.trim();
    if let Ok(i) = text.parse::<i64>() {
        return Some(Value::Number(i.into()));
    }
    if let Ok(u) = text.parse::<u64>() {
        return Some(Value::Number(u.into()));
    }
    let f = text.parse::<f64>().ok()?;
    Number::from_f64(f).map(Value::Number)
}

/// Rewrites an integral float such as `2.0` or `1e3` as an integer number,
/// so it deserializes into integer fields.
fn integral(number: Value, n: f64) -> Value {
    if number.is_i64() || number.is_u64() {
        return number;
    }
    if n >= i64::MIN as f64 && n < i64::MAX as f64 {
        Value::Number((n as i64).into())
    } else if n >= 0.0 && n < u64::MAX as f64 {
        Value::Number((n as u64).into())
    } else {
        number
    }
}

fn check_rule(rule: &Rule<NumberRule>, value: f64, path: &FieldPath) -> Option<Violation> {
    let field = path.field_name();
    let (code, message, expected) = match rule.kind {
        NumberRule::Min(min) if value < min => (
            "min_value",
            rule.message_or(|| format!("{} must not be less than {}", field, min)),
            format!("at least {}", min),
        ),
        NumberRule::Max(max) if value > max => (
            "max_value",
            rule.message_or(|| format!("{} must not be greater than {}", field, max)),
            format!("at most {}", max),
        ),
        NumberRule::Positive if value <= 0.0 => (
            "positive",
            rule.message_or(|| format!("{} must be a positive number", field)),
            "value > 0".to_string(),
        ),
        NumberRule::NonNegative if value < 0.0 => (
            "non_negative",
            rule.message_or(|| format!("{} must not be less than 0", field)),
            "value >= 0".to_string(),
        ),
        NumberRule::Integer if value.fract() != 0.0 => (
            "integer",
            rule.message_or(|| format!("{} must be an integer number", field)),
            "integer".to_string(),
        ),
        _ => return None,
    };

    Some(
        Violation::new(path.clone(), message)
            .with_code(code)
            .with_expected(expected)
            .with_got(value.to_string()),
    )
}
