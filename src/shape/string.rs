//! String shapes.
//!
//! [`StringShape`] checks that a value is a string and applies its declared
//! constraints in order: emptiness, length bounds, regex patterns, email
//! format and allowed values.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{json, Value};
use stillwater::Validation;

use crate::error::{Violation, Violations};
use crate::path::FieldPath;
use crate::validation::ValidationContext;

use super::traits::{finish, invalid_type, set_last_message, Rule, ShapeLike};

/// Local part, `@`, then at least two dot-separated DNS labels.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("email pattern is valid")
});

#[derive(Clone)]
enum StringRule {
    NotEmpty,
    MinLength(usize),
    MaxLength(usize),
    Pattern(Regex),
    Email,
    OneOf(Vec<String>),
}

/// A shape for string fields.
///
/// # Example
///
/// ```rust
/// use intake::{FieldPath, Shape, ShapeLike};
/// use serde_json::json;
///
/// let username = Shape::string()
///     .trim()
///     .not_empty()
///     .max_len(20)
///     .pattern(r"^[a-z0-9_]+$")
///     .unwrap()
///     .message("username may only contain a-z, 0-9 and _");
///
/// let result = username.validate(&json!("  jdoe  "), &FieldPath::from_field("username"));
/// assert_eq!(result.into_result().unwrap(), json!("jdoe"));
/// ```
#[derive(Clone, Default)]
pub struct StringShape {
    rules: Vec<Rule<StringRule>>,
    trim: bool,
    type_message: Option<String>,
}

impl StringShape {
    /// Creates an unconstrained string shape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Trims surrounding whitespace before any constraint runs. The trimmed
    /// string is what validation returns.
    pub fn trim(mut self) -> Self {
        self.trim = true;
        self
    }

    /// Rejects the empty string.
    pub fn not_empty(mut self) -> Self {
        self.rules.push(Rule::new(StringRule::NotEmpty));
        self
    }

    /// Requires at least `min` characters (Unicode scalar values).
    pub fn min_len(mut self, min: usize) -> Self {
        self.rules.push(Rule::new(StringRule::MinLength(min)));
        self
    }

    /// Allows at most `max` characters (Unicode scalar values).
    pub fn max_len(mut self, max: usize) -> Self {
        self.rules.push(Rule::new(StringRule::MaxLength(max)));
        self
    }

    /// Requires a regex match.
    ///
    /// # Errors
    ///
    /// Returns the regex error when `pattern` does not compile, so a broken
    /// shape fails at declaration time rather than per request.
    pub fn pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        self.rules.push(Rule::new(StringRule::Pattern(regex)));
        Ok(self)
    }

    /// Requires a well-formed email address.
    pub fn email(mut self) -> Self {
        self.rules.push(Rule::new(StringRule::Email));
        self
    }

    /// Requires the value to be one of `allowed`.
    pub fn one_of<I, S>(mut self, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed = allowed.into_iter().map(Into::into).collect();
        self.rules.push(Rule::new(StringRule::OneOf(allowed)));
        self
    }

    /// Overrides the message of the constraint declared just before, or of
    /// the type check when called before any constraint.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        set_last_message(&mut self.rules, &mut self.type_message, message.into());
        self
    }
}

impl ShapeLike for StringShape {
    fn validate_with_context(
        &self,
        value: &Value,
        path: &FieldPath,
        _context: &ValidationContext,
    ) -> Validation<Value, Violations> {
        let Some(raw) = value.as_str() else {
            return Validation::Failure(invalid_type(
                path,
                &self.type_message,
                "string",
                || format!("{} must be a string", path.field_name()),
                value,
            ));
        };

        let s = if self.trim { raw.trim() } else { raw };

        let violations = self
            .rules
            .iter()
            .filter_map(|rule| check_rule(rule, s, path))
            .collect();

        finish(Value::String(s.to_string()), violations)
    }

    fn kind(&self) -> &'static str {
        "string"
    }

    fn to_json_schema(&self) -> Value {
        let mut schema = json!({ "type": "string" });
        for rule in &self.rules {
            match &rule.kind {
                StringRule::NotEmpty => schema["minLength"] = json!(1),
                StringRule::MinLength(min) => schema["minLength"] = json!(min),
                StringRule::MaxLength(max) => schema["maxLength"] = json!(max),
                StringRule::Pattern(regex) => schema["pattern"] = json!(regex.as_str()),
                StringRule::Email => schema["format"] = json!("email"),
                StringRule::OneOf(allowed) => schema["enum"] = json!(allowed),
            }
        }
        schema
    }
}

fn check_rule(rule: &Rule<StringRule>, value: &str, path: &FieldPath) -> Option<Violation> {
    let field = path.field_name();
    match &rule.kind {
        StringRule::NotEmpty if value.is_empty() => Some(
            Violation::new(
                path.clone(),
                rule.message_or(|| format!("{} should not be empty", field)),
            )
            .with_code("not_empty")
            .with_expected("non-empty string"),
        ),
        StringRule::MinLength(min) => {
            let len = value.chars().count();
            (len < *min).then(|| {
                Violation::new(
                    path.clone(),
                    rule.message_or(|| {
                        format!("{} must be longer than or equal to {} characters", field, min)
                    }),
                )
                .with_code("min_length")
                .with_expected(format!("at least {} characters", min))
                .with_got(format!("{} characters", len))
            })
        }
        StringRule::MaxLength(max) => {
            let len = value.chars().count();
            (len > *max).then(|| {
                Violation::new(
                    path.clone(),
                    rule.message_or(|| {
                        format!("{} must be shorter than or equal to {} characters", field, max)
                    }),
                )
                .with_code("max_length")
                .with_expected(format!("at most {} characters", max))
                .with_got(format!("{} characters", len))
            })
        }
        StringRule::Pattern(regex) if !regex.is_match(value) => Some(
            Violation::new(
                path.clone(),
                rule.message_or(|| {
                    format!("{} must match {} regular expression", field, regex.as_str())
                }),
            )
            .with_code("pattern")
            .with_expected(format!("string matching '{}'", regex.as_str()))
            .with_got(value),
        ),
        StringRule::Email if !EMAIL.is_match(value) => Some(
            Violation::new(
                path.clone(),
                rule.message_or(|| format!("{} must be an email", field)),
            )
            .with_code("email")
            .with_expected("email address")
            .with_got(value),
        ),
        StringRule::OneOf(allowed) if !allowed.iter().any(|a| a == value) => Some(
            Violation::new(
                path.clone(),
                rule.message_or(|| {
                    format!(
                        "{} must be one of the following values: {}",
                        field,
                        allowed.join(", ")
                    )
                }),
            )
            .with_code("one_of")
            .with_expected(allowed.join(" | "))
            .with_got(value),
        ),
        _ => None,
    }
}
