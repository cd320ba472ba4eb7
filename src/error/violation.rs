//! Constraint violations.
//!
//! A [`Violation`] records one constraint failing for one field during one
//! validation call. [`Violations`] is the ordered, never-empty list a failed
//! validation carries.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::FieldPath;

/// One failed constraint.
///
/// - **path**: the offending field
/// - **message**: human-readable text, shown to API clients
/// - **code**: machine-readable constraint name (`not_empty`, `email`, ...)
/// - **got** / **expected**: optional detail for logs and debugging
///
/// # Example
///
/// ```rust
/// use intake::{FieldPath, Violation};
///
/// let violation = Violation::new(FieldPath::from_field("email"), "email must be an email")
///     .with_code("email")
///     .with_got("not-an-email");
///
/// assert_eq!(violation.to_string(), "email: email must be an email (got: not-an-email)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub path: FieldPath,
    pub message: String,
    pub got: Option<String>,
    pub expected: Option<String>,
    pub code: String,
}

impl Violation {
    /// Creates a violation with the generic `constraint` code.
    pub fn new(path: FieldPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            got: None,
            expected: None,
            code: "constraint".to_string(),
        }
    }

    /// Sets the machine-readable constraint code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Records the offending value.
    pub fn with_got(mut self, got: impl Into<String>) -> Self {
        self.got = Some(got.into());
        self
    }

    /// Records what the constraint expected.
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root): {}", self.message)?;
        } else {
            write!(f, "{}: {}", self.path, self.message)?;
        }

        if let Some(ref expected) = self.expected {
            write!(f, " (expected: {})", expected)?;
        }
        if let Some(ref got) = self.got {
            write!(f, " (got: {})", got)?;
        }

        Ok(())
    }
}

impl std::error::Error for Violation {}

/// A non-empty, ordered list of violations.
///
/// Order is the order the shape declares its fields and constraints, so two
/// validations of the same payload report identical lists. Lists from sibling
/// fields are joined with [`Semigroup::combine`], which preserves that order.
///
/// ```rust
/// use intake::{FieldPath, Violation, Violations};
/// use stillwater::prelude::*;
///
/// let name = Violations::single(Violation::new(FieldPath::from_field("name"), "required"));
/// let email = Violations::single(Violation::new(FieldPath::from_field("email"), "invalid"));
///
/// let all = name.combine(email);
/// assert_eq!(all.len(), 2);
/// assert_eq!(all.first().path.to_string(), "name");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Violations(NonEmptyVec<Violation>);

impl Violations {
    /// Wraps one violation.
    pub fn single(violation: Violation) -> Self {
        Self(NonEmptyVec::singleton(violation))
    }

    /// Builds the list from a vec, or returns `None` when the vec is empty.
    pub fn from_vec(violations: Vec<Violation>) -> Option<Self> {
        let mut rest = violations.into_iter();
        let head = rest.next()?;
        let list = rest.fold(NonEmptyVec::singleton(head), |acc, v| {
            acc.combine(NonEmptyVec::singleton(v))
        });
        Some(Self(list))
    }

    /// Number of violations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the list holds at least one violation.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates the violations in order.
    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    /// The first violation reported.
    pub fn first(&self) -> &Violation {
        self.0.head()
    }

    /// Returns the violations reported for `path`, in order.
    pub fn at_path(&self, path: &FieldPath) -> Vec<&Violation> {
        self.0.iter().filter(|v| &v.path == path).collect()
    }

    /// Returns the violations carrying `code`, in order.
    pub fn with_code(&self, code: &str) -> Vec<&Violation> {
        self.0.iter().filter(|v| v.code == code).collect()
    }

    /// Returns just the client-facing messages, in order.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(|v| v.message.clone()).collect()
    }

    /// Consumes the list into a plain vec.
    pub fn into_vec(self) -> Vec<Violation> {
        self.0.into_vec()
    }
}

impl Semigroup for Violations {
    fn combine(self, other: Self) -> Self {
        Violations(self.0.combine(other.0))
    }
}

impl Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", violation.message)?;
        }
        Ok(())
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = Box<dyn Iterator<Item = &'a Violation> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

// Failures cross thread boundaries inside request handlers.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Violations>();
    assert_sync::<Violations>();
};

#[cfg(test)]
mod tests {
    use super::*;

    fn at(field: &str, message: &str) -> Violations {
        Violations::single(Violation::new(FieldPath::from_field(field), message))
    }

    #[test]
    fn test_violation_defaults() {
        let violation = Violation::new(FieldPath::from_field("name"), "name should not be empty");

        assert_eq!(violation.code, "constraint");
        assert!(violation.got.is_none());
        assert!(violation.expected.is_none());
    }

    #[test]
    fn test_violation_display_root() {
        let violation = Violation::new(FieldPath::root(), "value must be an object");
        assert_eq!(violation.to_string(), "(root): value must be an object");
    }

    #[test]
    fn test_violation_display_with_detail() {
        let violation =
            Violation::new(FieldPath::from_field("age"), "age must not be less than 18")
                .with_expected("at least 18")
                .with_got("16");

        assert_eq!(
            violation.to_string(),
            "age: age must not be less than 18 (expected: at least 18) (got: 16)"
        );
    }

    #[test]
    fn test_from_vec_rejects_empty() {
        assert!(Violations::from_vec(Vec::new()).is_none());

        let violations =
            Violations::from_vec(vec![Violation::new(FieldPath::root(), "x")]).unwrap();
        assert_eq!(violations.len(), 1);
        assert!(!violations.is_empty());
    }

    #[test]
    fn test_combine_keeps_order() {
        let combined = at("a", "1").combine(at("b", "2")).combine(at("c", "3"));

        assert_eq!(combined.messages(), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_combine_is_associative() {
        let left = at("a", "1").combine(at("b", "2")).combine(at("c", "3"));
        let right = at("a", "1").combine(at("b", "2").combine(at("c", "3")));

        assert_eq!(left, right);
    }

    #[test]
    fn test_filters() {
        let name = FieldPath::from_field("name");
        let violations = Violations::single(
            Violation::new(name.clone(), "name should not be empty").with_code("not_empty"),
        )
        .combine(Violations::single(
            Violation::new(name.clone(), "name must be longer").with_code("min_length"),
        ))
        .combine(Violations::single(
            Violation::new(FieldPath::from_field("email"), "email must be an email")
                .with_code("email"),
        ));

        assert_eq!(violations.at_path(&name).len(), 2);
        assert_eq!(violations.with_code("email").len(), 1);
        assert!(violations.with_code("pattern").is_empty());
    }

    #[test]
    fn test_display_joins_messages() {
        let violations =
            at("name", "name should not be empty").combine(at("email", "email must be an email"));
        assert_eq!(
            violations.to_string(),
            "name should not be empty; email must be an email"
        );
    }

    #[test]
    fn test_into_iter() {
        let violations = at("a", "1").combine(at("b", "2"));
        let collected: Vec<Violation> = violations.into_iter().collect();
        assert_eq!(collected.len(), 2);
    }
}
