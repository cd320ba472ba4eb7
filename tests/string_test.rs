//! Integration tests for string shapes.

use intake::{FieldPath, Shape, ShapeLike, Violations};
use serde_json::{json, Value};

/// Helper to extract the violations from a failed validation
fn unwrap_failure(v: stillwater::Validation<Value, Violations>) -> Violations {
    v.into_result().unwrap_err()
}

#[test]
fn test_shape_string_factory() {
    let shape = Shape::string();
    let result = shape.validate(&json!("test"), &FieldPath::root());
    assert_eq!(result.into_result().unwrap(), json!("test"));
}

#[test]
fn test_not_empty_names_the_field() {
    let shape = Shape::string().not_empty();

    let errors = unwrap_failure(shape.validate(&json!(""), &FieldPath::from_field("title")));
    assert_eq!(errors.first().message, "title should not be empty");
    assert_eq!(errors.first().path.to_string(), "title");
}

#[test]
fn test_whitespace_is_not_empty_without_trim() {
    let shape = Shape::string().not_empty();
    assert!(shape.validate(&json!(" "), &FieldPath::root()).is_success());
}

#[test]
fn test_length_messages() {
    let shape = Shape::string().min_len(3).max_len(5);
    let path = FieldPath::from_field("code");

    let errors = unwrap_failure(shape.validate(&json!("ab"), &path));
    assert_eq!(
        errors.first().message,
        "code must be longer than or equal to 3 characters"
    );

    let errors = unwrap_failure(shape.validate(&json!("abcdef"), &path));
    assert_eq!(
        errors.first().message,
        "code must be shorter than or equal to 5 characters"
    );
}

#[test]
fn test_email_accepts_common_addresses() {
    let shape = Shape::string().email();
    for email in [
        "john@example.com",
        "first.last@example.co.uk",
        "user+tag@example.io",
        "UPPER@EXAMPLE.COM",
    ] {
        assert!(
            shape.validate(&json!(email), &FieldPath::root()).is_success(),
            "{email} should be accepted"
        );
    }
}

#[test]
fn test_email_rejects_malformed_addresses() {
    let shape = Shape::string().email();
    for email in [
        "invalid-email",
        "not-an-email",
        "two@@example.com",
        "trailing@example.",
        "space in@example.com",
        "missing-domain@",
    ] {
        assert!(
            shape.validate(&json!(email), &FieldPath::root()).is_failure(),
            "{email} should be rejected"
        );
    }
}

#[test]
fn test_all_rules_accumulate() {
    let shape = Shape::string()
        .min_len(10)
        .pattern(r"^[a-z]+$")
        .unwrap()
        .email();

    let errors = unwrap_failure(shape.validate(&json!("AB"), &FieldPath::root()));
    let codes: Vec<_> = errors.iter().map(|v| v.code.as_str()).collect();
    assert_eq!(codes, ["min_length", "pattern", "email"]);
}

#[test]
fn test_custom_message_applies_to_last_rule_only() {
    let shape = Shape::string()
        .not_empty()
        .email()
        .message("please give a real address");

    let errors = unwrap_failure(shape.validate(&json!(""), &FieldPath::from_field("email")));
    assert_eq!(
        errors.messages(),
        ["email should not be empty", "please give a real address"]
    );
}
