//! Tests for route metadata working with the pipe and configuration.

use intake::{
    CurrentUser, PipeConfig, RouteMeta, Shape, ShapeDescriptor, ShapeRegistry, ThrottleLimit,
    UnknownFields, ValidationPipe,
};
use serde_json::json;

fn pipe(config: PipeConfig) -> ValidationPipe {
    let registry = ShapeRegistry::new();
    registry
        .register(
            "CreateUserDto",
            Shape::object()
                .field("name", Shape::string().not_empty())
                .field("email", Shape::string().email()),
        )
        .unwrap();
    ValidationPipe::with_config(registry, config)
}

#[test]
fn test_route_body_descriptor_drives_validation() {
    let route = RouteMeta::new()
        .body(ShapeDescriptor::named("CreateUserDto"))
        .throttle(ThrottleLimit::new(3, 60).unwrap());
    let pipe = pipe(PipeConfig::default());

    let err = pipe
        .validate(Some(json!({"name": "", "email": "x"})), route.body_descriptor())
        .unwrap_err();
    assert!(err.is_client_error());

    let health = RouteMeta::new();
    let passthrough = pipe
        .validate(Some(json!({"anything": 1})), health.body_descriptor())
        .unwrap();
    assert_eq!(passthrough, Some(json!({"anything": 1})));
}

#[test]
fn test_current_user_with_handler_payload() {
    let route = RouteMeta::new().user(CurrentUser::field("email"));
    let request = json!({
        "user": {"id": 1, "email": "a@example.com"},
        "body": {}
    });

    let email = route.current_user().unwrap().extract(&request);
    assert_eq!(email, Some(json!("a@example.com")));
}

#[test]
fn test_toml_config_applies_to_pipe() {
    let config = PipeConfig::from_toml_str(r#"unknown_fields = "reject""#).unwrap();
    assert_eq!(config.unknown_fields, UnknownFields::Reject);

    let err = pipe(config)
        .validate_named(
            "CreateUserDto",
            json!({"name": "a", "email": "a@example.com", "role": "admin"}),
        )
        .unwrap_err();

    let failure = err.as_failure().unwrap();
    assert_eq!(failure.violations.messages(), ["property role should not exist"]);
}

#[test]
fn test_keep_policy_passes_extra_fields() {
    let config = PipeConfig::default().with_unknown_fields(UnknownFields::Keep);
    let validated = pipe(config)
        .validate_named(
            "CreateUserDto",
            json!({"name": "a", "email": "a@example.com", "role": "admin"}),
        )
        .unwrap();

    assert_eq!(validated["role"], "admin");
}
