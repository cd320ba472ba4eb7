//! Tests for shape registry operations.

use intake::{RegistryError, Shape, ShapeLike, ShapeRegistry};

#[test]
fn test_register_and_lookup() {
    let registry = ShapeRegistry::new();
    registry
        .register("CreateUserDto", Shape::object().field("name", Shape::string()))
        .unwrap();

    assert!(registry.contains("CreateUserDto"));
    assert_eq!(registry.get("CreateUserDto").unwrap().kind(), "object");
    assert!(registry.get("UpdateUserDto").is_none());
}

#[test]
fn test_duplicate_registration_fails() {
    let registry = ShapeRegistry::new();
    registry.register("Dto", Shape::string()).unwrap();

    let result = registry.register("Dto", Shape::number());
    assert!(matches!(result, Err(RegistryError::DuplicateName(_))));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_resolve_reports_missing_name() {
    let registry = ShapeRegistry::new();
    assert!(matches!(
        registry.resolve("Ghost"),
        Err(RegistryError::NotFound(ref name)) if name == "Ghost"
    ));
}

#[test]
fn test_names_are_sorted() {
    let registry = ShapeRegistry::new();
    for name in ["UpdateUserDto", "CreateUserDto", "LoginDto"] {
        registry.register(name, Shape::object()).unwrap();
    }

    assert_eq!(
        registry.names(),
        ["CreateUserDto", "LoginDto", "UpdateUserDto"]
    );
}

#[test]
fn test_empty_registry() {
    let registry = ShapeRegistry::default();
    assert!(registry.is_empty());
    assert!(registry.names().is_empty());
}
