//! Tests for concurrent use of the pipe and registry.

use intake::{Shape, ShapeDescriptor, ShapeRegistry, ValidationPipe};
use serde_json::json;
use std::sync::Arc;
use std::thread;

fn pipe() -> ValidationPipe {
    let registry = ShapeRegistry::new();
    registry
        .register(
            "CreateUserDto",
            Shape::object()
                .field("name", Shape::string().not_empty())
                .field("email", Shape::string().email()),
        )
        .unwrap();
    ValidationPipe::new(registry)
}

#[test]
fn test_concurrent_validation() {
    let pipe = Arc::new(pipe());
    let descriptor = ShapeDescriptor::named("CreateUserDto");

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let pipe = Arc::clone(&pipe);
            let descriptor = descriptor.clone();
            thread::spawn(move || {
                let payload = if i % 2 == 0 {
                    json!({"name": format!("User{}", i), "email": format!("u{}@example.com", i)})
                } else {
                    json!({"name": "", "email": "broken"})
                };

                let result = pipe.validate(Some(payload), Some(&descriptor));
                if i % 2 == 0 {
                    assert!(result.is_ok());
                } else {
                    assert_eq!(result.unwrap_err().as_failure().unwrap().violations.len(), 2);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_registration_while_validating() {
    let pipe = pipe();
    let registry = pipe.registry().clone();

    let writer = thread::spawn(move || {
        for i in 0..50 {
            registry
                .register(format!("Extra{}", i), Shape::string())
                .unwrap();
        }
    });

    let reader = {
        let pipe = pipe.clone();
        thread::spawn(move || {
            for _ in 0..50 {
                let result = pipe.validate_named(
                    "CreateUserDto",
                    json!({"name": "a", "email": "a@example.com"}),
                );
                assert!(result.is_ok());
            }
        })
    };

    writer.join().unwrap();
    reader.join().unwrap();

    assert_eq!(pipe.registry().len(), 51);
}
