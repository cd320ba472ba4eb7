//! # Intake
//!
//! Request payload validation that reports every broken constraint at once.
//!
//! ## Overview
//!
//! A web backend hands intake an untyped payload and the shape the route
//! expects. Intake either returns the payload coerced into that shape, ready
//! to become a typed DTO, or a [`ValidationFailure`] listing every violation
//! in declaration order for a 400 response. Violations accumulate through
//! stillwater's `Validation` type instead of stopping at the first one.
//!
//! ## Core Types
//!
//! - [`Shape`]: builders for declaring shapes and their constraints
//! - [`ShapeRegistry`]: named shapes, declared once at startup
//! - [`ShapeDescriptor`]: what a route says about its payload
//! - [`ValidationPipe`]: the validate/transform entry point
//! - [`PipeError`]: client failures versus configuration mistakes
//!
//! ## Example
//!
//! ```rust
//! use intake::{Primitive, Shape, ShapeDescriptor, ShapeRegistry, ValidationPipe};
//! use serde_json::json;
//!
//! let registry = ShapeRegistry::new();
//! registry
//!     .register("CreateUserDto", Shape::object()
//!         .field("name", Shape::string().not_empty())
//!         .field("email", Shape::string().email()))
//!     .unwrap();
//! let pipe = ValidationPipe::new(registry);
//!
//! // Undeclared parameters pass through untouched
//! let id = ShapeDescriptor::from(Primitive::String);
//! assert_eq!(pipe.validate(Some(json!("42")), Some(&id)).unwrap(), Some(json!("42")));
//!
//! // Declared shapes are enforced
//! let err = pipe
//!     .validate_named("CreateUserDto", json!({"name": "", "email": "invalid-email"}))
//!     .unwrap_err();
//! let failure = err.as_failure().unwrap();
//! assert_eq!(failure.violations.len(), 2);
//! assert_eq!(failure.to_body()["statusCode"], 400);
//! ```

pub mod config;
pub mod descriptor;
pub mod error;
pub mod interop;
pub mod path;
pub mod pipe;
pub mod registry;
pub mod route;
pub mod shape;
pub mod validation;

pub use config::{PipeConfig, UnknownFields};
pub use descriptor::{Primitive, ShapeDescriptor};
pub use error::{
    ConfigError, PipeError, ValidationFailure, Violation, Violations, VALIDATION_FAILED,
};
pub use path::{FieldPath, PathSegment};
pub use pipe::ValidationPipe;
pub use registry::{RegistryError, ShapeRegistry};
pub use route::{CurrentUser, RouteMeta, ThrottleLimit};
pub use shape::{
    ArrayShape, BooleanShape, NumberShape, ObjectShape, Shape, ShapeLike, StringShape,
};
pub use validation::ValidationContext;

/// Type alias for shape validation results.
pub type ValidationResult<T> = stillwater::Validation<T, Violations>;
