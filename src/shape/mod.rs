//! Shape descriptors.
//!
//! A shape declares what a payload must look like: its JSON type, its fields
//! and an ordered list of constraints per field. Shapes are plain data built
//! with a builder API and never change after construction.
//!
//! # Example
//!
//! ```rust
//! use intake::{FieldPath, Shape, ShapeLike};
//! use serde_json::json;
//!
//! let create_user = Shape::object()
//!     .field("name", Shape::string().not_empty())
//!     .field("email", Shape::string().email())
//!     .optional("age", Shape::integer().min(0.0));
//!
//! let result = create_user.validate(
//!     &json!({"name": "John Doe", "email": "john@example.com"}),
//!     &FieldPath::root(),
//! );
//! assert!(result.is_success());
//! ```

mod array;
mod boolean;
mod number;
mod object;
mod string;
mod traits;

pub use array::ArrayShape;
pub use boolean::BooleanShape;
pub use number::NumberShape;
pub use object::ObjectShape;
pub use string::StringShape;
pub use traits::ShapeLike;

/// Entry point for declaring shapes.
pub struct Shape;

impl Shape {
    /// Creates a string shape.
    pub fn string() -> StringShape {
        StringShape::new()
    }

    /// Creates a number shape.
    pub fn number() -> NumberShape {
        NumberShape::new()
    }

    /// A number shape that rejects fractional values.
    pub fn integer() -> NumberShape {
        NumberShape::new().integer()
    }

    /// Creates a boolean shape.
    pub fn boolean() -> BooleanShape {
        BooleanShape::new()
    }

    /// A list whose every item must match `items`.
    pub fn array<S>(items: S) -> ArrayShape
    where
        S: ShapeLike + 'static,
    {
        ArrayShape::new(items)
    }

    /// Creates an object shape with no fields.
    pub fn object() -> ObjectShape {
        ObjectShape::new()
    }
}
