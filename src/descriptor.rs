//! Shape descriptors as routes hand them to the pipe.

use std::fmt;
use std::sync::Arc;

use crate::shape::ShapeLike;

/// Built-in parameter types that carry no declared shape.
///
/// Routing layers attach one of these to parameters declared as a plain
/// string, number and so on. The pipe passes such payloads through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    String,
    Number,
    Boolean,
    Array,
    Object,
}

/// What a route says about the payload it expects.
///
/// An absent descriptor (`None` at the call site) also means pass-through.
#[derive(Clone)]
pub enum ShapeDescriptor {
    /// A built-in type with no declared constraints.
    Primitive(Primitive),
    /// A shape registered in the pipe's [`ShapeRegistry`](crate::ShapeRegistry).
    Named(String),
    /// A shape owned by the route itself.
    Inline(Arc<dyn ShapeLike>),
}

impl ShapeDescriptor {
    /// Refers to a shape registered under `name`.
    pub fn named(name: impl Into<String>) -> Self {
        ShapeDescriptor::Named(name.into())
    }

    /// Attaches a shape directly to the route.
    pub fn inline<S>(shape: S) -> Self
    where
        S: ShapeLike + 'static,
    {
        ShapeDescriptor::Inline(Arc::new(shape))
    }

    /// True when validating against this descriptor returns the payload
    /// unchanged.
    pub fn is_passthrough(&self) -> bool {
        matches!(self, ShapeDescriptor::Primitive(_))
    }
}

impl From<Primitive> for ShapeDescriptor {
    fn from(primitive: Primitive) -> Self {
        ShapeDescriptor::Primitive(primitive)
    }
}

impl fmt::Debug for ShapeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeDescriptor::Primitive(p) => f.debug_tuple("Primitive").field(p).finish(),
            ShapeDescriptor::Named(name) => f.debug_tuple("Named").field(name).finish(),
            ShapeDescriptor::Inline(shape) => {
                f.debug_tuple("Inline").field(&shape.kind()).finish()
            }
        }
    }
}
