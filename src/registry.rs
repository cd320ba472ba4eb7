//! Named shape storage.
//!
//! Routes refer to request DTOs by name. The [`ShapeRegistry`] maps those
//! names to shapes declared once at startup.

use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

use crate::interop::json_schema;
use crate::shape::ShapeLike;
use crate::validation::ValidationContext;

type ShapeMap = Arc<RwLock<HashMap<String, Arc<dyn ShapeLike>>>>;

/// A thread-safe map from shape name to shape.
///
/// Clones share the same storage. Lookups take a shared read lock, so
/// concurrent requests never wait on each other; registration takes the
/// write lock.
///
/// # Example
///
/// ```rust
/// use intake::{Shape, ShapeRegistry};
///
/// let registry = ShapeRegistry::new();
/// registry
///     .register("CreateUserDto", Shape::object()
///         .field("name", Shape::string().not_empty())
///         .field("email", Shape::string().email()))
///     .unwrap();
///
/// assert!(registry.contains("CreateUserDto"));
/// assert!(registry.register("CreateUserDto", Shape::object()).is_err());
/// ```
#[derive(Clone, Default)]
pub struct ShapeRegistry {
    shapes: ShapeMap,
}

impl ShapeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `shape` under `name`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is taken; the
    /// existing shape stays in place.
    pub fn register<S>(&self, name: impl Into<String>, shape: S) -> Result<(), RegistryError>
    where
        S: ShapeLike + 'static,
    {
        self.register_arc(name, Arc::new(shape))
    }

    /// Registers an already shared shape.
    pub fn register_arc(
        &self,
        name: impl Into<String>,
        shape: Arc<dyn ShapeLike>,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        let mut shapes = self.shapes.write();

        if shapes.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        tracing::debug!(shape = %name, kind = shape.kind(), "registered shape");
        shapes.insert(name, shape);
        Ok(())
    }

    /// Looks up a shape by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn ShapeLike>> {
        self.shapes.read().get(name).cloned()
    }

    /// Like [`get`](Self::get), but a missing name is an error.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn ShapeLike>, RegistryError> {
        self.get(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    /// Returns true if a shape is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.shapes.read().contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.shapes.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered shapes.
    pub fn len(&self) -> usize {
        self.shapes.read().len()
    }

    /// Returns true if no shapes are registered.
    pub fn is_empty(&self) -> bool {
        self.shapes.read().is_empty()
    }

    /// Exports every registered shape under `$defs` of one JSON Schema
    /// document, keyed by name in sorted order.
    ///
    /// Objects without their own unknown-field policy are rendered as under
    /// the default `strip` policy. Use
    /// [`to_json_schema_with_context`](Self::to_json_schema_with_context), or
    /// [`ValidationPipe::to_json_schema`](crate::ValidationPipe::to_json_schema),
    /// to match a pipe configured otherwise.
    pub fn to_json_schema(&self) -> Value {
        self.to_json_schema_with_context(&ValidationContext::default())
    }

    /// Exports every registered shape as a pipe running under `context`
    /// validates it.
    pub fn to_json_schema_with_context(&self, context: &ValidationContext) -> Value {
        let shapes = self.shapes.read();
        let mut names: Vec<&String> = shapes.keys().collect();
        names.sort();

        let defs: Map<String, Value> = names
            .into_iter()
            .map(|name| (name.clone(), shapes[name].to_json_schema_with_context(context)))
            .collect();

        json_schema::document(defs)
    }

    /// Exports one shape as a standalone JSON Schema document, or `None` when
    /// the name is not registered.
    pub fn export_shape(&self, name: &str) -> Option<Value> {
        self.get(name)
            .map(|shape| json_schema::standalone(shape.to_json_schema()))
    }
}

/// Errors from registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("shape '{0}' already registered")]
    DuplicateName(String),

    #[error("shape '{0}' not found")]
    NotFound(String),
}
