//! The validation pipe.
//!
//! [`ValidationPipe`] sits between the routing layer and a request handler.
//! It receives the raw payload and the route's [`ShapeDescriptor`], and
//! either hands back the validated payload or a [`PipeError`] the transport
//! layer turns into a response.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use stillwater::Validation;
use tracing::{debug, warn};

use crate::config::PipeConfig;
use crate::descriptor::ShapeDescriptor;
use crate::error::{PipeError, ValidationFailure};
use crate::path::FieldPath;
use crate::registry::ShapeRegistry;
use crate::shape::ShapeLike;
use crate::validation::ValidationContext;

/// Validates and transforms request payloads.
///
/// The pipe holds no per-request state; clone it freely or share it behind an
/// `Arc` across worker threads.
///
/// # Example
///
/// ```rust
/// use intake::{Shape, ShapeDescriptor, ShapeRegistry, ValidationPipe};
/// use serde::Deserialize;
/// use serde_json::json;
///
/// #[derive(Deserialize)]
/// struct CreateUserDto {
///     name: String,
///     email: String,
/// }
///
/// let registry = ShapeRegistry::new();
/// registry
///     .register("CreateUserDto", Shape::object()
///         .field("name", Shape::string().not_empty())
///         .field("email", Shape::string().email()))
///     .unwrap();
/// let pipe = ValidationPipe::new(registry);
/// let dto = ShapeDescriptor::named("CreateUserDto");
///
/// let user: CreateUserDto = pipe
///     .transform(Some(json!({"name": "John Doe", "email": "john@example.com"})), Some(&dto))
///     .unwrap();
/// assert_eq!(user.name, "John Doe");
///
/// let err = pipe
///     .validate(Some(json!({"name": "", "email": "invalid-email"})), Some(&dto))
///     .unwrap_err();
/// assert_eq!(err.status(), http::StatusCode::BAD_REQUEST);
/// assert_eq!(err.as_failure().unwrap().violations.len(), 2);
/// ```
#[derive(Clone, Default)]
pub struct ValidationPipe {
    registry: ShapeRegistry,
    config: PipeConfig,
}

impl ValidationPipe {
    /// Creates a pipe with the default configuration.
    pub fn new(registry: ShapeRegistry) -> Self {
        Self::with_config(registry, PipeConfig::default())
    }

    /// Creates a pipe with an explicit configuration.
    pub fn with_config(registry: ShapeRegistry, config: PipeConfig) -> Self {
        Self { registry, config }
    }

    /// The registry named descriptors resolve against.
    pub fn registry(&self) -> &ShapeRegistry {
        &self.registry
    }

    /// The configuration every validation runs under.
    pub fn config(&self) -> &PipeConfig {
        &self.config
    }

    /// Validates `raw` against `descriptor`.
    ///
    /// With no descriptor, or a [`Primitive`](crate::Primitive) one, `raw` is
    /// returned unchanged, absent payloads included. Otherwise the payload is
    /// checked against the resolved shape; an absent payload is checked as
    /// `null`. On success the coerced payload is returned.
    ///
    /// # Errors
    ///
    /// - `PipeError::Failed` when the payload breaks any constraint. It
    ///   carries every violation, in declaration order.
    /// - `PipeError::UnknownShape` when a named descriptor is not registered.
    pub fn validate(
        &self,
        raw: Option<Value>,
        descriptor: Option<&ShapeDescriptor>,
    ) -> Result<Option<Value>, PipeError> {
        let Some(shape) = self.resolve(descriptor)? else {
            debug!(descriptor = ?descriptor, "no shape declared; passing payload through");
            return Ok(raw);
        };

        let payload = raw.unwrap_or(Value::Null);
        let context = ValidationContext::from(&self.config);

        match shape.validate_with_context(&payload, &FieldPath::root(), &context) {
            Validation::Success(validated) => {
                debug!(kind = shape.kind(), "payload validated");
                Ok(Some(validated))
            }
            Validation::Failure(violations) => {
                debug!(
                    kind = shape.kind(),
                    violations = violations.len(),
                    "payload rejected"
                );
                Err(ValidationFailure::new(violations).into())
            }
        }
    }

    /// Validates `raw` against the registered shape `name`.
    pub fn validate_named(&self, name: &str, raw: Value) -> Result<Value, PipeError> {
        let descriptor = ShapeDescriptor::named(name);
        let validated = self.validate(Some(raw), Some(&descriptor))?;
        Ok(validated.unwrap_or(Value::Null))
    }

    /// Validates `raw`, then builds a `T` from the validated payload.
    ///
    /// # Errors
    ///
    /// Everything [`validate`](Self::validate) returns, plus
    /// `PipeError::ShapeMismatch` when the validated payload does not
    /// deserialize into `T`.
    pub fn transform<T>(
        &self,
        raw: Option<Value>,
        descriptor: Option<&ShapeDescriptor>,
    ) -> Result<T, PipeError>
    where
        T: DeserializeOwned,
    {
        let validated = self.validate(raw, descriptor)?.unwrap_or(Value::Null);
        serde_json::from_value(validated).map_err(|err| {
            warn!(descriptor = ?descriptor, error = %err, "validated payload does not fit target type");
            PipeError::ShapeMismatch(err)
        })
    }

    /// Exports the registry's shapes as JSON Schema, rendered under this
    /// pipe's unknown-field policy.
    pub fn to_json_schema(&self) -> Value {
        self.registry
            .to_json_schema_with_context(&ValidationContext::from(&self.config))
    }

    fn resolve(
        &self,
        descriptor: Option<&ShapeDescriptor>,
    ) -> Result<Option<Arc<dyn ShapeLike>>, PipeError> {
        match descriptor {
            None | Some(ShapeDescriptor::Primitive(_)) => Ok(None),
            Some(ShapeDescriptor::Inline(shape)) => Ok(Some(Arc::clone(shape))),
            Some(ShapeDescriptor::Named(name)) => {
                self.registry.resolve(name).map(Some).map_err(|err| {
                    warn!(error = %err, "route references an unregistered shape");
                    PipeError::UnknownShape(name.clone())
                })
            }
        }
    }
}
