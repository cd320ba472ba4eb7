//! Errors surfaced by the validation pipe.
//!
//! The pipe distinguishes two kinds of failure. A [`ValidationFailure`] is the
//! client's fault and becomes a 400 response. Everything else in
//! [`PipeError`] is a developer mistake in how shapes were declared or wired
//! and becomes a 500.

use http::StatusCode;
use serde_json::{json, Value};

use super::violation::Violations;

/// Summary message carried by every [`ValidationFailure`].
pub const VALIDATION_FAILED: &str = "Validation failed";

/// A payload broke one or more declared constraints.
///
/// # Example
///
/// ```rust
/// use intake::{FieldPath, ValidationFailure, Violation, Violations};
///
/// let failure = ValidationFailure::new(Violations::single(
///     Violation::new(FieldPath::from_field("name"), "name should not be empty"),
/// ));
///
/// assert_eq!(failure.status(), http::StatusCode::BAD_REQUEST);
/// assert!(failure.to_string().starts_with("Validation failed"));
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}: {violations}")]
pub struct ValidationFailure {
    pub message: String,
    pub violations: Violations,
}

impl ValidationFailure {
    /// Wraps violations under the `Validation failed` message.
    pub fn new(violations: Violations) -> Self {
        Self {
            message: VALIDATION_FAILED.to_string(),
            violations,
        }
    }

    /// Always `400 Bad Request`.
    pub fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    /// Renders the response body the transport layer sends back.
    ///
    /// ```json
    /// {"statusCode": 400, "message": ["name should not be empty"], "error": "Bad Request"}
    /// ```
    pub fn to_body(&self) -> Value {
        let status = self.status();
        json!({
            "statusCode": status.as_u16(),
            "message": self.violations.messages(),
            "error": status.canonical_reason().unwrap_or("Bad Request"),
        })
    }
}

/// Everything `ValidationPipe` can fail with.
#[derive(Debug, thiserror::Error)]
pub enum PipeError {
    /// The payload broke declared constraints.
    #[error(transparent)]
    Failed(#[from] ValidationFailure),

    /// A route referenced a shape name nobody registered.
    #[error("shape '{0}' is not registered")]
    UnknownShape(String),

    /// The payload passed validation but could not be turned into the
    /// requested type, so the shape and the type disagree.
    #[error("validated payload does not fit the target type: {0}")]
    ShapeMismatch(#[source] serde_json::Error),
}

impl PipeError {
    /// True for failures the client caused.
    pub fn is_client_error(&self) -> bool {
        matches!(self, PipeError::Failed(_))
    }

    /// Returns the validation failure, if this is one.
    pub fn as_failure(&self) -> Option<&ValidationFailure> {
        match self {
            PipeError::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// HTTP status for the response: 400 for client failures, 500 otherwise.
    pub fn status(&self) -> StatusCode {
        match self {
            PipeError::Failed(failure) => failure.status(),
            PipeError::UnknownShape(_) | PipeError::ShapeMismatch(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Errors raised while loading or checking configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
