//! Per-route metadata.
//!
//! A route declares, when it is registered, the shape of its body, an
//! optional throttle limit and whether its handler wants the authenticated
//! user. Request-handling middleware reads these values; nothing here
//! enforces a limit or authenticates anyone.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::descriptor::ShapeDescriptor;
use crate::error::ConfigError;

/// A throttle limit: at most `limit` requests per `window_seconds`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleLimit {
    pub limit: u32,
    pub window_seconds: u64,
}

impl ThrottleLimit {
    /// Builds a limit, rejecting zero values.
    pub fn new(limit: u32, window_seconds: u64) -> Result<Self, ConfigError> {
        let throttle = Self {
            limit,
            window_seconds,
        };
        throttle.validate()?;
        Ok(throttle)
    }

    /// Checks a limit that came from deserialization.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limit == 0 {
            return Err(ConfigError::Invalid(
                "throttle limit must be at least 1".to_string(),
            ));
        }
        if self.window_seconds == 0 {
            return Err(ConfigError::Invalid(
                "throttle window must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }
}

/// Pulls the authenticated user out of a request context.
///
/// The authentication layer stores the user under the `user` key of the
/// request context. With `field` set, only that property of the user is
/// extracted.
///
/// ```rust
/// use intake::CurrentUser;
/// use serde_json::json;
///
/// let request = json!({"user": {"id": 7, "email": "a@example.com"}});
///
/// assert_eq!(CurrentUser::whole().extract(&request), Some(json!({"id": 7, "email": "a@example.com"})));
/// assert_eq!(CurrentUser::field("id").extract(&request), Some(json!(7)));
/// assert_eq!(CurrentUser::field("id").extract(&json!({})), None);
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct CurrentUser {
    #[serde(default)]
    pub field: Option<String>,
}

impl CurrentUser {
    /// Extracts the whole user.
    pub fn whole() -> Self {
        Self::default()
    }

    /// Extracts one property of the user.
    pub fn field(name: impl Into<String>) -> Self {
        Self {
            field: Some(name.into()),
        }
    }

    /// Returns the user (or one of its properties), or `None` when the
    /// request carries no user or the property is missing.
    pub fn extract(&self, request: &Value) -> Option<Value> {
        let user = request.get("user").filter(|u| !u.is_null())?;
        match &self.field {
            Some(name) => user.get(name).cloned(),
            None => Some(user.clone()),
        }
    }
}

/// Everything a route declares about its requests.
///
/// ```rust
/// use intake::{CurrentUser, RouteMeta, ShapeDescriptor, ThrottleLimit};
///
/// let meta = RouteMeta::new()
///     .body(ShapeDescriptor::named("CreateUserDto"))
///     .throttle(ThrottleLimit::new(3, 60).unwrap())
///     .user(CurrentUser::field("id"));
///
/// assert_eq!(meta.throttle_limit().unwrap().limit, 3);
/// assert!(meta.body_descriptor().is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteMeta {
    body: Option<ShapeDescriptor>,
    throttle: Option<ThrottleLimit>,
    user: Option<CurrentUser>,
}

impl RouteMeta {
    /// Creates metadata with nothing declared.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the body shape.
    pub fn body(mut self, descriptor: ShapeDescriptor) -> Self {
        self.body = Some(descriptor);
        self
    }

    /// Declares the throttle limit.
    pub fn throttle(mut self, limit: ThrottleLimit) -> Self {
        self.throttle = Some(limit);
        self
    }

    /// Declares that the handler wants the current user.
    pub fn user(mut self, user: CurrentUser) -> Self {
        self.user = Some(user);
        self
    }

    /// The descriptor to validate the body against; `None` means pass-through.
    pub fn body_descriptor(&self) -> Option<&ShapeDescriptor> {
        self.body.as_ref()
    }

    /// The throttle limit, if one was declared.
    pub fn throttle_limit(&self) -> Option<ThrottleLimit> {
        self.throttle
    }

    /// The current-user extraction, if one was declared.
    pub fn current_user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }
}
