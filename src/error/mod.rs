//! Error types for validation failures and pipe misconfiguration.

mod failure;
mod violation;

pub use failure::{ConfigError, PipeError, ValidationFailure, VALIDATION_FAILED};
pub use violation::{Violation, Violations};
