//! Binder error types.

use thiserror::Error;

use crate::validation::ValidationErrors;

/// Errors returned by binder operations.
///
/// Validation failures are normally plain data (see `Binder::validate`);
/// they only become an error through the `*_if_valid` entry points.
#[derive(Debug, Clone, Error)]
pub enum BinderError {
    /// The operation needs a bound bean and none is bound.
    #[error("Binder '{0}' has no bound bean")]
    NotBound(&'static str),

    /// One or more bindings failed validation; nothing was written.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// A `pattern` rule was built from an invalid regular expression.
    #[error("Invalid validation pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
