//! Dispatcher errors.

use thiserror::Error;

/// Errors from the name-keyed dispatcher operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The label is not part of the registry's fixed key set.
    #[error("invalid state '{name}', expected one of: {}", .valid.join(", "))]
    InvalidState {
        name: String,
        valid: Vec<&'static str>,
    },
}
