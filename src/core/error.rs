//! Error types for state values.

use thiserror::Error;

/// A raw value did not pass the [`is_failable`](super::is_failable) guard.
#[derive(Debug, Error)]
pub enum GuardError {
    #[error("expected an object with a `state` field")]
    NotTagged,

    #[error("unrecognized state '{0}'")]
    UnrecognizedState(String),

    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// A pending value was converted into a settled two-state result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("value is still pending")]
pub struct PendingError;

/// A panic caught while running an operation through
/// [`to_result`](super::to_result) or [`to_failable_unwind`](super::to_failable_unwind).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("operation panicked: {message}")]
pub struct PanicError {
    pub message: String,
}
