//! The three-state `Failable` value and its constructors.

use super::error::{PanicError, PendingError};
use super::keys::FailableState;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::panic::{self, UnwindSafe};

/// The outcome of an operation that may still be in flight.
///
/// A `Failable` is either `Pending` with no payload, `Success` carrying a
/// value, or `Failure` carrying an error. Values never change in place; a
/// transition builds a new value.
///
/// Serialized form carries an explicit discriminant:
/// `{"state": "success", "data": 42}`, `{"state": "pending"}`.
///
/// # Example
///
/// ```rust
/// use failable::{failure, pending, success, Failable};
///
/// let loaded: Failable<u32, String> = success(7);
/// assert!(loaded.is_success());
/// assert_eq!(loaded.value(), Some(&7));
///
/// let broken: Failable<u32, String> = failure("offline".to_string());
/// assert!(broken.is_failure());
///
/// let waiting: Failable<u32, String> = pending();
/// assert!(waiting.is_pending());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(tag = "state", content = "data", rename_all = "lowercase")]
pub enum Failable<T, E> {
    Pending,
    Success(T),
    Failure(E),
}

/// Wrap a value as a success.
pub fn success<T, E>(value: T) -> Failable<T, E> {
    Failable::Success(value)
}

/// Wrap an error as a failure.
pub fn failure<T, E>(error: E) -> Failable<T, E> {
    Failable::Failure(error)
}

/// The pending value.
pub fn pending<T, E>() -> Failable<T, E> {
    Failable::Pending
}

/// Run a fallible operation and capture its outcome.
///
/// `Ok` becomes a success and `Err` a failure holding the very same error.
/// Never produces a pending value.
///
/// # Example
///
/// ```rust
/// use failable::to_failable;
///
/// let parsed = to_failable(|| "42".parse::<i32>());
/// assert_eq!(parsed.value(), Some(&42));
///
/// let rejected = to_failable(|| "forty-two".parse::<i32>());
/// assert!(rejected.is_failure());
/// ```
pub fn to_failable<T, E, F>(operation: F) -> Failable<T, E>
where
    F: FnOnce() -> Result<T, E>,
{
    operation().into()
}

/// Run an operation that signals failure by panicking.
///
/// A normal return becomes `Ok`; a panic is caught and becomes
/// `Err(PanicError)`.
pub fn to_result<T, F>(operation: F) -> Result<T, PanicError>
where
    F: FnOnce() -> T + UnwindSafe,
{
    panic::catch_unwind(operation).map_err(|payload| PanicError {
        message: panic_message(payload.as_ref()),
    })
}

/// Like [`to_result`], producing a [`Failable`] instead.
pub fn to_failable_unwind<T, F>(operation: F) -> Failable<T, PanicError>
where
    F: FnOnce() -> T + UnwindSafe,
{
    to_result(operation).into()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

impl<T, E> Default for Failable<T, E> {
    fn default() -> Self {
        Self::Pending
    }
}

impl<T, E> Failable<T, E> {
    /// The discriminant of this value.
    pub fn state(&self) -> FailableState {
        match self {
            Self::Pending => FailableState::Pending,
            Self::Success(_) => FailableState::Success,
            Self::Failure(_) => FailableState::Failure,
        }
    }

    /// True while the operation has not settled.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// True when a value is held.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// True when an error is held.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// The success payload, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    /// The failure payload, if any.
    pub fn error(&self) -> Option<&E> {
        match self {
            Self::Failure(error) => Some(error),
            _ => None,
        }
    }

    /// Borrow both payloads, keeping the discriminant.
    pub fn as_ref(&self) -> Failable<&T, &E> {
        match self {
            Self::Pending => Failable::Pending,
            Self::Success(value) => Failable::Success(value),
            Self::Failure(error) => Failable::Failure(error),
        }
    }

    /// Transform the success payload; pending and failure pass through.
    ///
    /// # Example
    ///
    /// ```rust
    /// use failable::{failure, success, Failable};
    ///
    /// let length: Failable<usize, String> = success::<&str, String>("four").map(str::len);
    /// assert_eq!(length, success(4));
    ///
    /// let broken: Failable<&str, String> = failure("offline".to_string());
    /// assert!(broken.map(str::len).is_failure());
    /// ```
    pub fn map<U, F>(self, f: F) -> Failable<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Pending => Failable::Pending,
            Self::Success(value) => Failable::Success(f(value)),
            Self::Failure(error) => Failable::Failure(error),
        }
    }

    /// Transform the failure payload; pending and success pass through.
    pub fn map_err<G, F>(self, f: F) -> Failable<T, G>
    where
        F: FnOnce(E) -> G,
    {
        match self {
            Self::Pending => Failable::Pending,
            Self::Success(value) => Failable::Success(value),
            Self::Failure(error) => Failable::Failure(f(error)),
        }
    }

    /// The success payload, or `default` for pending and failure.
    pub fn success_or(self, default: T) -> T {
        match self {
            Self::Success(value) => value,
            _ => default,
        }
    }

    /// The success payload, or a fallback computed only when needed.
    pub fn success_or_else<F>(self, fallback: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self {
            Self::Success(value) => value,
            _ => fallback(),
        }
    }

    /// The failure payload, or `default` for pending and success.
    pub fn failure_or(self, default: E) -> E {
        match self {
            Self::Failure(error) => error,
            _ => default,
        }
    }

    /// The failure payload, or a fallback computed only when needed.
    pub fn failure_or_else<F>(self, fallback: F) -> E
    where
        F: FnOnce() -> E,
    {
        match self {
            Self::Failure(error) => error,
            _ => fallback(),
        }
    }

    /// Exhaustive match: every branch is required.
    ///
    /// # Example
    ///
    /// ```rust
    /// use failable::{success, Failable};
    ///
    /// let value: Failable<i32, String> = success(1);
    /// let label = value.fold(|| "waiting".to_string(), |n| format!("got {n}"), |e| e.clone());
    /// assert_eq!(label, "got 1");
    /// ```
    pub fn fold<R, P, S, F>(&self, pending: P, success: S, failure: F) -> R
    where
        P: FnOnce() -> R,
        S: FnOnce(&T) -> R,
        F: FnOnce(&E) -> R,
    {
        match self {
            Self::Pending => pending(),
            Self::Success(value) => success(value),
            Self::Failure(error) => failure(error),
        }
    }

    /// Settle into a two-state result, or `None` while pending.
    pub fn into_result(self) -> Option<Result<T, E>> {
        match self {
            Self::Pending => None,
            Self::Success(value) => Some(Ok(value)),
            Self::Failure(error) => Some(Err(error)),
        }
    }
}

impl<T, E> From<Result<T, E>> for Failable<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(error) => Self::Failure(error),
        }
    }
}

impl<T, E> TryFrom<Failable<T, E>> for Result<T, E> {
    type Error = PendingError;

    fn try_from(value: Failable<T, E>) -> Result<Self, Self::Error> {
        value.into_result().ok_or(PendingError)
    }
}
