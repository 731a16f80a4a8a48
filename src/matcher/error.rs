//! Matcher errors.

use thiserror::Error;

/// Invariant violations raised by [`Failable::when`](crate::Failable::when)
/// and [`Loadable::when`](crate::Loadable::when).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// A value without data was matched but no pending handler was supplied.
    #[error("matched a '{state}' value without a pending handler")]
    MissingPendingHandler { state: &'static str },
}
