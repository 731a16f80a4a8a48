//! Listener registry for broadcasting state values.
//!
//! A [`Dispatcher`] is created explicitly and handed to whatever needs to
//! broadcast or observe; there is no process-wide registry.
//!
//! Keys come from a closed [`StateKey`](crate::core::StateKey) set, so the
//! typed operations cannot name an unknown state. The `*_by_name` variants
//! exist for labels that arrive as strings and report
//! [`DispatchError::InvalidState`] for anything outside the set.

mod dispatcher;
mod error;

pub use dispatcher::{Dispatcher, Listener};
pub use error::DispatchError;
