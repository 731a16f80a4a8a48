//! Core state values.
//!
//! This module contains the pure data model:
//! - Closed label sets via the `StateKey` trait
//! - The three-state `Failable` value, its constructors and predicates
//! - The type guard for raw values
//!
//! Nothing here has side effects; every transition builds a new value.

mod error;
mod failable;
mod guard;
mod keys;
mod state;

pub use error::{GuardError, PanicError, PendingError};
pub use failable::{
    failure, pending, success, to_failable, to_failable_unwind, to_result, Failable,
};
pub use guard::is_failable;
pub use keys::{Availability, FailableState, Flight, LoadState};
pub use state::StateKey;
