//! Failable: pending / success / failure values with matching and broadcast
//!
//! Failable models the *outcome* of an operation as a plain value. It does
//! not run or schedule work; it describes where a piece of work stands and
//! lets interested parties react to it.
//!
//! # Core Concepts
//!
//! - **Failable**: a three-state value, `Pending`, `Success(T)` or `Failure(E)`
//! - **Loadable**: a six-state value adding "a load is in flight" on top
//! - **Matcher**: `when` runs exactly one handler per value; a missing
//!   pending handler is an error, not a silent default
//! - **Dispatcher**: an ordered listener registry over a closed set of tags
//! - **Observer**: a matcher that broadcasts every matched value first
//!
//! # Example
//!
//! ```rust
//! use failable::matcher::Handlers;
//! use failable::observe::Observer;
//! use failable::{to_failable, Failable};
//! use std::sync::{Arc, Mutex};
//!
//! let errors = Arc::new(Mutex::new(Vec::new()));
//! let observer: Observer<Failable<i32, String>> = Observer::new();
//! {
//!     let errors = Arc::clone(&errors);
//!     observer.on_failure(move |e| errors.lock().unwrap().push(e.clone()));
//! }
//!
//! let parsed = to_failable(|| "12x".parse::<i32>().map_err(|e| e.to_string()));
//! let shown = observer.when(
//!     &parsed,
//!     Handlers::new(|n: &i32| n.to_string(), |_: &String| "invalid".to_string()),
//! );
//!
//! assert_eq!(shown.as_deref(), Ok("invalid"));
//! assert_eq!(errors.lock().unwrap().len(), 1);
//! ```

#[macro_use]
mod macros;

pub mod core;
pub mod dispatch;
pub mod loadable;
pub mod matcher;
pub mod observe;

// Re-export commonly used types
pub use self::core::{
    failure, is_failable, pending, success, to_failable, to_failable_unwind, to_result, Failable,
    FailableState, LoadState, StateKey,
};
pub use dispatch::{DispatchError, Dispatcher, Listener};
pub use loadable::{Loadable, LoadableCell};
pub use matcher::{Handlers, LoadableHandlers, MatchError};
pub use observe::{Observer, Tagged};
