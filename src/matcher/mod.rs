//! Handler-based matching over tagged values.
//!
//! `when` invokes exactly one handler, chosen by the value's discriminant,
//! and returns that handler's result. The pending handler is optional: if
//! it is missing and the value turns out to be pending, matching fails with
//! [`MatchError::MissingPendingHandler`] instead of producing a result.
//!
//! Call sites that can handle every state up front should prefer the
//! exhaustive [`Failable::fold`] and [`Loadable::fold`].
//!
//! # Example
//!
//! ```rust
//! use failable::matcher::{Handlers, MatchError};
//! use failable::{failure, pending, success, Failable};
//!
//! let value: Failable<i32, String> = success(41);
//! let next = value.when(Handlers::new(|d: &i32| d + 1, |_: &String| -1));
//! assert_eq!(next, Ok(42));
//!
//! let broken: Failable<i32, String> = failure("offline".into());
//! let next = broken.when(Handlers::new(|d: &i32| d + 1, |_: &String| -1));
//! assert_eq!(next, Ok(-1));
//!
//! let waiting: Failable<i32, String> = pending();
//! let strict = waiting.when(Handlers::new(|d: &i32| d + 1, |_: &String| -1));
//! assert!(matches!(strict, Err(MatchError::MissingPendingHandler { .. })));
//! ```

mod error;
mod handlers;

pub use error::MatchError;
pub use handlers::{Handlers, LoadableHandlers};

use crate::core::{Failable, FailableState, LoadState, StateKey};
use crate::loadable::Loadable;

impl<T, E> Failable<T, E> {
    /// Dispatch to one of `handlers` by discriminant.
    ///
    /// Fails with [`MatchError::MissingPendingHandler`] when the value is
    /// pending and no pending handler was supplied.
    pub fn when<'h, S, F, R>(&self, handlers: Handlers<'h, S, F, R>) -> Result<R, MatchError>
    where
        S: FnOnce(&T) -> R,
        F: FnOnce(&E) -> R,
    {
        match self {
            Self::Success(value) => Ok((handlers.success)(value)),
            Self::Failure(error) => Ok((handlers.failure)(error)),
            Self::Pending => match handlers.pending {
                Some(pending) => Ok(pending()),
                None => Err(MatchError::MissingPendingHandler {
                    state: FailableState::Pending.name(),
                }),
            },
        }
    }
}

impl<T, E> Loadable<T, E> {
    /// Dispatch to one of `handlers` by availability, passing the flight flag.
    ///
    /// `empty` and `pending` go to the pending handler; a missing pending
    /// handler fails with [`MatchError::MissingPendingHandler`].
    pub fn when<'h, S, F, R>(
        &self,
        handlers: LoadableHandlers<'h, S, F, R>,
    ) -> Result<R, MatchError>
    where
        S: FnOnce(&T, bool) -> R,
        F: FnOnce(&E, bool) -> R,
    {
        let loading = self.is_loading();
        match self {
            Self::Success(value) | Self::Reloading(value) => Ok((handlers.success)(value, loading)),
            Self::Failure(error) | Self::Retrying(error) => Ok((handlers.failure)(error, loading)),
            Self::Empty | Self::Pending => match handlers.pending {
                Some(pending) => Ok(pending(loading)),
                None => Err(MatchError::MissingPendingHandler {
                    state: LoadState::name(&self.state()),
                }),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{failure, pending, success};
    use std::cell::RefCell;

    fn increment(d: &i32) -> i32 {
        d + 1
    }

    fn minus_one(_: &String) -> i32 {
        -1
    }

    fn plus_one<'h>() -> Handlers<'h, fn(&i32) -> i32, fn(&String) -> i32, i32> {
        Handlers::new(increment as fn(&i32) -> i32, minus_one as fn(&String) -> i32)
    }

    #[test]
    fn success_handler_receives_payload() {
        assert_eq!(success::<i32, String>(41).when(plus_one()), Ok(42));
    }

    #[test]
    fn failure_handler_receives_error() {
        let seen = RefCell::new(None);
        let result = failure::<i32, String>("boom".into()).when(Handlers::new(
            |_: &i32| 0,
            |e: &String| {
                *seen.borrow_mut() = Some(e.clone());
                -1
            },
        ));
        assert_eq!(result, Ok(-1));
        assert_eq!(seen.into_inner().as_deref(), Some("boom"));
    }

    #[test]
    fn pending_without_handler_is_an_invariant_violation() {
        let result = pending::<i32, String>().when(plus_one());
        assert_eq!(
            result,
            Err(MatchError::MissingPendingHandler { state: "pending" })
        );
    }

    #[test]
    fn pending_with_handler_returns_its_value() {
        let handlers = Handlers::new(|_: &i32| "s", |_: &String| "f").pending(|| "p");
        let result = pending::<i32, String>().when(handlers);
        assert_eq!(result, Ok("p"));
    }

    #[test]
    fn pending_handler_is_ignored_for_settled_values() {
        let calls = RefCell::new(0);
        let handlers = Handlers::new(|d: &i32| *d, |_: &String| 0).pending(|| {
            *calls.borrow_mut() += 1;
            -99
        });
        assert!(handlers.has_pending());
        assert_eq!(success::<i32, String>(5).when(handlers), Ok(5));
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn loadable_handlers_receive_flight_flag() {
        let handlers = || {
            LoadableHandlers::new(
                |v: &i32, loading: bool| format!("value {v} {loading}"),
                |e: &String, loading: bool| format!("error {e} {loading}"),
            )
            .pending(|loading| format!("nothing {loading}"))
        };

        let cases: Vec<(Loadable<i32, String>, &str)> = vec![
            (Loadable::Empty, "nothing false"),
            (Loadable::Pending, "nothing true"),
            (Loadable::Success(1), "value 1 false"),
            (Loadable::Reloading(1), "value 1 true"),
            (Loadable::Failure("x".into()), "error x false"),
            (Loadable::Retrying("x".into()), "error x true"),
        ];
        for (value, expected) in cases {
            assert_eq!(value.when(handlers()).as_deref(), Ok(expected));
        }
    }

    #[test]
    fn loadable_without_pending_handler_fails_for_empty_and_pending() {
        let handlers = || LoadableHandlers::new(|_: &i32, _: bool| (), |_: &String, _: bool| ());

        assert_eq!(
            Loadable::<i32, String>::Empty.when(handlers()),
            Err(MatchError::MissingPendingHandler { state: "empty" })
        );
        assert_eq!(
            Loadable::<i32, String>::Pending.when(handlers()),
            Err(MatchError::MissingPendingHandler { state: "pending" })
        );
        assert_eq!(Loadable::<i32, String>::Reloading(3).when(handlers()), Ok(()));
    }
}
