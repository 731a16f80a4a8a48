//! The six-state `Loadable` value.

use crate::core::{Availability, Failable, Flight, LoadState};
use serde::{Deserialize, Serialize};

/// A [`Failable`] with an extra "load in flight" axis.
///
/// | tag         | availability | flight |
/// |-------------|--------------|--------|
/// | `Empty`     | none         | idle   |
/// | `Pending`   | none         | busy   |
/// | `Success`   | value        | idle   |
/// | `Reloading` | value        | busy   |
/// | `Failure`   | error        | idle   |
/// | `Retrying`  | error        | busy   |
///
/// `Empty` is the initial state and no transition leads back to it.
/// Beginning a load keeps whatever payload is held; beginning a load while
/// already busy changes nothing.
///
/// # Example
///
/// ```rust
/// use failable::core::LoadState;
/// use failable::Loadable;
///
/// let value: Loadable<&str, String> = Loadable::default();
/// assert_eq!(value.state(), LoadState::Empty);
///
/// let value = value.loading().succeed("first");
/// let value = value.loading();
/// assert_eq!(value.state(), LoadState::Reloading);
/// assert_eq!(value.value(), Some(&"first"));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(tag = "state", content = "data", rename_all = "lowercase")]
pub enum Loadable<T, E> {
    Empty,
    Pending,
    Success(T),
    Reloading(T),
    Failure(E),
    Retrying(E),
}

impl<T, E> Default for Loadable<T, E> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<T, E> Loadable<T, E> {
    /// The tag of this value.
    pub fn state(&self) -> LoadState {
        match self {
            Self::Empty => LoadState::Empty,
            Self::Pending => LoadState::Pending,
            Self::Success(_) => LoadState::Success,
            Self::Reloading(_) => LoadState::Reloading,
            Self::Failure(_) => LoadState::Failure,
            Self::Retrying(_) => LoadState::Retrying,
        }
    }

    /// Whether this value holds nothing, a value or an error.
    pub fn availability(&self) -> Availability {
        self.state().availability()
    }

    /// Whether a load is in flight.
    pub fn flight(&self) -> Flight {
        self.state().flight()
    }

    /// Begin a load.
    ///
    /// `Ok` carries the new busy value; `Err` hands back the value unchanged
    /// when a load was already in flight.
    pub fn try_loading(self) -> Result<Self, Self> {
        match self {
            Self::Empty => Ok(Self::Pending),
            Self::Success(value) => Ok(Self::Reloading(value)),
            Self::Failure(error) => Ok(Self::Retrying(error)),
            busy => Err(busy),
        }
    }

    /// Begin a load; a no-op while already busy.
    pub fn loading(self) -> Self {
        match self.try_loading() {
            Ok(next) | Err(next) => next,
        }
    }

    /// Same as [`Loadable::loading`].
    pub fn pending(self) -> Self {
        self.loading()
    }

    /// Settle with a value, dropping whatever was held.
    pub fn succeed(self, value: T) -> Self {
        Self::Success(value)
    }

    /// Settle with an error, dropping whatever was held.
    pub fn fail(self, error: E) -> Self {
        Self::Failure(error)
    }

    /// True only before the first load.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// True for a first load with nothing held yet.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// True for a settled value with no load in flight.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// True while reloading over a held value.
    pub fn is_reloading(&self) -> bool {
        matches!(self, Self::Reloading(_))
    }

    /// True for a settled error with no load in flight.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// True while retrying over a held error.
    pub fn is_retrying(&self) -> bool {
        matches!(self, Self::Retrying(_))
    }

    /// True while a load is in flight: `pending`, `reloading` or `retrying`.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Pending | Self::Reloading(_) | Self::Retrying(_))
    }

    /// True for `success` and `reloading`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use failable::Loadable;
    ///
    /// let value: Loadable<u8, String> = Loadable::Success(1);
    /// assert!(value.has_value());
    /// assert!(value.loading().has_value());
    /// assert!(!Loadable::<u8, String>::Pending.has_value());
    /// ```
    pub fn has_value(&self) -> bool {
        self.value().is_some()
    }

    /// True for `failure` and `retrying`.
    pub fn has_error(&self) -> bool {
        self.error().is_some()
    }

    /// The held value, whether or not a reload is in flight.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Success(value) | Self::Reloading(value) => Some(value),
            _ => None,
        }
    }

    /// The held error, whether or not a retry is in flight.
    pub fn error(&self) -> Option<&E> {
        match self {
            Self::Failure(error) | Self::Retrying(error) => Some(error),
            _ => None,
        }
    }

    /// The held value, or `default` when there is none.
    pub fn success_or(self, default: T) -> T {
        self.success_or_else(|| default)
    }

    /// The held value, or a fallback evaluated only when there is none.
    pub fn success_or_else<F>(self, fallback: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self {
            Self::Success(value) | Self::Reloading(value) => value,
            _ => fallback(),
        }
    }

    /// The held error, or `default` when there is none.
    pub fn failure_or(self, default: E) -> E {
        self.failure_or_else(|| default)
    }

    /// The held error, or a fallback evaluated only when there is none.
    pub fn failure_or_else<F>(self, fallback: F) -> E
    where
        F: FnOnce() -> E,
    {
        match self {
            Self::Failure(error) | Self::Retrying(error) => error,
            _ => fallback(),
        }
    }

    /// Exhaustive match over availability, passing the flight flag.
    pub fn fold<R, P, S, F>(&self, pending: P, success: S, failure: F) -> R
    where
        P: FnOnce(bool) -> R,
        S: FnOnce(&T, bool) -> R,
        F: FnOnce(&E, bool) -> R,
    {
        let loading = self.is_loading();
        match self {
            Self::Empty | Self::Pending => pending(loading),
            Self::Success(value) | Self::Reloading(value) => success(value, loading),
            Self::Failure(error) | Self::Retrying(error) => failure(error, loading),
        }
    }

    /// Drop the flight axis.
    ///
    /// `Empty` and `Pending` both become [`Failable::Pending`].
    pub fn into_failable(self) -> Failable<T, E> {
        match self {
            Self::Empty | Self::Pending => Failable::Pending,
            Self::Success(value) | Self::Reloading(value) => Failable::Success(value),
            Self::Failure(error) | Self::Retrying(error) => Failable::Failure(error),
        }
    }
}

impl<T, E> From<Failable<T, E>> for Loadable<T, E> {
    fn from(value: Failable<T, E>) -> Self {
        match value {
            Failable::Pending => Self::Pending,
            Failable::Success(value) => Self::Success(value),
            Failable::Failure(error) => Self::Failure(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StateKey;
    use std::cell::Cell;

    type L = Loadable<u32, String>;

    fn every_state() -> Vec<L> {
        vec![
            L::Empty,
            L::Pending,
            L::Success(1),
            L::Reloading(1),
            L::Failure("e".into()),
            L::Retrying("e".into()),
        ]
    }

    #[test]
    fn starts_empty() {
        assert!(L::default().is_empty());
    }

    #[test]
    fn loading_from_empty_is_pending() {
        assert_eq!(L::Empty.loading(), L::Pending);
    }

    #[test]
    fn loading_keeps_prior_payload() {
        assert_eq!(L::Success(4).loading(), L::Reloading(4));
        assert_eq!(L::Failure("x".into()).loading(), L::Retrying("x".into()));
    }

    #[test]
    fn loading_while_busy_is_a_no_op() {
        for busy in [L::Pending, L::Reloading(2), L::Retrying("r".into())] {
            assert_eq!(busy.clone().try_loading(), Err(busy.clone()));
            assert_eq!(busy.clone().loading(), busy);
        }
    }

    #[test]
    fn pending_is_an_alias_for_loading() {
        for value in every_state() {
            assert_eq!(value.clone().pending(), value.loading());
        }
    }

    #[test]
    fn is_loading_matches_busy_tags() {
        for value in every_state() {
            assert_eq!(value.is_loading(), value.state().is_loading());
            assert_eq!(
                value.is_loading(),
                matches!(
                    value.state(),
                    LoadState::Pending | LoadState::Reloading | LoadState::Retrying
                )
            );
        }
    }

    #[test]
    fn every_state_has_one_tag() {
        let tags: Vec<_> = every_state().iter().map(Loadable::state).collect();
        assert_eq!(tags, LoadState::ALL);
    }

    #[test]
    fn settling_forgets_earlier_payloads() {
        let value = L::default().loading().succeed(1).loading().fail("boom".into());
        assert_eq!(value, L::Failure("boom".into()));

        let value = value.loading().succeed(2);
        assert_eq!(value, L::Success(2));
    }

    #[test]
    fn no_transition_returns_to_empty() {
        for value in every_state().into_iter().skip(1) {
            assert!(!value.clone().loading().is_empty());
            assert!(!value.clone().succeed(0).is_empty());
            assert!(!value.fail("x".into()).is_empty());
        }
    }

    #[test]
    fn fallbacks_are_lazy() {
        let calls = Cell::new(0);
        let fallback = || {
            calls.set(calls.get() + 1);
            99
        };

        assert_eq!(L::Reloading(3).success_or_else(fallback), 3);
        assert_eq!(L::Success(3).success_or_else(fallback), 3);
        assert_eq!(calls.get(), 0);

        assert_eq!(L::Retrying("e".into()).success_or_else(fallback), 99);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn success_or_and_failure_or() {
        assert_eq!(L::Pending.success_or(7), 7);
        assert_eq!(L::Retrying("held".into()).failure_or("none".into()), "held");
        assert_eq!(L::Success(1).failure_or("none".into()), "none");
    }

    #[test]
    fn fold_passes_flight_flag() {
        let describe = |value: &L| {
            value.fold(
                |busy| format!("none/{busy}"),
                |v, busy| format!("{v}/{busy}"),
                |e, busy| format!("{e}/{busy}"),
            )
        };
        assert_eq!(describe(&L::Empty), "none/false");
        assert_eq!(describe(&L::Pending), "none/true");
        assert_eq!(describe(&L::Reloading(5)), "5/true");
        assert_eq!(describe(&L::Failure("e".into())), "e/false");
    }

    #[test]
    fn converts_to_and_from_failable() {
        assert_eq!(L::Reloading(1).into_failable(), Failable::Success(1));
        assert_eq!(L::Empty.into_failable(), Failable::Pending);
        assert_eq!(L::from(Failable::Failure("x".into())), L::Failure("x".into()));
        assert_eq!(L::from(Failable::Pending), L::Pending);
    }

    #[test]
    fn serializes_with_discriminant_field() {
        let json = serde_json::to_value(L::Reloading(8)).unwrap();
        assert_eq!(json, serde_json::json!({"state": "reloading", "data": 8}));
    }
}
