//! Timestamped log of tag changes.

use crate::core::StateKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One observed change of tag.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use failable::core::LoadState;
/// use failable::loadable::StateTransition;
///
/// let started = StateTransition {
///     from: LoadState::Failure,
///     to: LoadState::Retrying,
///     timestamp: Utc::now(),
///     attempt: 2,
/// };
/// assert!(started.to.is_loading());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: StateKey> {
    pub from: S,
    pub to: S,
    pub timestamp: DateTime<Utc>,
    /// Loads started since the last success, 0 if none.
    pub attempt: usize,
}

/// Append-only sequence of [`StateTransition`]s.
///
/// `record` leaves the receiver untouched and returns the extended log, so a
/// copy handed out earlier never changes under its holder.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use failable::core::LoadState;
/// use failable::loadable::{StateHistory, StateTransition};
///
/// let step = |from: LoadState, to: LoadState| StateTransition {
///     from,
///     to,
///     timestamp: Utc::now(),
///     attempt: 1,
/// };
///
/// let empty = StateHistory::new();
/// let log = empty
///     .record(step(LoadState::Empty, LoadState::Pending))
///     .record(step(LoadState::Pending, LoadState::Success));
///
/// assert!(empty.is_empty());
/// assert_eq!(
///     log.get_path(),
///     [&LoadState::Empty, &LoadState::Pending, &LoadState::Success]
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: StateKey> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: StateKey> Default for StateHistory<S> {
    fn default() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }
}

impl<S: StateKey> StateHistory<S> {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// A new log with `transition` appended.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let transitions = self
            .transitions
            .iter()
            .cloned()
            .chain(std::iter::once(transition))
            .collect();
        Self { transitions }
    }

    /// Append `transition` in place, dropping the oldest entries beyond
    /// `limit`.
    pub(crate) fn push_bounded(&mut self, transition: StateTransition<S>, limit: usize) {
        if limit == 0 {
            return;
        }
        self.transitions.push(transition);
        if self.transitions.len() > limit {
            let excess = self.transitions.len() - limit;
            self.transitions.drain(..excess);
        }
    }

    /// Tags visited, oldest first: the first origin, then every target.
    pub fn get_path(&self) -> Vec<&S> {
        self.transitions
            .first()
            .map(|first| &first.from)
            .into_iter()
            .chain(self.transitions.iter().map(|t| &t.to))
            .collect()
    }

    /// Wall time from the first to the last recorded change.
    ///
    /// `None` for an empty log or if the clock went backwards.
    pub fn duration(&self) -> Option<Duration> {
        let first = self.transitions.first()?;
        let last = self.transitions.last()?;
        (last.timestamp - first.timestamp).to_std().ok()
    }

    /// Every recorded transition, oldest first.
    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }

    /// The most recent transition, if any.
    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.last()
    }

    /// Number of recorded transitions.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LoadState;
    use chrono::TimeDelta;

    fn at(from: LoadState, to: LoadState, timestamp: DateTime<Utc>) -> StateTransition<LoadState> {
        StateTransition {
            from,
            to,
            timestamp,
            attempt: 1,
        }
    }

    #[test]
    fn empty_log_has_no_path_or_duration() {
        let log: StateHistory<LoadState> = StateHistory::default();
        assert_eq!(log.len(), 0);
        assert!(log.get_path().is_empty());
        assert_eq!(log.duration(), None);
        assert_eq!(log.last(), None);
    }

    #[test]
    fn recording_does_not_touch_the_original() {
        let now = Utc::now();
        let before = StateHistory::new().record(at(LoadState::Empty, LoadState::Pending, now));
        let after = before.record(at(LoadState::Pending, LoadState::Failure, now));

        assert_eq!(before.len(), 1);
        assert_eq!(after.len(), 2);
        assert_eq!(after.transitions()[0], before.transitions()[0]);
    }

    #[test]
    fn path_walks_through_retries() {
        let now = Utc::now();
        let log = StateHistory::new()
            .record(at(LoadState::Empty, LoadState::Pending, now))
            .record(at(LoadState::Pending, LoadState::Failure, now))
            .record(at(LoadState::Failure, LoadState::Retrying, now));

        assert_eq!(
            log.get_path(),
            [
                &LoadState::Empty,
                &LoadState::Pending,
                &LoadState::Failure,
                &LoadState::Retrying,
            ]
        );
        assert_eq!(log.last().map(|t| t.to), Some(LoadState::Retrying));
    }

    #[test]
    fn duration_spans_first_to_last() {
        let start = Utc::now();
        let log = StateHistory::new()
            .record(at(LoadState::Empty, LoadState::Pending, start))
            .record(at(LoadState::Pending, LoadState::Success, start + TimeDelta::milliseconds(250)));

        assert_eq!(log.duration(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn duration_is_none_when_clock_ran_backwards() {
        let start = Utc::now();
        let log = StateHistory::new()
            .record(at(LoadState::Empty, LoadState::Pending, start))
            .record(at(LoadState::Pending, LoadState::Success, start - TimeDelta::seconds(1)));

        assert_eq!(log.duration(), None);
    }

    #[test]
    fn push_bounded_keeps_only_the_newest() {
        let now = Utc::now();
        let mut log = StateHistory::new();
        for _ in 0..5 {
            log.push_bounded(at(LoadState::Pending, LoadState::Success, now), 3);
            log.push_bounded(at(LoadState::Success, LoadState::Reloading, now), 3);
        }

        assert_eq!(log.len(), 3);
        assert_eq!(log.last().map(|t| t.to), Some(LoadState::Reloading));
        assert_eq!(log.transitions()[0].to, LoadState::Reloading);
    }

    #[test]
    fn push_bounded_with_zero_limit_records_nothing() {
        let mut log = StateHistory::new();
        log.push_bounded(at(LoadState::Empty, LoadState::Pending, Utc::now()), 0);
        assert!(log.is_empty());
    }

    #[test]
    fn tags_serialize_by_label() {
        let log = StateHistory::new().record(at(LoadState::Success, LoadState::Reloading, Utc::now()));

        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json["transitions"][0]["to"], "reloading");

        let back: StateHistory<LoadState> = serde_json::from_value(json).unwrap();
        assert_eq!(back, log);
    }
}
