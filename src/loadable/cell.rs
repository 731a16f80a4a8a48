//! Shared, observable holder around a [`Loadable`].
//!
//! The cell applies exactly the transition rules of [`Loadable`] and adds
//! the stateful surface around them: a hook fired when a load actually
//! starts, change subscriptions, a transition history, and
//! [`LoadableCell::accept`] for settling from an externally owned effect.

use super::history::{StateHistory, StateTransition};
use super::value::Loadable;
use crate::core::{Failable, LoadState};
#[cfg(feature = "tracing")]
use crate::core::StateKey;
use chrono::Utc;
use std::future::Future;
use std::mem;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use stillwater::effect::Effect;

type LoadingHook = Arc<dyn Fn(LoadState) + Send + Sync>;
type ChangeHook = Arc<dyn Fn(LoadState, LoadState) + Send + Sync>;

/// Transitions kept by [`LoadableCell::new`].
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

struct Inner<T, E> {
    current: Loadable<T, E>,
    history: StateHistory<LoadState>,
    history_limit: usize,
    attempt: usize,
    on_loading: Vec<LoadingHook>,
    subscribers: Vec<ChangeHook>,
}

/// Hooks to run once the lock is released.
struct Fired {
    from: LoadState,
    to: LoadState,
    on_loading: Vec<LoadingHook>,
    subscribers: Vec<ChangeHook>,
}

impl Fired {
    fn run(self) {
        for hook in &self.on_loading {
            hook(self.to);
        }
        for subscriber in &self.subscribers {
            subscriber(self.from, self.to);
        }
    }
}

/// A cloneable handle to one shared [`Loadable`].
///
/// Clones share the same state. Hooks and subscribers are called after the
/// internal lock is released, so they may read or drive the cell.
///
/// # Example
///
/// ```rust
/// use failable::core::LoadState;
/// use failable::LoadableCell;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let cell: LoadableCell<u32, String> = LoadableCell::new();
/// let starts = Arc::new(AtomicUsize::new(0));
/// {
///     let starts = Arc::clone(&starts);
///     cell.on_loading(move |_| {
///         starts.fetch_add(1, Ordering::SeqCst);
///     });
/// }
///
/// assert!(cell.loading());
/// assert!(!cell.loading());
/// assert_eq!(starts.load(Ordering::SeqCst), 1);
///
/// cell.success(5);
/// assert_eq!(cell.state(), LoadState::Success);
/// assert_eq!(cell.get().value(), Some(&5));
/// ```
pub struct LoadableCell<T, E> {
    inner: Arc<Mutex<Inner<T, E>>>,
}

impl<T, E> Clone for LoadableCell<T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, E> Default for LoadableCell<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> LoadableCell<T, E> {
    /// A cell in the initial `empty` state, keeping the last
    /// [`DEFAULT_HISTORY_LIMIT`] transitions.
    pub fn new() -> Self {
        Self::with_history_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// A cell in the initial `empty` state, keeping at most `limit`
    /// transitions. Older entries are dropped first; `0` disables history.
    ///
    /// # Example
    ///
    /// ```rust
    /// use failable::LoadableCell;
    ///
    /// let cell: LoadableCell<u32, String> = LoadableCell::with_history_limit(2);
    /// for n in 0..10 {
    ///     cell.loading();
    ///     cell.success(n);
    /// }
    /// assert_eq!(cell.history().len(), 2);
    /// ```
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                current: Loadable::Empty,
                history: StateHistory::new(),
                history_limit: limit,
                attempt: 0,
                on_loading: Vec::new(),
                subscribers: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T, E>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The current tag.
    pub fn state(&self) -> LoadState {
        self.lock().current.state()
    }

    /// True while a load is in flight.
    pub fn is_loading(&self) -> bool {
        self.state().is_loading()
    }

    /// A copy of the current value.
    pub fn get(&self) -> Loadable<T, E>
    where
        T: Clone,
        E: Clone,
    {
        self.lock().current.clone()
    }

    /// Read the current value in place.
    ///
    /// The cell is locked while `f` runs; `f` must not call back into it.
    pub fn with<R>(&self, f: impl FnOnce(&Loadable<T, E>) -> R) -> R {
        f(&self.lock().current)
    }

    /// A copy of the retained transitions, oldest first.
    pub fn history(&self) -> StateHistory<LoadState> {
        self.lock().history.clone()
    }

    /// Register a hook fired whenever a load actually starts.
    ///
    /// The hook receives the busy state entered. It is not fired when a
    /// load is requested while one is already in flight.
    pub fn on_loading<F>(&self, hook: F)
    where
        F: Fn(LoadState) + Send + Sync + 'static,
    {
        self.lock().on_loading.push(Arc::new(hook));
    }

    /// Register a subscriber fired on every change with the old and new state.
    pub fn subscribe<F>(&self, subscriber: F)
    where
        F: Fn(LoadState, LoadState) + Send + Sync + 'static,
    {
        self.lock().subscribers.push(Arc::new(subscriber));
    }

    /// Begin a load. Returns whether the state changed.
    pub fn loading(&self) -> bool {
        let fired = {
            let mut inner = self.lock();
            let from = inner.current.state();
            let current = mem::take(&mut inner.current);
            match current.try_loading() {
                Ok(next) => {
                    inner.attempt += 1;
                    Some(Self::commit(&mut inner, from, next, true))
                }
                Err(unchanged) => {
                    inner.current = unchanged;
                    None
                }
            }
        };
        match fired {
            Some(fired) => {
                fired.run();
                true
            }
            None => false,
        }
    }

    /// Same as [`LoadableCell::loading`].
    pub fn pending(&self) -> bool {
        self.loading()
    }

    /// Settle with a value.
    pub fn success(&self, value: T) {
        self.settle(Loadable::Success(value));
    }

    /// Settle with an error.
    pub fn failure(&self, error: E) {
        self.settle(Loadable::Failure(error));
    }

    /// Settle with a [`Failable`]'s outcome.
    ///
    /// A pending value begins a load instead.
    pub fn set(&self, value: Failable<T, E>) {
        match value {
            Failable::Pending => {
                self.loading();
            }
            Failable::Success(value) => self.success(value),
            Failable::Failure(error) => self.failure(error),
        }
    }

    fn settle(&self, next: Loadable<T, E>) {
        let fired = {
            let mut inner = self.lock();
            let from = inner.current.state();
            let fired = Self::commit(&mut inner, from, next, false);
            if fired.to == LoadState::Success {
                inner.attempt = 0;
            }
            fired
        };
        fired.run();
    }

    fn commit(
        inner: &mut Inner<T, E>,
        from: LoadState,
        next: Loadable<T, E>,
        started: bool,
    ) -> Fired {
        let to = next.state();
        inner.current = next;
        let limit = inner.history_limit;
        let attempt = inner.attempt;
        inner.history.push_bounded(
            StateTransition {
                from,
                to,
                timestamp: Utc::now(),
                attempt,
            },
            limit,
        );

        #[cfg(feature = "tracing")]
        tracing::trace!(
            from = from.name(),
            to = to.name(),
            attempt = inner.attempt,
            "loadable transition"
        );

        Fired {
            from,
            to,
            on_loading: if started {
                inner.on_loading.clone()
            } else {
                Vec::new()
            },
            subscribers: inner.subscribers.clone(),
        }
    }

    /// Begin a load now, then run `effect` and settle with its outcome.
    ///
    /// The cell enters its busy state before this returns; the returned
    /// future runs the effect. There is no cancellation: if several accepts
    /// overlap, each one settles the cell when its effect completes and the
    /// last to finish wins.
    pub fn accept<'a, Eff>(
        &'a self,
        effect: Eff,
        env: &'a Eff::Env,
    ) -> impl Future<Output = LoadState> + 'a
    where
        Eff: Effect<Output = T, Error = E> + 'a,
    {
        self.loading();
        async move {
            match effect.run(env).await {
                Ok(value) => self.success(value),
                Err(error) => self.failure(error),
            }
            self.state()
        }
    }
}
