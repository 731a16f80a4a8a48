//! Matching that also broadcasts every matched value.
//!
//! An [`Observer`] owns a [`Dispatcher`] keyed by a value's tag. Matching a
//! value through the observer first dispatches it to every listener
//! registered for its tag, then runs the caller's handlers. The broadcast
//! always completes first, so listeners see the value even when the
//! caller's match then fails for want of a pending handler.
//!
//! Observers are ordinary values: construct one and pass it (typically in an
//! `Arc`) to whatever components should share it.
//!
//! # Example
//!
//! ```rust
//! use failable::matcher::{Handlers, MatchError};
//! use failable::observe::Observer;
//! use failable::{pending, success, Failable};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let observer: Observer<Failable<u32, String>> = Observer::new();
//! let waits = Arc::new(AtomicUsize::new(0));
//! {
//!     let waits = Arc::clone(&waits);
//!     observer.on_pending(move || {
//!         waits.fetch_add(1, Ordering::SeqCst);
//!     });
//! }
//!
//! let doubled = observer.when(&success(4), Handlers::new(|n: &u32| n * 2, |_: &String| 0));
//! assert_eq!(doubled, Ok(8));
//!
//! let strict = observer.when(&pending(), Handlers::new(|n: &u32| n * 2, |_: &String| 0));
//! assert!(matches!(strict, Err(MatchError::MissingPendingHandler { .. })));
//! assert_eq!(waits.load(Ordering::SeqCst), 1);
//! ```

use crate::core::{Failable, FailableState, LoadState, StateKey};
use crate::dispatch::{Dispatcher, Listener};
use crate::loadable::Loadable;
use crate::matcher::{Handlers, LoadableHandlers, MatchError};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A value classified by a closed set of tags.
pub trait Tagged {
    type Tag: StateKey;

    fn tag(&self) -> Self::Tag;
}

impl<T, E> Tagged for Failable<T, E> {
    type Tag = FailableState;

    fn tag(&self) -> FailableState {
        self.state()
    }
}

impl<T, E> Tagged for Loadable<T, E> {
    type Tag = LoadState;

    fn tag(&self) -> LoadState {
        self.state()
    }
}

/// A shared listener registry that sees every value matched through it.
///
/// Registration and removal may happen from any thread, including from
/// inside a listener: each broadcast works on a snapshot of the registry
/// taken when it starts.
pub struct Observer<V: Tagged> {
    dispatcher: RwLock<Dispatcher<V::Tag, V>>,
}

impl<V: Tagged> Default for Observer<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Tagged> fmt::Debug for Observer<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer")
            .field("listeners", &*self.read())
            .finish()
    }
}

impl<V: Tagged> Observer<V> {
    /// An observer with no listeners.
    ///
    /// # Example
    ///
    /// ```rust
    /// use failable::core::FailableState;
    /// use failable::{Failable, Observer};
    ///
    /// let observer: Observer<Failable<u8, String>> = Observer::new();
    /// assert_eq!(observer.listener_count(FailableState::Success), 0);
    /// ```
    pub fn new() -> Self {
        Self::from_dispatcher(Dispatcher::new())
    }

    /// Observe through an existing registry.
    pub fn from_dispatcher(dispatcher: Dispatcher<V::Tag, V>) -> Self {
        Self {
            dispatcher: RwLock::new(dispatcher),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Dispatcher<V::Tag, V>> {
        self.dispatcher.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Dispatcher<V::Tag, V>> {
        self.dispatcher.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Broadcast `value` to the listeners registered for its tag.
    ///
    /// Listeners registered or removed during the broadcast take effect from
    /// the next one.
    pub fn notify(&self, value: &V) {
        let listeners = self.read().handlers_of(value.tag()).to_vec();
        #[cfg(feature = "tracing")]
        tracing::trace!(
            state = value.tag().name(),
            listeners = listeners.len(),
            "notifying"
        );
        for listener in &listeners {
            listener(value);
        }
    }

    /// Register a listener for `key`.
    pub fn on(&self, key: V::Tag, listener: Listener<V>) {
        self.write().add_listener(key, listener);
    }

    /// Register `callback` for `key` and return its handle.
    pub fn listen<F>(&self, key: V::Tag, callback: F) -> Listener<V>
    where
        F: Fn(&V) + Send + Sync + 'static,
    {
        self.write().listen(key, callback)
    }

    /// Remove one registration of `listener` from `key`.
    pub fn off(&self, key: V::Tag, listener: &Listener<V>) -> bool {
        self.write().remove_listener(key, Some(listener)) > 0
    }

    /// Remove every listener for `key`.
    pub fn off_all(&self, key: V::Tag) -> usize {
        self.write().remove_listener(key, None)
    }

    /// Remove every listener for every key.
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Number of registrations under `key`, duplicates included.
    pub fn listener_count(&self, key: V::Tag) -> usize {
        self.read().listener_count(key)
    }

    /// Run `f` with exclusive access to the underlying registry.
    ///
    /// Listeners must not be invoked from `f`.
    pub fn registry<R>(&self, f: impl FnOnce(&mut Dispatcher<V::Tag, V>) -> R) -> R {
        f(&mut self.write())
    }
}

impl<T: 'static, E: 'static> Observer<Failable<T, E>> {
    /// Broadcast `value`, then match it against `handlers`.
    pub fn when<'h, S, F, R>(
        &self,
        value: &Failable<T, E>,
        handlers: Handlers<'h, S, F, R>,
    ) -> Result<R, MatchError>
    where
        S: FnOnce(&T) -> R,
        F: FnOnce(&E) -> R,
    {
        self.notify(value);
        value.when(handlers)
    }

    /// Call `callback` with the payload of every success.
    pub fn on_success<F>(&self, callback: F) -> Listener<Failable<T, E>>
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.listen(FailableState::Success, move |value: &Failable<T, E>| {
            if let Failable::Success(payload) = value {
                callback(payload);
            }
        })
    }

    /// Call `callback` with the error of every failure.
    pub fn on_failure<F>(&self, callback: F) -> Listener<Failable<T, E>>
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.listen(FailableState::Failure, move |value: &Failable<T, E>| {
            if let Failable::Failure(error) = value {
                callback(error);
            }
        })
    }

    /// Call `callback` for every pending value.
    pub fn on_pending<F>(&self, callback: F) -> Listener<Failable<T, E>>
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.listen(FailableState::Pending, move |_: &Failable<T, E>| callback())
    }
}

impl<T: 'static, E: 'static> Observer<Loadable<T, E>> {
    /// Broadcast `value`, then match it against `handlers`.
    pub fn when<'h, S, F, R>(
        &self,
        value: &Loadable<T, E>,
        handlers: LoadableHandlers<'h, S, F, R>,
    ) -> Result<R, MatchError>
    where
        S: FnOnce(&T, bool) -> R,
        F: FnOnce(&E, bool) -> R,
    {
        self.notify(value);
        value.when(handlers)
    }

    /// Call `callback` with the value and flight flag of every `success`
    /// and `reloading` value.
    ///
    /// One handle is registered under both tags; pass it to
    /// [`Observer::off`] once per tag to remove it.
    pub fn on_value<F>(&self, callback: F) -> Listener<Loadable<T, E>>
    where
        F: Fn(&T, bool) + Send + Sync + 'static,
    {
        let listener: Listener<Loadable<T, E>> = Arc::new(move |value: &Loadable<T, E>| {
            if let Some(payload) = value.value() {
                callback(payload, value.is_loading());
            }
        });
        let mut dispatcher = self.write();
        dispatcher.add_listener(LoadState::Success, Arc::clone(&listener));
        dispatcher.add_listener(LoadState::Reloading, Arc::clone(&listener));
        listener
    }

    /// Call `callback` with the error and flight flag of every `failure`
    /// and `retrying` value.
    pub fn on_error<F>(&self, callback: F) -> Listener<Loadable<T, E>>
    where
        F: Fn(&E, bool) + Send + Sync + 'static,
    {
        let listener: Listener<Loadable<T, E>> = Arc::new(move |value: &Loadable<T, E>| {
            if let Some(error) = value.error() {
                callback(error, value.is_loading());
            }
        });
        let mut dispatcher = self.write();
        dispatcher.add_listener(LoadState::Failure, Arc::clone(&listener));
        dispatcher.add_listener(LoadState::Retrying, Arc::clone(&listener));
        listener
    }
}
