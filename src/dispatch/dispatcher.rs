//! Ordered listener registry keyed by a closed state set.

use super::error::DispatchError;
use crate::core::StateKey;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// A registered callback.
///
/// Identity is the allocation: two handles refer to the same listener iff
/// [`Arc::ptr_eq`] holds.
pub type Listener<D> = Arc<dyn Fn(&D) + Send + Sync>;

/// Broadcast registry mapping every key of `K` to an ordered list of
/// listeners.
///
/// The key set is fixed by `K` and never grows. Listeners for a key run in
/// registration order. Registering the same listener twice makes it run
/// twice.
///
/// A listener that panics unwinds out of [`Dispatcher::dispatch`] and the
/// listeners after it are skipped for that call.
///
/// The registry is not synchronized; wrap it in a lock to share it across
/// threads.
///
/// # Example
///
/// ```rust
/// use failable::core::FailableState;
/// use failable::dispatch::{Dispatcher, Listener};
/// use std::sync::{Arc, Mutex};
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let mut dispatcher: Dispatcher<FailableState, i32> = Dispatcher::new();
///
/// let first: Listener<i32> = {
///     let seen = Arc::clone(&seen);
///     Arc::new(move |x: &i32| seen.lock().unwrap().push(("first", *x)))
/// };
/// let second: Listener<i32> = {
///     let seen = Arc::clone(&seen);
///     Arc::new(move |x: &i32| seen.lock().unwrap().push(("second", *x)))
/// };
///
/// dispatcher.add_listener(FailableState::Success, Arc::clone(&first));
/// dispatcher.add_listener(FailableState::Success, second);
/// dispatcher.dispatch(FailableState::Success, &7);
/// dispatcher.dispatch(FailableState::Failure, &8);
///
/// assert_eq!(*seen.lock().unwrap(), [("first", 7), ("second", 7)]);
///
/// dispatcher.remove_listener(FailableState::Success, Some(&first));
/// assert_eq!(dispatcher.listener_count(FailableState::Success), 1);
/// ```
pub struct Dispatcher<K: StateKey, D> {
    buckets: Vec<Vec<Listener<D>>>,
    _keys: PhantomData<K>,
}

impl<K: StateKey, D> Default for Dispatcher<K, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: StateKey, D> Clone for Dispatcher<K, D> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            _keys: PhantomData,
        }
    }
}

impl<K: StateKey, D> fmt::Debug for Dispatcher<K, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for key in K::ALL {
            map.entry(&key.name(), &self.buckets[key.index()].len());
        }
        map.finish()
    }
}

impl<K: StateKey, D> Dispatcher<K, D> {
    /// Create a registry with an empty list for every key.
    pub fn new() -> Self {
        Self {
            buckets: K::ALL.iter().map(|_| Vec::new()).collect(),
            _keys: PhantomData,
        }
    }

    /// The listeners registered for `key`, in order.
    pub fn handlers_of(&self, key: K) -> &[Listener<D>] {
        &self.buckets[key.index()]
    }

    /// The live backing list for `key`. Edits apply to the registry.
    pub fn handlers_of_mut(&mut self, key: K) -> &mut Vec<Listener<D>> {
        &mut self.buckets[key.index()]
    }

    /// Append a listener to `key`'s list.
    pub fn add_listener(&mut self, key: K, listener: Listener<D>) {
        self.handlers_of_mut(key).push(listener);
    }

    /// Wrap `callback` as a listener, register it, and return its handle.
    pub fn listen<F>(&mut self, key: K, callback: F) -> Listener<D>
    where
        F: Fn(&D) + Send + Sync + 'static,
    {
        let listener: Listener<D> = Arc::new(callback);
        self.add_listener(key, Arc::clone(&listener));
        listener
    }

    /// Remove listeners from `key`'s list.
    ///
    /// With `Some(listener)`, removes only the first registration of that
    /// listener. With `None`, empties the list. Returns how many entries were
    /// removed; removing an absent listener is not an error.
    pub fn remove_listener(&mut self, key: K, listener: Option<&Listener<D>>) -> usize {
        let bucket = self.handlers_of_mut(key);
        match listener {
            Some(target) => match bucket.iter().position(|l| Arc::ptr_eq(l, target)) {
                Some(position) => {
                    bucket.remove(position);
                    1
                }
                None => 0,
            },
            None => {
                let removed = bucket.len();
                bucket.clear();
                removed
            }
        }
    }

    /// Invoke every listener registered for `key`, in order, with `data`.
    pub fn dispatch(&self, key: K, data: &D) {
        let bucket = self.handlers_of(key);
        #[cfg(feature = "tracing")]
        tracing::trace!(state = key.name(), listeners = bucket.len(), "dispatching");
        for listener in bucket {
            listener(data);
        }
    }

    /// Empty every list. The registry stays usable.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
    }

    /// Number of registrations under `key`, duplicates included.
    pub fn listener_count(&self, key: K) -> usize {
        self.buckets[key.index()].len()
    }

    /// True when no key has any listener.
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Resolve a label against the fixed key set.
    pub fn key_of(name: &str) -> Result<K, DispatchError> {
        K::from_name(name).ok_or_else(|| DispatchError::InvalidState {
            name: name.to_string(),
            valid: K::ALL.iter().map(|key| key.name()).collect(),
        })
    }

    /// [`Dispatcher::handlers_of_mut`] for a label.
    ///
    /// Fails with [`DispatchError::InvalidState`] for labels outside `K`.
    pub fn handlers_of_name(&mut self, name: &str) -> Result<&mut Vec<Listener<D>>, DispatchError> {
        let key = Self::key_of(name)?;
        Ok(self.handlers_of_mut(key))
    }

    /// [`Dispatcher::add_listener`] for a label.
    ///
    /// Fails with [`DispatchError::InvalidState`] for labels outside `K`.
    pub fn add_listener_by_name(
        &mut self,
        name: &str,
        listener: Listener<D>,
    ) -> Result<(), DispatchError> {
        let key = Self::key_of(name)?;
        self.add_listener(key, listener);
        Ok(())
    }

    /// [`Dispatcher::remove_listener`] for a label.
    ///
    /// Fails with [`DispatchError::InvalidState`] for labels outside `K`;
    /// otherwise returns how many entries were removed.
    pub fn remove_listener_by_name(
        &mut self,
        name: &str,
        listener: Option<&Listener<D>>,
    ) -> Result<usize, DispatchError> {
        let key = Self::key_of(name)?;
        Ok(self.remove_listener(key, listener))
    }

    /// [`Dispatcher::dispatch`] for a label.
    ///
    /// Fails with [`DispatchError::InvalidState`] for labels outside `K`, in
    /// which case no listener runs.
    ///
    /// # Example
    ///
    /// ```rust
    /// use failable::core::FailableState;
    /// use failable::dispatch::{DispatchError, Dispatcher};
    ///
    /// let dispatcher: Dispatcher<FailableState, u8> = Dispatcher::new();
    /// assert!(dispatcher.dispatch_by_name("success", &1).is_ok());
    /// assert!(matches!(
    ///     dispatcher.dispatch_by_name("loading", &1),
    ///     Err(DispatchError::InvalidState { .. })
    /// ));
    /// ```
    pub fn dispatch_by_name(&self, name: &str, data: &D) -> Result<(), DispatchError> {
        let key = Self::key_of(name)?;
        self.dispatch(key, data);
        Ok(())
    }
}
