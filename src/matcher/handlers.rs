//! Handler sets consumed by the matcher.

/// Handlers for matching a [`Failable`](crate::Failable).
///
/// `success` and `failure` are required; `pending` is optional and checked
/// when the matched value is actually pending.
pub struct Handlers<'h, S, F, R> {
    pub(crate) success: S,
    pub(crate) failure: F,
    pub(crate) pending: Option<Box<dyn FnOnce() -> R + 'h>>,
}

impl<'h, S, F, R> Handlers<'h, S, F, R> {
    /// Handlers for the two settled states.
    pub fn new(success: S, failure: F) -> Self {
        Self {
            success,
            failure,
            pending: None,
        }
    }

    /// Add a pending handler.
    pub fn pending<P>(mut self, pending: P) -> Self
    where
        P: FnOnce() -> R + 'h,
    {
        self.pending = Some(Box::new(pending));
        self
    }

    /// True once a pending handler has been supplied.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Handlers for matching a [`Loadable`](crate::Loadable).
///
/// Every handler also receives the flight flag: `true` while a load is in
/// progress. The `pending` handler covers both `empty` (flag `false`) and
/// `pending` (flag `true`).
pub struct LoadableHandlers<'h, S, F, R> {
    pub(crate) success: S,
    pub(crate) failure: F,
    pub(crate) pending: Option<Box<dyn FnOnce(bool) -> R + 'h>>,
}

impl<'h, S, F, R> LoadableHandlers<'h, S, F, R> {
    /// Handlers for the value and error states, each given the flight flag.
    pub fn new(success: S, failure: F) -> Self {
        Self {
            success,
            failure,
            pending: None,
        }
    }

    /// Add a handler for `empty` and `pending`.
    ///
    /// It receives `false` for `empty` and `true` for `pending`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use failable::matcher::LoadableHandlers;
    /// use failable::Loadable;
    ///
    /// let describe = || {
    ///     LoadableHandlers::new(|v: &u8, _: bool| v.to_string(), |e: &String, _: bool| e.clone())
    ///         .pending(|busy| (if busy { "loading" } else { "idle" }).to_string())
    /// };
    /// assert_eq!(Loadable::<u8, String>::Empty.when(describe()).as_deref(), Ok("idle"));
    /// assert_eq!(Loadable::<u8, String>::Pending.when(describe()).as_deref(), Ok("loading"));
    /// ```
    pub fn pending<P>(mut self, pending: P) -> Self
    where
        P: FnOnce(bool) -> R + 'h,
    {
        self.pending = Some(Box::new(pending));
        self
    }

    /// True once a pending handler has been supplied.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}
