//! Callback handles passed into the timeline.

use std::sync::Arc;

/// Stable, comparable callback handle for `Fn(T) -> R`.
///
/// Compares by identity (`Arc::ptr_eq`) so re-registering the same handle is
/// detectable without comparing closures.
pub struct CallbackWith<T, R = ()> {
    handler: Arc<dyn Fn(T) -> R + Send + Sync>,
}

impl<T, R> CallbackWith<T, R> {
    /// Create a callback handle from a closure.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Invoke the callback with an argument.
    pub fn call(&self, value: T) -> R {
        (self.handler)(value)
    }
}

impl<T, R, F> From<F> for CallbackWith<T, R>
where
    F: Fn(T) -> R + Send + Sync + 'static,
{
    fn from(handler: F) -> Self {
        Self::new(handler)
    }
}

impl<T, R> Clone for CallbackWith<T, R> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<T, R> PartialEq for CallbackWith<T, R> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler)
    }
}

impl<T, R> Eq for CallbackWith<T, R> {}

impl<T, R> std::fmt::Debug for CallbackWith<T, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackWith").finish_non_exhaustive()
    }
}
