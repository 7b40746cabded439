//! Callbacks tagged with their execution kind
//!
//! The kind is fixed when the callback is built, so it can be classified
//! without running it.

use std::fmt;
use std::future::Future;

use futures::future::{BoxFuture, FutureExt};

/// How a callback produces its result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionKind {
    /// Result is available as soon as the call returns
    Sync,
    /// Call returns a pending future
    Async,
}

pub type SyncFn<T> = Box<dyn FnMut() -> T + Send>;
pub type AsyncFn<T> = Box<dyn FnMut() -> BoxFuture<'static, T> + Send>;

/// A zero-argument callback, either sync or async
pub enum Callback<T = ()> {
    Sync(SyncFn<T>),
    Async(AsyncFn<T>),
}

impl<T> Callback<T> {
    pub fn new_sync<F>(f: F) -> Self
    where
        F: FnMut() -> T + Send + 'static,
    {
        Callback::Sync(Box::new(f))
    }

    pub fn new_async<F, Fut>(mut f: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        Callback::Async(Box::new(move || f().boxed()))
    }

    #[inline]
    pub fn kind(&self) -> ExecutionKind {
        match self {
            Callback::Sync(_) => ExecutionKind::Sync,
            Callback::Async(_) => ExecutionKind::Async,
        }
    }

    #[inline]
    pub fn is_async(&self) -> bool {
        self.kind() == ExecutionKind::Async
    }

    /// Run the callback, awaiting it if async
    pub async fn call(&mut self) -> T {
        match self {
            Callback::Sync(f) => f(),
            Callback::Async(f) => f().await,
        }
    }
}

impl<T> fmt::Debug for Callback<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Callback").field(&self.kind()).finish()
    }
}

/// Check whether calling `callback` returns a pending result
///
/// Never invokes the callback.
pub fn is_async_fn<T>(callback: &Callback<T>) -> bool {
    callback.is_async()
}
