//! # Route table
//!
//! The single source of truth: an insertion-ordered list of [`Perform`]
//! entries, each binding one middleware to a `(method, path)` pair.
//!
//! A [`RouteTable`] is a cheap handle. Clone it into every [`Router`] that
//! registers routes and into the [`Routes`] dispatcher that serves them; all
//! clones see the same entries.
//!
//! # Usage Contract
//!
//! Registration is a startup activity. Dispatch takes a snapshot of the
//! matched middleware under a short read lock, so registering while requests
//! are in flight does not corrupt anything, but which requests observe the new
//! routes is unspecified.
//!
//! [`Router`]: crate::router::Router
//! [`Routes`]: crate::dispatch::Routes

use routebook_core::{Chain, Method, RequestContext, SharedMiddleware, compose};
use std::{
    fmt,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

/// Opaque documentation payload attached to a route.
pub type State = serde_json::Value;

/// One committed binding of `(method, path)` to a middleware.
pub struct Perform<C> {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) middleware: SharedMiddleware<C>,
    pub(crate) state: Option<State>,
    pub(crate) origin_path: Option<String>,
    pub(crate) redirect_target: Option<String>,
    pub(crate) excluded: bool,
}

impl<C> Perform<C> {
    pub(crate) fn new(
        method: Method,
        path: impl Into<String>,
        middleware: SharedMiddleware<C>,
    ) -> Self {
        Self {
            method,
            path: path.into(),
            middleware,
            state: None,
            origin_path: None,
            redirect_target: None,
            excluded: false,
        }
    }

    /// The method tag.
    pub fn method(&self) -> Method {
        self.method
    }

    /// The fully prefixed path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The bound middleware.
    pub fn middleware(&self) -> &SharedMiddleware<C> {
        &self.middleware
    }

    /// The documentation payload, if this entry carries it.
    pub fn state(&self) -> Option<&State> {
        self.state.as_ref()
    }

    /// The declared path of a registration redirected before commit.
    pub fn origin_path(&self) -> Option<&str> {
        self.origin_path.as_deref()
    }

    /// Where a forwarding entry sends its requests.
    pub fn redirect_target(&self) -> Option<&str> {
        self.redirect_target.as_deref()
    }

    /// Whether the entry is hidden from the route listing.
    pub fn is_excluded(&self) -> bool {
        self.excluded
    }

    pub(crate) fn is(&self, method: Method, path: &str) -> bool {
        self.method == method && self.path == path
    }
}

impl<C> fmt::Debug for Perform<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Perform")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("state", &self.state)
            .field("origin_path", &self.origin_path)
            .field("redirect_target", &self.redirect_target)
            .field("excluded", &self.excluded)
            .finish_non_exhaustive()
    }
}

/// Whether any entry is registered under exactly `(method, path)`.
pub(crate) fn contains<C>(entries: &[Perform<C>], method: Method, path: &str) -> bool {
    entries.iter().any(|entry| entry.is(method, path))
}

/// Shared handle to the ordered list of committed routes.
pub struct RouteTable<C> {
    entries: Arc<RwLock<Vec<Perform<C>>>>,
}

impl<C> RouteTable<C> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Number of committed entries, forwarding entries included.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether nothing has been committed yet.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Whether an entry is registered under exactly `(method, path)`.
    pub fn contains(&self, method: Method, path: &str) -> bool {
        contains(&self.read(), method, path)
    }

    /// Read-only access to the raw entries, in insertion order.
    pub fn inspect<R>(&self, f: impl FnOnce(&[Perform<C>]) -> R) -> R {
        f(&self.read())
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Vec<Perform<C>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, Vec<Perform<C>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C: RequestContext> RouteTable<C> {
    /// Collect, in insertion order, the middleware serving an inbound request.
    ///
    /// Paths compare byte for byte; `All` entries match every method.
    pub fn matching(&self, method: &str, path: &str) -> Chain<C> {
        let entries = self.read();
        compose(
            entries
                .iter()
                .filter(|entry| entry.path == path && entry.method.matches(method))
                .map(|entry| Arc::clone(&entry.middleware)),
        )
    }
}

impl<C> Clone for RouteTable<C> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<C> Default for RouteTable<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for RouteTable<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.read().iter()).finish()
    }
}
