//! # Router builder
//!
//! A [`Router`] is one route group: a path prefix plus the annotations waiting
//! for the next registration. Declaring a route stages a [`Registration`];
//! committing it with [`Registration::exec`] pushes one [`Perform`] per
//! middleware into the shared [`RouteTable`] and hands the router back.
//!
//! ```text
//! Router (idle) --get/post/...--> Registration (pending) --exec--> Router (idle)
//! ```
//!
//! The pending state borrows the router mutably, so a second declaration
//! cannot start before the first one is committed or dropped.
//!
//! # Example
//!
//! ```rust,ignore
//! let table = RouteTable::new();
//! let api = table.router("/api");
//!
//! let mut v1 = table.router("/v1");
//! v1.mount(&api);
//! v1.post("/file/upload", chain![upload])?
//!     .redirect("/file/upload2")?
//!     .state(json!({ "name": "upload file" }))
//!     .exec()?;
//! ```
//!
//! [`Perform`]: crate::table::Perform

use crate::{
    redirect::Redirect,
    table::{Perform, RouteTable, State, contains},
};
use routebook_core::{Method, RequestContext, RouteError, SharedMiddleware, shared};

/// Annotations carried over to the next committed registration.
#[derive(Debug, Default)]
struct Annotation {
    state: Option<State>,
    excluded: bool,
}

/// A route group sharing one path prefix.
pub struct Router<C> {
    pub(crate) table: RouteTable<C>,
    pub(crate) prefix: String,
    annotation: Annotation,
}

impl<C> RouteTable<C> {
    /// Create a router committing into this table.
    pub fn router(&self, prefix: impl Into<String>) -> Router<C> {
        Router::new(self, prefix)
    }
}

impl<C> Router<C> {
    /// Create a router with its own `prefix` committing into `table`.
    pub fn new(table: &RouteTable<C>, prefix: impl Into<String>) -> Self {
        Self {
            table: table.clone(),
            prefix: prefix.into(),
            annotation: Annotation::default(),
        }
    }

    /// The resolved prefix prepended to every path declared here.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Nest this router under `parent` by prepending the parent's prefix.
    ///
    /// Call it before declaring any route. Routes already committed keep the
    /// prefix they were committed with.
    pub fn mount(&mut self, parent: &Router<C>) -> &mut Self {
        self.prefix.insert_str(0, &parent.prefix);
        self
    }

    /// Attach a documentation payload to the next committed registration.
    pub fn state(&mut self, state: State) -> &mut Self {
        self.annotation.state = Some(state);
        self
    }

    /// Alias of [`Router::state`].
    pub fn remark(&mut self, state: State) -> &mut Self {
        self.state(state)
    }

    /// Hide the next committed registration from the route listing.
    ///
    /// Dispatch is unaffected.
    pub fn no_back(&mut self) -> &mut Self {
        self.annotation.excluded = true;
        self
    }

    pub(crate) fn resolve(&self, path: &str) -> String {
        format!("{}{}", self.prefix, path)
    }
}

impl<C: RequestContext> Router<C> {
    /// Stage a registration of `middleware` under `(method, prefix + path)`.
    ///
    /// Fails with [`RouteError::Duplicate`] if the pair is already committed;
    /// the table and the router's pending annotations are left untouched.
    pub fn method<I>(
        &mut self,
        method: Method,
        path: &str,
        middleware: I,
    ) -> Result<Registration<'_, C>, RouteError>
    where
        I: IntoIterator<Item = SharedMiddleware<C>>,
    {
        let address = self.resolve(path);
        if self.table.contains(method, &address) {
            return Err(RouteError::duplicate(method, address));
        }

        Ok(Registration {
            router: self,
            method,
            address,
            middleware: middleware.into_iter().collect(),
            state: None,
            redirect: None,
            excluded: false,
        })
    }

    /// Stage and commit in one step.
    pub fn route<I>(&mut self, method: Method, path: &str, middleware: I) -> Result<(), RouteError>
    where
        I: IntoIterator<Item = SharedMiddleware<C>>,
    {
        self.method(method, path, middleware)?.exec()
    }

    /// Stage a registration matching every method.
    pub fn all<I>(&mut self, path: &str, middleware: I) -> Result<Registration<'_, C>, RouteError>
    where
        I: IntoIterator<Item = SharedMiddleware<C>>,
    {
        self.method(Method::All, path, middleware)
    }

    /// Stage a `GET` registration.
    pub fn get<I>(&mut self, path: &str, middleware: I) -> Result<Registration<'_, C>, RouteError>
    where
        I: IntoIterator<Item = SharedMiddleware<C>>,
    {
        self.method(Method::Get, path, middleware)
    }

    /// Stage a `POST` registration.
    pub fn post<I>(&mut self, path: &str, middleware: I) -> Result<Registration<'_, C>, RouteError>
    where
        I: IntoIterator<Item = SharedMiddleware<C>>,
    {
        self.method(Method::Post, path, middleware)
    }

    /// Stage a `PUT` registration.
    pub fn put<I>(&mut self, path: &str, middleware: I) -> Result<Registration<'_, C>, RouteError>
    where
        I: IntoIterator<Item = SharedMiddleware<C>>,
    {
        self.method(Method::Put, path, middleware)
    }

    /// Stage a `DELETE` registration.
    pub fn delete<I>(
        &mut self,
        path: &str,
        middleware: I,
    ) -> Result<Registration<'_, C>, RouteError>
    where
        I: IntoIterator<Item = SharedMiddleware<C>>,
    {
        self.method(Method::Delete, path, middleware)
    }

    /// Stage a `HEAD` registration.
    pub fn head<I>(&mut self, path: &str, middleware: I) -> Result<Registration<'_, C>, RouteError>
    where
        I: IntoIterator<Item = SharedMiddleware<C>>,
    {
        self.method(Method::Head, path, middleware)
    }

    /// Stage a `CONNECT` registration.
    pub fn connect<I>(
        &mut self,
        path: &str,
        middleware: I,
    ) -> Result<Registration<'_, C>, RouteError>
    where
        I: IntoIterator<Item = SharedMiddleware<C>>,
    {
        self.method(Method::Connect, path, middleware)
    }

    /// Stage an `OPTIONS` registration.
    pub fn options<I>(
        &mut self,
        path: &str,
        middleware: I,
    ) -> Result<Registration<'_, C>, RouteError>
    where
        I: IntoIterator<Item = SharedMiddleware<C>>,
    {
        self.method(Method::Options, path, middleware)
    }

    /// Stage a `TRACE` registration.
    pub fn trace<I>(&mut self, path: &str, middleware: I) -> Result<Registration<'_, C>, RouteError>
    where
        I: IntoIterator<Item = SharedMiddleware<C>>,
    {
        self.method(Method::Trace, path, middleware)
    }

    /// Stage a `PATCH` registration.
    pub fn patch<I>(&mut self, path: &str, middleware: I) -> Result<Registration<'_, C>, RouteError>
    where
        I: IntoIterator<Item = SharedMiddleware<C>>,
    {
        self.method(Method::Patch, path, middleware)
    }
}

impl<C> Clone for Router<C> {
    /// Clones the prefix and table handle; pending annotations are not copied.
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            prefix: self.prefix.clone(),
            annotation: Annotation::default(),
        }
    }
}

impl<C> std::fmt::Debug for Router<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("prefix", &self.prefix)
            .field("annotation", &self.annotation)
            .finish_non_exhaustive()
    }
}

/// A staged registration waiting for [`exec`](Registration::exec).
#[must_use = "a registration is not committed until `exec` is called"]
pub struct Registration<'r, C> {
    router: &'r mut Router<C>,
    method: Method,
    address: String,
    middleware: Vec<SharedMiddleware<C>>,
    state: Option<State>,
    redirect: Option<String>,
    excluded: bool,
}

impl<C: RequestContext> Registration<'_, C> {
    /// Attach a documentation payload to this registration.
    pub fn state(mut self, state: State) -> Self {
        self.state = Some(state);
        self
    }

    /// Alias of [`Registration::state`].
    pub fn remark(self, state: State) -> Self {
        self.state(state)
    }

    /// Hide this registration from the route listing.
    pub fn no_back(mut self) -> Self {
        self.excluded = true;
        self
    }

    /// Serve this registration under `prefix + path` instead of the declared
    /// path, leaving a forwarding entry behind at the declared path.
    ///
    /// Fails with [`RouteError::Duplicate`] if the target is already taken
    /// or is the declared path itself.
    pub fn redirect(mut self, path: &str) -> Result<Self, RouteError> {
        let target = self.router.resolve(path);
        if target == self.address || self.router.table.contains(self.method, &target) {
            return Err(RouteError::duplicate(self.method, target));
        }
        self.redirect = Some(target);
        Ok(self)
    }

    /// Commit to the route table.
    ///
    /// One entry is pushed per middleware, in order. The documentation payload
    /// attaches to the first of them only so the route is documented once.
    /// The declaration is re-checked against the table first; on conflict
    /// nothing is pushed and the router keeps its pending annotations.
    pub fn exec(self) -> Result<(), RouteError> {
        let Registration {
            router,
            method,
            address,
            middleware,
            state,
            redirect,
            excluded,
        } = self;

        let mut entries = router.table.write();
        let served_at = redirect.as_deref().unwrap_or(&address);
        if contains(&entries, method, served_at) {
            return Err(RouteError::duplicate(method, served_at));
        }
        if redirect.is_some() && contains(&entries, method, &address) {
            return Err(RouteError::duplicate(method, address));
        }

        let pending = std::mem::take(&mut router.annotation);
        let mut state = state.or(pending.state);
        let excluded = excluded || pending.excluded;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            method = %method,
            path = %served_at,
            middleware = middleware.len(),
            "route registered"
        );

        for handler in middleware {
            let mut entry = Perform::new(method, served_at, handler);
            entry.state = state.take();
            entry.origin_path = redirect.as_ref().map(|_| address.clone());
            entry.excluded = excluded;
            entries.push(entry);
        }

        if let Some(target) = redirect {
            let mut forward =
                Perform::new(method, address, shared(Redirect::to(target.clone())));
            forward.redirect_target = Some(target);
            forward.excluded = excluded;
            entries.push(forward);
        }

        Ok(())
    }
}
