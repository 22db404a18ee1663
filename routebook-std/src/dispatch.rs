//! # Dispatcher
//!
//! [`Routes`] is the request-time face of a [`RouteTable`]. It is itself a
//! [`Middleware`], so the host installs it as the last stage of its own
//! pipeline and passes its own continuation as the terminal:
//!
//! ```text
//! host pipeline: [cors] -> [body parser] -> Routes -> host fallback
//!                                             |
//!                                             +-> matched chain for (method, path)
//! ```
//!
//! For every request it collects the middleware of all entries whose path
//! equals the request path and whose method equals the request method or is
//! `All`, in insertion order, and runs them with [`Chain::run`]. Errors from
//! the chain are returned as is.

use crate::table::RouteTable;
use routebook_core::{BoxError, Chain, DynMiddleware, Middleware, Next, RequestContext};

/// Dispatches requests through the chains registered in a [`RouteTable`].
pub struct Routes<C> {
    table: RouteTable<C>,
}

impl<C> RouteTable<C> {
    /// Create a dispatcher serving this table.
    pub fn routes(&self) -> Routes<C> {
        Routes::new(self)
    }
}

impl<C> Routes<C> {
    /// Create a dispatcher serving `table`.
    pub fn new(table: &RouteTable<C>) -> Self {
        Self {
            table: table.clone(),
        }
    }

    /// The table being served.
    pub fn table(&self) -> &RouteTable<C> {
        &self.table
    }
}

impl<C: RequestContext> Routes<C> {
    /// The chain a request with `method` and `path` would run.
    pub fn chain_for(&self, method: &str, path: &str) -> Chain<C> {
        self.table.matching(method, path)
    }

    /// Run the matched chain, with `next` as the terminal continuation.
    ///
    /// With no match the request goes straight to `next`.
    pub async fn dispatch(&self, ctx: &mut C, next: Next<'_, C>) -> Result<(), BoxError> {
        let chain = self.chain_for(ctx.method(), ctx.path());

        #[cfg(feature = "tracing")]
        tracing::trace!(
            method = ctx.method(),
            path = ctx.path(),
            matched = chain.len(),
            "dispatching request"
        );

        chain.run(ctx, next).await
    }

    /// Run the matched chain with `endpoint` as the terminal.
    pub async fn dispatch_to(
        &self,
        ctx: &mut C,
        endpoint: &dyn DynMiddleware<C>,
    ) -> Result<(), BoxError> {
        self.dispatch(ctx, Next::endpoint(endpoint)).await
    }
}

impl<C: RequestContext> Middleware<C> for Routes<C> {
    async fn handle(&self, ctx: &mut C, next: Next<'_, C>) -> Result<(), BoxError> {
        self.dispatch(ctx, next).await
    }
}

impl<C> Clone for Routes<C> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
        }
    }
}

impl<C> std::fmt::Debug for Routes<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Routes")
            .field("entries", &self.table.len())
            .finish()
    }
}
