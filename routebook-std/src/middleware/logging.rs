//! Logging middleware for request observation.

use routebook_core::{BoxError, Middleware, Next, RequestContext};

/// A middleware that logs every request passing through it and proceeds.
///
/// Logs through `tracing` when the `tracing` feature is enabled and is a
/// plain pass-through otherwise. Errors returned by the downstream chain are
/// not logged here; they belong to the host.
///
/// # Example
///
/// ```rust,ignore
/// routes.get("/menu/list", chain![Logging::named("menu"), search, paging])?.exec()?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Logging {
    name: &'static str,
}

impl Logging {
    /// Create a new `Logging` middleware with a default name.
    pub fn new() -> Self {
        Self { name: "request" }
    }

    /// Create a new `Logging` middleware with a custom name.
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: RequestContext> Middleware<C> for Logging {
    async fn handle(&self, ctx: &mut C, next: Next<'_, C>) -> Result<(), BoxError> {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(
                name = %self.name,
                method = ctx.method(),
                path = ctx.path(),
                remaining = next.remaining(),
                "handling request"
            );
        }

        #[cfg(not(feature = "tracing"))]
        {
            let _ = self.name;
        }

        next.run(ctx).await
    }
}
