//! # Redirect resolver
//!
//! Moves an already committed route to a new path and leaves a forwarding
//! entry at the old one:
//!
//! ```text
//! before:  POST /api/v1/file/upload   -> [upload]
//! after:   POST /api/v1/file/upload2  -> [upload]          (same entries, path rewritten)
//!          POST /api/v1/file/upload   -> [Redirect(upload2)] (appended)
//! ```
//!
//! The moved entries keep their middleware and documentation payload; only
//! their path changes.

use crate::{
    router::Router,
    table::{Perform, contains},
};
use routebook_core::{BoxError, Method, Middleware, Next, RequestContext, RouteError, shared};

/// Middleware answering every request with a redirect to a fixed location.
///
/// It never calls `next`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    location: String,
}

impl Redirect {
    /// Redirect to `location`.
    pub fn to(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }

    /// Where requests are sent.
    pub fn location(&self) -> &str {
        &self.location
    }
}

impl<C: RequestContext> Middleware<C> for Redirect {
    async fn handle(&self, ctx: &mut C, _next: Next<'_, C>) -> Result<(), BoxError> {
        ctx.redirect(&self.location);
        Ok(())
    }
}

impl<C: RequestContext> Router<C> {
    /// Move the committed `(method, prefix + origin)` route to
    /// `prefix + target`, leaving a forwarding entry at the old address.
    ///
    /// # Errors
    ///
    /// - [`RouteError::NotRegistered`] if nothing is committed at the origin.
    /// - [`RouteError::Duplicate`] if the target is already taken.
    ///
    /// The table is unchanged when an error is returned.
    pub fn redirect(
        &mut self,
        method: Method,
        origin: &str,
        target: &str,
    ) -> Result<(), RouteError> {
        let raw_address = self.resolve(origin);
        let redirect_address = self.resolve(target);

        let mut entries = self.table.write();
        if !contains(&entries, method, &raw_address) {
            return Err(RouteError::not_registered(method, raw_address));
        }
        if contains(&entries, method, &redirect_address) {
            return Err(RouteError::duplicate(method, redirect_address));
        }

        let mut moved = 0usize;
        let mut excluded = false;
        for entry in entries.iter_mut().filter(|e| e.is(method, &raw_address)) {
            entry.path.clone_from(&redirect_address);
            excluded |= entry.excluded;
            moved += 1;
        }

        if moved == 0 {
            return Ok(());
        }

        #[cfg(feature = "tracing")]
        tracing::info!(
            method = %method,
            from = %raw_address,
            to = %redirect_address,
            moved,
            "route redirected"
        );

        let mut forward = Perform::new(
            method,
            raw_address,
            shared(Redirect::to(redirect_address.clone())),
        );
        forward.redirect_target = Some(redirect_address);
        forward.excluded = excluded;
        entries.push(forward);

        Ok(())
    }
}
