//! # Middleware
//!
//! A middleware receives the request context and a [`Next`] continuation.
//! It may do work, call `next.run(ctx).await` to hand over to the rest of the
//! chain, do more work after the downstream chain settles, or return without
//! calling `next` at all to short-circuit.
//!
//! # Static vs Dynamic Dispatch
//!
//! [`Middleware`] uses native `async fn` for zero-cost static dispatch.
//! The route table stores chains of mixed types, so it works with the
//! object-safe [`DynMiddleware`] instead; every `Middleware` is a
//! `DynMiddleware` through a blanket impl.

use crate::{context::RequestContext, error::BoxError, next::Next};
use std::{future::Future, pin::Pin, sync::Arc};

/// A boxed, sendable future borrowing for `'a`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A type-erased middleware shared between route table entries.
pub type SharedMiddleware<C> = Arc<dyn DynMiddleware<C>>;

/// An onion-style request middleware.
///
/// # Example
///
/// ```rust,ignore
/// struct Auth;
///
/// impl Middleware<Ctx> for Auth {
///     async fn handle(&self, ctx: &mut Ctx, next: Next<'_, Ctx>) -> Result<(), BoxError> {
///         if !ctx.is_authorized() {
///             return Err("unauthorized".into());
///         }
///         next.run(ctx).await
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a middleware for `{C}`",
    label = "missing `Middleware<{C}>` implementation",
    note = "Implement `handle` for `{C}`, wrap a closure with `from_fn`, or use `#[middleware]`."
)]
pub trait Middleware<C: RequestContext>: Send + Sync + 'static {
    /// Process the request, optionally continuing with `next`.
    fn handle(
        &self,
        ctx: &mut C,
        next: Next<'_, C>,
    ) -> impl Future<Output = Result<(), BoxError>> + Send;
}

/// Dynamic object-safe version of [`Middleware`].
pub trait DynMiddleware<C>: Send + Sync + 'static {
    /// Process the request (dynamic dispatch version).
    fn handle_dyn<'a>(
        &'a self,
        ctx: &'a mut C,
        next: Next<'a, C>,
    ) -> BoxFuture<'a, Result<(), BoxError>>;
}

// Blanket implementation: any Middleware is a DynMiddleware.
impl<C: RequestContext, T: Middleware<C>> DynMiddleware<C> for T {
    fn handle_dyn<'a>(
        &'a self,
        ctx: &'a mut C,
        next: Next<'a, C>,
    ) -> BoxFuture<'a, Result<(), BoxError>> {
        Box::pin(self.handle(ctx, next))
    }
}

/// Erase a middleware so it can sit in a chain next to other types.
///
/// This is what the [`chain!`](crate::chain) macro expands to.
pub fn shared<C, M>(middleware: M) -> SharedMiddleware<C>
where
    C: RequestContext,
    M: Middleware<C>,
{
    Arc::new(middleware)
}

/// Middleware built from a closure. See [`from_fn`].
#[derive(Clone, Copy)]
pub struct FnMiddleware<F> {
    func: F,
}

/// Wrap a closure returning a boxed future as a middleware.
///
/// ```rust,ignore
/// let stamp = from_fn(|ctx: &mut Ctx, next: Next<'_, Ctx>| {
///     Box::pin(async move {
///         ctx.stamp();
///         next.run(ctx).await
///     })
/// });
/// ```
///
/// For named `async fn`s prefer the `#[middleware]` attribute.
pub fn from_fn<C, F>(func: F) -> FnMiddleware<F>
where
    C: RequestContext,
    F: for<'a> Fn(&'a mut C, Next<'a, C>) -> BoxFuture<'a, Result<(), BoxError>>
        + Send
        + Sync
        + 'static,
{
    FnMiddleware { func }
}

impl<C, F> Middleware<C> for FnMiddleware<F>
where
    C: RequestContext,
    F: for<'a> Fn(&'a mut C, Next<'a, C>) -> BoxFuture<'a, Result<(), BoxError>>
        + Send
        + Sync
        + 'static,
{
    async fn handle(&self, ctx: &mut C, next: Next<'_, C>) -> Result<(), BoxError> {
        (self.func)(ctx, next).await
    }
}

/// Build a middleware chain from a comma separated list of middleware values.
///
/// Each element is erased with [`shared`]; the result is a
/// `Vec<SharedMiddleware<C>>` ready to hand to a router registration.
///
/// ```rust,ignore
/// routes.get("/menu/list", chain![search, get_data, paging])?.exec()?;
/// ```
#[macro_export]
macro_rules! chain {
    () => {
        ::std::vec::Vec::new()
    };
    ($($middleware:expr),+ $(,)?) => {
        ::std::vec![$($crate::shared($middleware)),+]
    };
}
