//! Procedural macros for routebook.
//!
//! - `#[middleware]` - Attribute macro turning an `async fn` into a middleware

use proc_macro::TokenStream;

mod middleware;

/// Turn an `async fn(ctx: &mut Ctx, next: Next<'_, Ctx>)` into a middleware.
///
/// The function is replaced by a unit struct of the same name implementing
/// `routebook::Middleware<Ctx>`, so it can be dropped straight into `chain!`.
///
/// # Arguments
///
/// - `name = "..."` - name of the generated struct
/// - `filter = expr` - a `Fn(&Ctx) -> bool`; when it returns `false` the body
///   is skipped and the request proceeds with `next`
///
/// # Example
///
/// ```rust,ignore
/// #[middleware]
/// async fn paging(ctx: &mut Ctx, next: Next<'_, Ctx>) -> Result<(), BoxError> {
///     ctx.paginate();
///     next.run(ctx).await
/// }
///
/// routes.get("/menu/list", chain![search, get_data, paging])?.exec()?;
/// ```
#[proc_macro_attribute]
pub fn middleware(attr: TokenStream, item: TokenStream) -> TokenStream {
    middleware::middleware_impl(attr, item)
}
