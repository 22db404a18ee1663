//! The per-request context the host framework hands to the dispatcher.

/// What the dispatcher needs from a host request.
///
/// The host owns the concrete type; routebook only reads the method and path
/// for matching and asks the context to issue a redirect when a forwarding
/// entry is hit. Everything else (bodies, headers, response building) is
/// between the host and its middleware.
///
/// # Example
///
/// ```rust,ignore
/// struct Ctx {
///     method: String,
///     path: String,
///     location: Option<String>,
/// }
///
/// impl RequestContext for Ctx {
///     fn method(&self) -> &str { &self.method }
///     fn path(&self) -> &str { &self.path }
///     fn redirect(&mut self, location: &str) {
///         self.location = Some(location.to_owned());
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as a request context",
    label = "missing `RequestContext` implementation",
    note = "Implement `method`, `path` and `redirect` for `{Self}`."
)]
pub trait RequestContext: Send + 'static {
    /// The inbound method, upper-case (`"GET"`, `"POST"`, ...).
    fn method(&self) -> &str;

    /// The inbound pathname, without query string. Matched byte for byte.
    fn path(&self) -> &str;

    /// Answer the request with a redirect to `location`.
    fn redirect(&mut self, location: &str);
}
