#![allow(dead_code)]

use routebook::{BoxError, Middleware, Next, RequestContext};

// ============================================================================
// Test Context
// ============================================================================

/// A small web-like context: inbound method/path plus a status, body and a
/// log of what the middleware did.
#[derive(Debug, Default)]
pub struct AppContext {
    pub method: String,
    pub path: String,
    pub status: u16,
    pub location: Option<String>,
    pub body: Option<String>,
    pub log: Vec<String>,
}

impl AppContext {
    pub fn new(method: &str, path: &str) -> Self {
        Self {
            method: method.to_owned(),
            path: path.to_owned(),
            status: 404,
            ..Self::default()
        }
    }
}

impl RequestContext for AppContext {
    fn method(&self) -> &str {
        &self.method
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn redirect(&mut self, location: &str) {
        self.status = 302;
        self.location = Some(location.to_owned());
    }
}

// ============================================================================
// Test Middleware
// ============================================================================

/// Logs `label>` on the way in and `<label` on the way out.
pub struct Onion(pub &'static str);

impl Middleware<AppContext> for Onion {
    async fn handle(
        &self,
        ctx: &mut AppContext,
        next: Next<'_, AppContext>,
    ) -> Result<(), BoxError> {
        ctx.log.push(format!("{}>", self.0));
        next.run(ctx).await?;
        ctx.log.push(format!("<{}", self.0));
        Ok(())
    }
}

/// Answers with a body and stops.
pub struct Respond(pub &'static str);

impl Middleware<AppContext> for Respond {
    async fn handle(
        &self,
        ctx: &mut AppContext,
        _next: Next<'_, AppContext>,
    ) -> Result<(), BoxError> {
        ctx.status = 200;
        ctx.body = Some(self.0.to_owned());
        ctx.log.push(format!("respond {}", self.0));
        Ok(())
    }
}

/// Host fallback used as the terminal continuation.
pub struct Fallback;

impl Middleware<AppContext> for Fallback {
    async fn handle(
        &self,
        ctx: &mut AppContext,
        _next: Next<'_, AppContext>,
    ) -> Result<(), BoxError> {
        ctx.log.push("fallback".to_owned());
        Ok(())
    }
}
