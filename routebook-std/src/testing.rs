//! Testing utilities for routebook.
//!
//! # Features
//!
//! - [`MockContext`]: An in-memory request context that records what the chain did
//! - [`RecordingMiddleware`]: Writes its label into the context's trail
//! - [`CountingMiddleware`]: Counts invocations across requests
//! - [`FailingMiddleware`]: Returns an error without proceeding

use routebook_core::{BoxError, Middleware, Next, RequestContext};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Mock Context
// ============================================================================

/// A request context for tests.
///
/// # Example
///
/// ```rust,ignore
/// let mut ctx = MockContext::new("GET", "/api/v2/menu/list");
/// routes.dispatch(&mut ctx, Next::end()).await?;
/// assert_eq!(ctx.trail(), ["search", "get_data", "paging"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockContext {
    method: String,
    path: String,
    location: Option<String>,
    redirects: usize,
    trail: Vec<String>,
}

impl MockContext {
    /// Create a context for an inbound `method` and `path`.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    /// Append a marker to the trail.
    pub fn record(&mut self, label: impl Into<String>) {
        self.trail.push(label.into());
    }

    /// Markers recorded so far, in order.
    pub fn trail(&self) -> &[String] {
        &self.trail
    }

    /// The last redirect location issued, if any.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// How many times `redirect` was called.
    pub fn redirects(&self) -> usize {
        self.redirects
    }
}

impl RequestContext for MockContext {
    fn method(&self) -> &str {
        &self.method
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn redirect(&mut self, location: &str) {
        self.location = Some(location.to_owned());
        self.redirects += 1;
    }
}

// ============================================================================
// Recording Middleware
// ============================================================================

/// A middleware that records its label on the [`MockContext`] trail.
///
/// Useful for asserting which middleware ran and in what order.
#[derive(Debug, Clone)]
pub struct RecordingMiddleware {
    label: String,
    proceed: bool,
}

impl RecordingMiddleware {
    /// Record and then call `next`.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            proceed: true,
        }
    }

    /// Record and stop; `next` is never called.
    pub fn halting(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            proceed: false,
        }
    }
}

impl Middleware<MockContext> for RecordingMiddleware {
    async fn handle(
        &self,
        ctx: &mut MockContext,
        next: Next<'_, MockContext>,
    ) -> Result<(), BoxError> {
        ctx.record(self.label.clone());
        if self.proceed {
            next.run(ctx).await
        } else {
            Ok(())
        }
    }
}

// ============================================================================
// Counting Middleware
// ============================================================================

/// A middleware that counts invocations and proceeds.
///
/// Clones share the counter.
#[derive(Debug, Clone, Default)]
pub struct CountingMiddleware {
    count: Arc<AtomicUsize>,
}

impl CountingMiddleware {
    /// Create a new counting middleware.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl<C: RequestContext> Middleware<C> for CountingMiddleware {
    async fn handle(&self, ctx: &mut C, next: Next<'_, C>) -> Result<(), BoxError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        next.run(ctx).await
    }
}

// ============================================================================
// Failing Middleware
// ============================================================================

/// A middleware that always fails with the given message.
#[derive(Debug, Clone)]
pub struct FailingMiddleware {
    message: String,
}

impl FailingMiddleware {
    /// Create a middleware failing with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl<C: RequestContext> Middleware<C> for FailingMiddleware {
    async fn handle(&self, _ctx: &mut C, _next: Next<'_, C>) -> Result<(), BoxError> {
        Err(self.message.clone().into())
    }
}
