//! Timeout middleware bounding the downstream chain.

use routebook_core::{BoxError, Middleware, Next, RequestContext};
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;

/// Error returned when the downstream chain does not settle in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("middleware chain timed out after {0:?}")]
pub struct TimeoutError(pub Duration);

/// A middleware that gives the rest of the chain `duration` to finish.
///
/// On expiry the downstream future is dropped and [`TimeoutError`] is
/// returned; whatever the chain already did to the context stays done.
#[derive(Debug, Clone, Copy)]
pub struct Timeout {
    duration: Duration,
}

impl Timeout {
    /// Create a new timeout middleware.
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

impl<C: RequestContext> Middleware<C> for Timeout {
    async fn handle(&self, ctx: &mut C, next: Next<'_, C>) -> Result<(), BoxError> {
        match timeout(self.duration, next.run(ctx)).await {
            Ok(result) => result,
            Err(_) => Err(Box::new(TimeoutError(self.duration))),
        }
    }
}
