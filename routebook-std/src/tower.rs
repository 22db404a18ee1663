//! Tower integration for routebook.
//!
//! This module lets a route table sit in front of any `tower::Service` that
//! speaks `http`:
//!
//! - [`HttpContext`] implements [`RequestContext`] for an `http::Request`
//! - [`RoutesLayer`] / [`RoutesService`] dispatch each request through the
//!   table, with the wrapped service as the terminal continuation
//!
//! # Example
//!
//! ```rust,ignore
//! use routebook::tower::{HttpContext, RoutesLayer};
//! use tower::ServiceBuilder;
//!
//! let table = RouteTable::<HttpContext<Body, Body>>::new();
//! // ... register routes ...
//!
//! let service = ServiceBuilder::new()
//!     .layer(RoutesLayer::new(&table))
//!     .service(fallback);
//! ```
//!
//! A request that matches nothing reaches the wrapped service untouched. A
//! request whose chain finishes without producing a response gets an empty
//! `404 Not Found`.

use crate::{dispatch::Routes, table::RouteTable};
use futures::future::BoxFuture;
use http::{HeaderValue, Request, Response, StatusCode, header::LOCATION};
use routebook_core::{BoxError, Middleware, Next, RequestContext};
use std::{
    marker::PhantomData,
    task::{Context, Poll},
};
use tower::{Layer, Service, ServiceExt};

// ============================================================================
// Request Context
// ============================================================================

/// Request context wrapping an `http::Request<B>` and the eventual
/// `http::Response<R>`.
///
/// The request is handed to the wrapped service when the chain reaches the
/// terminal, after which [`HttpContext::request`] returns `None`. Method and
/// path stay readable for the whole request.
#[derive(Debug)]
pub struct HttpContext<B, R> {
    method: http::Method,
    path: String,
    request: Option<Request<B>>,
    response: Option<Response<R>>,
}

impl<B, R> HttpContext<B, R> {
    /// Wrap an inbound request.
    pub fn new(request: Request<B>) -> Self {
        Self {
            method: request.method().clone(),
            path: request.uri().path().to_owned(),
            request: Some(request),
            response: None,
        }
    }

    /// The request, unless it was already forwarded.
    pub fn request(&self) -> Option<&Request<B>> {
        self.request.as_ref()
    }

    /// Mutable access to the request, unless it was already forwarded.
    pub fn request_mut(&mut self) -> Option<&mut Request<B>> {
        self.request.as_mut()
    }

    /// Take the request out of the context.
    pub fn take_request(&mut self) -> Option<Request<B>> {
        self.request.take()
    }

    /// The response produced so far.
    pub fn response(&self) -> Option<&Response<R>> {
        self.response.as_ref()
    }

    /// Mutable access to the response produced so far.
    pub fn response_mut(&mut self) -> Option<&mut Response<R>> {
        self.response.as_mut()
    }

    /// Answer the request with `response`, replacing any earlier one.
    pub fn set_response(&mut self, response: Response<R>) {
        self.response = Some(response);
    }

    fn into_response(self) -> Response<R>
    where
        R: Default,
    {
        self.response.unwrap_or_else(|| {
            let mut response = Response::new(R::default());
            *response.status_mut() = StatusCode::NOT_FOUND;
            response
        })
    }
}

impl<B, R> RequestContext for HttpContext<B, R>
where
    B: Send + 'static,
    R: Default + Send + 'static,
{
    fn method(&self) -> &str {
        self.method.as_str()
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn redirect(&mut self, location: &str) {
        let mut response = Response::new(R::default());
        *response.status_mut() = StatusCode::FOUND;
        // A location that is not a valid header value still gets the status.
        if let Ok(value) = HeaderValue::from_str(location) {
            response.headers_mut().insert(LOCATION, value);
        }
        self.response = Some(response);
    }
}

// ============================================================================
// Terminal: forward to the wrapped service
// ============================================================================

/// Terminal continuation handing the request to the wrapped service.
struct Forward<S, B, R> {
    service: S,
    _marker: PhantomData<fn(B) -> R>,
}

impl<S, B, R> Middleware<HttpContext<B, R>> for Forward<S, B, R>
where
    S: Service<Request<B>, Response = Response<R>> + Clone + Send + Sync + 'static,
    S::Error: Into<BoxError>,
    S::Future: Send,
    B: Send + 'static,
    R: Default + Send + 'static,
{
    async fn handle(
        &self,
        ctx: &mut HttpContext<B, R>,
        _next: Next<'_, HttpContext<B, R>>,
    ) -> Result<(), BoxError> {
        let Some(request) = ctx.take_request() else {
            return Ok(());
        };
        let response = self
            .service
            .clone()
            .oneshot(request)
            .await
            .map_err(Into::<BoxError>::into)?;
        ctx.set_response(response);
        Ok(())
    }
}

// ============================================================================
// Layer / Service
// ============================================================================

/// Applies a route table in front of a service.
pub struct RoutesLayer<B, R> {
    routes: Routes<HttpContext<B, R>>,
}

impl<B, R> RoutesLayer<B, R> {
    /// Create a layer dispatching through `table`.
    pub fn new(table: &RouteTable<HttpContext<B, R>>) -> Self {
        Self {
            routes: table.routes(),
        }
    }
}

impl<B, R> Clone for RoutesLayer<B, R> {
    fn clone(&self) -> Self {
        Self {
            routes: self.routes.clone(),
        }
    }
}

impl<S, B, R> Layer<S> for RoutesLayer<B, R> {
    type Service = RoutesService<S, B, R>;

    fn layer(&self, inner: S) -> Self::Service {
        RoutesService {
            routes: self.routes.clone(),
            inner,
        }
    }
}

/// A service dispatching each request through a route table before falling
/// back to the wrapped service.
pub struct RoutesService<S, B, R> {
    routes: Routes<HttpContext<B, R>>,
    inner: S,
}

impl<S: Clone, B, R> Clone for RoutesService<S, B, R> {
    fn clone(&self) -> Self {
        Self {
            routes: self.routes.clone(),
            inner: self.inner.clone(),
        }
    }
}

impl<S, B, R> Service<Request<B>> for RoutesService<S, B, R>
where
    S: Service<Request<B>, Response = Response<R>> + Clone + Send + Sync + 'static,
    S::Error: Into<BoxError>,
    S::Future: Send,
    B: Send + 'static,
    R: Default + Send + 'static,
{
    type Response = Response<R>;
    type Error = BoxError;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        // Readiness of the wrapped service is awaited by the terminal, which
        // drives its own clone.
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<B>) -> Self::Future {
        let routes = self.routes.clone();
        let forward = Forward {
            service: self.inner.clone(),
            _marker: PhantomData,
        };

        Box::pin(async move {
            let mut ctx = HttpContext::new(request);
            routes.dispatch_to(&mut ctx, &forward).await?;
            Ok(ctx.into_response())
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
