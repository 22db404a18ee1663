//! # routebook - Declarative route table with onion middleware
//!
//! `routebook` keeps an ordered table of `(method, path, middleware)` entries
//! built through a prefixed router, and dispatches requests through the
//! matched middleware chain Koa style: every middleware gets the request
//! context and a `next` continuation it may run, skip, or wrap.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use routebook::prelude::*;
//!
//! let table = RouteTable::<Ctx>::new();
//! let mut api = table.router("/api/v2");
//!
//! api.get("/menu/list", chain![search, get_data, paging])?
//!     .state(json!({ "name": "menu list" }))
//!     .exec()?;
//!
//! api.post("/file/upload", chain![upload])?
//!     .redirect("/file/upload2")?
//!     .exec()?;
//!
//! // Documentation listing, one entry per (method, path)
//! let docs = table.route_list();
//!
//! // Request time: run the matched chain, then the host's continuation
//! table.routes().dispatch(&mut ctx, next).await?;
//! ```
//!
//! ## Features
//!
//! - `macros`: the `#[middleware]` attribute
//! - `tracing`: registration and dispatch events via `tracing`
//! - `timeout`: the [`middleware::Timeout`] middleware (tokio)
//! - `tower`: [`tower::RoutesLayer`] for `http` services

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use routebook_core::{
    // Errors
    BoxError,
    // Middleware
    BoxFuture,
    // Composition
    Chain,
    DynMiddleware,
    FnMiddleware,
    // Methods
    Method,
    Middleware,
    Next,
    // Context
    RequestContext,
    RouteError,
    SharedMiddleware,
    chain,
    compose,
    from_fn,
    shared,
};

// Route table
pub use routebook_std::{
    Perform, Redirect, Registration, RouteEntry, RouteTable, Router, Routes, State,
};

/// Standard middleware implementations.
pub mod middleware {
    pub use routebook_std::middleware::logging::Logging;
    #[cfg(feature = "timeout")]
    pub use routebook_std::middleware::timeout::{Timeout, TimeoutError};
}

/// Tower integration.
#[cfg(feature = "tower")]
pub mod tower {
    pub use routebook_std::tower::{HttpContext, RoutesLayer, RoutesService};
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use routebook_std::testing::*;
}

/// Prelude module - common imports for routebook.
///
/// # Usage
///
/// ```rust,ignore
/// use routebook::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError, Method, Middleware, Next, RequestContext, RouteError, RouteTable, Router,
        Routes, chain, from_fn,
    };
}

#[cfg(feature = "macros")]
pub use routebook_macros::middleware;
