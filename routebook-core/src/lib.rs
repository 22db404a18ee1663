//! # routebook-core
//!
//! Core traits for the routebook route table and middleware engine.
//!
//! This crate has minimal dependencies and is meant to be imported by
//! middleware libraries that do not need the route table itself.
//!
//! # Building Blocks
//!
//! ## Request context ([`RequestContext`])
//!
//! The host framework's per-request object. routebook only needs the inbound
//! method and path for matching, and a way to answer with a redirect.
//!
//! ## Middleware ([`Middleware`])
//!
//! Onion-style request processing: each middleware receives the context and a
//! [`Next`] continuation, and decides whether, when and how to proceed.
//!
//! ## Composition ([`Chain`], [`compose`])
//!
//! An immutable ordered chain plus a terminal continuation. Running it invokes
//! each middleware only after its predecessor calls `next`.
//!
//! # Error Types
//!
//! - [`RouteError`] - Registration errors (duplicate route, unknown redirect
//!   source)
//! - [`BoxError`] - Middleware errors, propagated unmodified

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod context;
mod error;
mod method;
mod middleware;
mod next;

// Re-exports
pub use context::RequestContext;
pub use error::{BoxError, RouteError};
pub use method::Method;
pub use middleware::{
    BoxFuture, DynMiddleware, FnMiddleware, Middleware, SharedMiddleware, from_fn, shared,
};
pub use next::{Chain, Next, compose};
