//! # routebook-std
//!
//! The route table and everything built on it.
//!
//! This crate provides:
//! - **Registration**: [`RouteTable`], [`Router`], [`Registration`]
//! - **Redirects**: pre-commit [`Registration::redirect`], post-commit
//!   [`Router::redirect`] and the [`Redirect`] middleware
//! - **Listing**: [`RouteTable::route_list`] and [`RouteEntry`]
//! - **Dispatch**: [`Routes`]
//! - **Standard middleware**: Logging, Timeout
//! - **Tower integration** (feature `tower`)

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use routebook_core;

// Modules
pub mod dispatch;
pub mod listing;
pub mod middleware;
pub mod redirect;
pub mod router;
pub mod table;
pub mod testing;

#[cfg(feature = "tower")]
pub mod tower;

pub use dispatch::Routes;
pub use listing::RouteEntry;
pub use redirect::Redirect;
pub use router::{Registration, Router};
pub use table::{Perform, RouteTable, State};
