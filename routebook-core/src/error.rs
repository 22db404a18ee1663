//! Error types for routebook.
//!
//! Two families of failures exist and they never mix:
//!
//! - [`RouteError`] - configuration mistakes detected while building the
//!   route table. These are meant to abort startup.
//! - [`BoxError`] - whatever a middleware returns at request time. The
//!   dispatcher hands it back to the host untouched.

use crate::method::Method;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while registering or redirecting routes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// The `(method, path)` pair is already present in the route table.
    #[error("duplicate route: {method} {path}")]
    Duplicate {
        /// Method of the conflicting registration.
        method: Method,
        /// Fully prefixed path of the conflicting registration.
        path: String,
    },

    /// A redirect names an origin that was never committed.
    #[error("route not registered yet: {method} {path}")]
    NotRegistered {
        /// Method of the redirect source.
        method: Method,
        /// Fully prefixed path of the redirect source.
        path: String,
    },

    /// A method name could not be parsed.
    #[error("unknown http method: {0}")]
    UnknownMethod(String),
}

impl RouteError {
    /// Build a [`RouteError::Duplicate`].
    pub fn duplicate(method: Method, path: impl Into<String>) -> Self {
        RouteError::Duplicate {
            method,
            path: path.into(),
        }
    }

    /// Build a [`RouteError::NotRegistered`].
    pub fn not_registered(method: Method, path: impl Into<String>) -> Self {
        RouteError::NotRegistered {
            method,
            path: path.into(),
        }
    }
}
