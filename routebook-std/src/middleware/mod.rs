//! Standard middleware.

pub mod logging;
#[cfg(feature = "timeout")]
pub mod timeout;
