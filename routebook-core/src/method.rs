//! HTTP method tags used as the first half of a route key.

use crate::error::RouteError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The method a route is registered under.
///
/// [`Method::All`] is not a real HTTP method: an entry tagged `All` matches
/// every inbound method and is left out of the documented route listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// Matches any inbound method.
    All,
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `HEAD`
    Head,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
    /// `CONNECT`
    Connect,
    /// `OPTIONS`
    Options,
    /// `TRACE`
    Trace,
    /// `PATCH`
    Patch,
}

impl Method {
    /// Every method tag, `All` first.
    pub const VARIANTS: [Method; 10] = [
        Method::All,
        Method::Get,
        Method::Post,
        Method::Head,
        Method::Put,
        Method::Delete,
        Method::Connect,
        Method::Options,
        Method::Trace,
        Method::Patch,
    ];

    /// The canonical upper-case name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Method::All => "ALL",
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Head => "HEAD",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Connect => "CONNECT",
            Method::Options => "OPTIONS",
            Method::Trace => "TRACE",
            Method::Patch => "PATCH",
        }
    }

    /// Whether an entry registered under `self` serves a request whose
    /// method is `inbound`.
    ///
    /// The comparison is exact; hosts are expected to hand over the method
    /// in its canonical upper-case form.
    pub fn matches(&self, inbound: &str) -> bool {
        matches!(self, Method::All) || self.as_str() == inbound
    }

    /// Whether this is the catch-all tag.
    pub const fn is_all(&self) -> bool {
        matches!(self, Method::All)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::VARIANTS
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| RouteError::UnknownMethod(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_matches_everything() {
        assert!(Method::All.matches("GET"));
        assert!(Method::All.matches("PROPFIND"));
    }

    #[test]
    fn test_specific_method_is_exact() {
        assert!(Method::Post.matches("POST"));
        assert!(!Method::Post.matches("GET"));
        assert!(!Method::Post.matches("post"));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("patch".parse::<Method>().unwrap(), Method::Patch);
        assert_eq!("ALL".parse::<Method>().unwrap(), Method::All);
        assert_eq!(
            "BREW".parse::<Method>(),
            Err(RouteError::UnknownMethod("BREW".into()))
        );
    }

    #[test]
    fn test_serializes_upper_case() {
        let json = serde_json::to_string(&Method::Delete).unwrap();
        assert_eq!(json, "\"DELETE\"");
    }
}
