//! Request methods understood by the engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A method token the engine has no access mode for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported HTTP method: {0}")]
pub struct UnsupportedMethodError(pub String);

/// HTTP methods that map to an access mode.
///
/// Parsing is exact: only the upper-case tokens `GET`, `POST`, `PUT`,
/// `PATCH` and `DELETE` are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl RequestMethod {
    /// Returns the method token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl FromStr for RequestMethod {
    type Err = UnsupportedMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            other => Err(UnsupportedMethodError(other.to_string())),
        }
    }
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_methods() {
        for method in ["GET", "POST", "PUT", "PATCH", "DELETE"] {
            let parsed: RequestMethod = method.parse().unwrap();
            assert_eq!(parsed.as_str(), method);
        }
    }

    #[test]
    fn test_parse_unknown_method() {
        let err = "HEAD".parse::<RequestMethod>().unwrap_err();
        assert_eq!(err.to_string(), "unsupported HTTP method: HEAD");
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("get".parse::<RequestMethod>().is_err());
    }
}
