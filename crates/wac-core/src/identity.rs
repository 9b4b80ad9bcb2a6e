//! Caller identity.
//!
//! The engine only distinguishes two kinds of callers: anonymous requests and
//! requests authenticated as a WebID. Authentication itself happens upstream;
//! a WebID reaching the engine is trusted as-is.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of the agent performing a request.
///
/// # Example
///
/// ```rust
/// use wac_core::AgentIdentity;
///
/// let agent = AgentIdentity::from_option(Some("https://alice.example/profile#me"));
/// assert_eq!(agent.webid_str(), Some("https://alice.example/profile#me"));
/// assert!(AgentIdentity::from_option(None).is_anonymous());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "webid", rename_all = "snake_case")]
pub enum AgentIdentity {
    /// No authenticated identity.
    Anonymous,
    /// Authenticated as the given WebID. Compared by exact string equality.
    WebId(String),
}

impl AgentIdentity {
    /// Creates an authenticated identity.
    pub fn webid(webid: impl Into<String>) -> Self {
        Self::WebId(webid.into())
    }

    /// Maps an optional WebID to an identity; `None` and `""` are anonymous.
    pub fn from_option(webid: Option<&str>) -> Self {
        match webid {
            Some(id) if !id.is_empty() => Self::WebId(id.to_string()),
            _ => Self::Anonymous,
        }
    }

    /// Returns true if the caller is anonymous.
    #[must_use]
    pub const fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }

    /// Returns the WebID of an authenticated caller.
    #[must_use]
    pub fn webid_str(&self) -> Option<&str> {
        match self {
            Self::WebId(id) => Some(id),
            Self::Anonymous => None,
        }
    }

    /// Returns a string identifier suitable for logging.
    #[must_use]
    pub fn log_id(&self) -> &str {
        match self {
            Self::WebId(id) => id,
            Self::Anonymous => "anonymous",
        }
    }
}

impl fmt::Display for AgentIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.log_id())
    }
}

impl From<Option<&str>> for AgentIdentity {
    fn from(webid: Option<&str>) -> Self {
        Self::from_option(webid)
    }
}
