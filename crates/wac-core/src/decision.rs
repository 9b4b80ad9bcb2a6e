//! Access decisions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of the authorization record that granted a request.
///
/// This is the IRI of the `acl:Authorization` subject, or its blank node
/// label when the record is anonymous.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorizationId(String);

impl AuthorizationId {
    /// Creates an authorization identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuthorizationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of evaluating an ACL document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", content = "authorization", rename_all = "snake_case")]
pub enum AccessDecision {
    /// Access is granted by the given authorization.
    Granted(AuthorizationId),
    /// No authorization grants access.
    Denied,
}

impl AccessDecision {
    /// Creates a granted decision.
    pub fn granted(id: impl Into<String>) -> Self {
        Self::Granted(AuthorizationId::new(id))
    }

    /// Returns true if access is granted.
    #[must_use]
    pub const fn is_granted(&self) -> bool {
        matches!(self, Self::Granted(_))
    }

    /// Returns the granting authorization, if any.
    #[must_use]
    pub fn authorization(&self) -> Option<&AuthorizationId> {
        match self {
            Self::Granted(id) => Some(id),
            Self::Denied => None,
        }
    }
}
