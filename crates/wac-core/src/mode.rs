//! Access modes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::vocab::acl;

/// A WAC access mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    /// Read the resource.
    Read,
    /// Add data to the resource without removing any.
    Append,
    /// Modify or delete the resource.
    Write,
    /// Read and modify the ACL document of the resource.
    Control,
}

impl AccessMode {
    /// Returns the `acl:` IRI of this mode.
    #[must_use]
    pub const fn iri(self) -> &'static str {
        match self {
            Self::Read => acl::READ,
            Self::Append => acl::APPEND,
            Self::Write => acl::WRITE,
            Self::Control => acl::CONTROL,
        }
    }

    /// Returns the granted modes that satisfy a request for this mode.
    ///
    /// `Write` subsumes `Append`; every other mode needs an exact grant.
    #[must_use]
    pub const fn accepted_grants(self) -> &'static [Self] {
        match self {
            Self::Read => &[Self::Read],
            Self::Append => &[Self::Append, Self::Write],
            Self::Write => &[Self::Write],
            Self::Control => &[Self::Control],
        }
    }

    /// Returns true if a record granting `granted` satisfies a request for `self`.
    #[must_use]
    pub fn is_satisfied_by(self, granted: Self) -> bool {
        self.accepted_grants().contains(&granted)
    }

    /// Returns the short name of the mode, as used in logs and metrics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Append => "append",
            Self::Write => "write",
            Self::Control => "control",
        }
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_subsumes_append() {
        assert!(AccessMode::Append.is_satisfied_by(AccessMode::Write));
        assert!(AccessMode::Append.is_satisfied_by(AccessMode::Append));
        assert!(!AccessMode::Write.is_satisfied_by(AccessMode::Append));
    }

    #[test]
    fn test_control_needs_exact_grant() {
        assert!(AccessMode::Control.is_satisfied_by(AccessMode::Control));
        assert!(!AccessMode::Control.is_satisfied_by(AccessMode::Write));
        assert!(!AccessMode::Read.is_satisfied_by(AccessMode::Control));
    }

    #[test]
    fn test_iris() {
        assert_eq!(AccessMode::Read.iri(), "http://www.w3.org/ns/auth/acl#Read");
        assert_eq!(AccessMode::Control.iri(), "http://www.w3.org/ns/auth/acl#Control");
    }

    #[test]
    fn test_display() {
        assert_eq!(AccessMode::Append.to_string(), "append");
    }
}
