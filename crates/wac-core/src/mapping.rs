//! Resource ↔ ACL document naming convention.

use std::fmt::Debug;

use crate::ResourceId;

/// Suffix used by [`SuffixAclMapping::default`].
pub const DEFAULT_ACL_SUFFIX: &str = ".acl";

/// Bi-directional mapping between a resource and the ACL document that
/// governs it (the document whose records use `acl:accessTo <resource>`).
///
/// Implement this to look the mapping up somewhere other than the
/// identifier itself, e.g. from a database or a `Link` header cache.
pub trait AclMapping: Send + Sync + Debug {
    /// Returns the identifier of the ACL document of `resource`.
    ///
    /// Must return `resource` unchanged when it already is an ACL document;
    /// the engine relies on this to detect control requests.
    fn to_acl(&self, resource: &ResourceId) -> ResourceId;

    /// Returns the resource governed by the ACL document `acl`.
    fn to_resource(&self, acl: &ResourceId) -> ResourceId;

    /// Returns true if `resource` is itself an ACL document.
    fn is_acl(&self, resource: &ResourceId) -> bool {
        self.to_acl(resource) == *resource
    }
}

/// Naming convention `resource` → `resource` + suffix (`.acl` by default).
///
/// # Example
///
/// ```
/// use wac_core::{AclMapping, ResourceId, SuffixAclMapping};
///
/// let mapping = SuffixAclMapping::default();
/// let resource = ResourceId::new("http://example.org/test");
/// let acl = mapping.to_acl(&resource);
///
/// assert_eq!(acl.as_str(), "http://example.org/test.acl");
/// assert_eq!(mapping.to_acl(&acl), acl);
/// assert_eq!(mapping.to_resource(&acl), resource);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixAclMapping {
    suffix: String,
}

impl SuffixAclMapping {
    /// Creates a mapping with a custom suffix.
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    /// Returns the suffix.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

impl Default for SuffixAclMapping {
    fn default() -> Self {
        Self::new(DEFAULT_ACL_SUFFIX)
    }
}

impl AclMapping for SuffixAclMapping {
    fn to_acl(&self, resource: &ResourceId) -> ResourceId {
        if resource.ends_with(&self.suffix) {
            return resource.clone();
        }
        ResourceId::new(format!("{}{}", resource, self.suffix))
    }

    fn to_resource(&self, acl: &ResourceId) -> ResourceId {
        if self.suffix.is_empty() {
            return acl.clone();
        }
        match acl.as_str().strip_suffix(self.suffix.as_str()) {
            Some(resource) => ResourceId::new(resource),
            None => acl.clone(),
        }
    }
}
