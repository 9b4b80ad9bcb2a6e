//! Resource identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a resource, container or ACL document.
///
/// The identifier never carries a fragment: everything from the first `#` on
/// is dropped at construction, so two identifiers that differ only in their
/// fragment compare equal.
///
/// # Example
///
/// ```
/// use wac_core::ResourceId;
///
/// let id = ResourceId::new("http://example.org/pod/notes/today#heading");
/// assert_eq!(id.as_str(), "http://example.org/pod/notes/today");
/// assert_eq!(
///     id.parent_container().unwrap().as_str(),
///     "http://example.org/pod/notes/"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    /// Creates an identifier, stripping any fragment.
    pub fn new(iri: impl Into<String>) -> Self {
        let mut iri = iri.into();
        if let Some(hash) = iri.find('#') {
            iri.truncate(hash);
        }
        Self(iri)
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the identifier and returns the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns true if the identifier names a container (ends with `/`).
    #[must_use]
    pub fn is_container(&self) -> bool {
        self.0.ends_with('/')
    }

    /// Returns true if the identifier ends with the given suffix.
    #[must_use]
    pub fn ends_with(&self, suffix: &str) -> bool {
        self.0.ends_with(suffix)
    }

    /// Returns the container one level up the hierarchy.
    ///
    /// One trailing `/` is stripped, then the identifier is truncated after
    /// the last remaining `/`. Returns `None` when that `/` belongs to the
    /// `scheme://` separator, i.e. the identifier is already the root.
    #[must_use]
    pub fn parent_container(&self) -> Option<Self> {
        let iri = self.as_str();
        let trimmed = iri.strip_suffix('/').unwrap_or(iri);
        let authority_start = iri.find("://").map_or(0, |i| i + 3);
        let last_slash = trimmed.rfind('/')?;
        if last_slash < authority_start {
            return None;
        }
        Some(Self(trimmed[..=last_slash].to_string()))
    }

    /// Iterates over this identifier and every ancestor container up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = Self> {
        std::iter::successors(Some(self.clone()), Self::parent_container)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ResourceId {
    fn from(iri: &str) -> Self {
        Self::new(iri)
    }
}

impl From<String> for ResourceId {
    fn from(iri: String) -> Self {
        Self::new(iri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fragment_is_stripped() {
        let id = ResourceId::new("http://example.org/test.acl#123");
        assert_eq!(id.as_str(), "http://example.org/test.acl");
        assert_eq!(id, ResourceId::new("http://example.org/test.acl"));
    }

    #[test]
    fn test_parent_of_document() {
        let id = ResourceId::new("http://example.org/someContainer/someFile");
        let parent = id.parent_container().unwrap();
        assert_eq!(parent.as_str(), "http://example.org/someContainer/");
        assert!(parent.is_container());
    }

    #[test]
    fn test_parent_of_container() {
        let id = ResourceId::new("http://example.org/a/b/");
        assert_eq!(id.parent_container().unwrap().as_str(), "http://example.org/a/");
    }

    #[test]
    fn test_root_has_no_parent() {
        let root = ResourceId::new("http://example.org/");
        assert!(root.parent_container().is_none());

        let bare = ResourceId::new("http://example.org");
        assert!(bare.parent_container().is_none());
    }

    #[test]
    fn test_ancestors_walk_to_root() {
        let id = ResourceId::new("http://localhost:9999/someContainer/someFile");
        let chain: Vec<String> = id.ancestors().map(ResourceId::into_inner).collect();
        assert_eq!(
            chain,
            vec![
                "http://localhost:9999/someContainer/someFile",
                "http://localhost:9999/someContainer/",
                "http://localhost:9999/",
            ]
        );
    }

    #[test]
    fn test_relative_path_walk() {
        let id = ResourceId::new("/a/b");
        let chain: Vec<String> = id.ancestors().map(ResourceId::into_inner).collect();
        assert_eq!(chain, vec!["/a/b", "/a/", "/"]);
    }

    #[test]
    fn test_serialization_is_transparent() {
        let id = ResourceId::new("http://example.org/x");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"http://example.org/x\"");
    }

    proptest! {
        #[test]
        fn prop_parent_is_strictly_shorter(segments in proptest::collection::vec("[a-z]{1,8}", 0..6), trailing in any::<bool>()) {
            let mut iri = String::from("https://pod.example");
            for segment in &segments {
                iri.push('/');
                iri.push_str(segment);
            }
            if trailing {
                iri.push('/');
            }
            let id = ResourceId::new(iri);
            if let Some(parent) = id.parent_container() {
                prop_assert!(parent.as_str().len() < id.as_str().len());
                prop_assert!(parent.is_container());
                prop_assert!(id.as_str().starts_with(parent.as_str()));
            }
            prop_assert!(id.ancestors().count() <= segments.len() + 1);
        }
    }
}
