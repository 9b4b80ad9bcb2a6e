//! In-memory pods.

use std::sync::Arc;

use wac_core::ResourceId;
use wac_graph::MemoryGraphProvider;

use crate::acl::{AclDocumentBuilder, GroupDocumentBuilder};
use crate::error::TestResult;

/// A set of documents under one base URL, backed by a
/// [`MemoryGraphProvider`].
///
/// ```
/// use wac_core::AccessMode;
/// use wac_test::{AclDocumentBuilder, Authorization, TestPod};
///
/// let pod = TestPod::new("http://localhost:8080");
/// let acl = AclDocumentBuilder::new().with(
///     Authorization::new("public")
///         .access_to(pod.url("/test"))
///         .mode(AccessMode::Read)
///         .public(),
/// );
/// let pod = pod.with_acl("/test.acl", &acl)?;
/// assert_eq!(pod.provider().len(), 1);
/// # Ok::<(), wac_test::TestError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TestPod {
    base: String,
    provider: Arc<MemoryGraphProvider>,
}

impl TestPod {
    /// Creates an empty pod rooted at `base`.
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        Self {
            base,
            provider: Arc::new(MemoryGraphProvider::new()),
        }
    }

    /// The pod's base URL, without trailing slash.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Absolute URL of `path`, which should start with `/`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Resource identifier of `path`.
    pub fn id(&self, path: &str) -> ResourceId {
        ResourceId::new(self.url(path))
    }

    /// Adds an ACL document at `path`.
    pub fn with_acl(self, path: &str, document: &AclDocumentBuilder) -> TestResult<Self> {
        self.put_turtle(path, &document.build())?;
        Ok(self)
    }

    /// Adds a group document at `path`.
    pub fn with_group(self, path: &str, document: &GroupDocumentBuilder) -> TestResult<Self> {
        self.put_turtle(path, &document.build())?;
        Ok(self)
    }

    /// Adds an arbitrary Turtle document at `path`.
    pub fn with_document(self, path: &str, turtle: &str) -> TestResult<Self> {
        self.put_turtle(path, turtle)?;
        Ok(self)
    }

    /// Adds or replaces a Turtle document at `path`.
    pub fn put_turtle(&self, path: &str, turtle: &str) -> TestResult<()> {
        self.provider.insert_turtle(self.url(path), turtle)?;
        Ok(())
    }

    /// Adds or replaces an ACL document at `path`.
    pub fn put_acl(&self, path: &str, document: &AclDocumentBuilder) -> TestResult<()> {
        self.put_turtle(path, &document.build())
    }

    /// Removes the document at `path`.
    pub fn remove(&self, path: &str) -> bool {
        self.provider.remove(&self.id(path))
    }

    /// The provider serving this pod.
    pub fn provider(&self) -> Arc<MemoryGraphProvider> {
        Arc::clone(&self.provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wac_graph::GraphProvider;

    #[tokio::test]
    async fn test_documents_resolve_against_pod_urls() {
        let pod = TestPod::new("http://localhost:8080/")
            .with_document("/data/doc", "<#a> <#b> <#c> .")
            .unwrap();
        assert_eq!(pod.url("/data/doc"), "http://localhost:8080/data/doc");

        let graph = pod.provider().fetch(&pod.id("/data/doc")).await.unwrap();
        assert_eq!(graph.len(), 1);

        assert!(pod.remove("/data/doc"));
        let err = pod.provider().fetch(&pod.id("/data/doc")).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_invalid_document_is_error() {
        let pod = TestPod::new("http://localhost:8080");
        assert!(pod.put_turtle("/bad", "<#a> <#b> .").is_err());
    }
}
