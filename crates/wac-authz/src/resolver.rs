//! ACL resolution.
//!
//! Finds the ACL document that governs a resource: its own, or failing
//! that the nearest ancestor container's.

use std::sync::Arc;

use tracing::{debug, instrument};
use wac_core::{AclMapping, ResourceId};
use wac_graph::{Graph, GraphProvider};

use crate::error::{AccessError, AccessResult};

/// The ACL document that governs a request.
#[derive(Debug, Clone)]
pub struct ResolvedAcl {
    /// Parsed ACL document.
    pub document: Arc<Graph>,
    /// Identifier of the ACL document.
    pub document_id: ResourceId,
    /// The resource access is being decided for. For requests on an ACL
    /// document this is the resource that document governs.
    pub effective_target: ResourceId,
    /// The resource or container whose ACL document was found.
    pub governing_resource: ResourceId,
    /// True if the document belongs to an ancestor container, in which case
    /// only `acl:default` grants apply.
    pub is_inherited: bool,
}

/// Walks the container hierarchy to find the governing ACL document.
#[derive(Debug, Clone)]
pub struct AclResolver {
    provider: Arc<dyn GraphProvider>,
    mapping: Arc<dyn AclMapping>,
}

impl AclResolver {
    /// Creates a resolver.
    pub fn new(provider: Arc<dyn GraphProvider>, mapping: Arc<dyn AclMapping>) -> Self {
        Self { provider, mapping }
    }

    /// Resolves the ACL document for `resource`.
    ///
    /// For control requests `resource` is an ACL document and resolution
    /// starts from the resource it governs. A candidate whose ACL document
    /// is missing or empty hands over to its parent container.
    ///
    /// # Errors
    ///
    /// [`AccessError::ResolutionFailure`] when no document exists up to the
    /// root, or when a document cannot be retrieved for any reason other
    /// than not existing.
    #[instrument(skip(self, resource), fields(resource = %resource))]
    pub async fn resolve(&self, resource: &ResourceId, is_control: bool) -> AccessResult<ResolvedAcl> {
        let target = if is_control {
            self.mapping.to_resource(resource)
        } else {
            resource.clone()
        };

        let mut candidate = target.clone();
        loop {
            let document_id = self.mapping.to_acl(&candidate);
            match self.provider.fetch(&document_id).await {
                Ok(document) if !document.is_empty() => {
                    let is_inherited = candidate != target;
                    debug!(
                        acl_document = %document_id,
                        is_inherited,
                        "resolved ACL document"
                    );
                    return Ok(ResolvedAcl {
                        document,
                        document_id,
                        effective_target: target,
                        governing_resource: candidate,
                        is_inherited,
                    });
                }
                Ok(_) => debug!(acl_document = %document_id, "empty ACL document"),
                Err(e) if e.is_not_found() => {
                    debug!(acl_document = %document_id, "no ACL document");
                }
                Err(e) => {
                    return Err(AccessError::resolution_failure(
                        resource,
                        format!("failed to retrieve {document_id}: {e}"),
                    ));
                }
            }

            candidate = match candidate.parent_container() {
                Some(parent) => parent,
                None => {
                    return Err(AccessError::resolution_failure(
                        resource,
                        "no ACL document found up to the root container",
                    ));
                }
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wac_core::SuffixAclMapping;
    use wac_graph::MemoryGraphProvider;

    const RULE: &str = "<#r> a <http://www.w3.org/ns/auth/acl#Authorization> .";

    fn resolver(documents: &[&str]) -> AclResolver {
        let provider = MemoryGraphProvider::new();
        for document in documents {
            provider.insert_turtle(*document, RULE).unwrap();
        }
        AclResolver::new(Arc::new(provider), Arc::new(SuffixAclMapping::default()))
    }

    fn id(iri: &str) -> ResourceId {
        ResourceId::new(iri)
    }

    #[tokio::test]
    async fn test_direct_document() {
        let resolver = resolver(&["http://x/dir/doc.acl"]);
        let resolved = resolver.resolve(&id("http://x/dir/doc"), false).await.unwrap();
        assert!(!resolved.is_inherited);
        assert_eq!(resolved.document_id, id("http://x/dir/doc.acl"));
        assert_eq!(resolved.effective_target, id("http://x/dir/doc"));
        assert_eq!(resolved.governing_resource, id("http://x/dir/doc"));
    }

    #[tokio::test]
    async fn test_inherited_from_ancestor() {
        let resolver = resolver(&["http://x/.acl"]);
        let resolved = resolver
            .resolve(&id("http://x/a/b/doc"), false)
            .await
            .unwrap();
        assert!(resolved.is_inherited);
        assert_eq!(resolved.document_id, id("http://x/.acl"));
        assert_eq!(resolved.governing_resource, id("http://x/"));
        assert_eq!(resolved.effective_target, id("http://x/a/b/doc"));
    }

    #[tokio::test]
    async fn test_nearest_ancestor_wins() {
        let resolver = resolver(&["http://x/.acl", "http://x/a/.acl"]);
        let resolved = resolver
            .resolve(&id("http://x/a/b/doc"), false)
            .await
            .unwrap();
        assert_eq!(resolved.governing_resource, id("http://x/a/"));
    }

    #[tokio::test]
    async fn test_container_own_document() {
        let resolver = resolver(&["http://x/a/.acl"]);
        let resolved = resolver.resolve(&id("http://x/a/"), false).await.unwrap();
        assert!(!resolved.is_inherited);
    }

    #[tokio::test]
    async fn test_empty_document_walks_up() {
        let provider = MemoryGraphProvider::new();
        provider.insert("http://x/a/doc.acl", Graph::new());
        provider.insert_turtle("http://x/a/.acl", RULE).unwrap();
        let resolver = AclResolver::new(Arc::new(provider), Arc::new(SuffixAclMapping::default()));

        let resolved = resolver.resolve(&id("http://x/a/doc"), false).await.unwrap();
        assert!(resolved.is_inherited);
        assert_eq!(resolved.document_id, id("http://x/a/.acl"));
    }

    #[tokio::test]
    async fn test_control_request_resolves_governed_resource() {
        let resolver = resolver(&["http://x/doc.acl"]);
        let resolved = resolver.resolve(&id("http://x/doc.acl"), true).await.unwrap();
        assert!(!resolved.is_inherited);
        assert_eq!(resolved.effective_target, id("http://x/doc"));
        assert_eq!(resolved.document_id, id("http://x/doc.acl"));
    }

    #[tokio::test]
    async fn test_no_document_to_root() {
        let resolver = resolver(&[]);
        let err = resolver
            .resolve(&id("http://x/someContainer/someFile"), false)
            .await
            .unwrap_err();
        assert!(matches!(err, AccessError::ResolutionFailure { .. }));
    }
}
