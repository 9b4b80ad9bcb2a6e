//! In-memory provider.

use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::debug;
use wac_core::ResourceId;

use super::GraphProvider;
use crate::error::{FetchError, FetchResult, GraphResult};
use crate::graph::Graph;
use crate::turtle::TurtleParser;

/// A map from document identifiers to graphs.
///
/// Unknown identifiers are reported as [`FetchError::NotFound`]. Documents
/// can be added and removed while the provider is shared, which lets tests
/// simulate ACL changes between decisions.
#[derive(Debug, Default)]
pub struct MemoryGraphProvider {
    documents: RwLock<IndexMap<ResourceId, Arc<Graph>>>,
}

impl MemoryGraphProvider {
    /// Creates an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parsed graph under `document`.
    pub fn with_graph(self, document: impl Into<ResourceId>, graph: Graph) -> Self {
        self.insert(document, graph);
        self
    }

    /// Parses `turtle` with the document identifier as base and adds it.
    pub fn with_turtle(self, document: impl Into<ResourceId>, turtle: &str) -> GraphResult<Self> {
        self.insert_turtle(document, turtle)?;
        Ok(self)
    }

    /// Adds or replaces a document.
    pub fn insert(&self, document: impl Into<ResourceId>, graph: Graph) {
        self.documents.write().insert(document.into(), Arc::new(graph));
    }

    /// Parses and adds or replaces a document.
    pub fn insert_turtle(&self, document: impl Into<ResourceId>, turtle: &str) -> GraphResult<()> {
        let document = document.into();
        let graph = TurtleParser::new()
            .with_base(document.as_str())?
            .parse(turtle)?;
        self.insert(document, graph);
        Ok(())
    }

    /// Removes a document, returning true if it existed.
    pub fn remove(&self, document: &ResourceId) -> bool {
        self.documents.write().shift_remove(document).is_some()
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    /// Returns true if no documents are stored.
    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }
}

#[async_trait]
impl GraphProvider for MemoryGraphProvider {
    async fn fetch(&self, document: &ResourceId) -> FetchResult<Arc<Graph>> {
        let found = self.documents.read().get(document).cloned();
        match found {
            Some(graph) => Ok(graph),
            None => {
                debug!(document = %document, "document not in memory provider");
                Err(FetchError::not_found(document))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_missing_is_not_found() {
        let provider = MemoryGraphProvider::new();
        let err = provider
            .fetch(&ResourceId::new("http://x/test.acl"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_with_turtle_uses_document_as_base() {
        let provider = MemoryGraphProvider::new()
            .with_turtle("http://x/group", "<#0> <http://x/p> <#1> .")
            .unwrap();
        let graph = provider.fetch(&ResourceId::new("http://x/group")).await.unwrap();
        let triple = graph.iter().next().unwrap();
        assert_eq!(triple.subject.as_iri(), Some("http://x/group#0"));
        assert_eq!(triple.object.as_iri(), Some("http://x/group#1"));
    }

    #[tokio::test]
    async fn test_insert_and_remove() {
        let provider = MemoryGraphProvider::new();
        let doc = ResourceId::new("http://x/a.acl");
        provider.insert(doc.clone(), Graph::new());
        assert_eq!(provider.len(), 1);
        assert!(provider.fetch(&doc).await.is_ok());
        assert!(provider.remove(&doc));
        assert!(provider.is_empty());
        assert!(provider.fetch(&doc).await.is_err());
    }

    #[test]
    fn test_invalid_turtle() {
        let result = MemoryGraphProvider::new().with_turtle("http://x/a.acl", "<s> <p> .");
        assert!(result.is_err());
    }
}
