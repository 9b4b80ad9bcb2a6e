//! A provider wrapper that records fetches and injects failures.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};
use wac_core::ResourceId;
use wac_graph::{FetchError, FetchResult, Graph, GraphProvider};

/// Wraps a provider, counting fetches per document and failing configured
/// documents with a given error.
#[derive(Debug)]
pub struct RecordingProvider<P> {
    inner: P,
    fetches: Mutex<IndexMap<ResourceId, usize>>,
    failures: RwLock<HashMap<ResourceId, FetchError>>,
}

impl<P: GraphProvider> RecordingProvider<P> {
    /// Wraps `inner`.
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            fetches: Mutex::new(IndexMap::new()),
            failures: RwLock::new(HashMap::new()),
        }
    }

    /// Makes every fetch of `document` fail with `error`.
    pub fn with_failure(self, document: impl Into<ResourceId>, error: FetchError) -> Self {
        self.fail(document, error);
        self
    }

    /// Makes every fetch of `document` fail with `error`.
    pub fn fail(&self, document: impl Into<ResourceId>, error: FetchError) {
        self.failures.write().insert(document.into(), error);
    }

    /// The wrapped provider.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Number of fetches of `document`.
    pub fn fetch_count(&self, document: &str) -> usize {
        self.fetches
            .lock()
            .get(&ResourceId::new(document))
            .copied()
            .unwrap_or(0)
    }

    /// Number of fetches across all documents.
    pub fn total_fetches(&self) -> usize {
        self.fetches.lock().values().sum()
    }

    /// Fetched documents, in order of first fetch.
    pub fn fetched(&self) -> Vec<ResourceId> {
        self.fetches.lock().keys().cloned().collect()
    }

    /// Forgets recorded fetches.
    pub fn reset(&self) {
        self.fetches.lock().clear();
    }
}

#[async_trait]
impl<P: GraphProvider> GraphProvider for RecordingProvider<P> {
    async fn fetch(&self, document: &ResourceId) -> FetchResult<Arc<Graph>> {
        *self.fetches.lock().entry(document.clone()).or_insert(0) += 1;

        let failure = self.failures.read().get(document).cloned();
        match failure {
            Some(error) => Err(error),
            None => self.inner.fetch(document).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wac_graph::MemoryGraphProvider;

    #[tokio::test]
    async fn test_counts_and_failures() {
        let inner = MemoryGraphProvider::new()
            .with_turtle("http://x/a", "<#s> <#p> <#o> .")
            .unwrap();
        let provider = RecordingProvider::new(inner).with_failure(
            "http://x/b",
            FetchError::unreachable(&ResourceId::new("http://x/b"), "refused"),
        );

        provider.fetch(&ResourceId::new("http://x/a")).await.unwrap();
        provider.fetch(&ResourceId::new("http://x/a")).await.unwrap();
        let err = provider.fetch(&ResourceId::new("http://x/b")).await.unwrap_err();

        assert!(err.is_retryable());
        assert_eq!(provider.fetch_count("http://x/a"), 2);
        assert_eq!(provider.fetch_count("http://x/b"), 1);
        assert_eq!(provider.total_fetches(), 3);
        assert_eq!(
            provider.fetched(),
            vec![ResourceId::new("http://x/a"), ResourceId::new("http://x/b")]
        );
    }
}
