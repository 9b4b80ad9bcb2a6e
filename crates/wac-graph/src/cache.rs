//! Document caching.
//!
//! Caches fetched graphs to avoid dereferencing the same ACL and group
//! documents for every decision.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, trace};
use wac_core::ResourceId;

use crate::error::{FetchError, FetchResult};
use crate::graph::Graph;
use crate::provider::GraphProvider;

/// Configuration for the document cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries in the cache.
    pub max_entries: usize,
    /// Time-to-live for cached documents.
    pub ttl: Duration,
    /// Whether to remember that a document does not exist.
    pub cache_not_found: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
            ttl: Duration::from_secs(60),
            cache_not_found: true,
        }
    }
}

impl CacheConfig {
    /// Create a production cache configuration.
    pub fn production() -> Self {
        Self {
            max_entries: 50_000,
            ttl: Duration::from_secs(30),
            cache_not_found: true,
        }
    }

    /// Create a development cache configuration.
    ///
    /// Short TTL and no negative caching, so edited ACLs apply almost
    /// immediately.
    pub fn development() -> Self {
        Self {
            max_entries: 1_000,
            ttl: Duration::from_secs(5),
            cache_not_found: false,
        }
    }

    /// Disable caching.
    pub fn disabled() -> Self {
        Self {
            max_entries: 0,
            ttl: Duration::ZERO,
            cache_not_found: false,
        }
    }

    /// Returns true if the configuration caches anything.
    pub fn is_enabled(&self) -> bool {
        self.max_entries > 0 && !self.ttl.is_zero()
    }
}

#[derive(Debug, Clone)]
enum Cached {
    Found(Arc<Graph>),
    NotFound,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Cached,
    created_at: Instant,
}

impl CacheEntry {
    fn new(value: Cached) -> Self {
        Self {
            value,
            created_at: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Number of entries currently in cache.
    pub size: usize,
    /// Number of evictions due to capacity or expiry.
    pub evictions: u64,
}

/// A [`GraphProvider`] decorator that caches successful fetches.
///
/// Failures other than not-found are never cached, so a transient outage
/// of a group document does not outlive the request that saw it.
#[derive(Debug)]
pub struct CachedGraphProvider<P> {
    inner: P,
    config: CacheConfig,
    entries: RwLock<HashMap<ResourceId, CacheEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl<P: GraphProvider> CachedGraphProvider<P> {
    /// Wraps `inner` with a cache.
    pub fn new(inner: P, config: CacheConfig) -> Self {
        Self {
            inner,
            config,
            entries: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// The wrapped provider.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Drops the cached entry for `document`.
    pub fn invalidate(&self, document: &ResourceId) {
        self.entries.write().remove(document);
    }

    /// Clear all cached entries.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            size: self.entries.read().len(),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }

    fn lookup(&self, document: &ResourceId) -> Option<Cached> {
        if !self.config.is_enabled() {
            return None;
        }
        let entries = self.entries.read();
        entries
            .get(document)
            .filter(|entry| !entry.is_expired(self.config.ttl))
            .map(|entry| entry.value.clone())
    }

    fn store(&self, document: &ResourceId, value: Cached) {
        if !self.config.is_enabled() {
            return;
        }

        let mut entries = self.entries.write();

        if entries.len() >= self.config.max_entries {
            self.evict_expired(&mut entries);
        }

        while entries.len() >= self.config.max_entries {
            if let Some(oldest) = Self::find_oldest(&entries) {
                entries.remove(&oldest);
                self.evictions.fetch_add(1, Ordering::Relaxed);
            } else {
                break;
            }
        }

        entries.insert(document.clone(), CacheEntry::new(value));
    }

    fn evict_expired(&self, entries: &mut HashMap<ResourceId, CacheEntry>) {
        let ttl = self.config.ttl;
        let before = entries.len();
        entries.retain(|_, v| !v.is_expired(ttl));
        let evicted = before - entries.len();
        if evicted > 0 {
            self.evictions.fetch_add(evicted as u64, Ordering::Relaxed);
        }
    }

    fn find_oldest(entries: &HashMap<ResourceId, CacheEntry>) -> Option<ResourceId> {
        entries
            .iter()
            .min_by_key(|(_, v)| v.created_at)
            .map(|(k, _)| k.clone())
    }
}

#[async_trait]
impl<P: GraphProvider> GraphProvider for CachedGraphProvider<P> {
    async fn fetch(&self, document: &ResourceId) -> FetchResult<Arc<Graph>> {
        if let Some(cached) = self.lookup(document) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(document = %document, "document cache hit");
            return match cached {
                Cached::Found(graph) => Ok(graph),
                Cached::NotFound => Err(FetchError::not_found(document)),
            };
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        match self.inner.fetch(document).await {
            Ok(graph) => {
                self.store(document, Cached::Found(Arc::clone(&graph)));
                Ok(graph)
            }
            Err(e) if e.is_not_found() && self.config.cache_not_found => {
                self.store(document, Cached::NotFound);
                Err(e)
            }
            Err(e) => {
                debug!(document = %document, error = %e, "not caching failed fetch");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MemoryGraphProvider;

    fn doc(path: &str) -> ResourceId {
        ResourceId::new(format!("http://x/{path}"))
    }

    fn provider(config: CacheConfig) -> CachedGraphProvider<Arc<MemoryGraphProvider>> {
        let memory = Arc::new(MemoryGraphProvider::new());
        memory.insert(doc("a.acl"), Graph::new());
        CachedGraphProvider::new(memory, config)
    }

    #[tokio::test]
    async fn test_cache_hit_miss() {
        let cache = provider(CacheConfig::default());

        assert!(cache.fetch(&doc("a.acl")).await.is_ok());
        assert!(cache.fetch(&doc("a.acl")).await.is_ok());
        assert!(cache.fetch(&doc("a.acl")).await.is_ok());

        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.size, 1);
    }

    #[tokio::test]
    async fn test_serves_cached_graph_after_source_changes() {
        let cache = provider(CacheConfig::default());
        cache.fetch(&doc("a.acl")).await.unwrap();

        cache.inner().remove(&doc("a.acl"));
        assert!(cache.fetch(&doc("a.acl")).await.is_ok());

        cache.invalidate(&doc("a.acl"));
        assert!(cache.fetch(&doc("a.acl")).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_not_found_cached() {
        let cache = provider(CacheConfig::default());
        assert!(cache.fetch(&doc("b.acl")).await.is_err());

        cache.inner().insert(doc("b.acl"), Graph::new());
        assert!(cache.fetch(&doc("b.acl")).await.unwrap_err().is_not_found());
        assert_eq!(cache.stats().hits, 1);
    }

    #[tokio::test]
    async fn test_not_found_not_cached_in_development() {
        let cache = provider(CacheConfig::development());
        assert!(cache.fetch(&doc("b.acl")).await.is_err());

        cache.inner().insert(doc("b.acl"), Graph::new());
        assert!(cache.fetch(&doc("b.acl")).await.is_ok());
    }

    #[tokio::test]
    async fn test_cache_disabled() {
        let cache = provider(CacheConfig::disabled());
        cache.fetch(&doc("a.acl")).await.unwrap();
        cache.fetch(&doc("a.acl")).await.unwrap();

        let stats = cache.stats();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.size, 0);
    }

    #[tokio::test]
    async fn test_expired_entries_refetched() {
        let cache = provider(CacheConfig {
            ttl: Duration::from_millis(20),
            ..CacheConfig::default()
        });
        cache.fetch(&doc("a.acl")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;
        cache.fetch(&doc("a.acl")).await.unwrap();
        assert_eq!(cache.stats().misses, 2);
    }

    #[tokio::test]
    async fn test_capacity_evicts_oldest() {
        let memory = Arc::new(MemoryGraphProvider::new());
        for name in ["a.acl", "b.acl", "c.acl"] {
            memory.insert(doc(name), Graph::new());
        }
        let cache = CachedGraphProvider::new(
            memory,
            CacheConfig {
                max_entries: 2,
                ..CacheConfig::default()
            },
        );

        cache.fetch(&doc("a.acl")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(2)).await;
        cache.fetch(&doc("b.acl")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(2)).await;
        cache.fetch(&doc("c.acl")).await.unwrap();

        let stats = cache.stats();
        assert_eq!(stats.size, 2);
        assert_eq!(stats.evictions, 1);

        cache.inner().remove(&doc("a.acl"));
        assert!(cache.fetch(&doc("a.acl")).await.is_err());
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = provider(CacheConfig::default());
        cache.fetch(&doc("a.acl")).await.unwrap();
        cache.clear();
        assert_eq!(cache.stats().size, 0);
    }
}
