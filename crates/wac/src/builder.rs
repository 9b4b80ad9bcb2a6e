//! Wiring a [`WacConfig`] into a ready [`AccessControlEngine`].

use std::sync::Arc;
use std::time::Duration;

use wac_authz::{AccessControlEngine, EngineConfig};
use wac_config::{CacheSettings, EvaluationConfig, FetchConfig, WacConfig};
use wac_core::{AclMapping, SuffixAclMapping};
use wac_graph::{CacheConfig, CachedGraphProvider, GraphProvider, HttpGraphProvider, HttpProviderConfig};

use crate::error::WacResult;

/// Builds an [`AccessControlEngine`] from configuration.
///
/// By default documents are fetched over HTTP, wrapped in a cache when the
/// `cache` section enables it, and ACLs are located with the configured
/// suffix. A custom provider or mapping replaces the configured one; a
/// custom provider is still wrapped in the cache.
///
/// # Example
///
/// ```
/// use wac::WacBuilder;
/// use wac::config::WacConfig;
///
/// let engine = WacBuilder::new()
///     .config(WacConfig::development())
///     .build()?;
/// assert_eq!(engine.config().max_group_documents, 64);
/// # Ok::<(), wac::WacError>(())
/// ```
#[derive(Default)]
pub struct WacBuilder {
    config: WacConfig,
    provider: Option<Arc<dyn GraphProvider>>,
    mapping: Option<Arc<dyn AclMapping>>,
    init_telemetry: bool,
}

impl std::fmt::Debug for WacBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WacBuilder")
            .field("config", &self.config)
            .field("custom_provider", &self.provider.is_some())
            .field("custom_mapping", &self.mapping.is_some())
            .field("init_telemetry", &self.init_telemetry)
            .finish()
    }
}

impl WacBuilder {
    /// Creates a builder with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `config` for every component.
    #[must_use]
    pub fn config(mut self, config: WacConfig) -> Self {
        self.config = config;
        self
    }

    /// Fetches documents from `provider` instead of over HTTP.
    #[must_use]
    pub fn provider(mut self, provider: Arc<dyn GraphProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Locates ACL documents with `mapping` instead of the configured suffix.
    #[must_use]
    pub fn mapping(mut self, mapping: Arc<dyn AclMapping>) -> Self {
        self.mapping = Some(mapping);
        self
    }

    /// Installs logging and metrics from the configuration during `build`.
    ///
    /// Installation is process-wide; enable this once per process.
    #[must_use]
    pub fn with_telemetry(mut self) -> Self {
        self.init_telemetry = true;
        self
    }

    /// Validates the configuration and assembles the engine.
    ///
    /// # Errors
    ///
    /// Returns `WacError` if the configuration is invalid, the HTTP client
    /// cannot be built, or telemetry cannot be initialized.
    pub fn build(self) -> WacResult<AccessControlEngine> {
        self.config.validate()?;

        if self.init_telemetry {
            wac_telemetry::init_telemetry(&self.config.to_telemetry_config())?;
        }

        let base: Arc<dyn GraphProvider> = match self.provider {
            Some(provider) => provider,
            None => Arc::new(HttpGraphProvider::new(http_provider_config(&self.config.fetch))?),
        };

        let cache = cache_config(&self.config.cache);
        let provider: Arc<dyn GraphProvider> = if cache.is_enabled() {
            Arc::new(CachedGraphProvider::new(base, cache))
        } else {
            base
        };

        let mapping = self
            .mapping
            .unwrap_or_else(|| Arc::new(SuffixAclMapping::new(self.config.acl.suffix.clone())));

        tracing::debug!(
            acl_suffix = %self.config.acl.suffix,
            cache = self.config.cache.enabled,
            check_groups = self.config.evaluation.check_groups,
            "access control engine assembled"
        );

        Ok(AccessControlEngine::with_config(
            provider,
            mapping,
            engine_config(&self.config.evaluation),
        ))
    }
}

/// HTTP provider settings from the `fetch` section.
#[must_use]
pub fn http_provider_config(fetch: &FetchConfig) -> HttpProviderConfig {
    HttpProviderConfig::default()
        .with_timeout(Duration::from_millis(fetch.timeout_ms))
        .with_user_agent(fetch.user_agent.clone())
}

/// Cache settings from the `cache` section. A disabled section yields
/// [`CacheConfig::disabled`].
#[must_use]
pub fn cache_config(cache: &CacheSettings) -> CacheConfig {
    if !cache.enabled {
        return CacheConfig::disabled();
    }
    CacheConfig {
        max_entries: cache.max_entries,
        ttl: Duration::from_secs(cache.ttl_secs),
        cache_not_found: cache.cache_not_found,
    }
}

/// Engine settings from the `evaluation` section.
#[must_use]
pub fn engine_config(evaluation: &EvaluationConfig) -> EngineConfig {
    EngineConfig::new()
        .with_check_groups(evaluation.check_groups)
        .with_max_group_documents(evaluation.max_group_documents)
        .with_record_metrics(evaluation.record_metrics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_config_mapping() {
        let enabled = cache_config(&CacheSettings {
            enabled: true,
            max_entries: 10,
            ttl_secs: 3,
            cache_not_found: false,
        });
        assert_eq!(enabled.max_entries, 10);
        assert_eq!(enabled.ttl, Duration::from_secs(3));
        assert!(!enabled.cache_not_found);
        assert!(enabled.is_enabled());

        let disabled = cache_config(&CacheSettings {
            enabled: false,
            ..CacheSettings::default()
        });
        assert!(!disabled.is_enabled());
    }

    #[test]
    fn test_engine_config_mapping() {
        let config = engine_config(&EvaluationConfig {
            check_groups: false,
            max_group_documents: 2,
            record_metrics: false,
        });
        assert!(!config.check_groups);
        assert_eq!(config.max_group_documents, 2);
        assert!(!config.record_metrics);
    }

    #[test]
    fn test_http_provider_config_mapping() {
        let config = http_provider_config(&FetchConfig {
            timeout_ms: 1500,
            user_agent: "pod-client/2".to_string(),
        });
        assert_eq!(config.timeout, Duration::from_millis(1500));
        assert_eq!(config.user_agent, "pod-client/2");
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let mut config = WacConfig::default();
        config.acl.suffix = String::new();

        let result = WacBuilder::new().config(config).build();
        assert!(matches!(result, Err(crate::WacError::Config(_))));
    }
}
