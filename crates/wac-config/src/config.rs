//! Main configuration types.
//!
//! This module provides the top-level [`WacConfig`] struct and its builder.

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};
use wac_telemetry::{LogConfig, MetricsConfig, TelemetryConfig};

use crate::{
    AclConfig, CacheSettings, ConfigError, EvaluationConfig, FetchConfig, LogFormat,
    LoggingConfig, MetricsSettings,
};

/// Complete decision engine configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load it from files and
/// environment variables.
///
/// # Example
///
/// ```
/// use wac_config::WacConfig;
///
/// let config = WacConfig::default();
/// assert_eq!(config.acl.suffix, ".acl");
/// assert!(config.evaluation.check_groups);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct WacConfig {
    /// ACL document location.
    #[serde(default)]
    pub acl: AclConfig,

    /// HTTP document fetching.
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Document cache.
    #[serde(default)]
    pub cache: CacheSettings,

    /// Authorization evaluation.
    #[serde(default)]
    pub evaluation: EvaluationConfig,

    /// Logging.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Metrics.
    #[serde(default)]
    pub metrics: MetricsSettings,
}

impl WacConfig {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```
    /// use wac_config::{AclConfig, WacConfig};
    ///
    /// let config = WacConfig::builder()
    ///     .acl(AclConfig { suffix: ".meta".to_string() })
    ///     .build();
    ///
    /// assert_eq!(config.acl.suffix, ".meta");
    /// ```
    #[must_use]
    pub fn builder() -> WacConfigBuilder {
        WacConfigBuilder::new()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.acl.suffix.is_empty() {
            return Err(ConfigError::invalid_value("acl.suffix", "must not be empty"));
        }

        if self.fetch.timeout_ms == 0 {
            return Err(ConfigError::invalid_value(
                "fetch.timeout_ms",
                "must be greater than zero",
            ));
        }

        if self.cache.enabled {
            if self.cache.max_entries == 0 {
                return Err(ConfigError::invalid_value(
                    "cache.max_entries",
                    "must be greater than zero when the cache is enabled",
                ));
            }
            if self.cache.ttl_secs == 0 {
                return Err(ConfigError::invalid_value(
                    "cache.ttl_secs",
                    "must be greater than zero when the cache is enabled",
                ));
            }
        }

        if self.evaluation.check_groups && self.evaluation.max_group_documents == 0 {
            return Err(ConfigError::invalid_value(
                "evaluation.max_group_documents",
                "must be at least 1 when group checks are enabled",
            ));
        }

        if let Some(addr) = &self.metrics.addr {
            if addr.parse::<SocketAddr>().is_err() {
                return Err(ConfigError::invalid_value(
                    "metrics.addr",
                    format!("invalid socket address: {addr}"),
                ));
            }
        }

        let buckets = &self.metrics.duration_buckets;
        if buckets.is_empty() {
            return Err(ConfigError::invalid_value(
                "metrics.duration_buckets",
                "must not be empty",
            ));
        }
        if buckets.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(ConfigError::invalid_value(
                "metrics.duration_buckets",
                "must be strictly ascending",
            ));
        }

        Ok(())
    }

    /// Create a development configuration preset.
    ///
    /// Pretty debug logs with source locations, a short cache TTL and a
    /// generous group document limit.
    ///
    /// # Example
    ///
    /// ```
    /// use wac_config::WacConfig;
    ///
    /// let config = WacConfig::development();
    /// assert_eq!(config.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();

        config.logging.level = "debug".to_string();
        config.logging.format = LogFormat::Pretty;
        config.logging.include_location = true;
        config.logging.span_events = true;

        config.cache.ttl_secs = 5;
        config.evaluation.max_group_documents = 64;

        config
    }

    /// Create a production configuration preset.
    ///
    /// JSON logs, a larger cache with a longer TTL and a tighter group
    /// document limit.
    ///
    /// # Example
    ///
    /// ```
    /// use wac_config::{LogFormat, WacConfig};
    ///
    /// let config = WacConfig::production();
    /// assert_eq!(config.logging.format, LogFormat::Json);
    /// ```
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();

        config.logging.level = "info".to_string();
        config.logging.format = LogFormat::Json;

        config.cache.max_entries = 100_000;
        config.cache.ttl_secs = 300;
        config.evaluation.max_group_documents = 8;

        config
    }

    /// Telemetry settings for `wac_telemetry::init_telemetry`.
    #[must_use]
    pub fn to_telemetry_config(&self) -> TelemetryConfig {
        TelemetryConfig {
            logging: LogConfig {
                enabled: self.logging.enabled,
                level: self.logging.level.clone(),
                json_format: self.logging.format == LogFormat::Json,
                span_events: self.logging.span_events,
                file_line_info: self.logging.include_location,
                include_target: true,
            },
            metrics: MetricsConfig {
                enabled: self.metrics.enabled,
                addr: self.metrics.addr.clone(),
                duration_buckets: self.metrics.duration_buckets.clone(),
            },
        }
    }
}

/// Builder for [`WacConfig`].
#[derive(Debug, Default)]
pub struct WacConfigBuilder {
    acl: Option<AclConfig>,
    fetch: Option<FetchConfig>,
    cache: Option<CacheSettings>,
    evaluation: Option<EvaluationConfig>,
    logging: Option<LoggingConfig>,
    metrics: Option<MetricsSettings>,
}

impl WacConfigBuilder {
    /// Create a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ACL configuration.
    #[must_use]
    pub fn acl(mut self, acl: AclConfig) -> Self {
        self.acl = Some(acl);
        self
    }

    /// Set the fetch configuration.
    #[must_use]
    pub fn fetch(mut self, fetch: FetchConfig) -> Self {
        self.fetch = Some(fetch);
        self
    }

    /// Set the cache configuration.
    #[must_use]
    pub fn cache(mut self, cache: CacheSettings) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Set the evaluation configuration.
    #[must_use]
    pub fn evaluation(mut self, evaluation: EvaluationConfig) -> Self {
        self.evaluation = Some(evaluation);
        self
    }

    /// Set the logging configuration.
    #[must_use]
    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = Some(logging);
        self
    }

    /// Set the metrics configuration.
    #[must_use]
    pub fn metrics(mut self, metrics: MetricsSettings) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Build the configuration.
    ///
    /// Any unset sections will use their default values.
    #[must_use]
    pub fn build(self) -> WacConfig {
        WacConfig {
            acl: self.acl.unwrap_or_default(),
            fetch: self.fetch.unwrap_or_default(),
            cache: self.cache.unwrap_or_default(),
            evaluation: self.evaluation.unwrap_or_default(),
            logging: self.logging.unwrap_or_default(),
            metrics: self.metrics.unwrap_or_default(),
        }
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if validation fails.
    pub fn build_validated(self) -> Result<WacConfig, ConfigError> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }
}
