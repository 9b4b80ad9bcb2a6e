//! Configuration schema types.
//!
//! Every section rejects unknown fields and fills missing ones with the
//! defaults below, so a file only needs to name what it changes.

use serde::{Deserialize, Serialize};
use wac_core::DEFAULT_ACL_SUFFIX;

/// ACL document location.
///
/// # Example
///
/// ```
/// use wac_config::AclConfig;
///
/// let config = AclConfig::default();
/// assert_eq!(config.suffix, ".acl");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AclConfig {
    /// Suffix appended to a resource IRI to name its ACL document.
    #[serde(default = "default_acl_suffix")]
    pub suffix: String,
}

impl Default for AclConfig {
    fn default() -> Self {
        Self {
            suffix: default_acl_suffix(),
        }
    }
}

fn default_acl_suffix() -> String {
    DEFAULT_ACL_SUFFIX.to_string()
}

/// Document fetching over HTTP.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FetchConfig {
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_fetch_timeout")]
    pub timeout_ms: u64,

    /// `User-Agent` sent with every document request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_fetch_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_fetch_timeout() -> u64 {
    10_000
}

fn default_user_agent() -> String {
    format!("wac/{}", env!("CARGO_PKG_VERSION"))
}

/// Document cache.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CacheSettings {
    /// Whether fetched documents are cached.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum number of cached documents.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// Time-to-live for cached entries in seconds.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Whether "document not found" answers are cached too.
    #[serde(default = "default_true")]
    pub cache_not_found: bool,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: default_max_entries(),
            ttl_secs: default_ttl_secs(),
            cache_not_found: true,
        }
    }
}

fn default_max_entries() -> usize {
    10_000
}

fn default_ttl_secs() -> u64 {
    60
}

/// Authorization evaluation.
///
/// # Example
///
/// ```
/// use wac_config::EvaluationConfig;
///
/// let config: EvaluationConfig = toml::from_str("check_groups = false").unwrap();
/// assert!(!config.check_groups);
/// assert_eq!(config.max_group_documents, 16);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct EvaluationConfig {
    /// Whether `acl:agentGroup` grants are considered.
    #[serde(default = "default_true")]
    pub check_groups: bool,

    /// Maximum distinct group documents fetched for one decision.
    #[serde(default = "default_max_group_documents")]
    pub max_group_documents: usize,

    /// Whether decisions are recorded as metrics.
    #[serde(default = "default_true")]
    pub record_metrics: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            check_groups: true,
            max_group_documents: default_max_group_documents(),
            record_metrics: true,
        }
    }
}

fn default_max_group_documents() -> usize {
    16
}

/// Log output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON structured logging (production).
    #[default]
    Json,
    /// Human-readable output (development).
    Pretty,
}

/// Logging section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Whether logging is installed at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Filter directive, e.g. `"info"` or `"wac_authz=debug,info"`.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include file and line in each event.
    #[serde(default)]
    pub include_location: bool,

    /// Emit span open/close events.
    #[serde(default)]
    pub span_events: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            include_location: false,
            span_events: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Metrics section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MetricsSettings {
    /// Whether a Prometheus recorder is installed.
    #[serde(default)]
    pub enabled: bool,

    /// Scrape listener address, e.g. `"0.0.0.0:9090"`.
    #[serde(default)]
    pub addr: Option<String>,

    /// Histogram buckets for durations, in seconds.
    #[serde(default = "default_duration_buckets")]
    pub duration_buckets: Vec<f64>,
}

impl Default for MetricsSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            addr: None,
            duration_buckets: default_duration_buckets(),
        }
    }
}

fn default_duration_buckets() -> Vec<f64> {
    wac_telemetry::MetricsConfig::default().duration_buckets
}

fn default_true() -> bool {
    true
}
