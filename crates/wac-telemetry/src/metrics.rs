//! Prometheus metrics.
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `wac_decisions_total` | Counter | `outcome`, `check` | Access decisions |
//! | `wac_decision_duration_seconds` | Histogram | `outcome` | Decision latency |
//! | `wac_document_fetches_total` | Counter | `outcome` | Remote document fetches |
//! | `wac_document_fetch_duration_seconds` | Histogram | - | Fetch latency |
//!
//! Recording functions are no-ops until a recorder is installed, so library
//! code can call them unconditionally.

use std::net::SocketAddr;
use std::sync::OnceLock;
use std::time::Duration;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::error::TelemetryError;
use crate::TelemetryResult;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Metrics configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsConfig {
    /// Whether metrics are enabled.
    pub enabled: bool,

    /// Address of the Prometheus scrape listener. `None` installs the
    /// recorder without a listener; metrics are then only available
    /// through [`render_metrics`].
    pub addr: Option<String>,

    /// Histogram buckets for durations, in seconds.
    pub duration_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            addr: None,
            // 100µs to 5s
            duration_buckets: vec![
                0.0001, 0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0,
            ],
        }
    }
}

impl MetricsConfig {
    /// Enables metrics with a scrape listener on `addr`.
    pub fn with_listener(addr: impl Into<String>) -> Self {
        Self {
            enabled: true,
            addr: Some(addr.into()),
            ..Self::default()
        }
    }
}

/// Initializes the metrics subsystem.
///
/// # Errors
///
/// Returns `TelemetryError::InvalidAddress` for an unparsable listener
/// address and `TelemetryError::MetricsInit` if a recorder cannot be
/// installed.
pub fn init_metrics(config: &MetricsConfig) -> TelemetryResult<()> {
    if !config.enabled {
        return Ok(());
    }

    let builder = PrometheusBuilder::new()
        .set_buckets(&config.duration_buckets)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;

    match &config.addr {
        Some(addr) => {
            let addr: SocketAddr = addr
                .parse()
                .map_err(|e| TelemetryError::InvalidAddress(format!("{addr}: {e}")))?;
            // Spawns the scrape listener, on its own runtime thread when
            // called outside of Tokio.
            builder
                .with_http_listener(addr)
                .install()
                .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
        }
        None => {
            let handle = builder
                .install_recorder()
                .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
            let _ = METRICS_HANDLE.set(handle);
        }
    }

    register_metric_descriptions();

    Ok(())
}

/// Renders metrics in Prometheus format.
///
/// Returns `None` unless metrics were initialized without a listener.
#[must_use]
pub fn render_metrics() -> Option<String> {
    METRICS_HANDLE.get().map(PrometheusHandle::render)
}

fn register_metric_descriptions() {
    describe_counter!(
        "wac_decisions_total",
        "Total access decisions by outcome and granting check"
    );
    describe_histogram!(
        "wac_decision_duration_seconds",
        "Access decision duration in seconds"
    );
    describe_counter!(
        "wac_document_fetches_total",
        "Total remote document fetches by outcome"
    );
    describe_histogram!(
        "wac_document_fetch_duration_seconds",
        "Remote document fetch duration in seconds"
    );
}

/// Records a completed access decision.
///
/// * `outcome` - "granted", "unauthenticated", "unauthorized" or an error kind
/// * `check` - the check that granted access, or "none"
pub fn record_decision(outcome: &str, check: &str, duration: Duration) {
    counter!(
        "wac_decisions_total",
        "outcome" => outcome.to_string(),
        "check" => check.to_string()
    )
    .increment(1);

    histogram!(
        "wac_decision_duration_seconds",
        "outcome" => outcome.to_string()
    )
    .record(duration.as_secs_f64());
}

/// Records a remote document fetch.
///
/// * `outcome` - "ok", "not_found", "unreachable", "status" or "parse"
pub fn record_document_fetch(outcome: &str, duration: Duration) {
    counter!(
        "wac_document_fetches_total",
        "outcome" => outcome.to_string()
    )
    .increment(1);

    histogram!("wac_document_fetch_duration_seconds").record(duration.as_secs_f64());
}
