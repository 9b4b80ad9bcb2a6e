//! Errors raised while installing logging or metrics.

use thiserror::Error;

/// Why telemetry could not be installed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TelemetryError {
    /// The Prometheus recorder or listener could not be installed.
    #[error("metrics setup failed: {0}")]
    MetricsInit(String),

    /// The filter is invalid or a global subscriber already exists.
    #[error("logging setup failed: {0}")]
    LoggingInit(String),

    /// The metrics listener address is not a socket address.
    #[error("invalid metrics listener address: {0}")]
    InvalidAddress(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TelemetryError::MetricsInit("failed".to_string());
        assert_eq!(err.to_string(), "metrics setup failed: failed");

        let err = TelemetryError::InvalidAddress("nowhere:xx".to_string());
        assert_eq!(err.to_string(), "invalid metrics listener address: nowhere:xx");
    }
}
