//! Errors raised while assembling an engine.

use thiserror::Error;
use wac_config::ConfigError;
use wac_graph::GraphError;
use wac_telemetry::TelemetryError;

/// Result type for engine assembly.
pub type WacResult<T> = Result<T, WacError>;

/// Why an engine could not be built.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WacError {
    /// The configuration could not be loaded or is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The document provider could not be constructed.
    #[error("provider error: {0}")]
    Provider(#[from] GraphError),

    /// Logging or metrics could not be initialized.
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
}
