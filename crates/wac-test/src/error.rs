//! Test error types.

use thiserror::Error;
use wac_graph::GraphError;

/// Result type for fixture operations.
pub type TestResult<T> = Result<T, TestError>;

/// Errors that can occur while setting up fixtures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TestError {
    /// The document server could not bind or accept.
    #[error("document server error: {0}")]
    Server(#[from] std::io::Error),

    /// A fixture document is not valid Turtle.
    #[error("invalid fixture document: {0}")]
    Document(#[from] GraphError),
}
