//! Error types for the graph crate.

use thiserror::Error;
use wac_core::ResourceId;

/// Result type for parsing and graph construction.
pub type GraphResult<T> = Result<T, GraphError>;

/// Result type for document retrieval.
pub type FetchResult<T> = Result<T, FetchError>;

/// Errors raised while building graphs.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum GraphError {
    /// The document is not valid Turtle (or uses unsupported syntax).
    #[error("parse error at line {line}, column {column}: {message}")]
    Parse {
        /// 1-based line of the offending token.
        line: usize,
        /// 1-based column of the offending token.
        column: usize,
        /// Description of the problem.
        message: String,
    },

    /// A base IRI could not be parsed.
    #[error("invalid base IRI {iri}: {message}")]
    InvalidBase {
        /// The rejected IRI.
        iri: String,
        /// Parser message.
        message: String,
    },

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl GraphError {
    /// Create a parse error.
    pub fn parse(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            column,
            message: message.into(),
        }
    }
}

/// Errors raised by a [`GraphProvider`](crate::GraphProvider).
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum FetchError {
    /// No document exists under this identifier.
    #[error("document not found: {0}")]
    NotFound(ResourceId),

    /// The document could not be reached (transport failure, timeout).
    #[error("failed to reach {document}: {message}")]
    Unreachable {
        /// Requested document.
        document: ResourceId,
        /// Transport error message.
        message: String,
    },

    /// The server answered with an unexpected status.
    #[error("{document} returned status {status}")]
    Status {
        /// Requested document.
        document: ResourceId,
        /// HTTP status code.
        status: u16,
    },

    /// The document was retrieved but is not a valid graph.
    #[error("failed to parse {document}: {source}")]
    Parse {
        /// Requested document.
        document: ResourceId,
        /// Underlying parse error.
        #[source]
        source: GraphError,
    },
}

impl FetchError {
    /// Create a not-found error.
    pub fn not_found(document: &ResourceId) -> Self {
        Self::NotFound(document.clone())
    }

    /// Create an unreachable error.
    pub fn unreachable(document: &ResourceId, message: impl Into<String>) -> Self {
        Self::Unreachable {
            document: document.clone(),
            message: message.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(document: &ResourceId, source: GraphError) -> Self {
        Self::Parse {
            document: document.clone(),
            source,
        }
    }

    /// Check if the document simply does not exist.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if retrying the fetch could succeed.
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Unreachable { .. } => true,
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Short label for logs and metrics.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Unreachable { .. } => "unreachable",
            Self::Status { .. } => "status",
            Self::Parse { .. } => "parse",
        }
    }
}
