//! Error types for the authorization crate.

use http::StatusCode;
use thiserror::Error;
use wac_core::{AccessMode, ResourceId, UnsupportedMethodError};

/// Result type for authorization operations.
pub type AccessResult<T> = Result<T, AccessError>;

/// Reasons an access check does not end in a grant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum AccessError {
    /// No identity was presented and no public grant applies.
    #[error("authentication required for {mode} access to {resource}")]
    Unauthenticated {
        /// Requested resource.
        resource: ResourceId,
        /// Required access mode.
        mode: AccessMode,
    },

    /// An identity was presented but nothing grants it access.
    #[error("{agent} is not authorized for {mode} access to {resource}")]
    Unauthorized {
        /// Requested resource.
        resource: ResourceId,
        /// Required access mode.
        mode: AccessMode,
        /// The caller's WebID.
        agent: String,
    },

    /// No governing ACL document could be determined.
    #[error("cannot resolve ACL for {resource}: {reason}")]
    ResolutionFailure {
        /// Requested resource.
        resource: ResourceId,
        /// What went wrong.
        reason: String,
    },

    /// The PATCH body could not be parsed.
    #[error("malformed PATCH body: {0}")]
    MalformedPatch(String),

    /// The request method cannot be classified.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),
}

impl AccessError {
    /// Create a resolution failure.
    pub fn resolution_failure(resource: &ResourceId, reason: impl Into<String>) -> Self {
        Self::ResolutionFailure {
            resource: resource.clone(),
            reason: reason.into(),
        }
    }

    /// Check if this error is a denial (as opposed to a failure to decide).
    pub const fn is_denied(&self) -> bool {
        matches!(self, Self::Unauthenticated { .. } | Self::Unauthorized { .. })
    }

    /// Check if the caller sent a request that cannot be evaluated.
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::MalformedPatch(_) | Self::UnsupportedMethod(_))
    }

    /// The HTTP status conventionally returned for this error.
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            Self::Unauthorized { .. } => StatusCode::FORBIDDEN,
            Self::ResolutionFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::MalformedPatch(_) => StatusCode::BAD_REQUEST,
            Self::UnsupportedMethod(_) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    /// Short label for logs and metrics.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Unauthenticated { .. } => "unauthenticated",
            Self::Unauthorized { .. } => "unauthorized",
            Self::ResolutionFailure { .. } => "resolution_failure",
            Self::MalformedPatch(_) => "malformed_patch",
            Self::UnsupportedMethod(_) => "unsupported_method",
        }
    }
}

impl From<UnsupportedMethodError> for AccessError {
    fn from(err: UnsupportedMethodError) -> Self {
        Self::UnsupportedMethod(err.0)
    }
}
