//! Errors raised while loading or validating a [`WacConfig`](crate::WacConfig).

use std::path::PathBuf;
use thiserror::Error;

/// Why a configuration could not be produced.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    /// A required configuration file does not exist.
    #[error("configuration file not found: {path}")]
    FileNotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// The file exists but reading it failed.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// The file being read.
        path: PathBuf,
        /// The I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Invalid TOML, or a field no section knows.
    #[error("invalid TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Invalid JSON, or a field no section knows.
    #[error("invalid JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A field holds a value `validate` rejects.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// Dotted field path, e.g. `cache.ttl_secs`.
        field: String,
        /// What is wrong with it.
        reason: String,
    },

    /// An override variable could not be converted to its field type.
    #[error("cannot apply environment variable {var}: {reason}")]
    EnvParseError {
        /// Full variable name, prefix included.
        var: String,
        /// Expected shape of the value.
        reason: String,
    },

    /// The `.env` file exists but could not be loaded.
    #[error("failed to load .env file: {0}")]
    DotenvError(String),

    /// Unsupported format or another whole-configuration problem.
    #[error("configuration rejected: {0}")]
    ValidationError(String),
}

impl ConfigError {
    /// [`ConfigError::FileNotFound`] for `path`.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// [`ConfigError::ReadError`] for `path`.
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    /// [`ConfigError::InvalidValue`] for a dotted field path.
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// [`ConfigError::EnvParseError`] for variable `var`.
    pub fn env_parse_error(var: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::EnvParseError {
            var: var.into(),
            reason: reason.into(),
        }
    }

    /// [`ConfigError::ValidationError`] with `message`.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_error() {
        let err = ConfigError::file_not_found("/path/to/wac.toml");
        assert!(err.to_string().contains("/path/to/wac.toml"));
    }

    #[test]
    fn test_invalid_value_error() {
        let err = ConfigError::invalid_value("acl.suffix", "must not be empty");
        assert!(err.to_string().contains("acl.suffix"));
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_env_parse_error() {
        let err = ConfigError::env_parse_error("WAC__FETCH__TIMEOUT_MS", "expected integer");
        assert!(err.to_string().contains("WAC__FETCH__TIMEOUT_MS"));
        assert!(err.to_string().contains("expected integer"));
    }
}
