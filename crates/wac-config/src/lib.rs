//! # WAC Config
//!
//! Typed configuration for the WAC decision engine.
//!
//! ## Key Features
//!
//! - **Strict parsing**: unknown fields are rejected in every section
//! - **Layered loading**: defaults or a preset, then a TOML/JSON file, then
//!   `WAC__SECTION__KEY` environment variables
//! - **Validation**: invalid values are reported with the field path
//! - **Presets**: [`WacConfig::development`] and [`WacConfig::production`]
//!
//! ## Example
//!
//! ```
//! use wac_config::ConfigLoader;
//!
//! let toml = r#"
//!     [acl]
//!     suffix = ".acl"
//!
//!     [evaluation]
//!     max_group_documents = 4
//! "#;
//!
//! let config = ConfigLoader::new()
//!     .with_string(toml, "toml")?
//!     .load()?;
//!
//! assert_eq!(config.evaluation.max_group_documents, 4);
//! assert!(config.cache.enabled);
//! # Ok::<(), wac_config::ConfigError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::{WacConfig, WacConfigBuilder};
pub use error::ConfigError;
pub use loader::{ConfigLoader, DEFAULT_ENV_PREFIX};
pub use schema::{
    AclConfig, CacheSettings, EvaluationConfig, FetchConfig, LogFormat, LoggingConfig,
    MetricsSettings,
};

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
