//! # WAC
//!
//! **Web Access Control decisions for Solid-style resource servers**
//!
//! Given a resource, an HTTP method, an optional request body and an
//! optional caller WebID, the engine finds the governing ACL document,
//! works out which access mode the request needs and answers with the
//! authorization that grants it or the reason it is denied.
//!
//! - **Mode classification**: `GET` needs Read, `POST` and insert-only
//!   `PATCH` need Append, other writes need Write, anything on an ACL
//!   document needs Control
//! - **Inheritance**: resources without an ACL are governed by the nearest
//!   container ACL through `acl:default`
//! - **Grantees**: public, authenticated, named agents and `vcard` groups
//! - **Configuration and telemetry**: TOML/JSON/env configuration, JSON
//!   logs and Prometheus metrics
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wac::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConfigLoader::new()
//!         .with_production()
//!         .with_optional_file("wac.toml")?
//!         .with_default_env()
//!         .load()?;
//!
//!     let engine = WacBuilder::new().config(config).with_telemetry().build()?;
//!
//!     let authorization = engine
//!         .check_access(
//!             "https://pod.example/notes/today",
//!             "GET",
//!             None,
//!             Some("https://alice.example/profile#me"),
//!         )
//!         .await?;
//!     println!("granted by {authorization}");
//!     Ok(())
//! }
//! ```
//!
//! ## Crates
//!
//! ```text
//! wac ──► wac-authz ──► wac-graph ──► wac-core
//!   │          └──────► wac-telemetry
//!   └───► wac-config
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod error;

pub use builder::{cache_config, engine_config, http_provider_config, WacBuilder};
pub use error::{WacError, WacResult};

// Re-export core types
pub use wac_core as core;

// Re-export graph and provider types
pub use wac_graph as graph;

// Re-export the decision engine
pub use wac_authz as authz;

// Re-export configuration
pub use wac_config as config;

// Re-export telemetry
pub use wac_telemetry as telemetry;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```
/// use wac::prelude::*;
///
/// let request = AccessRequest::new("https://pod.example/doc", RequestMethod::Get);
/// assert_eq!(request.resource.as_str(), "https://pod.example/doc");
/// ```
pub mod prelude {
    pub use crate::{WacBuilder, WacError, WacResult};

    pub use wac_core::{
        AccessDecision, AccessMode, AclMapping, AgentIdentity, AuthorizationId, RequestMethod,
        ResourceId, SuffixAclMapping,
    };

    pub use wac_graph::{
        CacheConfig, CachedGraphProvider, FetchError, GraphProvider, HttpGraphProvider,
        MemoryGraphProvider,
    };

    pub use wac_authz::{AccessControlEngine, AccessError, AccessRequest, AccessResult, EngineConfig};

    pub use wac_config::{ConfigError, ConfigLoader, WacConfig};
}
