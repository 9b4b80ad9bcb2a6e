//! WAC Authz - Web Access Control decisions
//!
//! This crate decides whether a caller may perform an HTTP-style action on a
//! resource, using the Web Access Control rules stored in ACL documents.
//!
//! # Overview
//!
//! A decision runs in four steps:
//! - Classify the request into a required access mode (`Read`, `Append`,
//!   `Write` or `Control`), inspecting `PATCH` bodies for deletions
//! - Resolve the governing ACL document, walking up the container
//!   hierarchy when a resource has none of its own
//! - Check the grantees in fixed order: public, authenticated, named agent,
//!   group member
//! - Report the matching authorization, or why access is denied
//!
//! # Architecture
//!
//! ```text
//!   (resource, method, body, agent)
//!                │
//!     ┌──────────▼──────────┐      ┌──────────────────┐
//!     │ AccessControlEngine │─────►│ classify         │
//!     └──────────┬──────────┘      │ is_append_only   │
//!                │                 └──────────────────┘
//!     ┌──────────▼──────────┐      ┌──────────────────┐
//!     │ AclResolver         │─────►│ GraphProvider    │
//!     └──────────┬──────────┘      │ AclMapping       │
//!                │ ResolvedAcl     └────────▲─────────┘
//!     ┌──────────▼──────────┐               │ group documents
//!     │ AuthorizationEval.  │───────────────┘
//!     └──────────┬──────────┘
//!                ▼
//!     AuthorizationId | AccessError
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use wac_authz::AccessControlEngine;
//! use wac_core::SuffixAclMapping;
//! use wac_graph::MemoryGraphProvider;
//!
//! # tokio_test::block_on(async {
//! let provider = MemoryGraphProvider::new().with_turtle(
//!     "http://localhost:8080/test.acl",
//!     r#"
//!     @prefix acl: <http://www.w3.org/ns/auth/acl#> .
//!     @prefix foaf: <http://xmlns.com/foaf/0.1/> .
//!
//!     <#public> a acl:Authorization ;
//!         acl:accessTo <http://localhost:8080/test> ;
//!         acl:mode acl:Read ;
//!         acl:agentClass foaf:Agent .
//!     "#,
//! )?;
//!
//! let engine = AccessControlEngine::new(
//!     Arc::new(provider),
//!     Arc::new(SuffixAclMapping::default()),
//! );
//!
//! let granted = engine
//!     .check_access("http://localhost:8080/test", "GET", None, None)
//!     .await
//!     .unwrap();
//! assert_eq!(granted.as_str(), "http://localhost:8080/test.acl#public");
//!
//! let denied = engine
//!     .check_access("http://localhost:8080/test", "PUT", None, None)
//!     .await;
//! assert!(denied.unwrap_err().is_denied());
//! # Ok::<(), wac_graph::GraphError>(())
//! # })?;
//! # Ok::<(), wac_graph::GraphError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod grantee;
pub mod patch;
pub mod resolver;

// Re-exports for convenience
pub use classifier::{classify, is_control_request};
pub use config::EngineConfig;
pub use engine::{AccessControlEngine, AccessRequest};
pub use error::{AccessError, AccessResult};
pub use evaluator::AuthorizationEvaluator;
pub use grantee::{EvaluationContext, Grantee};
pub use patch::{is_append_only, neutralize_blocks};
pub use resolver::{AclResolver, ResolvedAcl};
