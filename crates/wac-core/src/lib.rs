//! # WAC Core
//!
//! Core types shared by every crate of the WAC decision engine.
//!
//! - [`ResourceId`] - Fragment-free resource identifier with container navigation
//! - [`AccessMode`] - `Read`, `Append`, `Write`, `Control`
//! - [`AgentIdentity`] - Anonymous caller or WebID
//! - [`AccessDecision`] / [`AuthorizationId`] - Outcome of an evaluation
//! - [`RequestMethod`] - The HTTP methods the engine can classify
//! - [`AclMapping`] - Pluggable resource ↔ ACL document naming convention
//! - [`vocab`] - RDF vocabulary IRIs used by ACL and patch documents

#![doc(html_root_url = "https://docs.rs/wac-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod decision;
mod identity;
mod mapping;
mod method;
mod mode;
mod resource;
pub mod vocab;

pub use decision::{AccessDecision, AuthorizationId};
pub use identity::AgentIdentity;
pub use mapping::{AclMapping, SuffixAclMapping, DEFAULT_ACL_SUFFIX};
pub use method::{RequestMethod, UnsupportedMethodError};
pub use mode::AccessMode;
pub use resource::ResourceId;
