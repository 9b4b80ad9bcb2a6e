//! WAC Graph - documents as queryable RDF graphs
//!
//! The decision engine treats every ACL document and group document as an
//! opaque graph that answers two kinds of questions: "does a statement
//! matching this pattern exist?" and "which bindings satisfy this pattern?".
//! This crate provides that capability and the providers that turn document
//! identifiers into graphs.
//!
//! # Architecture
//!
//! ```text
//!     ResourceId
//!         │
//!  ┌──────▼─────────────────────────────┐
//!  │ GraphProvider                      │
//!  │  ├─ MemoryGraphProvider (map)      │
//!  │  ├─ HttpGraphProvider (reqwest)    │
//!  │  └─ CachedGraphProvider<P> (TTL)   │
//!  └──────┬─────────────────────────────┘
//!         │ text/turtle → TurtleParser
//!  ┌──────▼──────┐     ┌───────────────┐
//!  │   Graph     │◄────│ Query         │ ask / select
//!  └─────────────┘     └───────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use wac_graph::{Graph, PatternTerm, Query, TurtleParser};
//!
//! let graph = TurtleParser::new()
//!     .with_base("http://example.org/test.acl")?
//!     .parse(
//!         r#"
//!         @prefix acl: <http://www.w3.org/ns/auth/acl#> .
//!         <#auth> a acl:Authorization ; acl:mode acl:Read .
//!         "#,
//!     )?;
//!
//! let query = Query::new().pattern(
//!     PatternTerm::var("authz"),
//!     PatternTerm::iri("http://www.w3.org/ns/auth/acl#mode"),
//!     PatternTerm::iri("http://www.w3.org/ns/auth/acl#Read"),
//! );
//! let rows = graph.select(&query);
//! assert_eq!(rows[0].iri("authz"), Some("http://example.org/test.acl#auth"));
//! # Ok::<(), wac_graph::GraphError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cache;
pub mod error;
pub mod graph;
pub mod iri;
pub mod provider;
pub mod query;
pub mod term;
pub mod turtle;

// Re-exports for convenience
pub use cache::{CacheConfig, CacheStats, CachedGraphProvider};
pub use error::{FetchError, FetchResult, GraphError, GraphResult};
pub use graph::Graph;
pub use provider::{GraphProvider, HttpGraphProvider, HttpProviderConfig, MemoryGraphProvider};
pub use query::{Bindings, PatternTerm, Query, TriplePattern};
pub use term::{Literal, Term, Triple};
pub use turtle::TurtleParser;
