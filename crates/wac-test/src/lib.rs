//! # WAC Test
//!
//! Fixtures for testing the WAC decision engine and its providers.
//!
//! ## Key Features
//!
//! - **Document builders**: [`Authorization`], [`AclDocumentBuilder`] and
//!   [`GroupDocumentBuilder`] render Turtle fixtures
//! - **In-memory pods**: [`TestPod`] places documents under a base URL in a
//!   `MemoryGraphProvider`
//! - **Fetch recording**: [`RecordingProvider`] counts fetches per document
//!   and injects failures
//! - **Real HTTP**: [`DocumentServer`] serves fixtures on a local port
//!
//! ## Example
//!
//! ```
//! use wac_core::AccessMode;
//! use wac_test::{AclDocumentBuilder, Authorization, GroupDocumentBuilder, TestPod};
//!
//! let pod = TestPod::new("http://localhost:8080");
//! let pod = pod
//!     .clone()
//!     .with_acl(
//!         "/test.acl",
//!         &AclDocumentBuilder::new().with(
//!             Authorization::new("team")
//!                 .access_to(pod.url("/test"))
//!                 .mode(AccessMode::Append)
//!                 .group(pod.url("/group#1")),
//!         ),
//!     )?
//!     .with_group(
//!         "/group",
//!         &GroupDocumentBuilder::new().member("1", "https://alice.example/card#me"),
//!     )?;
//! assert_eq!(pod.provider().len(), 2);
//! # Ok::<(), wac_test::TestError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod acl;
pub mod error;
pub mod pod;
pub mod recording;
pub mod server;

pub use acl::{AclDocumentBuilder, Authorization, GroupDocumentBuilder};
pub use error::{TestError, TestResult};
pub use pod::TestPod;
pub use recording::RecordingProvider;
pub use server::DocumentServer;
