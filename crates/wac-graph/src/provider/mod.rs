//! Graph providers.
//!
//! A [`GraphProvider`] turns a document identifier into a queryable
//! [`Graph`]. The decision engine only ever talks to this trait, so live
//! HTTP retrieval, a TTL cache in front of it and an in-memory map used in
//! tests are interchangeable.

mod http;
mod memory;

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use wac_core::ResourceId;

use crate::error::FetchResult;
use crate::graph::Graph;

pub use http::{HttpGraphProvider, HttpProviderConfig};
pub use memory::MemoryGraphProvider;

/// Fetches documents as graphs.
///
/// Implementations must report a missing document as
/// [`FetchError::NotFound`](crate::FetchError::NotFound); the resolver walks
/// up the hierarchy on that error only.
#[async_trait]
pub trait GraphProvider: Send + Sync + Debug {
    /// Retrieves the document identified by `document`.
    async fn fetch(&self, document: &ResourceId) -> FetchResult<Arc<Graph>>;
}

#[async_trait]
impl<P: GraphProvider + ?Sized> GraphProvider for Arc<P> {
    async fn fetch(&self, document: &ResourceId) -> FetchResult<Arc<Graph>> {
        (**self).fetch(document).await
    }
}
