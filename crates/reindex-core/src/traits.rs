//! Source and sink trait definitions.
//!
//! These traits abstract over the transport, allowing the replication engine
//! to be written once and driven either by the Solr HTTP client or by
//! in-memory doubles in tests.
//!
//! # Usage Pattern
//!
//! The engine is generic over both traits:
//!
//! ```ignore
//! pub async fn run<S: DocumentSource, T: DocumentSink>(source: &S, sink: &T) -> Result<()> {
//!     let total = source.count_documents().await?;
//!     // ...
//!     sink.post_documents(&page).await?;
//! }
//! ```

use crate::error::Result;
use crate::plan::BatchDescriptor;
use crate::types::{Document, Page};
use async_trait::async_trait;

/// Read side of a collection copy.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Total number of documents matching the copy query.
    async fn count_documents(&self) -> Result<u64>;

    /// Raw documents for `batch`, in the order the source returned them.
    ///
    /// Implementations return whatever the source sent; completeness is
    /// checked by [`fetch_page`](crate::fetch_page).
    async fn fetch_documents(&self, batch: &BatchDescriptor) -> Result<Vec<Document>>;
}

/// Write side of a collection copy.
#[async_trait]
pub trait DocumentSink: Send + Sync {
    /// Submit the whole page as one update and commit it.
    ///
    /// Returns once the target has acknowledged persistence.
    async fn post_documents(&self, page: &Page) -> Result<()>;
}
