//! Core types for solr-reindex.
//!
//! This crate holds everything about a collection copy that does not depend
//! on a particular transport:
//!
//! - [`BatchPlan`] / [`BatchDescriptor`] - how a known document count is split into pages
//! - [`Document`] / [`Page`] - the documents moved in one fetch/post cycle
//! - [`FieldSanitizer`] - removal of index-internal fields before posting
//! - [`DocumentSource`] / [`DocumentSink`] - the seams implemented by `solr-client`
//! - [`ReindexError`] - the error taxonomy shared by every layer
//!
//! # Architecture
//!
//! ```text
//! reindex-core (this crate)
//!    │
//!    ├─── solr-client   (implements DocumentSource / DocumentSink over HTTP)
//!    │
//!    └─── solr-reindex  (ReplicationEngine, configuration, CLI)
//! ```
//!
//! # Example
//!
//! ```rust
//! use reindex_core::BatchPlan;
//! use std::num::NonZeroU64;
//!
//! let plan = BatchPlan::new(2500, NonZeroU64::new(1000).unwrap());
//! let ranges: Vec<_> = plan.iter().map(|b| (b.start, b.rows)).collect();
//! assert_eq!(ranges, vec![(0, 1000), (1000, 1000), (2000, 500)]);
//! ```

pub mod error;
pub mod fetch;
pub mod plan;
pub mod sanitize;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use error::{ReindexError, Result};
pub use fetch::fetch_page;
pub use plan::{BatchDescriptor, BatchPlan, BatchPlanIter};
pub use sanitize::{FieldSanitizer, INTERNAL_FIELD_MARKER};
pub use traits::{DocumentSink, DocumentSource};
pub use types::{Document, Page};
