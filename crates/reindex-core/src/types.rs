//! Documents and pages moved between source and target.

use crate::plan::BatchDescriptor;
use serde_json::{Map, Value};

/// A single search-index document.
///
/// Field order is the order the source returned them in (`serde_json` is
/// built with `preserve_order`).
pub type Document = Map<String, Value>;

/// The documents of one batch, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// The batch this page was fetched for.
    pub batch: BatchDescriptor,
    pub documents: Vec<Document>,
}

impl Page {
    pub fn new(batch: BatchDescriptor, documents: Vec<Document>) -> Self {
        Self { batch, documents }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Serialize the documents as the JSON array the update handler expects.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.documents)
    }
}

impl IntoIterator for Page {
    type Item = Document;
    type IntoIter = std::vec::IntoIter<Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.into_iter()
    }
}
