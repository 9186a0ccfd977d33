//! Removal of index-internal fields.
//!
//! Fields such as `_version_` or `_root_` are added by the indexing layer and
//! regenerated by the target on ingest, so they must not be posted back.

use crate::types::{Document, Page};

/// Leading character of internal field names.
pub const INTERNAL_FIELD_MARKER: char = '_';

/// Strips internal fields from documents.
///
/// Sanitizing builds new maps instead of deleting keys in place, keeps the
/// order of the remaining fields and of the documents, and is idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSanitizer {
    marker: char,
}

impl Default for FieldSanitizer {
    fn default() -> Self {
        Self {
            marker: INTERNAL_FIELD_MARKER,
        }
    }
}

impl FieldSanitizer {
    pub fn with_marker(marker: char) -> Self {
        Self { marker }
    }

    pub fn marker(&self) -> char {
        self.marker
    }

    pub fn is_internal(&self, field: &str) -> bool {
        field.starts_with(self.marker)
    }

    pub fn sanitize_document(&self, document: Document) -> Document {
        document
            .into_iter()
            .filter(|(field, _)| !self.is_internal(field))
            .collect()
    }

    pub fn sanitize_page(&self, page: Page) -> Page {
        let Page { batch, documents } = page;
        let documents = documents
            .into_iter()
            .map(|document| self.sanitize_document(document))
            .collect();
        Page { batch, documents }
    }
}
