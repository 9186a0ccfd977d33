//! Page fetching with completeness checks.

use crate::error::{ReindexError, Result};
use crate::plan::BatchDescriptor;
use crate::traits::DocumentSource;
use crate::types::Page;

/// Fetch the documents for `batch` and verify the page is complete.
///
/// A page with fewer than `batch.rows` documents means the collection shrank
/// while the copy was running and fails with [`ReindexError::ShortPage`]. A
/// page with more means the source ignored the row bound and fails with
/// [`ReindexError::MalformedResponse`].
pub async fn fetch_page<S: DocumentSource + ?Sized>(
    source: &S,
    batch: &BatchDescriptor,
) -> Result<Page> {
    let documents = source.fetch_documents(batch).await?;
    let received = documents.len() as u64;

    if received < batch.rows {
        tracing::warn!(
            "Source returned {} of {} documents for {}",
            received,
            batch.rows,
            batch
        );
        return Err(ReindexError::ShortPage {
            start: batch.start,
            requested: batch.rows,
            received,
        });
    }
    if received > batch.rows {
        return Err(ReindexError::malformed(
            format!("start={}", batch.start),
            format!("requested {} documents, received {received}", batch.rows),
        ));
    }

    Ok(Page::new(*batch, documents))
}
