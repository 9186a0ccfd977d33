//! Progress reporting for replication runs.
//!
//! Observers are notified by the engine and have no influence on control
//! flow.

use reindex_core::{BatchDescriptor, BatchPlan, Page};

/// Receives notifications from [`ReplicationEngine`](crate::ReplicationEngine).
pub trait ProgressObserver: Send + Sync {
    /// Called once after the document count is known, before the first batch.
    fn on_plan(&self, _collection: &str, _plan: &BatchPlan) {}

    /// Called with each sanitized page before it is posted, when the job is
    /// verbose.
    fn on_page(&self, _page: &Page) {}

    /// Called after each batch completes; `completed` counts from 1.
    fn on_batch_complete(&self, _batch: &BatchDescriptor, _completed: u64, _total: u64) {}
}

impl<O: ProgressObserver + ?Sized> ProgressObserver for &O {
    fn on_plan(&self, collection: &str, plan: &BatchPlan) {
        (**self).on_plan(collection, plan)
    }

    fn on_page(&self, page: &Page) {
        (**self).on_page(page)
    }

    fn on_batch_complete(&self, batch: &BatchDescriptor, completed: u64, total: u64) {
        (**self).on_batch_complete(batch, completed, total)
    }
}

/// Observer that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressObserver for NoopProgress {}

/// Observer that reports through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressObserver for LogProgress {
    fn on_plan(&self, collection: &str, plan: &BatchPlan) {
        tracing::info!("Collection name: {}", collection);
        tracing::info!("Total document count: {}", plan.total_count());
        tracing::info!("Batch size: {}", plan.batch_size());
        tracing::info!("Number of batches: {}", plan.len());
        tracing::info!("Start re-indexing...");
    }

    fn on_page(&self, page: &Page) {
        match page.to_json() {
            Ok(json) => tracing::info!("{}: {}", page.batch, json),
            Err(e) => tracing::warn!("Failed to serialize {} for display: {}", page.batch, e),
        }
    }

    fn on_batch_complete(&self, batch: &BatchDescriptor, completed: u64, total: u64) {
        let percent = if total == 0 {
            100.0
        } else {
            completed as f64 * 100.0 / total as f64
        };
        tracing::info!(
            "Batches processed: {}/{} ({:.1}%), documents {}..{}",
            completed,
            total,
            percent,
            batch.start,
            batch.end()
        );
    }
}
