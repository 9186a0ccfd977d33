//! Replication engine.
//!
//! Drives one collection copy through a fixed sequence of steps:
//!
//! ```text
//! Counting ─► Planning ─┬─► Fetching ─► Sanitizing ─► Posting ─┐
//!                       │        ▲                             │
//!                       │        └──────── next batch ◄────────┤
//!                       └──────────────────────────────────────┴─► Done
//!
//! any step ─► Failed
//! ```
//!
//! Batches run strictly one after another with a single page in memory. The
//! first error ends the run; pages posted before it stay committed on the
//! target. A shutdown signal is only honored between batches.

use crate::config::ReplicationJob;
use crate::progress::{LogProgress, ProgressObserver};
use reindex_core::{
    fetch_page, BatchDescriptor, BatchPlan, DocumentSink, DocumentSource, FieldSanitizer,
    ReindexError,
};
use std::time::{Duration, Instant};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;

/// Step the engine is in, or finished in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineState {
    Idle,
    Counting,
    Planning,
    Fetching,
    Sanitizing,
    Posting,
    Done,
    Failed,
}

impl EngineState {
    pub fn as_str(&self) -> &str {
        match self {
            EngineState::Idle => "idle",
            EngineState::Counting => "counting",
            EngineState::Planning => "planning",
            EngineState::Fetching => "fetching",
            EngineState::Sanitizing => "sanitizing",
            EngineState::Posting => "posting",
            EngineState::Done => "done",
            EngineState::Failed => "failed",
        }
    }
}

impl std::fmt::Display for EngineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub total_documents: u64,
    pub batch_size: u64,
    pub batches: u64,
    pub batches_posted: u64,
    pub documents_posted: u64,
    pub dry_run: bool,
    pub elapsed: Duration,
}

/// Why and where a run stopped.
///
/// `Display` describes where the run stopped; the cause is the error
/// [`source`](std::error::Error::source).
#[derive(Debug)]
pub struct RunFailure {
    /// The step that failed.
    pub step: EngineState,
    /// The batch in flight, if the failure happened after planning.
    pub batch: Option<BatchDescriptor>,
    /// Batches committed on the target before the failure.
    pub batches_posted: u64,
    /// Number of batches in the plan, zero if planning was not reached.
    pub total_batches: u64,
    pub error: ReindexError,
}

impl std::fmt::Display for RunFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed", self.step)?;
        if let Some(batch) = &self.batch {
            write!(f, " on {} of {}", batch, self.total_batches)?;
        }
        write!(f, " after {} batches posted", self.batches_posted)
    }
}

impl std::error::Error for RunFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Copies one collection from a [`DocumentSource`] to a [`DocumentSink`].
pub struct ReplicationEngine<'a, S, T> {
    job: &'a ReplicationJob,
    source: &'a S,
    sink: &'a T,
    sanitizer: FieldSanitizer,
    observer: Box<dyn ProgressObserver + 'a>,
    shutdown: Option<broadcast::Receiver<()>>,
    state: EngineState,
}

impl<'a, S, T> ReplicationEngine<'a, S, T>
where
    S: DocumentSource,
    T: DocumentSink,
{
    pub fn new(job: &'a ReplicationJob, source: &'a S, sink: &'a T) -> Self {
        Self {
            job,
            source,
            sink,
            sanitizer: FieldSanitizer::default(),
            observer: Box::new(LogProgress),
            shutdown: None,
            state: EngineState::Idle,
        }
    }

    pub fn with_observer(mut self, observer: impl ProgressObserver + 'a) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn with_sanitizer(mut self, sanitizer: FieldSanitizer) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    /// Stop at the next batch boundary once a message arrives on `shutdown`.
    pub fn with_shutdown(mut self, shutdown: broadcast::Receiver<()>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    fn shutdown_requested(&mut self) -> bool {
        let Some(rx) = self.shutdown.as_mut() else {
            return false;
        };
        match rx.try_recv() {
            Ok(()) | Err(TryRecvError::Lagged(_)) => true,
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => false,
        }
    }

    fn fail(
        &mut self,
        batch: Option<BatchDescriptor>,
        batches_posted: u64,
        total_batches: u64,
        error: ReindexError,
    ) -> RunFailure {
        let step = self.state;
        self.state = EngineState::Failed;
        tracing::error!("Replication failed while {}: {}", step, error);
        RunFailure {
            step,
            batch,
            batches_posted,
            total_batches,
            error,
        }
    }

    /// Run the copy to completion.
    pub async fn run(&mut self) -> Result<RunSummary, RunFailure> {
        let started = Instant::now();
        let job = self.job;

        if job.dry_run {
            tracing::warn!("Running in dry-run mode - no data will be written");
        }

        self.state = EngineState::Counting;
        let total_documents = match self.source.count_documents().await {
            Ok(count) => count,
            Err(e) => return Err(self.fail(None, 0, 0, e)),
        };
        tracing::debug!("Source reports {} documents", total_documents);

        self.state = EngineState::Planning;
        let plan = BatchPlan::new(total_documents, job.batch_size);
        let total_batches = plan.len();
        self.observer.on_plan(&job.collection, &plan);

        let mut batches_posted = 0;
        let mut documents_posted = 0;

        for batch in &plan {
            if self.shutdown_requested() {
                self.state = EngineState::Fetching;
                tracing::info!("Shutdown requested, stopping before {}", batch);
                return Err(self.fail(
                    Some(batch),
                    batches_posted,
                    total_batches,
                    ReindexError::Cancelled {
                        next_batch: batch.index,
                    },
                ));
            }

            self.state = EngineState::Fetching;
            let page = match fetch_page(self.source, &batch).await {
                Ok(page) => page,
                Err(e) => return Err(self.fail(Some(batch), batches_posted, total_batches, e)),
            };

            self.state = EngineState::Sanitizing;
            let page = self.sanitizer.sanitize_page(page);
            if job.verbose {
                self.observer.on_page(&page);
            }

            self.state = EngineState::Posting;
            if job.dry_run {
                tracing::debug!("Dry run, skipping post of {}", batch);
            } else {
                if let Err(e) = self.sink.post_documents(&page).await {
                    return Err(self.fail(Some(batch), batches_posted, total_batches, e));
                }
                batches_posted += 1;
                documents_posted += page.len() as u64;
            }

            self.observer
                .on_batch_complete(&batch, batch.index + 1, total_batches);
        }

        self.state = EngineState::Done;
        let summary = RunSummary {
            total_documents,
            batch_size: plan.batch_size(),
            batches: total_batches,
            batches_posted,
            documents_posted,
            dry_run: job.dry_run,
            elapsed: started.elapsed(),
        };
        tracing::info!(
            "Re-indexing of {} completed: {} documents in {} batches ({:.2}s)",
            job.collection,
            summary.documents_posted,
            summary.batches_posted,
            summary.elapsed.as_secs_f64()
        );
        Ok(summary)
    }
}
