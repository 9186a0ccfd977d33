//! In-memory source, sink and observer doubles.

use async_trait::async_trait;
use reindex_core::{
    BatchDescriptor, BatchPlan, Document, DocumentSink, DocumentSource, Page, ReindexError, Result,
};
use serde_json::json;
use solr_reindex::ProgressObserver;
use std::sync::Mutex;

/// Documents `0..count`, each with an `id`, a `title`, a `_version_` and a
/// trailing `rank` field.
pub fn versioned_documents(count: u64) -> Vec<Document> {
    (0..count)
        .map(|i| {
            let mut d = Document::new();
            d.insert("id".to_string(), json!(format!("doc-{i}")));
            d.insert("_version_".to_string(), json!(1_700_000_000_000u64 + i));
            d.insert("title".to_string(), json!(format!("Title {i}")));
            d.insert("rank".to_string(), json!(i));
            d
        })
        .collect()
}

pub struct MemorySource {
    documents: Vec<Document>,
    /// Reported by `count_documents` instead of the real length when set.
    reported_count: Option<u64>,
    fail_count: bool,
    pub fetched: Mutex<Vec<BatchDescriptor>>,
}

impl MemorySource {
    pub fn new(documents: Vec<Document>) -> Self {
        Self {
            documents,
            reported_count: None,
            fail_count: false,
            fetched: Mutex::new(Vec::new()),
        }
    }

    pub fn reporting_count(mut self, count: u64) -> Self {
        self.reported_count = Some(count);
        self
    }

    pub fn failing_count(mut self) -> Self {
        self.fail_count = true;
        self
    }

    pub fn fetched(&self) -> Vec<BatchDescriptor> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentSource for MemorySource {
    async fn count_documents(&self) -> Result<u64> {
        if self.fail_count {
            return Err(ReindexError::source_unreachable(
                "memory://source",
                "connection refused",
            ));
        }
        Ok(self
            .reported_count
            .unwrap_or(self.documents.len() as u64))
    }

    async fn fetch_documents(&self, batch: &BatchDescriptor) -> Result<Vec<Document>> {
        self.fetched.lock().unwrap().push(*batch);
        let len = self.documents.len();
        let start = (batch.start as usize).min(len);
        let end = (batch.end() as usize).min(len);
        Ok(self.documents[start..end].to_vec())
    }
}

#[derive(Default)]
pub struct MemorySink {
    /// Batch index whose post is rejected.
    reject_batch: Option<u64>,
    pub posted: Mutex<Vec<Page>>,
}

impl MemorySink {
    pub fn rejecting(batch_index: u64) -> Self {
        Self {
            reject_batch: Some(batch_index),
            posted: Mutex::new(Vec::new()),
        }
    }

    pub fn posted(&self) -> Vec<Page> {
        self.posted.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentSink for MemorySink {
    async fn post_documents(&self, page: &Page) -> Result<()> {
        if self.reject_batch == Some(page.batch.index) {
            return Err(ReindexError::TargetRejected {
                status: 400,
                payload: r#"{"error":{"msg":"ERROR: [doc=doc-x] unknown field 'rank'"}}"#
                    .to_string(),
            });
        }
        self.posted.lock().unwrap().push(page.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingProgress {
    pub plans: Mutex<Vec<(String, u64, u64)>>,
    pub pages: Mutex<Vec<BatchDescriptor>>,
    pub completed: Mutex<Vec<(u64, u64)>>,
}

impl ProgressObserver for RecordingProgress {
    fn on_plan(&self, collection: &str, plan: &BatchPlan) {
        self.plans
            .lock()
            .unwrap()
            .push((collection.to_string(), plan.total_count(), plan.len()));
    }

    fn on_page(&self, page: &Page) {
        self.pages.lock().unwrap().push(page.batch);
    }

    fn on_batch_complete(&self, _batch: &BatchDescriptor, completed: u64, total: u64) {
        self.completed.lock().unwrap().push((completed, total));
    }
}
