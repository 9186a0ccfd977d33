//! Successful runs through the library API.

use crate::memory::{versioned_documents, MemorySink, MemorySource, RecordingProgress};
use serde_json::json;
use solr_reindex::{EngineState, ReplicationEngine, ReplicationJob};
use std::num::NonZeroU64;

fn job(batch_size: u64) -> ReplicationJob {
    let mut job = ReplicationJob::new("old:8983", "new:8983", "products");
    job.batch_size = NonZeroU64::new(batch_size).unwrap();
    job
}

#[tokio::test]
async fn test_three_full_batches_strip_version() {
    let source = MemorySource::new(versioned_documents(1500));
    let sink = MemorySink::default();
    let progress = RecordingProgress::default();
    let job = job(500);

    let mut engine = ReplicationEngine::new(&job, &source, &sink).with_observer(&progress);
    let summary = engine.run().await.unwrap();

    assert_eq!(engine.state(), EngineState::Done);
    assert_eq!(summary.total_documents, 1500);
    assert_eq!(summary.batches, 3);
    assert_eq!(summary.batches_posted, 3);
    assert_eq!(summary.documents_posted, 1500);

    let ranges: Vec<(u64, u64)> = source.fetched().iter().map(|b| (b.start, b.rows)).collect();
    assert_eq!(ranges, vec![(0, 500), (500, 500), (1000, 500)]);

    let posted = sink.posted();
    assert_eq!(posted.len(), 3);
    for (batch_index, page) in posted.iter().enumerate() {
        assert_eq!(page.len(), 500);
        for (offset, doc) in page.documents.iter().enumerate() {
            let i = batch_index * 500 + offset;
            assert!(!doc.contains_key("_version_"));
            let keys: Vec<&str> = doc.keys().map(String::as_str).collect();
            assert_eq!(keys, vec!["id", "title", "rank"]);
            assert_eq!(doc["id"], json!(format!("doc-{i}")));
            assert_eq!(doc["rank"], json!(i));
        }
    }

    assert_eq!(
        *progress.plans.lock().unwrap(),
        vec![("products".to_string(), 1500, 3)]
    );
    assert_eq!(
        *progress.completed.lock().unwrap(),
        vec![(1, 3), (2, 3), (3, 3)]
    );
}

#[tokio::test]
async fn test_partial_last_batch() {
    let source = MemorySource::new(versioned_documents(2500));
    let sink = MemorySink::default();
    let job = job(1000);

    let summary = ReplicationEngine::new(&job, &source, &sink)
        .with_observer(solr_reindex::NoopProgress)
        .run()
        .await
        .unwrap();

    assert_eq!(summary.batches, 3);
    let ranges: Vec<(u64, u64)> = source.fetched().iter().map(|b| (b.start, b.rows)).collect();
    assert_eq!(ranges, vec![(0, 1000), (1000, 1000), (2000, 500)]);
    let sizes: Vec<usize> = sink.posted().iter().map(|p| p.len()).collect();
    assert_eq!(sizes, vec![1000, 1000, 500]);
}

#[tokio::test]
async fn test_single_batch_when_count_equals_batch_size() {
    let source = MemorySource::new(versioned_documents(1000));
    let sink = MemorySink::default();
    let job = job(1000);

    let summary = ReplicationEngine::new(&job, &source, &sink)
        .with_observer(solr_reindex::NoopProgress)
        .run()
        .await
        .unwrap();

    assert_eq!(summary.batches, 1);
    let ranges: Vec<(u64, u64)> = source.fetched().iter().map(|b| (b.start, b.rows)).collect();
    assert_eq!(ranges, vec![(0, 1000)]);
}

#[tokio::test]
async fn test_empty_collection_performs_no_cycles() {
    let source = MemorySource::new(Vec::new());
    let sink = MemorySink::default();
    let progress = RecordingProgress::default();
    let job = job(1000);

    let mut engine = ReplicationEngine::new(&job, &source, &sink).with_observer(&progress);
    let summary = engine.run().await.unwrap();

    assert_eq!(engine.state(), EngineState::Done);
    assert_eq!(summary.total_documents, 0);
    assert_eq!(summary.batches, 0);
    assert!(source.fetched().is_empty());
    assert!(sink.posted().is_empty());
    assert!(progress.completed.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_verbose_echoes_sanitized_pages() {
    let source = MemorySource::new(versioned_documents(25));
    let sink = MemorySink::default();
    let progress = RecordingProgress::default();
    let mut job = job(10);
    job.verbose = true;

    ReplicationEngine::new(&job, &source, &sink)
        .with_observer(&progress)
        .run()
        .await
        .unwrap();

    let echoed: Vec<u64> = progress.pages.lock().unwrap().iter().map(|b| b.index).collect();
    assert_eq!(echoed, vec![0, 1, 2]);
}

#[tokio::test]
async fn test_quiet_run_does_not_echo_pages() {
    let source = MemorySource::new(versioned_documents(25));
    let sink = MemorySink::default();
    let progress = RecordingProgress::default();
    let job = job(10);

    ReplicationEngine::new(&job, &source, &sink)
        .with_observer(&progress)
        .run()
        .await
        .unwrap();

    assert!(progress.pages.lock().unwrap().is_empty());
    assert_eq!(sink.posted().len(), 3);
}

#[tokio::test]
async fn test_dry_run_posts_nothing() {
    let source = MemorySource::new(versioned_documents(30));
    let sink = MemorySink::default();
    let progress = RecordingProgress::default();
    let mut job = job(10);
    job.dry_run = true;

    let summary = ReplicationEngine::new(&job, &source, &sink)
        .with_observer(&progress)
        .run()
        .await
        .unwrap();

    assert!(summary.dry_run);
    assert_eq!(summary.batches, 3);
    assert_eq!(summary.batches_posted, 0);
    assert_eq!(summary.documents_posted, 0);
    assert_eq!(source.fetched().len(), 3);
    assert!(sink.posted().is_empty());
    assert_eq!(progress.completed.lock().unwrap().len(), 3);
}
