//! solr-reindex library
//!
//! Copies every document of a Solr collection from a source server to a
//! target server holding a collection of the same name and schema.
//!
//! # Features
//!
//! - Paginated copy: the source is read in fixed-size pages with `rows`/`start`
//! - Node-local queries: `distrib=false` on every read
//! - Internal field removal: fields starting with `_` are dropped before posting
//! - Per-page commit: each posted page is durably visible immediately
//! - Basic authentication and per-endpoint trusted certificates
//!
//! # Crates
//!
//! - `reindex_core` - batch planning, sanitization, error taxonomy, source/sink traits
//! - `solr_client` - Solr `select`/`update` HTTP implementation of those traits
//!
//! # CLI Usage
//!
//! ```bash
//! solr-reindex -s old-solr:8983 -t new-solr:8983 -c products -b 500
//!
//! # HTTPS on the source only, with its own trusted certificate
//! solr-reindex -s old-solr:8983 --source-tls --source-cert cert/source_server.crt \
//!   -t new-solr:8983 -c products -u admin
//! ```

pub mod config;
pub mod engine;
pub mod logging;
pub mod progress;

pub use config::{EndpointConfig, JobArgs, JobFile, ReplicationJob};
pub use engine::{EngineState, ReplicationEngine, RunFailure, RunSummary};
pub use progress::{LogProgress, NoopProgress, ProgressObserver};

use anyhow::Context;
use solr_client::{SolrSink, SolrSource};
use tokio::sync::broadcast;

/// Run a configured job against real Solr servers.
///
/// Builds the HTTP clients for both endpoints, then drives a
/// [`ReplicationEngine`] with [`LogProgress`] until it finishes or fails.
pub async fn run_job(
    job: &ReplicationJob,
    shutdown: Option<broadcast::Receiver<()>>,
) -> anyhow::Result<RunSummary> {
    tracing::info!(
        "Source: {}, target: {}",
        logging::mask_url_password(&job.source.base_url),
        logging::mask_url_password(&job.target.base_url)
    );

    let source = SolrSource::new(job.source_endpoint()).context("Failed to set up source")?;
    let sink = SolrSink::new(job.target_endpoint()).context("Failed to set up target")?;

    let mut engine = ReplicationEngine::new(job, &source, &sink);
    if let Some(shutdown) = shutdown {
        engine = engine.with_shutdown(shutdown);
    }

    let summary = engine.run().await?;
    Ok(summary)
}
