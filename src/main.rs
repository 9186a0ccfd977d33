//! Command-line interface for solr-reindex
//!
//! # Usage Examples
//!
//! ```bash
//! # Plain HTTP on both sides, default batch size of 1000
//! solr-reindex --source old-solr:8983 --target new-solr:8983 --collection products
//!
//! # HTTPS with per-server certificates and basic auth
//! SOLR_PASSWORD=... solr-reindex \
//!   --source old-solr:8983 --source-tls --source-cert cert/source_server.crt \
//!   --target new-solr:8983 --target-tls --target-cert cert/target_server.crt \
//!   --collection products --username admin --batch-size 500
//!
//! # Settings from a job file, overriding the batch size
//! solr-reindex --config reindex.toml --batch-size 200
//!
//! # Read and sanitize everything without writing to the target
//! solr-reindex --config reindex.toml --dry-run --verbose
//! ```

use anyhow::Context;
use clap::Parser;
use solr_reindex::{logging, run_job, JobArgs, JobFile, ReplicationJob};

#[derive(Parser)]
#[command(name = "solr-reindex")]
#[command(about = "Copy every document of a Solr collection from one server to another")]
#[command(long_about = None)]
struct Cli {
    /// TOML job file; command-line flags take precedence over its values
    #[arg(long, value_name = "PATH")]
    config: Option<std::path::PathBuf>,

    #[command(flatten)]
    job: JobArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    logging::init_tracing();

    let cli = Cli::parse();

    let file = match &cli.config {
        Some(path) => Some(JobFile::from_path(path)?),
        None => None,
    };
    let job = ReplicationJob::resolve(cli.job, file).context("Invalid job configuration")?;

    let shutdown = setup_shutdown_handler();
    let summary = run_job(&job, Some(shutdown)).await?;

    if summary.dry_run {
        tracing::info!(
            "Dry run finished: {} documents read in {} batches, nothing posted",
            summary.total_documents,
            summary.batches
        );
    }

    Ok(())
}

/// Sets up a shutdown signal handler
fn setup_shutdown_handler() -> tokio::sync::broadcast::Receiver<()> {
    let (shutdown_tx, shutdown_rx) = tokio::sync::broadcast::channel(1);

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to install CTRL+C signal handler: {}", e);
            return;
        }

        tracing::info!("Received interrupt signal (Ctrl+C), stopping after the current batch");
        let _ = shutdown_tx.send(());
    });

    shutdown_rx
}
