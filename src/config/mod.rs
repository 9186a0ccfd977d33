//! Job configuration.
//!
//! A [`ReplicationJob`] is assembled once before the engine starts, from
//! three layers in order of precedence:
//!
//! 1. command-line flags and environment variables ([`JobArgs`])
//! 2. an optional TOML job file ([`JobFile`])
//! 3. built-in defaults (batch size 1000, 60s select/connect timeout, plain HTTP)
//!
//! Missing or invalid settings surface as
//! [`ReindexError::ConfigurationInvalid`] before any request is made.

mod duration;
mod file;

pub use duration::parse_duration;
pub use file::JobFile;

use clap::Args;
use reindex_core::{ReindexError, Result};
use solr_client::{resolve_base_url, Credentials, SolrEndpoint, DEFAULT_TIMEOUT};
use std::num::NonZeroU64;
use std::path::PathBuf;
use std::time::Duration;

/// Batch size used when neither the command line nor the job file sets one.
pub const DEFAULT_BATCH_SIZE: NonZeroU64 = match NonZeroU64::new(1000) {
    Some(size) => size,
    None => unreachable!(),
};

/// Job options as given on the command line.
#[derive(Args, Clone, Debug, Default)]
pub struct JobArgs {
    /// Source Solr server (host:port, or a full http(s):// URL)
    #[arg(short = 's', long)]
    pub source: Option<String>,

    /// Target Solr server (host:port, or a full http(s):// URL)
    #[arg(short = 't', long)]
    pub target: Option<String>,

    /// Solr collection to copy (same name on both servers)
    #[arg(short = 'c', long)]
    pub collection: Option<String>,

    /// Solr username for basic authentication
    #[arg(short = 'u', long, env = "SOLR_USERNAME")]
    pub username: Option<String>,

    /// Solr password for basic authentication
    #[arg(short = 'p', long, env = "SOLR_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Number of documents fetched and posted per batch [default: 1000]
    #[arg(short = 'b', long)]
    pub batch_size: Option<u64>,

    /// Echo every sanitized batch before it is posted
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Fetch and sanitize every batch without posting anything
    #[arg(long)]
    pub dry_run: bool,

    /// Use HTTPS for a source given without a scheme
    #[arg(long)]
    pub source_tls: bool,

    /// Use HTTPS for a target given without a scheme
    #[arg(long)]
    pub target_tls: bool,

    /// PEM certificate to trust for the source server
    #[arg(long, value_name = "PATH")]
    pub source_cert: Option<PathBuf>,

    /// PEM certificate to trust for the target server
    #[arg(long, value_name = "PATH")]
    pub target_cert: Option<PathBuf>,

    /// Timeout for select requests and for connecting to either server,
    /// e.g. "90", "30s", "5m" [default: 60s]
    ///
    /// Update requests are not cut short once sent: a commit that finishes
    /// after the client gave up would otherwise be reported as not posted.
    #[arg(long)]
    pub timeout: Option<String>,
}

/// Connection settings for one side of the copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Base URL including scheme.
    pub base_url: String,
    pub ca_cert: Option<PathBuf>,
}

/// Immutable description of one collection copy.
#[derive(Debug, Clone)]
pub struct ReplicationJob {
    pub source: EndpointConfig,
    pub target: EndpointConfig,
    pub collection: String,
    pub credentials: Option<Credentials>,
    pub batch_size: NonZeroU64,
    pub verbose: bool,
    pub dry_run: bool,
    pub timeout: Duration,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ReplicationJob {
    /// A job with default settings, for tests and programmatic use.
    pub fn new(source: &str, target: &str, collection: &str) -> Self {
        Self {
            source: EndpointConfig {
                base_url: resolve_base_url(source, false),
                ca_cert: None,
            },
            target: EndpointConfig {
                base_url: resolve_base_url(target, false),
                ca_cert: None,
            },
            collection: collection.to_string(),
            credentials: None,
            batch_size: DEFAULT_BATCH_SIZE,
            verbose: false,
            dry_run: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Merge command-line options over an optional job file and validate.
    pub fn resolve(args: JobArgs, file: Option<JobFile>) -> Result<Self> {
        let file = file.unwrap_or_default();

        let collection = non_empty(args.collection.or(file.collection))
            .ok_or_else(|| ReindexError::config("No Solr collection was provided"))?;
        let target = non_empty(args.target.or(file.target))
            .ok_or_else(|| ReindexError::config("No target Solr server was provided"))?;
        let source = non_empty(args.source.or(file.source))
            .ok_or_else(|| ReindexError::config("No source Solr server was provided"))?;

        let batch_size = match args.batch_size.or(file.batch_size) {
            Some(size) => NonZeroU64::new(size)
                .ok_or_else(|| ReindexError::config("Batch size must be greater than zero"))?,
            None => DEFAULT_BATCH_SIZE,
        };

        let timeout = match args.timeout.or(file.timeout) {
            Some(raw) => parse_duration(&raw)
                .map_err(|e| ReindexError::config(format!("Invalid timeout: {e:#}")))?,
            None => DEFAULT_TIMEOUT,
        };

        let username = non_empty(args.username.or(file.username));
        let password = args.password.or(file.password);
        let credentials = match username {
            Some(username) => Some(Credentials::new(username, password.unwrap_or_default())),
            None => {
                if password.is_some() {
                    tracing::warn!("Password given without a username, ignoring credentials");
                }
                None
            }
        };

        let source_tls = args.source_tls || file.source_tls.unwrap_or(false);
        let target_tls = args.target_tls || file.target_tls.unwrap_or(false);

        Ok(Self {
            source: EndpointConfig {
                base_url: resolve_base_url(&source, source_tls),
                ca_cert: args.source_cert.or(file.source_cert),
            },
            target: EndpointConfig {
                base_url: resolve_base_url(&target, target_tls),
                ca_cert: args.target_cert.or(file.target_cert),
            },
            collection,
            credentials,
            batch_size,
            verbose: args.verbose || file.verbose.unwrap_or(false),
            dry_run: args.dry_run || file.dry_run.unwrap_or(false),
            timeout,
        })
    }

    fn endpoint(&self, side: &EndpointConfig) -> SolrEndpoint {
        SolrEndpoint::new(side.base_url.clone(), self.collection.clone())
            .with_credentials(self.credentials.clone())
            .with_ca_cert(side.ca_cert.clone())
            .with_timeout(self.timeout)
    }

    pub fn source_endpoint(&self) -> SolrEndpoint {
        self.endpoint(&self.source)
    }

    pub fn target_endpoint(&self) -> SolrEndpoint {
        self.endpoint(&self.target)
    }
}
