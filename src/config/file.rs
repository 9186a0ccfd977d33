//! TOML job files.
//!
//! Every key is optional; values given on the command line take precedence.
//!
//! ```toml
//! source = "solr-old.internal:8983"
//! target = "solr-new.internal:8983"
//! collection = "products"
//! batch_size = 500
//! source_tls = true
//! source_cert = "cert/source_server.crt"
//! timeout = "2m"
//! ```

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobFile {
    pub source: Option<String>,
    pub target: Option<String>,
    pub collection: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub batch_size: Option<u64>,
    pub verbose: Option<bool>,
    pub dry_run: Option<bool>,
    pub source_tls: Option<bool>,
    pub target_tls: Option<bool>,
    pub source_cert: Option<PathBuf>,
    pub target_cert: Option<PathBuf>,
    pub timeout: Option<String>,
}

impl JobFile {
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("Failed to parse job file")
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read job file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid job file {}", path.display()))
    }
}
