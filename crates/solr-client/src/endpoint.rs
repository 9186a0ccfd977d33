//! Endpoint configuration and URL construction.

use reindex_core::{BatchDescriptor, ReindexError, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Select and connect timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Basic-auth credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Prefix `server` with a scheme unless it already has one.
///
/// `use_tls` selects `https://` over `http://`. Trailing slashes are removed
/// so paths can be appended directly.
pub fn resolve_base_url(server: &str, use_tls: bool) -> String {
    let server = server.trim().trim_end_matches('/');
    if server.starts_with("http://") || server.starts_with("https://") {
        server.to_string()
    } else if use_tls {
        format!("https://{server}")
    } else {
        format!("http://{server}")
    }
}

/// One Solr server hosting the collection being copied.
#[derive(Debug, Clone)]
pub struct SolrEndpoint {
    /// Base URL including scheme, e.g. `https://solr1:8983`.
    pub base_url: String,
    pub collection: String,
    pub credentials: Option<Credentials>,
    /// PEM file trusted as an additional root for this endpoint only.
    pub ca_cert: Option<PathBuf>,
    /// Bounds connecting and whole select requests. Updates only get the
    /// connect bound, since a commit may finish after a client-side timeout.
    pub timeout: Duration,
}

impl SolrEndpoint {
    pub fn new(base_url: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            collection: collection.into(),
            credentials: None,
            ca_cert: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_ca_cert(mut self, ca_cert: Option<PathBuf>) -> Self {
        self.ca_cert = ca_cert;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn collection_url(&self) -> String {
        format!(
            "{}/solr/{}",
            self.base_url.trim_end_matches('/'),
            self.collection
        )
    }

    /// Count-only query, executed on this node only.
    pub fn count_url(&self) -> String {
        format!("{}/select?q=*&rows=0&distrib=false", self.collection_url())
    }

    /// All fields of the documents in `batch`, executed on this node only.
    pub fn page_url(&self, batch: &BatchDescriptor) -> String {
        format!(
            "{}/select?q=*&rows={}&start={}&distrib=false&fl=*",
            self.collection_url(),
            batch.rows,
            batch.start
        )
    }

    /// Bulk update with an immediate commit.
    pub fn update_url(&self) -> String {
        format!("{}/update?commit=true&wt=json", self.collection_url())
    }

    /// Build the HTTP client for this endpoint.
    ///
    /// Fails with [`ReindexError::ConfigurationInvalid`] when the CA
    /// certificate cannot be read or parsed.
    pub fn build_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder().connect_timeout(self.timeout);

        if let Some(path) = &self.ca_cert {
            let pem = std::fs::read(path).map_err(|e| {
                ReindexError::config(format!(
                    "Failed to read certificate {}: {e}",
                    path.display()
                ))
            })?;
            let cert = reqwest::Certificate::from_pem(&pem).map_err(|e| {
                ReindexError::config(format!(
                    "Invalid PEM certificate {}: {e}",
                    path.display()
                ))
            })?;
            tracing::debug!("Trusting certificate {} for {}", path.display(), self.base_url);
            builder = builder.add_root_certificate(cert);
        }

        builder
            .build()
            .map_err(|e| ReindexError::config(format!("Failed to build HTTP client: {e}")))
    }

    pub(crate) fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.credentials {
            Some(c) => request.basic_auth(&c.username, Some(&c.password)),
            None => request,
        }
    }
}
