//! Write side: bulk updates against `/update` with a per-page commit.

use crate::endpoint::SolrEndpoint;
use crate::response::check_update;
use async_trait::async_trait;
use reindex_core::{DocumentSink, Page, ReindexError, Result};

/// [`DocumentSink`] backed by a Solr collection's update handler.
///
/// Every page is committed on its own (`commit=true`), so a failed run leaves
/// the target with exactly the pages that were posted before the failure.
pub struct SolrSink {
    endpoint: SolrEndpoint,
    client: reqwest::Client,
}

impl SolrSink {
    pub fn new(endpoint: SolrEndpoint) -> Result<Self> {
        let client = endpoint.build_client()?;
        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &SolrEndpoint {
        &self.endpoint
    }
}

#[async_trait]
impl DocumentSink for SolrSink {
    async fn post_documents(&self, page: &Page) -> Result<()> {
        let url = self.endpoint.update_url();
        tracing::debug!("POST {} ({} documents)", url, page.len());

        let response = self
            .endpoint
            .authorize(self.client.post(&url))
            .json(&page.documents)
            .send()
            .await
            .map_err(|e| ReindexError::target_unreachable(&url, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ReindexError::target_unreachable(&url, e))?;

        if !status.is_success() {
            tracing::error!("Target rejected {}: HTTP {}", page.batch, status);
            return Err(ReindexError::TargetRejected {
                status: status.as_u16(),
                payload: body,
            });
        }

        check_update(status.as_u16(), &body)
    }
}
