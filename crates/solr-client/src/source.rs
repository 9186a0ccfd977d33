//! Read side: count and page queries against `/select`.

use crate::endpoint::SolrEndpoint;
use crate::response::{parse_count, parse_documents};
use async_trait::async_trait;
use reindex_core::{BatchDescriptor, Document, DocumentSource, ReindexError, Result};

/// [`DocumentSource`] backed by a Solr collection's select handler.
pub struct SolrSource {
    endpoint: SolrEndpoint,
    client: reqwest::Client,
}

impl SolrSource {
    pub fn new(endpoint: SolrEndpoint) -> Result<Self> {
        let client = endpoint.build_client()?;
        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &SolrEndpoint {
        &self.endpoint
    }

    /// GET `url` and return the body of a success response.
    async fn get(&self, url: &str) -> Result<String> {
        tracing::debug!("GET {url}");

        let response = self
            .endpoint
            .authorize(self.client.get(url))
            .timeout(self.endpoint.timeout)
            .send()
            .await
            .map_err(|e| ReindexError::source_unreachable(url, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ReindexError::source_unreachable(url, e))?;

        if !status.is_success() {
            return Err(ReindexError::source_unreachable(
                url,
                format!("HTTP status {status}: {body}"),
            ));
        }

        Ok(body)
    }
}

#[async_trait]
impl DocumentSource for SolrSource {
    async fn count_documents(&self) -> Result<u64> {
        let url = self.endpoint.count_url();
        let body = self.get(&url).await?;
        parse_count(&url, &body)
    }

    async fn fetch_documents(&self, batch: &BatchDescriptor) -> Result<Vec<Document>> {
        let url = self.endpoint.page_url(batch);
        let body = self.get(&url).await?;
        let documents = parse_documents(&url, &body)?;
        tracing::debug!("Fetched {} documents for {}", documents.len(), batch);
        Ok(documents)
    }
}
