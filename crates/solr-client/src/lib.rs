//! Solr HTTP client for solr-reindex.
//!
//! Implements [`reindex_core::DocumentSource`] against a collection's
//! `/select` handler and [`reindex_core::DocumentSink`] against its
//! `/update` handler:
//!
//! - Count: `GET {base}/solr/{collection}/select?q=*&rows=0&distrib=false`
//! - Page: `GET {base}/solr/{collection}/select?q=*&rows={rows}&start={start}&distrib=false&fl=*`
//! - Update: `POST {base}/solr/{collection}/update?commit=true&wt=json`
//!
//! Each endpoint carries its own optional CA certificate and shares the
//! basic-auth credentials of the job.

mod endpoint;
pub mod response;
mod sink;
mod source;
#[cfg(test)]
mod test_server;

pub use endpoint::{resolve_base_url, Credentials, SolrEndpoint, DEFAULT_TIMEOUT};
pub use sink::SolrSink;
pub use source::SolrSource;
