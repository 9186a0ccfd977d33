//! Parsing of Solr `select` and `update` response bodies.
//!
//! Kept free of any HTTP types so the parsing rules can be tested on plain
//! strings.

use reindex_core::{Document, ReindexError, Result};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
struct CountResponse {
    response: CountBody,
}

#[derive(Deserialize)]
struct CountBody {
    #[serde(rename = "numFound")]
    num_found: u64,
}

#[derive(Deserialize)]
struct DocsResponse {
    response: DocsBody,
}

#[derive(Deserialize)]
struct DocsBody {
    docs: Vec<Document>,
}

/// Extract `response.numFound` from a count query.
///
/// `url` is only used for the error message.
pub fn parse_count(url: &str, body: &str) -> Result<u64> {
    let parsed: CountResponse = serde_json::from_str(body)
        .map_err(|e| ReindexError::malformed(url, format!("unexpected select response: {e}")))?;
    Ok(parsed.response.num_found)
}

/// Extract `response.docs` from a page query, in response order.
pub fn parse_documents(url: &str, body: &str) -> Result<Vec<Document>> {
    let parsed: DocsResponse = serde_json::from_str(body)
        .map_err(|e| ReindexError::malformed(url, format!("unexpected select response: {e}")))?;
    Ok(parsed.response.docs)
}

/// Check an update response that came back with a success HTTP status.
///
/// Solr may still report a failure through a non-zero
/// `responseHeader.status`; that is treated as a rejection. Bodies that are
/// not JSON are accepted since the HTTP status already signalled success.
pub fn check_update(status: u16, body: &str) -> Result<()> {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        tracing::debug!("Update response is not JSON, relying on HTTP status {status}");
        return Ok(());
    };

    match value
        .get("responseHeader")
        .and_then(|h| h.get("status"))
        .and_then(Value::as_i64)
    {
        Some(0) | None => Ok(()),
        Some(solr_status) => {
            tracing::error!("Target reported status {solr_status} in response header");
            Err(ReindexError::TargetRejected {
                status,
                payload: body.to_string(),
            })
        }
    }
}
