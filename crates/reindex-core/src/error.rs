//! Error types for collection copies.
//!
//! Errors are grouped by the side of the copy they come from. None of them
//! are retried: the first error ends the run and batches already posted stay
//! committed on the target.
//!
//! | Error Type | Side | Description |
//! |------------|------|-------------|
//! | `SourceUnreachable` | Source | Request could not be completed |
//! | `MalformedResponse` | Source | Body is not the expected select response |
//! | `ShortPage` | Source | Fewer documents than requested (count changed mid-run) |
//! | `TargetUnreachable` | Target | Update request could not be sent |
//! | `TargetRejected` | Target | Target answered with a failure status |
//! | `ConfigurationInvalid` | Neither | Detected before the engine starts |
//! | `Cancelled` | Neither | Shutdown requested between batches |

use thiserror::Error;

/// Result type alias for copy operations.
pub type Result<T> = std::result::Result<T, ReindexError>;

#[derive(Error, Debug)]
pub enum ReindexError {
    /// The source request failed at the transport level or returned a
    /// non-success HTTP status.
    #[error("Source unreachable ({url}): {message}")]
    SourceUnreachable { url: String, message: String },

    /// The source answered, but not with a usable select response.
    #[error("Malformed response from {url}: {message}")]
    MalformedResponse { url: String, message: String },

    /// The source returned fewer documents than the batch asked for.
    #[error("Short page at offset {start}: requested {requested} documents, received {received}")]
    ShortPage {
        start: u64,
        requested: u64,
        received: u64,
    },

    /// The update request could not be delivered to the target.
    #[error("Target unreachable ({url}): {message}")]
    TargetUnreachable { url: String, message: String },

    /// The target refused the update. `payload` is the raw response body.
    #[error("Target rejected update with status {status}: {payload}")]
    TargetRejected { status: u16, payload: String },

    #[error("Invalid configuration: {0}")]
    ConfigurationInvalid(String),

    /// Shutdown was requested; `next_batch` is the first batch not started.
    #[error("Cancelled before batch {next_batch}")]
    Cancelled { next_batch: u64 },
}

impl ReindexError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigurationInvalid(message.into())
    }

    pub fn source_unreachable(url: impl Into<String>, message: impl ToString) -> Self {
        Self::SourceUnreachable {
            url: url.into(),
            message: message.to_string(),
        }
    }

    pub fn malformed(url: impl Into<String>, message: impl ToString) -> Self {
        Self::MalformedResponse {
            url: url.into(),
            message: message.to_string(),
        }
    }

    pub fn target_unreachable(url: impl Into<String>, message: impl ToString) -> Self {
        Self::TargetUnreachable {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Whether the error was raised while reading from the source.
    pub fn is_source_side(&self) -> bool {
        matches!(
            self,
            Self::SourceUnreachable { .. } | Self::MalformedResponse { .. } | Self::ShortPage { .. }
        )
    }

    /// Whether the error was raised while writing to the target.
    pub fn is_target_side(&self) -> bool {
        matches!(
            self,
            Self::TargetUnreachable { .. } | Self::TargetRejected { .. }
        )
    }
}
