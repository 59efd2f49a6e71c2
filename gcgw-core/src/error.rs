//! Errors shared by the remote API processors.

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single outbound call to one of the remote APIs.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Transport-level failure (DNS, TLS, timeout, connection reset, …).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote API returned a non-2xx status code.
    #[error("api error: status {status}, body: {body}")]
    Api { status: StatusCode, body: String },

    /// Response body could not be deserialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RemoteError {
    /// The HTTP status of a rejected call, if the call got that far.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RemoteError::Api { status, .. } => Some(*status),
            RemoteError::Http(e) => e.status(),
            RemoteError::Json(_) => None,
        }
    }
}
