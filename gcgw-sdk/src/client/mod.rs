//! HTTP client for the gateway endpoint.
//!
//! Gated behind the `client` cargo feature so downstream crates that only
//! need the shared types do not pull in `reqwest`.

mod gateway;

pub use gateway::GatewayClient;

use reqwest::StatusCode;

/// Errors produced by the SDK HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (DNS, TLS, connection reset, …).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway rejected the request (`{"error": ...}` body).
    #[error("api error: status {status}, body: {body}")]
    Api { status: StatusCode, body: String },

    /// Request or response body could not be (de)serialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
