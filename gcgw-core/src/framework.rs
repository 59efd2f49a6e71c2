use crate::config::{ACCESS_TOKEN_HEADER, GiftCardConfig, PlatformConfig};
use crate::error::RemoteError;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Handle on the platform admin API. Every remote entity operation in
/// [`crate::entities`] is a `Processor` on this type.
#[derive(Debug, Clone)]
pub struct AdminApiProcessor {
    pub http: Client,
    pub config: PlatformConfig,
}

/// Handle on the gift-card API.
#[derive(Debug, Clone)]
pub struct GiftCardProcessor {
    pub http: Client,
    pub config: GiftCardConfig,
}

impl AdminApiProcessor {
    /// Start an authenticated request against an admin API resource.
    pub fn request(&self, method: Method, resource: &str) -> RequestBuilder {
        self.http
            .request(method, self.config.endpoint(resource))
            .header(ACCESS_TOKEN_HEADER, self.config.access_token())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
    }
}

/// Build the shared HTTP client with the given per-request timeout.
pub fn build_http_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to build HTTP client, using defaults without timeout");
            Client::new()
        })
}

/// Fail on non-2xx, otherwise decode the JSON body.
pub(crate) async fn parse_response<T: DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, RemoteError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(RemoteError::Api { status, body });
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(RemoteError::Json)
}

/// Percent-encode a caller-supplied identifier for use as a path segment.
pub(crate) fn segment(id: &impl std::fmt::Display) -> String {
    urlencoding::encode(&id.to_string()).into_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use gcgw_sdk::objects::Identifier;

    #[test]
    fn test_segment_escapes_path_separators() {
        assert_eq!(segment(&Identifier::from("42")), "42");
        assert_eq!(segment(&Identifier::from("../1")), "..%2F1");
        assert_eq!(segment(&Identifier::from("a b?")), "a%20b%3F");
    }

    #[tokio::test]
    async fn test_http_client_applies_timeout() {
        let server = httpmock::MockServer::start_async().await;
        server
            .mock_async(|_, then| {
                then.status(200).delay(Duration::from_millis(500));
            })
            .await;

        let err = build_http_client(Duration::from_millis(50))
            .get(server.url("/slow"))
            .send()
            .await
            .unwrap_err();
        assert!(err.is_timeout());
    }
}
