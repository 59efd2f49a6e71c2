//! Axum server setup and router configuration.

use crate::api;
use crate::shutdown::shutdown_signal;
use crate::state::AppState;
use axum::{Json, Router, response::IntoResponse, routing::get};
use serde::Serialize;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Build the main application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .merge(api::router())
        .with_state(state)
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Simple health check - returns OK if the server is running.
async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Run the server with graceful shutdown support.
pub async fn run_server(router: Router, addr: SocketAddr) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http};
    use gcgw_core::config::{GatewayConfig, PlatformConfig};
    use gcgw_sdk::client::{ClientError, GatewayClient};
    use gcgw_sdk::objects::GetAllCodesRequest;
    use httpmock::prelude::*;
    use serde_json::json;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_check() {
        let response = build_router(AppState::default())
            .oneshot(
                http::Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), http::StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "healthy");
    }

    #[tokio::test]
    async fn test_sdk_client_against_served_router() {
        let shop = MockServer::start_async().await;
        shop.mock_async(|when, then| {
            when.method(GET).path("/admin/api/2024-10/price_rules.json");
            then.status(200).json_body(json!({ "price_rules": [] }));
        })
        .await;
        let platform =
            PlatformConfig::new(Some(&shop.base_url()), Some("shpat_test"), Some("2024-10"))
                .unwrap();
        let state = AppState::new(Some(GatewayConfig::new(platform)));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, build_router(state)).await });

        let client =
            GatewayClient::new(url::Url::parse(&format!("http://{addr}/app/proxy")).unwrap());
        let codes = client
            .get_all_codes(&GetAllCodesRequest {
                customer_id: Some("42".into()),
            })
            .await
            .unwrap();
        assert!(codes.is_empty());

        let err = client
            .get_all_codes(&GetAllCodesRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Api { status, .. } if status == 400));
    }
}
