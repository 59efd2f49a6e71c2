//! App proxy API.
//!
//! The storefront reaches the gateway through a single endpoint that takes
//! an action name and its payload:
//!
//! - `POST /app/proxy` – `{action, data}` as JSON, urlencoded or multipart form
//!
//! Failures are rendered as `{"error": "<message>"}`.

pub mod extractors;

use axum::{
    Json, Router,
    extract::{FromRequest, Request, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
};
use gcgw_core::processors::{CodeListing, Gateway, GatewayError};
use gcgw_sdk::objects::{
    ActionKind, CancelRedeemRequest, CheckUsageRequest, CreateCodeRequest, DeleteCodeRequest,
    ErrorResponse, GetAllCodesRequest,
};
use kanau::processor::Processor;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::api::extractors::ActionPayload;
use crate::state::AppState;

/// Build the app proxy router.
pub fn router() -> Router<AppState> {
    Router::new().route("/app/proxy", any(proxy))
}

/// Errors returned by the proxy endpoint.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Server configuration error")]
    Configuration,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Unsupported content type")]
    UnsupportedContentType,

    #[error("{0}")]
    InvalidBody(String),

    #[error("Missing required data")]
    MissingData,

    #[error("Invalid action type")]
    InvalidAction,

    #[error("Invalid data for {action}: {source}")]
    InvalidData {
        action: ActionKind,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::UnsupportedContentType
            | ApiError::InvalidBody(_)
            | ApiError::MissingData
            | ApiError::InvalidAction
            | ApiError::InvalidData { .. } => StatusCode::BAD_REQUEST,
            ApiError::Gateway(e) => e.status_code(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

/// `/app/proxy`: run one gateway action.
///
/// The platform configuration is checked before anything else, then the
/// method, then the body.
async fn proxy(State(state): State<AppState>, req: Request) -> Result<Response, ApiError> {
    let Some(gateway) = state.gateway().await else {
        tracing::error!("Platform settings missing, refusing request");
        return Err(ApiError::Configuration);
    };
    if req.method() != Method::POST {
        return Err(ApiError::MethodNotAllowed);
    }

    let ActionPayload { action, data } = ActionPayload::from_request(req, &state).await?;
    let action: ActionKind = action
        .as_str()
        .and_then(|name| name.parse().ok())
        .ok_or(ApiError::InvalidAction)?;

    tracing::debug!(%action, "Dispatching action");
    dispatch(&gateway, action, data).await.inspect_err(|e| {
        if let ApiError::Gateway(e) = e {
            tracing::error!(%action, error = %e, "Error in action");
        }
    })
}

async fn dispatch(gateway: &Gateway, action: ActionKind, data: Value) -> Result<Response, ApiError> {
    let response = match action {
        ActionKind::Create => {
            let request: CreateCodeRequest = payload(action, data)?;
            Json(gateway.process(request).await?).into_response()
        }
        ActionKind::CheckUsage => {
            let request: CheckUsageRequest = payload(action, data)?;
            Json(gateway.process(request).await?).into_response()
        }
        ActionKind::DeleteCode => {
            let request: DeleteCodeRequest = payload(action, data)?;
            let result = gateway.process(request).await?;
            let status = if result.success {
                StatusCode::OK
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, Json(result)).into_response()
        }
        ActionKind::GetAllCode => {
            let request: GetAllCodesRequest = payload(action, data)?;
            match gateway.process(request).await? {
                CodeListing::NoPriceRules => Json(Vec::<Value>::new()).into_response(),
                listing @ CodeListing::Found(_) => Json(listing.into_body()).into_response(),
            }
        }
        ActionKind::CancelRedeem => {
            let request: CancelRedeemRequest = payload(action, data)?;
            Json(gateway.process(request).await?).into_response()
        }
    };
    Ok(response)
}

fn payload<T: DeserializeOwned>(action: ActionKind, data: Value) -> Result<T, ApiError> {
    serde_json::from_value(data).map_err(|source| ApiError::InvalidData { action, source })
}
