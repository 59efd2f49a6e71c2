//! Custom Axum extractor for the proxy request body.
//!
//! The storefront posts `{action, data}` either as a JSON document or as a
//! form (urlencoded or multipart) whose `data` field holds a JSON string.

use axum::{
    Form,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
};
use serde::Deserialize;
use serde_json::Value;

use super::ApiError;

/// Largest body accepted on the proxy endpoint.
const BODY_LIMIT: usize = 1024 * 1024;

/// The undecoded `{action, data}` pair of a proxy request.
///
/// Both parts are guaranteed present (and `data` not `null`); the action
/// name is not validated yet.
#[derive(Debug)]
pub struct ActionPayload {
    pub action: Value,
    pub data: Value,
}

#[derive(Debug, Deserialize)]
struct FormFields {
    action: Option<String>,
    data: Option<String>,
}

impl<S: Send + Sync> FromRequest<S> for ActionPayload {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let (action, data) = if content_type.contains("application/json") {
            let bytes = axum::body::to_bytes(req.into_body(), BODY_LIMIT)
                .await
                .map_err(|_| ApiError::InvalidBody("failed to read request body".to_string()))?;
            let mut body: Value = serde_json::from_slice(&bytes)
                .map_err(|e| ApiError::InvalidBody(format!("invalid JSON body: {e}")))?;
            (body.get_mut("action").map(Value::take), body.get_mut("data").map(Value::take))
        } else if content_type.contains("application/x-www-form-urlencoded") {
            let Form(fields) = Form::<FormFields>::from_request(req, state)
                .await
                .map_err(|e| ApiError::InvalidBody(e.body_text()))?;
            form_payload(fields)?
        } else if content_type.contains("multipart/form-data") {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| ApiError::InvalidBody(e.body_text()))?;
            let mut fields = FormFields {
                action: None,
                data: None,
            };
            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(|e| ApiError::InvalidBody(e.body_text()))?
            {
                let name = field.name().map(str::to_owned);
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::InvalidBody(e.body_text()))?;
                match name.as_deref() {
                    Some("action") => fields.action = Some(value),
                    Some("data") => fields.data = Some(value),
                    _ => {}
                }
            }
            form_payload(fields)?
        } else {
            return Err(ApiError::UnsupportedContentType);
        };

        match (action, data) {
            (Some(action), Some(data)) if is_given(&action) && is_given(&data) => {
                Ok(ActionPayload { action, data })
            }
            _ => Err(ApiError::MissingData),
        }
    }
}

/// Decode the JSON string carried in the `data` form field.
fn form_payload(fields: FormFields) -> Result<(Option<Value>, Option<Value>), ApiError> {
    let data = fields
        .data
        .map(|data| serde_json::from_str::<Value>(&data))
        .transpose()
        .map_err(|e| ApiError::InvalidBody(format!("invalid JSON in data field: {e}")))?;
    Ok((fields.action.map(Value::String), data))
}

/// `null`, `false`, `0` and `""` count as absent.
fn is_given(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
