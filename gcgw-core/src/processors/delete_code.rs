use gcgw_sdk::objects::{DeleteCodeRequest, DeleteCodeResponse};
use kanau::processor::Processor;
use tracing::{error, info};

use super::{Gateway, GatewayError};
use crate::entities::price_rule::DeletePriceRule;
use crate::error::RemoteError;

impl Processor<DeleteCodeRequest> for Gateway {
    type Output = DeleteCodeResponse;
    type Error = GatewayError;

    /// `DELETECODE`: delete the price rule behind a discount code.
    ///
    /// Failures are reported in the response (`success == false`).
    async fn process(&self, request: DeleteCodeRequest) -> Result<DeleteCodeResponse, GatewayError> {
        let Some(price_rule_id) = request.price_rule_id else {
            return Ok(DeleteCodeResponse::failed(
                "Failed to delete price rule: missing priceRuleId",
            ));
        };

        match self
            .admin
            .process(DeletePriceRule {
                price_rule_id: price_rule_id.clone(),
            })
            .await
        {
            Ok(()) => {
                info!(%price_rule_id, "Deleted price rule");
                Ok(DeleteCodeResponse::deleted())
            }
            Err(e) => {
                let message = format!("Failed to delete price rule: {}", failure_reason(&e));
                error!(%price_rule_id, error = %e, "Error deleting price rule");
                Ok(DeleteCodeResponse::failed(message))
            }
        }
    }
}

/// The platform's `errors` field when present, else the status text.
fn failure_reason(error: &RemoteError) -> String {
    let RemoteError::Api { status, body } = error else {
        return error.to_string();
    };

    let errors = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("errors").cloned())
        .filter(|errors| !errors.is_null());

    match errors {
        Some(serde_json::Value::String(text)) => text,
        Some(other) => other.to_string(),
        None => status
            .canonical_reason()
            .map(str::to_owned)
            .unwrap_or_else(|| status.as_str().to_owned()),
    }
}
