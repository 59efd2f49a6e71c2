use gcgw_sdk::code;
use gcgw_sdk::objects::{CancelRedeemRequest, CancelRedeemResponse, Identifier, RedeemData};
use kanau::processor::Processor;
use serde_json::Value;
use tracing::{info, warn};

use super::{Gateway, GatewayError};
use crate::entities::gift_card::{CancelAmount, CancelRedemption, CancelTarget};

/// Read the redemption to cancel from either a discount code or the
/// original redemption object.
fn cancel_target(input: Option<Value>) -> Result<CancelTarget, GatewayError> {
    let target = match input {
        Some(Value::String(code)) => {
            let fields = code::decode(&code)?;
            CancelTarget {
                batch_number: fields.batch_number,
                amount: CancelAmount::Text(fields.amount),
                transaction_id: fields.transaction_id,
                card_number: fields.card_number,
                approval_code: fields.approval_code,
            }
        }
        Some(object @ Value::Object(_)) => {
            let data: RedeemData =
                serde_json::from_value(object).map_err(|_| GatewayError::MissingParameters)?;
            let field = |id: Option<&Identifier>| {
                Identifier::present(id)
                    .map(ToString::to_string)
                    .ok_or(GatewayError::MissingParameters)
            };
            let card = data.first_card();
            CancelTarget {
                batch_number: field(data.current_batch_number.as_ref())?,
                amount: data
                    .positive_amount()
                    .and_then(|amount| amount.normalize().to_string().parse().ok())
                    .map(CancelAmount::Number)
                    .ok_or(GatewayError::MissingParameters)?,
                transaction_id: field(data.transaction_id.as_ref())?,
                card_number: field(card.and_then(|c| c.card_number.as_ref()))?,
                approval_code: field(card.and_then(|c| c.approval_code.as_ref()))?,
            }
        }
        _ => return Err(GatewayError::InvalidInputType),
    };

    let complete = !target.amount.is_empty()
        && [
            &target.batch_number,
            &target.transaction_id,
            &target.card_number,
            &target.approval_code,
        ]
        .iter()
        .all(|field| !field.is_empty());
    if complete {
        Ok(target)
    } else {
        Err(GatewayError::MissingParameters)
    }
}

impl Processor<CancelRedeemRequest> for Gateway {
    type Output = CancelRedeemResponse;
    type Error = GatewayError;

    /// `CANCELREDEEM`: reverse a gift-card redemption.
    ///
    /// `success` mirrors the gift-card API's `ResponseCode == 0`; its answer
    /// is returned as `data` either way.
    async fn process(
        &self,
        request: CancelRedeemRequest,
    ) -> Result<CancelRedeemResponse, GatewayError> {
        let target = cancel_target(request.input)?;
        let original_transaction_id = target.transaction_id.clone();

        let data = self
            .gift_card
            .process(CancelRedemption {
                target,
                date_at_client: request.date_at_client,
                transaction_id: request.transaction_id.map(|id| id.to_string()),
                authorization: request.authorization,
            })
            .await
            .map_err(GatewayError::remote("Error cancel_redeem"))?;

        let success = data.get("ResponseCode").and_then(Value::as_i64) == Some(0);
        if success {
            info!(transaction_id = %original_transaction_id, "Cancelled redemption");
        } else {
            warn!(
                transaction_id = %original_transaction_id,
                response_code = ?data.get("ResponseCode"),
                "Gift-card API refused cancellation"
            );
        }

        Ok(CancelRedeemResponse { success, data })
    }
}
