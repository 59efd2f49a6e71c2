//! Gift-card API: redemption cancellation.
//!
//! The cancellation endpoint answers with a JSON document whose
//! `ResponseCode` tells success (`0`) from failure; the HTTP status is not
//! meaningful, so any JSON answer is returned to the caller as-is.

use crate::error::RemoteError;
use crate::framework::GiftCardProcessor;
use kanau::processor::Processor;
use serde::Serialize;
use tracing::debug;

/// Transaction type of a redemption cancellation.
pub const CANCEL_TRANSACTION_TYPE_ID: u32 = 312;

/// Reason recorded with every cancellation.
pub const CANCEL_REASON: &str = "Return";

/// Amount of the original redemption, forwarded in the form it arrived in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CancelAmount {
    /// Digits decoded from a discount code.
    Text(String),
    /// `TotalAmount` of a redemption record.
    Number(serde_json::Number),
}

impl CancelAmount {
    pub fn is_empty(&self) -> bool {
        matches!(self, CancelAmount::Text(text) if text.is_empty())
    }
}

/// The redemption a cancellation refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelTarget {
    pub batch_number: String,
    pub amount: CancelAmount,
    pub transaction_id: String,
    pub card_number: String,
    pub approval_code: String,
}

/// Cancel a redemption.
///
/// `date_at_client`, `transaction_id` and `authorization` are supplied by
/// the storefront and forwarded as request headers.
#[derive(Debug, Clone)]
pub struct CancelRedemption {
    pub target: CancelTarget,
    pub date_at_client: Option<String>,
    pub transaction_id: Option<String>,
    pub authorization: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct OriginalRequest<'a> {
    original_batch_number: &'a str,
    original_transaction_id: &'a str,
    original_approval_code: &'a str,
    original_amount: &'a CancelAmount,
    original_invoice_number: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct CancelCard<'a> {
    card_number: &'a str,
    amount: &'a CancelAmount,
    original_request: OriginalRequest<'a>,
    reason: &'static str,
}

#[derive(Debug, Serialize)]
struct CancelBody<'a> {
    #[serde(rename = "inputType")]
    input_type: &'static str,
    #[serde(rename = "numberOfCards")]
    number_of_cards: u32,
    #[serde(rename = "Cards")]
    cards: [CancelCard<'a>; 1],
    #[serde(rename = "TransactionModeID")]
    transaction_mode_id: u32,
    #[serde(rename = "TransactionTypeId")]
    transaction_type_id: u32,
}

impl CancelTarget {
    fn body(&self) -> CancelBody<'_> {
        CancelBody {
            input_type: "1",
            number_of_cards: 1,
            cards: [CancelCard {
                card_number: &self.card_number,
                amount: &self.amount,
                original_request: OriginalRequest {
                    original_batch_number: &self.batch_number,
                    original_transaction_id: &self.transaction_id,
                    original_approval_code: &self.approval_code,
                    original_amount: &self.amount,
                    original_invoice_number: format!("PC-{}", self.transaction_id),
                },
                reason: CANCEL_REASON,
            }],
            transaction_mode_id: 0,
            transaction_type_id: CANCEL_TRANSACTION_TYPE_ID,
        }
    }
}

impl Processor<CancelRedemption> for GiftCardProcessor {
    type Output = serde_json::Value;
    type Error = RemoteError;
    #[tracing::instrument(skip_all, err, name = "API:CancelRedemption")]
    async fn process(&self, input: CancelRedemption) -> Result<serde_json::Value, RemoteError> {
        let mut request = self
            .http
            .post(self.config.cancel_url.clone())
            .json(&input.target.body());

        if let Some(date_at_client) = &input.date_at_client {
            request = request.header("DateAtClient", date_at_client);
        }
        if let Some(transaction_id) = &input.transaction_id {
            request = request.header("TransactionId", transaction_id);
        }
        if let Some(token) = &input.authorization {
            request = request.bearer_auth(token);
        }

        let resp = request.send().await?;
        debug!(status = %resp.status(), "Gift-card API answered cancellation");
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(RemoteError::Json)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cancel_body() {
        let target = CancelTarget {
            batch_number: "10493".to_owned(),
            amount: CancelAmount::Text("250".to_owned()),
            transaction_id: "88".to_owned(),
            card_number: "7001234567890123".to_owned(),
            approval_code: "123456".to_owned(),
        };

        assert_eq!(
            serde_json::to_value(target.body()).unwrap(),
            json!({
                "inputType": "1",
                "numberOfCards": 1,
                "Cards": [{
                    "CardNumber": "7001234567890123",
                    "Amount": "250",
                    "OriginalRequest": {
                        "OriginalBatchNumber": "10493",
                        "OriginalTransactionId": "88",
                        "OriginalApprovalCode": "123456",
                        "OriginalAmount": "250",
                        "OriginalInvoiceNumber": "PC-88"
                    },
                    "Reason": "Return"
                }],
                "TransactionModeID": 0,
                "TransactionTypeId": 312
            })
        );
    }

    #[test]
    fn test_record_amount_stays_numeric() {
        let target = CancelTarget {
            batch_number: "10493".to_owned(),
            amount: CancelAmount::Number("12.5".parse().unwrap()),
            transaction_id: "88".to_owned(),
            card_number: "7001234567890123".to_owned(),
            approval_code: "123456".to_owned(),
        };

        let body = serde_json::to_value(target.body()).unwrap();
        assert_eq!(body["Cards"][0]["Amount"], json!(12.5));
        assert_eq!(body["Cards"][0]["OriginalRequest"]["OriginalAmount"], json!(12.5));
    }
}
