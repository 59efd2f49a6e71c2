//! Per-action payloads (`data` of an [`ActionRequest`](super::ActionRequest))
//! and the small result objects that do not deal with discount-code records.
//!
//! Every payload field is optional on the wire: the gateway decides which
//! absences are fatal for the action at hand.

use serde::{Deserialize, Serialize};

use super::{Identifier, RedeemData};

/// `CREATE` – issue a discount code for a redemption.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCodeRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redeem_data: Option<RedeemData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<Identifier>,
}

/// `CHECKUSAGE` – read the usage counter of one discount code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckUsageRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_rule_id: Option<Identifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_code_id: Option<Identifier>,
}

/// `DELETECODE` – delete a price rule (and with it its discount codes).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCodeRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_rule_id: Option<Identifier>,
}

/// `GETALLCODE` – list a customer's unused discount codes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAllCodesRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<Identifier>,
}

/// `CANCELREDEEM` – reverse a gift-card redemption.
///
/// `input` is either a discount code previously issued by `CREATE` or the
/// raw [`RedeemData`] object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CancelRedeemRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<serde_json::Value>,
    #[serde(
        rename = "DateAtClient",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub date_at_client: Option<String>,
    #[serde(
        rename = "TransactionId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub transaction_id: Option<Identifier>,
    #[serde(
        rename = "Authorization",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub authorization: Option<String>,
}

impl CancelRedeemRequest {
    /// Cancel the redemption encoded in a discount code.
    pub fn from_code(code: impl Into<String>) -> Self {
        Self {
            input: Some(serde_json::Value::String(code.into())),
            ..Self::default()
        }
    }

    /// Cancel a redemption described by its original data.
    pub fn from_redeem_data(data: &RedeemData) -> Result<Self, serde_json::Error> {
        Ok(Self {
            input: Some(serde_json::to_value(data)?),
            ..Self::default()
        })
    }

    pub fn with_client_headers(
        mut self,
        date_at_client: impl Into<String>,
        transaction_id: impl Into<Identifier>,
        authorization: impl Into<String>,
    ) -> Self {
        self.date_at_client = Some(date_at_client.into());
        self.transaction_id = Some(transaction_id.into());
        self.authorization = Some(authorization.into());
        self
    }
}

/// Result of `CHECKUSAGE`: `success` is `true` while the code is unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageResponse {
    pub success: bool,
    pub usage: i64,
}

/// Result of `DELETECODE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteCodeResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DeleteCodeResponse {
    pub fn deleted() -> Self {
        Self {
            success: true,
            message: Some("Discount code deleted successfully".to_owned()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}

/// Result of `CANCELREDEEM`; `data` is the gift-card API's answer verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelRedeemResponse {
    pub success: bool,
    pub data: serde_json::Value,
}

/// Error body used by the gateway for rejected or failed requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
