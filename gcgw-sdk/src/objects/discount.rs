//! Discount-code records returned by the `CREATE` and `GETALLCODE` actions.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A discount code freshly issued against a single-use price rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountCode {
    #[serde(rename = "couponCodeId")]
    pub coupon_code_id: u64,
    pub code: String,
    pub price_rules_id: u64,
    pub created_at: Option<String>,
    /// `true` once the platform reports at least one use.
    pub usage_count: bool,
    pub code_status: bool,
    /// Local expiry, fifteen minutes after issue.
    #[serde(rename = "expiresAt", with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
}

/// Result of the `CREATE` action.
///
/// On success `discountCode` is set; when the platform answered without a
/// discount code, its raw answer is echoed in `discountCodesResult`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCodeResponse {
    pub success: bool,
    #[serde(
        rename = "discountCode",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub discount_code: Option<DiscountCode>,
    #[serde(
        rename = "discountCodesResult",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub discount_codes_result: Option<serde_json::Value>,
}

/// A discount code as listed for a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountCodeSummary {
    #[serde(rename = "couponCodeId")]
    pub coupon_code_id: u64,
    pub code: String,
    pub price_rules_id: u64,
    pub created_at: Option<String>,
    pub usage_count: bool,
}

/// One entry of the `GETALLCODE` listing. Every entry carries its own
/// `success` flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountCodeEnvelope {
    pub success: bool,
    #[serde(rename = "discountCode")]
    pub discount_code: DiscountCodeSummary,
}

/// Result of the `GETALLCODE` action when the platform listed any price rule.
///
/// When no price rule exists (or listing fails) the endpoint answers with a
/// bare `[]` instead of this object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllCodesResponse {
    pub success: bool,
    #[serde(rename = "allDiscountCode")]
    pub all_discount_code: Vec<DiscountCodeEnvelope>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;

    #[test]
    fn discount_code_wire_shape() {
        let code = DiscountCode {
            coupon_code_id: 17,
            code: "Q42B1C5D9E70011".to_owned(),
            price_rules_id: 99,
            created_at: Some("2024-05-01T10:00:00-04:00".to_owned()),
            usage_count: false,
            code_status: false,
            expires_at: datetime!(2024-05-01 14:15:00 UTC),
        };
        let value = serde_json::to_value(CreateCodeResponse {
            success: true,
            discount_code: Some(code),
            discount_codes_result: None,
        })
        .unwrap();

        assert_eq!(
            value,
            json!({
                "success": true,
                "discountCode": {
                    "couponCodeId": 17,
                    "code": "Q42B1C5D9E70011",
                    "price_rules_id": 99,
                    "created_at": "2024-05-01T10:00:00-04:00",
                    "usage_count": false,
                    "code_status": false,
                    "expiresAt": "2024-05-01T14:15:00Z"
                }
            })
        );
    }

    #[test]
    fn all_codes_wire_shape() {
        let value = serde_json::to_value(AllCodesResponse {
            success: true,
            all_discount_code: vec![DiscountCodeEnvelope {
                success: true,
                discount_code: DiscountCodeSummary {
                    coupon_code_id: 1,
                    code: "A5B6".to_owned(),
                    price_rules_id: 2,
                    created_at: None,
                    usage_count: false,
                },
            }],
        })
        .unwrap();

        assert_eq!(value["allDiscountCode"][0]["success"], json!(true));
        assert_eq!(value["allDiscountCode"][0]["discountCode"]["price_rules_id"], json!(2));
    }
}
