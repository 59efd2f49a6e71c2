use gcgw_sdk::code::{self, CodeFields};
use gcgw_sdk::objects::{CreateCodeRequest, CreateCodeResponse, DiscountCode, Identifier};
use kanau::processor::Processor;
use time::OffsetDateTime;
use tracing::{debug, info};

use super::{Gateway, GatewayError};
use crate::entities::discount_code::{CreateDiscountCode, DiscountCodeCreation};
use crate::entities::price_rule::CreatePriceRule;
use crate::error::RemoteError;

/// How long an issued code (and its price rule) stays valid.
pub const CODE_VALIDITY: time::Duration = time::Duration::minutes(15);

impl Processor<CreateCodeRequest> for Gateway {
    type Output = Option<CreateCodeResponse>;
    type Error = GatewayError;

    /// `CREATE`: issue a single-use discount code worth the redeemed amount.
    ///
    /// Returns `None` when there is no positive amount to issue a code for.
    async fn process(
        &self,
        request: CreateCodeRequest,
    ) -> Result<Option<CreateCodeResponse>, GatewayError> {
        let Some(redeem_data) = request.redeem_data.as_ref() else {
            return Ok(None);
        };
        let Some(amount) = redeem_data.positive_amount() else {
            debug!("CREATE without a positive amount, nothing to issue");
            return Ok(None);
        };

        let present = |id: Option<&Identifier>| {
            Identifier::present(id)
                .map(ToString::to_string)
                .ok_or(GatewayError::MissingParameters)
        };
        let card = redeem_data.first_card();
        let fields = CodeFields {
            customer_id: present(request.customer_id.as_ref())?,
            batch_number: present(redeem_data.current_batch_number.as_ref())?,
            amount: amount.to_string(),
            transaction_id: present(redeem_data.transaction_id.as_ref())?,
            card_number: present(card.and_then(|c| c.card_number.as_ref()))?,
            approval_code: present(card.and_then(|c| c.approval_code.as_ref()))?,
        };

        let now = OffsetDateTime::now_utc();
        let price_rule = self
            .admin
            .process(CreatePriceRule {
                amount,
                starts_at: now,
                ends_at: now + CODE_VALIDITY,
            })
            .await
            .map_err(|e| match e {
                RemoteError::Api { status, .. } => GatewayError::PriceRuleRejected(status),
                other => GatewayError::Remote {
                    context: "failed to create price rule",
                    source: other,
                },
            })?;

        let creation = self
            .admin
            .process(CreateDiscountCode {
                price_rule_id: price_rule.id,
                code: code::encode(&fields),
            })
            .await
            .map_err(GatewayError::remote("failed to create discount code"))?;

        let response = match creation {
            DiscountCodeCreation::Created(created) => {
                info!(
                    price_rule_id = price_rule.id,
                    discount_code_id = created.id,
                    "Issued gift-card discount code"
                );
                CreateCodeResponse {
                    success: true,
                    discount_code: Some(DiscountCode {
                        coupon_code_id: created.id,
                        code: created.code,
                        price_rules_id: price_rule.id,
                        created_at: created.created_at,
                        usage_count: false,
                        code_status: false,
                        expires_at: OffsetDateTime::now_utc() + CODE_VALIDITY,
                    }),
                    discount_codes_result: None,
                }
            }
            DiscountCodeCreation::Unexpected(raw) => CreateCodeResponse {
                success: false,
                discount_code: None,
                discount_codes_result: Some(raw),
            },
        };

        Ok(Some(response))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::processors::test_support::{ACCESS_TOKEN, admin_path, gateway};
    use httpmock::prelude::*;
    use serde_json::json;

    fn request(amount: serde_json::Value) -> CreateCodeRequest {
        serde_json::from_value(json!({
            "customerId": 6730418250000u64,
            "redeemData": {
                "CurrentBatchNumber": 10493,
                "TotalAmount": amount,
                "TransactionId": 88,
                "Cards": [{ "CardNumber": "7001234567890123", "ApprovalCode": "123456" }]
            }
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_issues_encoded_code() {
        let server = MockServer::start_async().await;
        let rules = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(admin_path("price_rules.json"))
                    .header("x-shopify-access-token", ACCESS_TOKEN)
                    .body_contains("\"value\":\"-250\"")
                    .body_contains("\"usage_limit\":1");
                then.status(201)
                    .json_body(json!({ "price_rule": { "id": 555, "title": "x" } }));
            })
            .await;
        let codes = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(admin_path("price_rules/555/discount_codes.json"));
                then.status(201).json_body(json!({
                    "discount_code": {
                        "id": 777,
                        "price_rule_id": 555,
                        "code": "Q6730418250000B10493C250D88E7001234567890123123456",
                        "usage_count": 0,
                        "created_at": "2024-05-01T10:00:00-04:00"
                    }
                }));
            })
            .await;

        let before = OffsetDateTime::now_utc();
        let response = gateway(&server)
            .process(request(json!(250)))
            .await
            .unwrap()
            .unwrap();

        rules.assert_async().await;
        codes.assert_async().await;
        assert!(response.success);
        let issued = response.discount_code.unwrap();
        assert_eq!(issued.coupon_code_id, 777);
        assert_eq!(issued.price_rules_id, 555);
        assert!(!issued.usage_count);
        assert!(!issued.code_status);
        assert!(issued.expires_at >= before + CODE_VALIDITY);
    }

    #[tokio::test]
    async fn test_sent_code_decodes_to_redemption() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(admin_path("price_rules.json"));
                then.status(201).json_body(json!({ "price_rule": { "id": 1 } }));
            })
            .await;
        // Any code matching the encoded layout of the redemption is accepted.
        let codes = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(admin_path("price_rules/1/discount_codes.json"))
                    .matches(|req| {
                        let body: serde_json::Value =
                            serde_json::from_slice(req.body.as_deref().unwrap_or_default())
                                .unwrap_or_default();
                        let Some(code) = body["discount_code"]["code"].as_str() else {
                            return false;
                        };
                        code::decode(code).is_ok_and(|fields| {
                            fields.customer_id == "6730418250000"
                                && fields.batch_number == "10493"
                                && fields.amount == "12.5"
                                && fields.transaction_id == "88"
                                && fields.card_number == "7001234567890123"
                                && fields.approval_code == "123456"
                        })
                    });
                then.status(201).json_body(json!({
                    "discount_code": { "id": 2, "price_rule_id": 1, "code": "X", "usage_count": 0 }
                }));
            })
            .await;

        let response = gateway(&server).process(request(json!(12.5))).await.unwrap();
        codes.assert_async().await;
        assert!(response.unwrap().success);
    }

    #[tokio::test]
    async fn test_missing_or_zero_amount_is_a_no_op() {
        let server = MockServer::start_async().await;
        let any = server
            .mock_async(|when, then| {
                when.any_request();
                then.status(500);
            })
            .await;
        let gateway = gateway(&server);

        assert_eq!(gateway.process(request(json!(0))).await.unwrap(), None);
        assert_eq!(gateway.process(request(json!(null))).await.unwrap(), None);
        assert_eq!(
            gateway.process(CreateCodeRequest::default()).await.unwrap(),
            None
        );
        any.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_rejected_price_rule_is_fatal() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(admin_path("price_rules.json"));
                then.status(422).json_body(json!({ "errors": { "value": ["invalid"] } }));
            })
            .await;
        let codes = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path_contains("discount_codes.json");
                then.status(201);
            })
            .await;

        let err = gateway(&server).process(request(json!(10))).await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP error! status: 422");
        codes.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_missing_card_fails_before_any_call() {
        let server = MockServer::start_async().await;
        let any = server
            .mock_async(|when, then| {
                when.any_request();
                then.status(201);
            })
            .await;
        let mut request = request(json!(10));
        request.redeem_data.as_mut().unwrap().cards = Some(vec![]);

        let err = gateway(&server).process(request).await.unwrap_err();
        assert!(matches!(err, GatewayError::MissingParameters));
        any.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_answer_without_code_is_echoed() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(admin_path("price_rules.json"));
                then.status(201).json_body(json!({ "price_rule": { "id": 9 } }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(admin_path("price_rules/9/discount_codes.json"));
                then.status(200).json_body(json!({ "warnings": ["odd"] }));
            })
            .await;

        let response = gateway(&server)
            .process(request(json!(10)))
            .await
            .unwrap()
            .unwrap();
        assert!(!response.success);
        assert_eq!(
            response.discount_codes_result,
            Some(json!({ "warnings": ["odd"] }))
        );
    }
}
