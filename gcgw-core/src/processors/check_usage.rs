use gcgw_sdk::objects::{CheckUsageRequest, UsageResponse};
use kanau::processor::Processor;
use tracing::warn;

use super::{Gateway, GatewayError};
use crate::entities::discount_code::GetDiscountCode;

impl Processor<CheckUsageRequest> for Gateway {
    type Output = Option<UsageResponse>;
    type Error = GatewayError;

    /// `CHECKUSAGE`: `Some` only when the code reports 0 or 1 uses.
    ///
    /// Lookup failures are logged and yield `None`.
    async fn process(
        &self,
        request: CheckUsageRequest,
    ) -> Result<Option<UsageResponse>, GatewayError> {
        let (Some(price_rule_id), Some(discount_code_id)) =
            (request.price_rule_id, request.discount_code_id)
        else {
            warn!("CHECKUSAGE without price rule or discount code id");
            return Ok(None);
        };

        let usage = match self
            .admin
            .process(GetDiscountCode {
                price_rule_id,
                discount_code_id,
            })
            .await
        {
            Ok(code) => code.and_then(|c| c.usage_count),
            Err(e) => {
                warn!(error = %e, "Error fetching discount code");
                return Ok(None);
            }
        };

        Ok(match usage {
            Some(0) => Some(UsageResponse {
                success: true,
                usage: 0,
            }),
            Some(1) => Some(UsageResponse {
                success: false,
                usage: 1,
            }),
            _ => None,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::processors::test_support::{admin_path, gateway};
    use httpmock::prelude::*;
    use serde_json::json;

    fn request(code_id: u64) -> CheckUsageRequest {
        CheckUsageRequest {
            price_rule_id: Some(10u64.into()),
            discount_code_id: Some(code_id.into()),
        }
    }

    async fn usage_server(code_id: u64, usage: serde_json::Value) -> MockServer {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(admin_path(&format!("price_rules/10/discount_codes/{code_id}.json")));
                then.status(200).json_body(json!({
                    "discount_code": {
                        "id": code_id, "price_rule_id": 10, "code": "A1", "usage_count": usage
                    }
                }));
            })
            .await;
        server
    }

    #[tokio::test]
    async fn test_unused_code_succeeds() {
        let server = usage_server(1, json!(0)).await;
        let result = gateway(&server).process(request(1)).await.unwrap();
        assert_eq!(
            result,
            Some(UsageResponse {
                success: true,
                usage: 0
            })
        );
    }

    #[tokio::test]
    async fn test_used_code_fails() {
        let server = usage_server(2, json!(1)).await;
        let result = gateway(&server).process(request(2)).await.unwrap();
        assert_eq!(
            result,
            Some(UsageResponse {
                success: false,
                usage: 1
            })
        );
    }

    #[tokio::test]
    async fn test_other_usage_is_none() {
        let server = usage_server(3, json!(4)).await;
        assert_eq!(gateway(&server).process(request(3)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_remote_failure_is_swallowed() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(404).json_body(json!({ "errors": "Not Found" }));
            })
            .await;
        assert_eq!(gateway(&server).process(request(4)).await.unwrap(), None);
    }
}
