use futures_util::{StreamExt, stream};
use gcgw_sdk::objects::{
    AllCodesResponse, DiscountCodeEnvelope, DiscountCodeSummary, GetAllCodesRequest, Identifier,
};
use kanau::processor::Processor;
use tracing::{debug, warn};

use super::{Gateway, GatewayError};
use crate::entities::discount_code::{ListDiscountCodes, PlatformDiscountCode};
use crate::entities::price_rule::ListPriceRules;

/// Outcome of `GETALLCODE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeListing {
    /// Price rules could not be listed, or there are none. Rendered as `[]`.
    NoPriceRules,
    /// The customer's unused codes, in price-rule order.
    Found(Vec<DiscountCodeEnvelope>),
}

impl CodeListing {
    /// The response body for a non-empty price-rule listing.
    pub fn into_body(self) -> Option<AllCodesResponse> {
        match self {
            CodeListing::NoPriceRules => None,
            CodeListing::Found(all_discount_code) => Some(AllCodesResponse {
                success: true,
                all_discount_code,
            }),
        }
    }
}

impl Processor<GetAllCodesRequest> for Gateway {
    type Output = CodeListing;
    type Error = GatewayError;

    /// `GETALLCODE`: every unused discount code whose text contains the
    /// customer id, across all price rules of the shop.
    async fn process(&self, request: GetAllCodesRequest) -> Result<CodeListing, GatewayError> {
        let customer_id = Identifier::present(request.customer_id.as_ref())
            .ok_or(GatewayError::MissingParameter("customerId"))?
            .to_string();

        let rules = match self.admin.process(ListPriceRules).await {
            Ok(rules) if rules.is_empty() => {
                debug!("No price rules found");
                return Ok(CodeListing::NoPriceRules);
            }
            Ok(rules) => rules,
            Err(e) => {
                warn!(status = ?e.status(), error = %e, "Error listing price rules");
                return Ok(CodeListing::NoPriceRules);
            }
        };

        let per_rule: Vec<Vec<PlatformDiscountCode>> = stream::iter(rules)
            .map(|rule| async move {
                self.admin
                    .process(ListDiscountCodes {
                        price_rule_id: rule.id,
                    })
                    .await
                    .unwrap_or_else(|e| {
                        warn!(price_rule_id = rule.id, error = %e, "Error listing discount codes");
                        Vec::new()
                    })
            })
            .buffered(self.max_concurrent_requests)
            .collect()
            .await;

        let codes = per_rule
            .into_iter()
            .flatten()
            .filter(|code| code.code.contains(customer_id.as_str()) && !code.is_used())
            .map(|code| DiscountCodeEnvelope {
                success: true,
                discount_code: DiscountCodeSummary {
                    coupon_code_id: code.id,
                    code: code.code,
                    price_rules_id: code.price_rule_id,
                    created_at: code.created_at,
                    usage_count: false,
                },
            })
            .collect();

        Ok(CodeListing::Found(codes))
    }
}
