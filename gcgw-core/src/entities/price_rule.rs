use crate::error::RemoteError;
use crate::framework::{AdminApiProcessor, parse_response, segment};
use gcgw_sdk::objects::Identifier;
use kanau::processor::Processor;
use reqwest::Method;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Title given to every price rule created for a gift-card redemption.
pub const PRICE_RULE_TITLE: &str = "Qwikcilver Gift Card Coupon";

/// A price rule as returned by the admin API. Only the id is relied upon.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PriceRule {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PriceRuleBody {
    price_rule: PriceRule,
}

#[derive(Debug, Deserialize)]
struct PriceRuleListBody {
    #[serde(default)]
    price_rules: Option<Vec<PriceRule>>,
}

/// Wire shape of a new price rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
struct NewPriceRule {
    title: &'static str,
    value_type: &'static str,
    value: Decimal,
    customer_selection: &'static str,
    target_type: &'static str,
    target_selection: &'static str,
    once_per_customer: bool,
    allocation_method: &'static str,
    #[serde(with = "time::serde::rfc3339")]
    starts_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    ends_at: OffsetDateTime,
    usage_limit: u32,
}

#[derive(Debug, Serialize)]
struct NewPriceRuleBody {
    price_rule: NewPriceRule,
}

/// Create a single-use, fixed-amount price rule worth `amount` off all
/// line items, valid from `starts_at` to `ends_at`.
#[derive(Debug, Clone)]
pub struct CreatePriceRule {
    pub amount: Decimal,
    pub starts_at: OffsetDateTime,
    pub ends_at: OffsetDateTime,
}

impl CreatePriceRule {
    fn body(&self) -> NewPriceRuleBody {
        NewPriceRuleBody {
            price_rule: NewPriceRule {
                title: PRICE_RULE_TITLE,
                value_type: "fixed_amount",
                value: -self.amount,
                customer_selection: "all",
                target_type: "line_item",
                target_selection: "all",
                once_per_customer: true,
                allocation_method: "across",
                starts_at: self.starts_at,
                ends_at: self.ends_at,
                usage_limit: 1,
            },
        }
    }
}

impl Processor<CreatePriceRule> for AdminApiProcessor {
    type Output = PriceRule;
    type Error = RemoteError;
    #[tracing::instrument(skip_all, err, name = "API:CreatePriceRule")]
    async fn process(&self, input: CreatePriceRule) -> Result<PriceRule, RemoteError> {
        let resp = self
            .request(Method::POST, "price_rules.json")
            .json(&input.body())
            .send()
            .await?;
        let body: PriceRuleBody = parse_response(resp).await?;
        Ok(body.price_rule)
    }
}

/// List every price rule of the shop.
#[derive(Debug, Clone, Copy)]
pub struct ListPriceRules;

impl Processor<ListPriceRules> for AdminApiProcessor {
    type Output = Vec<PriceRule>;
    type Error = RemoteError;
    #[tracing::instrument(skip_all, err, name = "API:ListPriceRules")]
    async fn process(&self, _: ListPriceRules) -> Result<Vec<PriceRule>, RemoteError> {
        let resp = self
            .request(Method::GET, "price_rules.json")
            .send()
            .await?;
        let body: PriceRuleListBody = parse_response(resp).await?;
        Ok(body.price_rules.unwrap_or_default())
    }
}

/// Delete a price rule together with its discount codes.
#[derive(Debug, Clone)]
pub struct DeletePriceRule {
    pub price_rule_id: Identifier,
}

impl Processor<DeletePriceRule> for AdminApiProcessor {
    type Output = ();
    type Error = RemoteError;
    #[tracing::instrument(skip_all, err, name = "API:DeletePriceRule")]
    async fn process(&self, input: DeletePriceRule) -> Result<(), RemoteError> {
        let resource = format!("price_rules/{}.json", segment(&input.price_rule_id));
        let resp = self.request(Method::DELETE, &resource).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RemoteError::Api { status, body });
        }
        Ok(())
    }
}
