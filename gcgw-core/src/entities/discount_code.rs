use crate::error::RemoteError;
use crate::framework::{AdminApiProcessor, parse_response, segment};
use gcgw_sdk::objects::Identifier;
use kanau::processor::Processor;
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// A discount code as returned by the admin API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlatformDiscountCode {
    pub id: u64,
    pub code: String,
    pub price_rule_id: u64,
    #[serde(default)]
    pub usage_count: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl PlatformDiscountCode {
    /// `true` unless the platform reports exactly zero uses.
    pub fn is_used(&self) -> bool {
        self.usage_count != Some(0)
    }
}

#[derive(Debug, Deserialize)]
struct DiscountCodeBody {
    #[serde(default)]
    discount_code: Option<PlatformDiscountCode>,
}

#[derive(Debug, Deserialize)]
struct DiscountCodeListBody {
    #[serde(default)]
    discount_codes: Option<Vec<PlatformDiscountCode>>,
}

#[derive(Debug, Serialize)]
struct NewDiscountCode<'a> {
    code: &'a str,
}

#[derive(Debug, Serialize)]
struct NewDiscountCodeBody<'a> {
    discount_code: NewDiscountCode<'a>,
}

/// Register `code` under an existing price rule.
#[derive(Debug, Clone)]
pub struct CreateDiscountCode {
    pub price_rule_id: u64,
    pub code: String,
}

/// Outcome of [`CreateDiscountCode`].
#[derive(Debug, Clone, PartialEq)]
pub enum DiscountCodeCreation {
    Created(PlatformDiscountCode),
    /// A 2xx answer without a discount code; the raw body is kept.
    Unexpected(serde_json::Value),
}

impl Processor<CreateDiscountCode> for AdminApiProcessor {
    type Output = DiscountCodeCreation;
    type Error = RemoteError;
    #[tracing::instrument(skip_all, err, name = "API:CreateDiscountCode")]
    async fn process(&self, input: CreateDiscountCode) -> Result<DiscountCodeCreation, RemoteError> {
        let resource = format!("price_rules/{}/discount_codes.json", input.price_rule_id);
        let resp = self
            .request(Method::POST, &resource)
            .json(&NewDiscountCodeBody {
                discount_code: NewDiscountCode { code: &input.code },
            })
            .send()
            .await?;

        let raw: serde_json::Value = parse_response(resp).await?;
        match serde_json::from_value::<DiscountCodeBody>(raw.clone()) {
            Ok(DiscountCodeBody {
                discount_code: Some(code),
            }) => Ok(DiscountCodeCreation::Created(code)),
            _ => Ok(DiscountCodeCreation::Unexpected(raw)),
        }
    }
}

/// Fetch one discount code of a price rule.
#[derive(Debug, Clone)]
pub struct GetDiscountCode {
    pub price_rule_id: Identifier,
    pub discount_code_id: Identifier,
}

impl Processor<GetDiscountCode> for AdminApiProcessor {
    type Output = Option<PlatformDiscountCode>;
    type Error = RemoteError;
    #[tracing::instrument(skip_all, err, name = "API:GetDiscountCode")]
    async fn process(
        &self,
        input: GetDiscountCode,
    ) -> Result<Option<PlatformDiscountCode>, RemoteError> {
        let resource = format!(
            "price_rules/{}/discount_codes/{}.json",
            segment(&input.price_rule_id),
            segment(&input.discount_code_id),
        );
        let resp = self.request(Method::GET, &resource).send().await?;
        let body: DiscountCodeBody = parse_response(resp).await?;
        Ok(body.discount_code)
    }
}

/// List the discount codes of one price rule.
#[derive(Debug, Clone, Copy)]
pub struct ListDiscountCodes {
    pub price_rule_id: u64,
}

impl Processor<ListDiscountCodes> for AdminApiProcessor {
    type Output = Vec<PlatformDiscountCode>;
    type Error = RemoteError;
    #[tracing::instrument(skip_all, err, name = "API:ListDiscountCodes", fields(price_rule_id = input.price_rule_id))]
    async fn process(
        &self,
        input: ListDiscountCodes,
    ) -> Result<Vec<PlatformDiscountCode>, RemoteError> {
        let resource = format!("price_rules/{}/discount_codes.json", input.price_rule_id);
        let resp = self.request(Method::GET, &resource).send().await?;
        let body: DiscountCodeListBody = parse_response(resp).await?;
        Ok(body.discount_codes.unwrap_or_default())
    }
}
