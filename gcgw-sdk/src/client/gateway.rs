//! Gateway client (storefront backend → gateway endpoint).
//!
//! Every call is a `POST` of `{"action": ..., "data": ...}` to the single
//! gateway endpoint.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::ClientError;
use crate::objects::{
    ActionKind, ActionRequest, AllCodesResponse, CancelRedeemRequest, CancelRedeemResponse,
    CheckUsageRequest, CreateCodeRequest, CreateCodeResponse, DeleteCodeRequest,
    DeleteCodeResponse, DiscountCodeEnvelope, GetAllCodesRequest, UsageResponse,
};

/// Typed HTTP client for the gateway endpoint.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: Client,
    endpoint: Url,
}

impl GatewayClient {
    /// Create a new `GatewayClient`.
    ///
    /// * `endpoint` – full URL of the gateway route
    ///   (e.g. `https://shop.example.com/app/proxy`).
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: Client::new(),
            endpoint,
        }
    }

    /// Replace the default `reqwest::Client` with a custom one.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `CREATE` – `None` when the redemption carried no positive amount.
    pub async fn create_code(
        &self,
        request: &CreateCodeRequest,
    ) -> Result<Option<CreateCodeResponse>, ClientError> {
        let resp = self.send(ActionKind::Create, request).await?;
        parse_response(resp).await
    }

    /// `CHECKUSAGE` – `None` when the usage could not be determined.
    pub async fn check_usage(
        &self,
        request: &CheckUsageRequest,
    ) -> Result<Option<UsageResponse>, ClientError> {
        let resp = self.send(ActionKind::CheckUsage, request).await?;
        parse_response(resp).await
    }

    /// `DELETECODE` – a failed deletion is reported in the body (with a 500
    /// status), so it is returned as `Ok` with `success == false`.
    pub async fn delete_code(
        &self,
        request: &DeleteCodeRequest,
    ) -> Result<DeleteCodeResponse, ClientError> {
        let resp = self.send(ActionKind::DeleteCode, request).await?;
        let status = resp.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            let body = resp.text().await?;
            return serde_json::from_str(&body)
                .map_err(|_| ClientError::Api { status, body });
        }
        parse_response(resp).await
    }

    /// `GETALLCODE` – the customer's unused discount codes.
    pub async fn get_all_codes(
        &self,
        request: &GetAllCodesRequest,
    ) -> Result<Vec<DiscountCodeEnvelope>, ClientError> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Listing {
            Found(AllCodesResponse),
            Empty(Vec<DiscountCodeEnvelope>),
        }

        let resp = self.send(ActionKind::GetAllCode, request).await?;
        Ok(match parse_response(resp).await? {
            Listing::Found(found) => found.all_discount_code,
            Listing::Empty(entries) => entries,
        })
    }

    /// `CANCELREDEEM` – reverse a redemption.
    pub async fn cancel_redeem(
        &self,
        request: &CancelRedeemRequest,
    ) -> Result<CancelRedeemResponse, ClientError> {
        let resp = self.send(ActionKind::CancelRedeem, request).await?;
        parse_response(resp).await
    }

    async fn send<T: serde::Serialize>(
        &self,
        action: ActionKind,
        data: &T,
    ) -> Result<reqwest::Response, ClientError> {
        let body = ActionRequest {
            action,
            data: serde_json::to_value(data)?,
        };

        let resp = self
            .http
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?;
        Ok(resp)
    }
}

async fn parse_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Api { status, body });
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(ClientError::Json)
}
