//! Action processors.
//!
//! One processor per gateway action, all implemented on [`Gateway`]:
//!
//! - `CREATE`       → [`CreateCodeRequest`](gcgw_sdk::objects::CreateCodeRequest)
//! - `CHECKUSAGE`   → [`CheckUsageRequest`](gcgw_sdk::objects::CheckUsageRequest)
//! - `DELETECODE`   → [`DeleteCodeRequest`](gcgw_sdk::objects::DeleteCodeRequest)
//! - `GETALLCODE`   → [`GetAllCodesRequest`](gcgw_sdk::objects::GetAllCodesRequest)
//! - `CANCELREDEEM` → [`CancelRedeemRequest`](gcgw_sdk::objects::CancelRedeemRequest)
//!
//! The actions do not fail the same way. `CHECKUSAGE` and `DELETECODE`
//! never return `Err`: their failures are part of the result. `GETALLCODE`
//! reports remote failures as [`CodeListing::NoPriceRules`]. `CREATE` and
//! `CANCELREDEEM` propagate remote failures as [`GatewayError`].

mod cancel_redeem;
mod check_usage;
mod create_code;
mod delete_code;
mod get_all_codes;

pub use create_code::CODE_VALIDITY;
pub use get_all_codes::CodeListing;

use crate::config::GatewayConfig;
use crate::error::RemoteError;
use crate::framework::{AdminApiProcessor, GiftCardProcessor, build_http_client};
use gcgw_sdk::code::CodeError;
use reqwest::StatusCode;
use thiserror::Error;

/// Errors that abort an action.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The platform refused to create the price rule.
    #[error("HTTP error! status: {}", .0.as_u16())]
    PriceRuleRejected(StatusCode),

    /// A parameter the caller must supply is missing.
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// The redemption lacks a field needed to issue or cancel a code.
    #[error("Missing required parameters")]
    MissingParameters,

    /// `CANCELREDEEM` input is neither a code nor a redemption object.
    #[error("Invalid input type")]
    InvalidInputType,

    /// `CANCELREDEEM` input is a string that is not a gateway code.
    #[error("invalid discount code: {0}")]
    InvalidCode(#[from] CodeError),

    /// Any other remote failure.
    #[error("{context}: {source}")]
    Remote {
        context: &'static str,
        #[source]
        source: RemoteError,
    },
}

impl GatewayError {
    pub(crate) fn remote(context: &'static str) -> impl FnOnce(RemoteError) -> Self {
        move |source| GatewayError::Remote { context, source }
    }

    /// HTTP status the gateway answers with for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// The redemption gateway: both remote API handles plus fan-out settings.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Debug, Clone)]
pub struct Gateway {
    pub admin: AdminApiProcessor,
    pub gift_card: GiftCardProcessor,
    pub max_concurrent_requests: usize,
}

impl Gateway {
    /// Build a gateway from validated configuration.
    pub fn new(config: GatewayConfig) -> Self {
        let http = build_http_client(config.request_timeout);
        Self {
            admin: AdminApiProcessor {
                http: http.clone(),
                config: config.platform,
            },
            gift_card: GiftCardProcessor {
                http,
                config: config.gift_card,
            },
            max_concurrent_requests: config.max_concurrent_requests.max(1),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    #![allow(clippy::unwrap_used)]

    use super::Gateway;
    use crate::config::{GatewayConfig, GiftCardConfig, PlatformConfig};
    use httpmock::MockServer;

    pub const API_VERSION: &str = "2024-10";
    pub const ACCESS_TOKEN: &str = "shpat_test";

    /// A gateway whose both remote APIs are served by `server`.
    pub fn gateway(server: &MockServer) -> Gateway {
        let platform =
            PlatformConfig::new(Some(&server.base_url()), Some(ACCESS_TOKEN), Some(API_VERSION))
                .unwrap();
        let mut config = GatewayConfig::new(platform);
        config.gift_card =
            GiftCardConfig::new(url::Url::parse(&server.url("/gc/transactions/cancel")).unwrap());
        Gateway::new(config)
    }

    /// Path of an admin API resource on the mock server.
    pub fn admin_path(resource: &str) -> String {
        format!("/admin/api/{API_VERSION}/{resource}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_and_statuses() {
        let rejected = GatewayError::PriceRuleRejected(StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(rejected.to_string(), "HTTP error! status: 422");
        assert_eq!(rejected.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let missing = GatewayError::MissingParameter("customerId");
        assert_eq!(missing.to_string(), "Missing required parameter: customerId");
        assert_eq!(missing.status_code(), StatusCode::BAD_REQUEST);

        assert_eq!(GatewayError::InvalidInputType.to_string(), "Invalid input type");
        assert_eq!(
            GatewayError::MissingParameters.to_string(),
            "Missing required parameters"
        );
    }
}
