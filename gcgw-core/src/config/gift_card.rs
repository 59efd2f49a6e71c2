//! Gift-card API configuration.

use url::Url;

/// Cancellation endpoint used when none is configured.
pub const DEFAULT_CANCEL_URL: &str = "https://ajf2m0r1na8eau2bn0brcou5h2i0-custuatdev.qwikcilver.com/QwikCilver/XnP/api/v3/gc/transactions/cancel";

/// Gift-card API settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftCardConfig {
    /// Absolute URL of the redemption cancellation endpoint.
    pub cancel_url: Url,
}

impl GiftCardConfig {
    pub fn new(cancel_url: Url) -> Self {
        Self { cancel_url }
    }
}

impl Default for GiftCardConfig {
    fn default() -> Self {
        #[allow(clippy::expect_used)]
        let cancel_url = Url::parse(DEFAULT_CANCEL_URL).expect("valid default cancel URL");
        Self { cancel_url }
    }
}
