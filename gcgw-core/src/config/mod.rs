//! Configuration types for the redemption gateway.
//!
//! These types represent the validated runtime configuration handed to the
//! processors. The actual config loading/parsing is handled by the server
//! crate.

mod gift_card;
mod platform;

pub use gift_card::{DEFAULT_CANCEL_URL, GiftCardConfig};
pub use platform::{ACCESS_TOKEN_HEADER, PlatformConfig, PlatformConfigError};

use std::time::Duration;

/// Default timeout applied to every outbound request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default bound on concurrent per-rule fetches while listing codes.
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 16;

/// Everything a [`Gateway`](crate::processors::Gateway) needs to talk to
/// both remote APIs.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// E-commerce platform admin API.
    pub platform: PlatformConfig,
    /// Gift-card API.
    pub gift_card: GiftCardConfig,
    /// Timeout for each outbound request.
    pub request_timeout: Duration,
    /// Upper bound on concurrent discount-code listings (at least 1).
    pub max_concurrent_requests: usize,
}

impl GatewayConfig {
    /// A configuration with default gift-card endpoint and limits.
    pub fn new(platform: PlatformConfig) -> Self {
        Self {
            platform,
            gift_card: GiftCardConfig::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
        }
    }
}
