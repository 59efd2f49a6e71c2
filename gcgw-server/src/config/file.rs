//! TOML file configuration structures.
//!
//! These structs directly map to the `gcgw-config.toml` file format. Every
//! section is optional; the platform settings may also come from the
//! environment.

use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};
use url::Url;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub platform: PlatformConfig,
    #[serde(default)]
    pub gift_card: GiftCardConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub fan_out: FanOutConfig,
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The address and port to listen on (e.g., "0.0.0.0:8080").
    #[serde(default = "default_listen_addr")]
    pub listen: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, 8080))
}

/// Platform admin API section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Shop base URL, e.g. `https://example.myshopify.com`.
    pub base_url: Option<String>,
    /// Admin API access token.
    pub access_token: Option<String>,
    /// Admin API version, e.g. `2024-10`.
    pub api_version: Option<String>,
}

/// Gift-card API section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GiftCardConfig {
    /// Redemption cancellation endpoint. Defaults to the UAT endpoint.
    pub cancel_url: Option<Url>,
}

/// Outbound HTTP section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    gcgw_core::config::DEFAULT_REQUEST_TIMEOUT.as_secs()
}

/// Code listing fan-out section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FanOutConfig {
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,
}

impl Default for FanOutConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: default_max_concurrent_requests(),
        }
    }
}

fn default_max_concurrent_requests() -> usize {
    gcgw_core::config::DEFAULT_MAX_CONCURRENT_REQUESTS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parsing() {
        let toml_str = r#"
[server]
listen = "127.0.0.1:3000"

[platform]
base_url = "https://example.myshopify.com"
access_token = "shpat_abc"
api_version = "2024-10"

[gift_card]
cancel_url = "https://gc.example.com/api/v3/gc/transactions/cancel"

[http]
timeout_secs = 10

[fan_out]
max_concurrent_requests = 4
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.listen.port(), 3000);
        assert_eq!(config.platform.api_version.as_deref(), Some("2024-10"));
        assert_eq!(
            config.gift_card.cancel_url.unwrap().host_str(),
            Some("gc.example.com")
        );
        assert_eq!(config.http.timeout_secs, 10);
        assert_eq!(config.fan_out.max_concurrent_requests, 4);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.listen.port(), 8080);
        assert!(config.platform.base_url.is_none());
        assert!(config.gift_card.cancel_url.is_none());
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.fan_out.max_concurrent_requests, 16);
    }

    #[test]
    fn test_partial_section_keeps_field_defaults() {
        let config: FileConfig = toml::from_str("[http]\n[fan_out]\n").unwrap();
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.fan_out.max_concurrent_requests, 16);
    }
}
