//! Platform admin API configuration.

use std::fmt;
use thiserror::Error;
use url::Url;

/// Header carrying the admin API access token.
pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Errors raised while validating the platform settings.
#[derive(Debug, Error)]
pub enum PlatformConfigError {
    #[error("missing platform settings: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("invalid platform base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}

/// Validated connection settings for the platform admin API.
///
/// All three settings are mandatory; without them the gateway refuses every
/// action.
#[derive(Clone)]
pub struct PlatformConfig {
    base_url: Url,
    access_token: String,
    api_version: String,
}

impl PlatformConfig {
    /// Validate the three platform settings.
    ///
    /// Blank values count as missing. Every missing setting is reported at
    /// once.
    pub fn new(
        base_url: Option<&str>,
        access_token: Option<&str>,
        api_version: Option<&str>,
    ) -> Result<Self, PlatformConfigError> {
        fn present(value: Option<&str>) -> Option<&str> {
            value.map(str::trim).filter(|v| !v.is_empty())
        }

        let base_url = present(base_url);
        let access_token = present(access_token);
        let api_version = present(api_version);

        let (Some(base_url), Some(access_token), Some(api_version)) =
            (base_url, access_token, api_version)
        else {
            let missing = [
                ("base_url", base_url.is_none()),
                ("access_token", access_token.is_none()),
                ("api_version", api_version.is_none()),
            ]
            .into_iter()
            .filter_map(|(name, is_missing)| is_missing.then_some(name))
            .collect();
            return Err(PlatformConfigError::Missing(missing));
        };

        Ok(Self {
            base_url: Url::parse(base_url)?,
            access_token: access_token.to_owned(),
            api_version: api_version.to_owned(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Absolute URL of an admin API resource,
    /// e.g. `endpoint("price_rules.json")`.
    pub fn endpoint(&self, resource: &str) -> String {
        format!(
            "{}/admin/api/{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            self.api_version,
            resource.trim_start_matches('/'),
        )
    }
}

impl fmt::Debug for PlatformConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformConfig")
            .field("base_url", &self.base_url.as_str())
            .field("access_token", &"<redacted>")
            .field("api_version", &self.api_version)
            .finish()
    }
}
