//! Configuration module for gcgw-server.
//!
//! Handles loading configuration from the TOML file, CLI arguments and
//! environment variables.

pub mod file;

use crate::config::file::FileConfig;
use gcgw_core::config::{GatewayConfig, GiftCardConfig, PlatformConfig, PlatformConfigError};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Values given on the command line or in the environment. They take
/// precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub listen: Option<SocketAddr>,
    pub base_url: Option<String>,
    pub access_token: Option<String>,
    pub api_version: Option<String>,
}

/// Loaded configuration.
#[derive(Debug)]
pub struct LoadedConfig {
    pub listen: SocketAddr,
    /// `None` while any platform setting is missing.
    pub gateway: Option<GatewayConfig>,
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: PathBuf,
    overrides: Overrides,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(config_path: impl AsRef<Path>, overrides: Overrides) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            overrides,
        }
    }

    /// Load and process the configuration.
    ///
    /// A missing file is not an error. Missing platform settings are not
    /// an error either; they leave [`LoadedConfig::gateway`] empty.
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let file_config = match std::fs::read_to_string(&self.config_path) {
            Ok(content) => toml::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(
                    "No config file at {:?}, using defaults and environment",
                    self.config_path
                );
                FileConfig::default()
            }
            Err(e) => return Err(e.into()),
        };

        self.build(file_config)
    }

    /// Reload the configuration (used during SIGHUP).
    pub fn reload(&self) -> Result<LoadedConfig, ConfigError> {
        self.load()
    }

    fn build(&self, mut file_config: FileConfig) -> Result<LoadedConfig, ConfigError> {
        let overrides = &self.overrides;
        if let Some(listen) = overrides.listen {
            file_config.server.listen = listen;
        }
        let platform = &mut file_config.platform;
        for (value, from_env) in [
            (&mut platform.base_url, &overrides.base_url),
            (&mut platform.access_token, &overrides.access_token),
            (&mut platform.api_version, &overrides.api_version),
        ] {
            if from_env.is_some() {
                value.clone_from(from_env);
            }
        }

        self.validate(&file_config)?;

        let platform = match PlatformConfig::new(
            file_config.platform.base_url.as_deref(),
            file_config.platform.access_token.as_deref(),
            file_config.platform.api_version.as_deref(),
        ) {
            Ok(platform) => Some(platform),
            Err(PlatformConfigError::Missing(missing)) => {
                tracing::warn!(
                    ?missing,
                    "Platform settings incomplete, every action will be refused"
                );
                None
            }
            Err(e) => return Err(ConfigError::ValidationError(e.to_string())),
        };

        let gateway = platform.map(|platform| GatewayConfig {
            platform,
            gift_card: file_config
                .gift_card
                .cancel_url
                .map(GiftCardConfig::new)
                .unwrap_or_default(),
            request_timeout: Duration::from_secs(file_config.http.timeout_secs),
            max_concurrent_requests: file_config.fan_out.max_concurrent_requests,
        });

        Ok(LoadedConfig {
            listen: file_config.server.listen,
            gateway,
        })
    }

    fn validate(&self, config: &FileConfig) -> Result<(), ConfigError> {
        if config.http.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "http.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if config.fan_out.max_concurrent_requests == 0 {
            return Err(ConfigError::ValidationError(
                "fan_out.max_concurrent_requests must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
