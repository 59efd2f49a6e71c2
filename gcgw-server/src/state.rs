//! Application state shared across all request handlers.

use gcgw_core::config::GatewayConfig;
use gcgw_core::processors::Gateway;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Application state that is shared across all request handlers.
///
/// This is cloneable and cheap to pass around (everything is behind Arc).
#[derive(Clone, Default)]
pub struct AppState {
    /// The gateway, or `None` while the platform is not configured.
    /// Replaced wholesale on SIGHUP.
    pub gateway: Arc<RwLock<Option<Gateway>>>,
}

impl AppState {
    /// Create a new AppState from the loaded gateway configuration.
    pub fn new(config: Option<GatewayConfig>) -> Self {
        Self {
            gateway: Arc::new(RwLock::new(config.map(Gateway::new))),
        }
    }

    /// A handle to the current gateway, if configured.
    pub async fn gateway(&self) -> Option<Gateway> {
        self.gateway.read().await.clone()
    }

    /// Swap in a new configuration (used during SIGHUP reload).
    pub async fn update_gateway(&self, config: Option<GatewayConfig>) {
        let mut gateway = self.gateway.write().await;
        *gateway = config.map(Gateway::new);
    }
}
