//! Gift-card redemption gateway server.
//!
//! Brokers storefront requests between the e-commerce platform admin API
//! and the gift-card API.

mod api;
mod config;
mod server;
mod shutdown;
mod state;

use clap::Parser;
use config::{ConfigLoader, Overrides};
use server::{build_router, run_server};
use shutdown::spawn_config_reload_handler;
use state::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Gift-card redemption gateway
#[derive(Parser, Debug)]
#[command(name = "gcgw-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "./gcgw-config.toml")]
    config: PathBuf,

    /// Override the listen address (e.g., 0.0.0.0:3000)
    #[arg(short, long)]
    listen: Option<SocketAddr>,

    /// Platform shop base URL
    #[arg(long, env = "SHOPIFY_APP_URL", hide_env_values = true)]
    base_url: Option<String>,

    /// Platform admin API access token
    #[arg(long, env = "SHOPIFY_API_SECRET", hide_env_values = true)]
    access_token: Option<String>,

    /// Platform admin API version
    #[arg(long, env = "SHOPIFY_API_VERSION")]
    api_version: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let args = Args::parse();

    tracing::info!("Starting gcgw-server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_loader = Arc::new(ConfigLoader::new(
        &args.config,
        Overrides {
            listen: args.listen,
            base_url: args.base_url,
            access_token: args.access_token,
            api_version: args.api_version,
        },
    ));
    let loaded_config = config_loader.load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;

    let listen_addr = loaded_config.listen;
    if loaded_config.gateway.is_some() {
        tracing::info!("Configuration loaded from {:?}", args.config);
    }

    // Create application state
    let state = AppState::new(loaded_config.gateway);

    // Spawn config reload handler (listens for SIGHUP)
    let shutdown_notify = spawn_config_reload_handler(state.clone(), config_loader);

    // Build the router
    let router = build_router(state);

    // Run the server
    tracing::info!("Starting HTTP server on {}", listen_addr);
    let result = run_server(router, listen_addr).await;

    // Signal the config reload handler to stop
    shutdown_notify.notify_one();
    tracing::info!("Server shutdown complete");

    result.map_err(Into::into)
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,gcgw_core=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
