//! Voice Pay Server
//!
//! Turns a spoken payment amount into a provider checkout order and
//! verifies the checkout result.

mod api;
mod config;
mod server;
mod shutdown;
mod state;

use clap::Parser;
use config::ConfigLoader;
use server::{build_router, run_server};
use state::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use vpay_core::gateway::{RazorpayGateway, WhisperHttpTranscriber};
use vpay_core::intent::IntentTracker;
use vpay_core::processors::IntentReaper;

/// Voice Pay - speak an amount, pay it through the provider checkout
#[derive(Parser, Debug)]
#[command(name = "vpay-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, env = "VPAY_CONFIG", default_value = "./vpay-config.toml")]
    config: PathBuf,

    /// Override the listen address (e.g., 0.0.0.0:5000)
    #[arg(short, long, env = "VPAY_LISTEN")]
    listen: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let args = Args::parse();

    tracing::info!("Starting vpay-server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_loader = ConfigLoader::new(&args.config, args.listen);
    let loaded_config = config_loader.load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;
    tracing::info!("Configuration loaded from {:?}", args.config);

    if !loaded_config.provider.is_configured() {
        tracing::warn!("Payment provider credentials are not configured");
    }

    // Gateways are created once and shared by every request
    let provider = Arc::new(RazorpayGateway::new(loaded_config.provider.clone()));
    let transcriber = Arc::new(WhisperHttpTranscriber::new(
        loaded_config.transcription.clone(),
    ));
    tracing::info!(
        model = %loaded_config.transcription.model,
        endpoint = %loaded_config.transcription.endpoint,
        "Transcription gateway ready"
    );

    let tracker = Arc::new(IntentTracker::new());

    // Spawn the intent reaper
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let reaper = IntentReaper::new(tracker.clone(), loaded_config.intents, shutdown_rx);
    let reaper_handle = tokio::spawn(reaper.run());

    // Create application state
    let state = AppState::new(
        provider,
        transcriber,
        tracker,
        loaded_config.checkout,
        loaded_config.transcription.language,
        loaded_config.server.request_timeout,
    );

    // Build the router
    let router = build_router(state, &loaded_config.server.allowed_origins);

    // Run the server
    let listen_addr = loaded_config.server.listen;
    tracing::info!("Starting HTTP server on {}", listen_addr);
    let result = run_server(router, listen_addr).await;

    // Stop background processors
    let _ = shutdown_tx.send(true);
    if let Err(e) = reaper_handle.await {
        tracing::error!("Intent reaper task failed: {}", e);
    }
    tracing::info!("Server shutdown complete");

    result.map_err(Into::into)
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
