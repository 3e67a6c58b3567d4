//! apidir-gateway - user accounts and a public-API directory proxy
//!
//! This is the main entry point for the apidir-gateway application.

use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing::info;

use apidir_gateway::auth::TokenIssuer;
use apidir_gateway::config::Config;
use apidir_gateway::database::SqliteDatabase;
use apidir_gateway::directory::DirectoryService;
use apidir_gateway::logging::init_tracing;
use apidir_gateway::server::{AppState, Server};

/// apidir-gateway - user accounts and a public-API directory proxy
#[derive(Parser, Debug)]
#[command(name = "apidir-gateway")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, env = "APIDIR_CONFIG")]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let config = load_config(&args)?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    // Initialize tracing/logging
    init_tracing(&config.logging)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting apidir-gateway"
    );

    // Initialize database
    let database = Arc::new(SqliteDatabase::new(&config.database.path).await?);
    info!(path = %config.database.path, "Database initialized");

    // Token issuer shared by the auth service and the auth guard
    let tokens = Arc::new(TokenIssuer::new(config.auth.jwt_secret.as_bytes())?);

    // Upstream directory
    let directory = DirectoryService::new(&config.upstream.url, config.upstream.timeout())?;
    info!(
        upstream = %config.upstream.url,
        timeout_secs = config.upstream.timeout_secs,
        "Directory proxy initialized"
    );

    // Create application state
    let state = AppState::new(database, tokens, directory);

    // Create and start the HTTP server
    let server = Server::new(config.server.clone(), state);

    info!(
        host = %config.server.host,
        port = %config.server.port,
        "Starting HTTP server"
    );

    server.run(shutdown_signal()).await?;

    info!("apidir-gateway shutdown complete");
    Ok(())
}

/// Load configuration from file or environment
fn load_config(args: &Args) -> anyhow::Result<Config> {
    match &args.config {
        Some(path) => {
            // Use eprintln! since tracing is not yet initialized
            eprintln!("Loading configuration from file: {}", path);
            Config::from_file(path).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
        }
        None => {
            eprintln!("Loading configuration from environment variables");
            Config::from_env().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
        }
    }
}

/// Create a future that resolves when a shutdown signal is received
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
