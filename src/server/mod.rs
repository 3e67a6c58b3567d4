//! HTTP server components for apidir-gateway
//!
//! This module provides the HTTP server infrastructure including:
//! - Router configuration and route handlers
//! - Authentication and logging middleware
//! - Request validation and the response envelope
//! - Server lifecycle management

pub mod middleware;
pub mod response;
pub mod router;
pub mod validation;

pub use middleware::{auth_guard, logging_middleware, AuthenticatedUser, AUTH_TOKEN_HEADER};
pub use response::{ApiError, ApiResponse, FieldError};
pub use router::{build_router, AppState, HealthResponse};

use std::future::Future;
use std::net::{IpAddr, SocketAddr};

use tokio::net::{lookup_host, TcpListener};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::database::Database;

/// HTTP Server for apidir-gateway
///
/// Manages the axum server lifecycle, including:
/// - Binding to configured address
/// - Applying middleware layers
/// - Graceful shutdown handling
pub struct Server<D: Database + 'static> {
    config: ServerConfig,
    state: AppState<D>,
}

impl<D: Database + 'static> Server<D> {
    /// Create a new server instance
    pub fn new(config: ServerConfig, state: AppState<D>) -> Self {
        Self { config, state }
    }

    /// Resolve the configured host and port to a socket address
    ///
    /// Hostnames such as `localhost` go through the system resolver. A host
    /// that resolves to nothing is an error rather than a wildcard bind.
    pub async fn bind_addr(&self) -> Result<SocketAddr, ServerError> {
        let host = self.config.host.as_str();

        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(SocketAddr::new(ip, self.config.port));
        }

        lookup_host((host, self.config.port))
            .await
            .map_err(|e| ServerError::InvalidAddress(format!("{}: {}", host, e)))?
            .next()
            .ok_or_else(|| ServerError::InvalidAddress(format!("{}: no addresses", host)))
    }

    /// Run the server until shutdown signal is received
    ///
    /// # Arguments
    ///
    /// * `shutdown` - Future that resolves when the server should shut down
    ///
    /// # Returns
    ///
    /// Ok(()) if server shuts down gracefully, Err if there was an error
    pub async fn run(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), ServerError> {
        let addr = self.bind_addr().await?;
        let app = build_router(self.state);

        // Apply middleware layers
        let app = app
            .layer(axum::middleware::from_fn(logging_middleware))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive());

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Bind(e.to_string()))?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| ServerError::Serve(e.to_string()))?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The configured host could not be resolved
    #[error("Invalid listen address: {0}")]
    InvalidAddress(String),

    /// Failed to bind to address
    #[error("Failed to bind to address: {0}")]
    Bind(String),

    /// Failed to serve requests
    #[error("Server error: {0}")]
    Serve(String),
}
