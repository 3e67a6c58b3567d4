//! Common test utilities and helpers for integration tests

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use apidir_gateway::auth::TokenIssuer;
use apidir_gateway::database::SqliteDatabase;
use apidir_gateway::directory::DirectoryService;
use apidir_gateway::server::AppState;

/// Signing secret used by every integration test
pub const TEST_SECRET: &[u8] = b"integration-test-secret";

/// Upstream address nothing listens on
pub const UNUSED_UPSTREAM: &str = "http://127.0.0.1:9/entries";

/// Create an in-memory database for testing
pub async fn create_test_database() -> Arc<SqliteDatabase> {
    Arc::new(
        SqliteDatabase::new(":memory:")
            .await
            .expect("Failed to create test database"),
    )
}

/// Create the token issuer shared by state and assertions
pub fn create_test_tokens() -> Arc<TokenIssuer> {
    Arc::new(TokenIssuer::new(TEST_SECRET).expect("Failed to create token issuer"))
}

/// Create a test application state against the given upstream
pub async fn create_test_state(upstream_url: &str) -> AppState<SqliteDatabase> {
    let database = create_test_database().await;
    let directory = DirectoryService::new(upstream_url, Duration::from_secs(5))
        .expect("Failed to create directory service");

    AppState::new(database, create_test_tokens(), directory)
}

/// Run a test server in the background and return the address
/// The server will be shut down when the returned shutdown sender is dropped or sent
pub async fn run_test_server(
    state: AppState<SqliteDatabase>,
) -> (std::net::SocketAddr, tokio::sync::oneshot::Sender<()>) {
    use tokio::net::TcpListener;

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test server");
    let addr = listener.local_addr().expect("Failed to get local address");

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let app = apidir_gateway::server::build_router(state)
        .layer(axum::middleware::from_fn(
            apidir_gateway::server::logging_middleware,
        ))
        .layer(tower_http::trace::TraceLayer::new_for_http());

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await
            .expect("Server error");
    });

    // Give the server a moment to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    (addr, shutdown_tx)
}

/// Register a user over HTTP and return the response body
pub async fn register(
    client: &reqwest::Client,
    addr: std::net::SocketAddr,
    email: &str,
    name: &str,
    password: &str,
) -> (reqwest::StatusCode, serde_json::Value) {
    let response = client
        .post(format!("http://{}/api/auth/register", addr))
        .json(&serde_json::json!({ "email": email, "name": name, "password": password }))
        .send()
        .await
        .expect("Register request failed");

    let status = response.status();
    (status, response.json().await.expect("Invalid JSON body"))
}

/// Log in over HTTP and return the response body
pub async fn login(
    client: &reqwest::Client,
    addr: std::net::SocketAddr,
    email: &str,
    password: &str,
) -> (reqwest::StatusCode, serde_json::Value) {
    let response = client
        .post(format!("http://{}/api/auth/login", addr))
        .json(&serde_json::json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Login request failed");

    let status = response.status();
    (status, response.json().await.expect("Invalid JSON body"))
}
