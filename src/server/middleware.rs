//! HTTP middleware for apidir-gateway
//!
//! This module provides middleware layers for:
//! - Session token authentication on protected routes
//! - Request/response logging

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;

use crate::auth::TokenIssuer;

use super::response::auth_required_response;

/// Header carrying the session token
pub const AUTH_TOKEN_HEADER: &str = "auth-token";

/// Authenticated user extension for requests
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser(pub String);

/// Authentication middleware function
///
/// This middleware:
/// 1. Extracts the `auth-token` header
/// 2. Verifies the token signature and decodes the user ID
/// 3. Adds the authenticated user to the request extensions
///
/// Every failure yields the same 401 response.
pub async fn auth_guard(
    State(tokens): State<Arc<TokenIssuer>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthResponse> {
    let token = request
        .headers()
        .get(AUTH_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthResponse)?;

    let user_id = tokens.verify(token).map_err(|e| {
        tracing::debug!(error = %e, "Rejected session token");
        AuthResponse
    })?;

    request.extensions_mut().insert(AuthenticatedUser(user_id));

    Ok(next.run(request).await)
}

/// Authentication error response
#[derive(Debug)]
pub struct AuthResponse;

impl IntoResponse for AuthResponse {
    fn into_response(self) -> Response {
        auth_required_response()
    }
}

/// Logging middleware function
///
/// Logs request and response details including:
/// - Method and path
/// - Status code
/// - Response time
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let elapsed = start.elapsed();
    let status = response.status();

    tracing::info!(
        method = %method,
        path = %uri.path(),
        status = %status.as_u16(),
        duration_ms = %elapsed.as_millis(),
        "Request completed"
    );

    response
}
