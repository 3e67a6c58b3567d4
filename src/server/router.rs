//! HTTP router for apidir-gateway
//!
//! This module defines the axum router that handles all HTTP requests.
//! It provides routes for:
//! - Health checks
//! - Registration, login and the authenticated user's profile
//! - The public-API directory proxy

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    middleware,
    response::{IntoResponse, Json},
    routing::{get, post},
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::auth::{AuthService, TokenIssuer};
use crate::database::Database;
use crate::directory::DirectoryService;
use crate::models::{DirectoryEntry, EntryQuery, UserProfile};

use super::middleware::{auth_guard, AuthenticatedUser};
use super::response::{ApiError, ApiResponse, FieldError, MSG_CREATED, MSG_LOGGED_IN};
use super::validation::{DataParams, LoginRequest, RegisterRequest};

/// Shared application state
pub struct AppState<D: Database> {
    /// Registration, login and profile lookup
    pub auth_service: Arc<AuthService<D>>,

    /// Token issuer shared with the auth guard
    pub tokens: Arc<TokenIssuer>,

    /// Upstream directory proxy
    pub directory: Arc<DirectoryService>,
}

impl<D: Database> AppState<D> {
    /// Wire the services around a database and a token issuer
    pub fn new(database: Arc<D>, tokens: Arc<TokenIssuer>, directory: DirectoryService) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(database, Arc::clone(&tokens))),
            tokens,
            directory: Arc::new(directory),
        }
    }
}

impl<D: Database> Clone for AppState<D> {
    fn clone(&self) -> Self {
        Self {
            auth_service: Arc::clone(&self.auth_service),
            tokens: Arc::clone(&self.tokens),
            directory: Arc::clone(&self.directory),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Build the main application router
///
/// # Arguments
///
/// * `state` - Application state containing the services
///
/// # Returns
///
/// An axum Router configured with all endpoints
pub fn build_router<D: Database + 'static>(state: AppState<D>) -> Router {
    // Routes behind the auth guard
    let protected = Router::new()
        .route("/api/auth/user", get(user_handler::<D>))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state.tokens),
            auth_guard,
        ));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/auth/register", post(register_handler::<D>))
        .route("/api/auth/login", post(login_handler::<D>))
        .route("/api/data", get(data_handler::<D>))
        .merge(protected)
        .with_state(state)
}

// =============================================================================
// Health Handler
// =============================================================================

/// Health check endpoint handler
async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// Auth Handlers
// =============================================================================

/// Register a new user and return a session token
async fn register_handler<D: Database + 'static>(
    State(state): State<AppState<D>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let input = body_or_default(body)
        .validate()
        .map_err(ApiError::Validation)?;

    let session = state
        .auth_service
        .register(&input.email, &input.name, &input.password)
        .await?;

    Ok(Json(ApiResponse::with_token(MSG_CREATED, session.auth_token)))
}

/// Check credentials and return a session token
async fn login_handler<D: Database + 'static>(
    State(state): State<AppState<D>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let input = body_or_default(body)
        .validate()
        .map_err(ApiError::Validation)?;

    let session = state
        .auth_service
        .login(&input.email, &input.password)
        .await?;

    Ok(Json(ApiResponse::with_token(
        MSG_LOGGED_IN,
        session.auth_token,
    )))
}

/// Profile of the authenticated user
async fn user_handler<D: Database + 'static>(
    State(state): State<AppState<D>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<UserProfile>>, ApiError> {
    let profile = state.auth_service.get_user(&user.0).await?;
    Ok(Json(ApiResponse::with_data(profile)))
}

/// An unreadable body is validated as if every field were missing
fn body_or_default<T: Default>(body: Result<Json<T>, JsonRejection>) -> T {
    match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable request body");
            T::default()
        }
    }
}

// =============================================================================
// Directory Handler
// =============================================================================

/// Fetch the public-API directory with optional filter and limit
async fn data_handler<D: Database + 'static>(
    State(state): State<AppState<D>>,
    params: Result<Query<DataParams>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<DirectoryEntry>>>, ApiError> {
    let Query(params) = params.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Unreadable query string");
        ApiError::Validation(vec![FieldError::query("query", "Invalid query string")])
    })?;

    let limit = params.parse_limit().map_err(ApiError::Validation)?;
    let query = EntryQuery {
        limit,
        category: params.category,
    };

    let entries = state.directory.fetch(&query).await?;
    Ok(Json(ApiResponse::with_data(entries)))
}
