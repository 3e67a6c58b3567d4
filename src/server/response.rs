//! Response envelope and error mapping
//!
//! Every API route answers with the same JSON envelope:
//! `{success, message?, data?, authToken?, errors?}`. Absent fields are omitted.
//!
//! Internal error details are logged but not exposed to clients.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, UpstreamError};

/// Registration succeeded
pub const MSG_CREATED: &str = "Successfully created";
/// Login succeeded
pub const MSG_LOGGED_IN: &str = "Successfully logged in";
/// Registration with an email that is already taken
pub const MSG_DUPLICATE_USER: &str = "Sorry a user with this email already exists";
/// Unknown email or wrong password
pub const MSG_INVALID_CREDENTIALS: &str = "The credentials entered are incorrect";
/// Request input failed validation
pub const MSG_VALIDATION: &str = "Certain fields are empty or incorrect";
/// Any downstream failure
pub const MSG_SERVER_ERROR: &str = "Some error occurred";
/// No user with the authenticated id
pub const MSG_USER_NOT_FOUND: &str = "User not found";
/// Missing or invalid session token
pub const MSG_AUTH_REQUIRED: &str = "Please authenticate with a valid token";

/// JSON response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T = serde_json::Value> {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying data
    pub fn with_data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            auth_token: None,
            errors: None,
        }
    }
}

impl ApiResponse {
    /// Successful response carrying a fresh session token
    pub fn with_token(message: &str, auth_token: String) -> Self {
        Self {
            success: true,
            message: Some(message.to_string()),
            data: None,
            auth_token: Some(auth_token),
            errors: None,
        }
    }

    /// Failed response with a message
    pub fn failure(message: &str) -> Self {
        Self {
            success: false,
            message: Some(message.to_string()),
            data: None,
            auth_token: None,
            errors: None,
        }
    }
}

/// One failed validation rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Human-readable rule message
    pub msg: String,

    /// Name of the offending field
    pub path: String,

    /// Where the field was read from (`body` or `query`)
    pub location: String,
}

impl FieldError {
    /// Error for a JSON body field
    pub fn body(path: &str, msg: &str) -> Self {
        Self {
            msg: msg.to_string(),
            path: path.to_string(),
            location: "body".to_string(),
        }
    }

    /// Error for a query string parameter
    pub fn query(path: &str, msg: &str) -> Self {
        Self {
            msg: msg.to_string(),
            path: path.to_string(),
            location: "query".to_string(),
        }
    }
}

/// Error returned by route handlers
#[derive(Debug)]
pub enum ApiError {
    /// Input failed one or more rules
    Validation(Vec<FieldError>),

    /// Auth service failure
    Auth(AuthError),

    /// Upstream directory failure
    Upstream(UpstreamError),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Auth(err)
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        ApiError::Upstream(err)
    }
}

/// Response sent for every missing or rejected session token
///
/// Shared by the auth guard and `ApiError` so both produce the same body.
pub fn auth_required_response() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({ "error": MSG_AUTH_REQUIRED })),
    )
        .into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(errors) => {
                let mut body = ApiResponse::failure(MSG_VALIDATION);
                body.errors = Some(errors);
                (StatusCode::BAD_REQUEST, body)
            }
            ApiError::Auth(AuthError::DuplicateUser) => (
                StatusCode::BAD_REQUEST,
                ApiResponse::failure(MSG_DUPLICATE_USER),
            ),
            ApiError::Auth(AuthError::InvalidCredentials) => (
                StatusCode::BAD_REQUEST,
                ApiResponse::failure(MSG_INVALID_CREDENTIALS),
            ),
            ApiError::Auth(AuthError::AuthRequired) => return auth_required_response(),
            ApiError::Auth(AuthError::UserNotFound) => (
                StatusCode::NOT_FOUND,
                ApiResponse::failure(MSG_USER_NOT_FOUND),
            ),
            ApiError::Auth(AuthError::Server(cause)) => {
                tracing::error!(error = %cause, "Auth operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::failure(MSG_SERVER_ERROR),
                )
            }
            ApiError::Upstream(e) => {
                tracing::error!(error = %e, "Directory fetch failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::failure(MSG_SERVER_ERROR),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
