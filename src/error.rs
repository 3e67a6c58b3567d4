//! Application error types for apidir-gateway
//!
//! Each layer owns one error enum. Services return these; the HTTP layer
//! turns them into status codes and response envelopes.
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Authentication-related errors
///
/// This is the taxonomy the auth service exposes to its callers.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AuthError {
    /// A user with this email already exists
    #[error("User already exists")]
    DuplicateUser,

    /// Unknown email or wrong password (deliberately indistinguishable)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, malformed or wrongly signed session token
    #[error("Authentication required")]
    AuthRequired,

    /// No user with the given identifier
    #[error("User not found")]
    UserNotFound,

    /// Downstream failure (database, hashing, signing)
    #[error("Server error: {0}")]
    Server(String),
}

impl From<DbError> for AuthError {
    fn from(err: DbError) -> Self {
        AuthError::Server(err.to_string())
    }
}

impl From<HashError> for AuthError {
    fn from(err: HashError) -> Self {
        AuthError::Server(err.to_string())
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            // Signing failures are ours; verification failures are the caller's
            TokenError::Encoding(_) | TokenError::InvalidKey(_) => {
                AuthError::Server(err.to_string())
            }
            _ => AuthError::AuthRequired,
        }
    }
}

/// Database-related errors
#[derive(Debug, Error)]
pub enum DbError {
    /// SQLite error
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection-level failure (closed connection, background thread gone)
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Constraint violation
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

impl From<tokio_rusqlite::Error> for DbError {
    fn from(err: tokio_rusqlite::Error) -> Self {
        match err {
            tokio_rusqlite::Error::Rusqlite(e) => DbError::Sqlite(e),
            other => DbError::Connection(other.to_string()),
        }
    }
}

/// Password hashing errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HashError {
    /// Hashing failed
    #[error("Hash failed: {0}")]
    HashFailed(String),

    /// The blocking hashing task did not complete
    #[error("Hash task failed: {0}")]
    TaskFailed(String),
}

/// Session token errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TokenError {
    /// The token signature does not match
    #[error("Invalid token signature")]
    InvalidSignature,

    /// The token is malformed or cannot be parsed
    #[error("Malformed token")]
    MalformedToken,

    /// The token carries no user identifier
    #[error("Missing user id claim")]
    MissingUserId,

    /// The signing key could not be built
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Signing failed
    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

/// Upstream directory errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UpstreamError {
    /// Network timeout
    #[error("Network timeout")]
    NetworkTimeout,

    /// Connection refused
    #[error("Connection refused")]
    ConnectionRefused,

    /// Non-success status from upstream
    #[error("Upstream returned HTTP {0}")]
    Status(u16),

    /// Invalid data received
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Generic network error
    #[error("Network error: {0}")]
    Network(String),

    /// The HTTP client could not be built
    #[error("Client error: {0}")]
    Client(String),
}
