//! Authentication service
//!
//! This module provides registration, login and profile lookup on top of the
//! credential store, the password hasher and the token issuer.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::database::Database;
use crate::error::{AuthError, DbError};
use crate::models::{User, UserProfile};

use super::password::{hash_password_blocking, verify_password_blocking};
use super::token::TokenIssuer;

/// A freshly minted session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// The user the token was minted for
    pub user_id: String,

    /// Signed bearer token
    pub auth_token: String,
}

/// Authentication service
///
/// Login failures are reported as `AuthError::InvalidCredentials` whether the
/// email is unknown or the password is wrong. An unknown email is still checked
/// against a throwaway hash so both paths pay for one Argon2 verification.
pub struct AuthService<D: Database> {
    db: Arc<D>,
    tokens: Arc<TokenIssuer>,
    dummy_hash: OnceCell<String>,
}

impl<D: Database> AuthService<D> {
    /// Create a new authentication service
    pub fn new(db: Arc<D>, tokens: Arc<TokenIssuer>) -> Self {
        Self {
            db,
            tokens,
            dummy_hash: OnceCell::new(),
        }
    }

    /// Register a new user and mint a session for them
    ///
    /// Input shape (email syntax, name and password length) is checked by the
    /// caller before this is invoked.
    pub async fn register(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        if self.db.find_user_by_email(email).await?.is_some() {
            debug!(email = %email, "Registration rejected: email already in use");
            return Err(AuthError::DuplicateUser);
        }

        let password_hash = hash_password_blocking(password.to_string()).await?;
        let user = User::new(email, name, password_hash);

        match self.db.create_user(&user).await {
            Ok(()) => {}
            // Lost the race against a concurrent registration
            Err(DbError::ConstraintViolation(_)) => return Err(AuthError::DuplicateUser),
            Err(e) => return Err(e.into()),
        }

        info!(user_id = %user.id, "User registered");
        self.mint(&user.id)
    }

    /// Check credentials and mint a session
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let user = match self.db.find_user_by_email(email).await? {
            Some(user) => user,
            None => {
                let dummy = self.dummy_hash().await?;
                verify_password_blocking(password.to_string(), dummy).await?;
                return Err(AuthError::InvalidCredentials);
            }
        };

        let matches =
            verify_password_blocking(password.to_string(), user.password_hash.clone()).await?;
        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        debug!(user_id = %user.id, "User logged in");
        self.mint(&user.id)
    }

    /// Fetch the public profile of a user
    pub async fn get_user(&self, user_id: &str) -> Result<UserProfile, AuthError> {
        self.db
            .find_user_by_id(user_id)
            .await?
            .map(|user| user.profile())
            .ok_or(AuthError::UserNotFound)
    }

    async fn dummy_hash(&self) -> Result<String, AuthError> {
        let hash = self
            .dummy_hash
            .get_or_try_init(|| hash_password_blocking("unknown-account".to_string()))
            .await?;
        Ok(hash.clone())
    }

    fn mint(&self, user_id: &str) -> Result<Session, AuthError> {
        let auth_token = self.tokens.issue(user_id)?;
        Ok(Session {
            user_id: user_id.to_string(),
            auth_token,
        })
    }
}
