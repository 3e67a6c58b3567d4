//! User-related domain models
//!
//! This module defines the stored user record and its public profile view.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Utc};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};

/// Length of the random part of a user ID in bytes
const USER_ID_BYTES: usize = 16;

/// User record stored in the database
///
/// `password_hash` holds an Argon2id PHC string, never the plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique user ID
    pub id: String,

    /// Email address (unique, case-sensitive as stored)
    pub email: String,

    /// Display name
    pub name: String,

    /// Hashed password (argon2id)
    pub password_hash: String,

    /// When the user registered
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a freshly generated ID
    pub fn new(
        email: impl Into<String>,
        name: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: generate_user_id(),
            email: email.into(),
            name: name.into(),
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        }
    }

    /// Set the user ID
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Public view of this user, without the password hash
    pub fn profile(&self) -> UserProfile {
        UserProfile::from(self)
    }
}

/// Public user profile returned to authenticated clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User ID
    pub id: String,

    /// Email address
    pub email: String,

    /// Display name
    pub name: String,

    /// When the user registered
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            created_at: user.created_at,
        }
    }
}

/// Generate a random, URL-safe user ID
fn generate_user_id() -> String {
    let mut id_bytes = [0u8; USER_ID_BYTES];
    OsRng.fill_bytes(&mut id_bytes);
    URL_SAFE_NO_PAD.encode(id_bytes)
}
