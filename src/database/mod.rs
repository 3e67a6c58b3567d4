//! Database layer for apidir-gateway
//!
//! This module defines the credential store trait and its SQLite implementation.

pub mod migrations;
pub mod sqlite;

pub use sqlite::SqliteDatabase;

use async_trait::async_trait;

use crate::error::DbError;
use crate::models::User;

/// Database trait for user persistence
///
/// Users are created and read; this service never updates or deletes them.
/// It uses `async_trait` for async methods and `mockall::automock` for testing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Database: Send + Sync {
    /// Find a user by exact email
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DbError>;

    /// Find a user by ID
    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, DbError>;

    /// Insert a new user
    ///
    /// Returns `DbError::ConstraintViolation` if the email is already taken.
    async fn create_user(&self, user: &User) -> Result<(), DbError>;
}
