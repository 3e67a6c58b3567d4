//! SQLite implementation of the Database trait
//!
//! This module provides a SQLite-based implementation of the Database trait
//! using rusqlite and tokio-rusqlite for async operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{ErrorCode, OptionalExtension, Row};
use tokio_rusqlite::Connection;

use super::migrations::CREATE_SCHEMA;
use super::Database;
use crate::error::DbError;
use crate::models::User;

const SELECT_USER: &str = "SELECT id, email, name, password_hash, created_at FROM users";

/// SQLite database implementation
pub struct SqliteDatabase {
    conn: Connection,
}

impl SqliteDatabase {
    /// Create a new SQLite database connection
    ///
    /// Use `:memory:` for in-memory database or a file path for persistent storage.
    pub async fn new(path: &str) -> Result<Self, DbError> {
        let conn = Connection::open(path).await?;

        // Run migrations
        conn.call(|conn| {
            conn.execute_batch(CREATE_SCHEMA)?;
            Ok(())
        })
        .await?;

        Ok(Self { conn })
    }

    /// Create a new in-memory database (useful for testing)
    pub async fn in_memory() -> Result<Self, DbError> {
        Self::new(":memory:").await
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        let email = email.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&format!("{SELECT_USER} WHERE email = ?1"))?;
                let user = stmt.query_row([&email], user_from_row).optional()?;
                Ok(user)
            })
            .await
            .map_err(Into::into)
    }

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, DbError> {
        let id = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&format!("{SELECT_USER} WHERE id = ?1"))?;
                let user = stmt.query_row([&id], user_from_row).optional()?;
                Ok(user)
            })
            .await
            .map_err(Into::into)
    }

    async fn create_user(&self, user: &User) -> Result<(), DbError> {
        let id = user.id.clone();
        let email = user.email.clone();
        let name = user.name.clone();
        let password_hash = user.password_hash.clone();
        let created_at = user.created_at.to_rfc3339();

        // The raw rusqlite result is passed out so that a constraint
        // violation can be told apart from other failures.
        let inserted = self
            .conn
            .call(move |conn| {
                Ok(conn.execute(
                    r#"
                    INSERT INTO users (id, email, name, password_hash, created_at)
                    VALUES (?1, ?2, ?3, ?4, ?5)
                    "#,
                    rusqlite::params![id, email, name, password_hash, created_at],
                ))
            })
            .await?;

        match inserted {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(err, message))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(DbError::ConstraintViolation(
                    message.unwrap_or_else(|| "UNIQUE constraint failed: users.email".to_string()),
                ))
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        name: row.get(2)?,
        password_hash: row.get(3)?,
        created_at: parse_datetime(row.get::<_, Option<String>>(4)?).unwrap_or_else(Utc::now),
    })
}

/// Parse a datetime string to DateTime<Utc>
fn parse_datetime(s: Option<String>) -> Option<DateTime<Utc>> {
    s.and_then(|s| {
        DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
            .or_else(|| {
                // Try parsing SQLite's datetime format
                chrono::NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S")
                    .ok()
                    .map(|dt| dt.and_utc())
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_in_memory_database() {
        let db = SqliteDatabase::in_memory().await;
        assert!(db.is_ok());
    }

    #[tokio::test]
    async fn test_create_and_find_user_by_email() {
        let db = SqliteDatabase::in_memory().await.unwrap();

        let user = User::new("ada@example.com", "Ada Lovelace", "$argon2id$hash");
        db.create_user(&user).await.unwrap();

        let found = db
            .find_user_by_email("ada@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(found.name, "Ada Lovelace");
        assert_eq!(found.password_hash, "$argon2id$hash");
        assert_eq!(found.created_at.timestamp(), user.created_at.timestamp());
    }

    #[tokio::test]
    async fn test_find_user_by_id() {
        let db = SqliteDatabase::in_memory().await.unwrap();

        let user = User::new("ada@example.com", "Ada", "hash").with_id("user-1");
        db.create_user(&user).await.unwrap();

        let found = db.find_user_by_id("user-1").await.unwrap().unwrap();
        assert_eq!(found.email, "ada@example.com");

        assert!(db.find_user_by_id("user-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_unknown_email_returns_none() {
        let db = SqliteDatabase::in_memory().await.unwrap();

        let result = db.find_user_by_email("nobody@example.com").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_email_lookup_is_case_sensitive() {
        let db = SqliteDatabase::in_memory().await.unwrap();

        db.create_user(&User::new("ada@example.com", "Ada", "hash"))
            .await
            .unwrap();

        assert!(db
            .find_user_by_email("ADA@example.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_constraint_violation() {
        let db = SqliteDatabase::in_memory().await.unwrap();

        db.create_user(&User::new("ada@example.com", "Ada", "hash1"))
            .await
            .unwrap();

        let result = db
            .create_user(&User::new("ada@example.com", "Other Ada", "hash2"))
            .await;

        match result {
            Err(DbError::ConstraintViolation(msg)) => assert!(msg.contains("users.email")),
            other => panic!("Expected ConstraintViolation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_file_backed_database_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.db");
        let path = path.to_str().unwrap();

        {
            let db = SqliteDatabase::new(path).await.unwrap();
            db.create_user(&User::new("ada@example.com", "Ada", "hash").with_id("user-1"))
                .await
                .unwrap();
        }

        let db = SqliteDatabase::new(path).await.unwrap();
        let found = db.find_user_by_id("user-1").await.unwrap();
        assert!(found.is_some());
    }

    #[test]
    fn test_parse_datetime_formats() {
        assert!(parse_datetime(Some("2024-01-02T03:04:05+00:00".to_string())).is_some());
        assert!(parse_datetime(Some("2024-01-02 03:04:05".to_string())).is_some());
        assert!(parse_datetime(Some("not a date".to_string())).is_none());
        assert!(parse_datetime(None).is_none());
    }
}
