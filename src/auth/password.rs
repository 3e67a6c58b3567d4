//! Password hashing and verification
//!
//! Passwords are hashed with Argon2id using a fresh random salt per record and
//! stored in PHC string format. Verification is constant-time.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

use crate::error::HashError;

/// Hash a password using Argon2id
///
/// # Arguments
///
/// * `password` - The plaintext password
///
/// # Returns
///
/// The Argon2id hash string (PHC format)
///
/// # Errors
///
/// Returns an error if hashing fails (should not happen in normal operation)
///
/// # Example
///
/// ```
/// use apidir_gateway::auth::password::hash_password;
///
/// let hash = hash_password("correct horse").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| HashError::HashFailed(e.to_string()))
}

/// Verify a password against a stored hash
///
/// Returns `false` for a wrong password and for an unparseable hash alike.
///
/// # Example
///
/// ```
/// use apidir_gateway::auth::password::{hash_password, verify_password};
///
/// let hash = hash_password("correct horse").unwrap();
/// assert!(verify_password("correct horse", &hash));
/// assert!(!verify_password("wrong horse", &hash));
/// ```
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Hash a password on the blocking thread pool
pub async fn hash_password_blocking(password: String) -> Result<String, HashError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| HashError::TaskFailed(e.to_string()))?
}

/// Verify a password on the blocking thread pool
pub async fn verify_password_blocking(password: String, hash: String) -> Result<bool, HashError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| HashError::TaskFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_argon2id() {
        let hash = hash_password("hunter22").unwrap();

        assert!(
            hash.starts_with("$argon2id$"),
            "Hash should be in Argon2id format"
        );
    }

    #[test]
    fn test_hash_password_unique_salts() {
        let hash1 = hash_password("hunter22").unwrap();
        let hash2 = hash_password("hunter22").unwrap();

        assert_ne!(
            hash1, hash2,
            "Same password should produce different hashes due to different salts"
        );
    }

    #[test]
    fn test_hash_does_not_contain_plaintext() {
        let hash = hash_password("plaintext-secret").unwrap();
        assert!(!hash.contains("plaintext-secret"));
    }

    #[test]
    fn test_verify_password_success() {
        let hash = hash_password("hunter22").unwrap();
        assert!(verify_password("hunter22", &hash));
    }

    #[test]
    fn test_verify_password_wrong_password() {
        let hash = hash_password("hunter22").unwrap();

        assert!(!verify_password("hunter22x", &hash));
        assert!(!verify_password("", &hash));
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        assert!(
            !verify_password("hunter22", "not_a_valid_hash"),
            "Verification should fail for invalid hash format"
        );
    }

    #[tokio::test]
    async fn test_blocking_variants_round_trip() {
        let hash = hash_password_blocking("hunter22".to_string()).await.unwrap();

        assert!(verify_password_blocking("hunter22".to_string(), hash.clone())
            .await
            .unwrap());
        assert!(!verify_password_blocking("nope".to_string(), hash)
            .await
            .unwrap());
    }
}
