//! Session token issuance and verification.
//!
//! Tokens are HS256 JSON Web Tokens whose claims carry only the user ID:
//! `{"user": {"id": "<user id>"}}`.
//!
//! # Invariants
//! - The signing secret is injected at construction; there is no global key.
//! - Tokens carry no `exp` claim and none is required on verification.
//!   Sessions therefore never expire and cannot be revoked.
//! - Verification is stateless; the same inputs always give the same output.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::TokenError;

/// Claims embedded in a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// The authenticated user
    pub user: ClaimsUser,
}

/// User part of the token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimsUser {
    /// User identifier
    pub id: String,
}

/// Signs and verifies session tokens with a shared secret
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenIssuer {
    /// Create an issuer from a shared secret
    ///
    /// # Errors
    ///
    /// Returns `TokenError::InvalidKey` if the secret is empty.
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::InvalidKey("secret must be non-empty".to_string()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }

    /// Mint a token for the given user ID
    pub fn issue(&self, user_id: &str) -> Result<String, TokenError> {
        let claims = Claims {
            user: ClaimsUser {
                id: user_id.to_string(),
            },
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Verify a token and return the user ID it carries
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        let data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(map_jwt_error)?;

        let user_id = data.claims.user.id;
        if user_id.is_empty() {
            return Err(TokenError::MissingUserId);
        }

        Ok(user_id)
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer").finish_non_exhaustive()
    }
}

/// Maps jsonwebtoken errors to our TokenError type.
fn map_jwt_error(error: jsonwebtoken::errors::Error) -> TokenError {
    use jsonwebtoken::errors::ErrorKind;

    match error.kind() {
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        // Claims that decode but lack `user.id`
        ErrorKind::Json(_) => TokenError::MissingUserId,
        _ => TokenError::MalformedToken,
    }
}
