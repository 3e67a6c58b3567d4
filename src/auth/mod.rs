//! Authentication system for apidir-gateway
//!
//! This module provides authentication functionality:
//! - Password hashing with Argon2id
//! - Session token issuance and verification
//! - Registration, login and profile lookup

pub mod password;
pub mod service;
pub mod token;

pub use password::{hash_password, verify_password};
pub use service::{AuthService, Session};
pub use token::{Claims, TokenIssuer};
