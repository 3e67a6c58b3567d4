//! apidir-gateway - user accounts and a public-API directory proxy
//!
//! This crate provides an HTTP service that registers and logs in users with
//! stateless session tokens, and proxies the public-API directory with
//! optional category filtering and result limiting.

pub mod auth;
pub mod config;
pub mod database;
pub mod directory;
pub mod error;
pub mod logging;
pub mod models;
pub mod server;
