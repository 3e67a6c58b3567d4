//! Domain models for apidir-gateway
//!
//! This module contains the core domain models used throughout the application.

pub mod entry;
pub mod user;

// Re-export commonly used types
pub use entry::{DirectoryEntry, DirectoryListing, EntryQuery};
pub use user::{User, UserProfile};
