//! Public-API directory proxy
//!
//! Fetches the full upstream list on every call, then narrows it with an
//! optional category filter and an optional result limit. Nothing is cached.

pub mod client;

pub use client::UpstreamClient;

use std::time::Duration;

use tracing::debug;

use crate::error::UpstreamError;
use crate::models::{DirectoryEntry, DirectoryListing, EntryQuery};

/// Default upstream endpoint
pub const DEFAULT_UPSTREAM_URL: &str = "https://api.publicapis.org/entries";

/// Directory proxy service
#[derive(Debug, Clone)]
pub struct DirectoryService {
    client: UpstreamClient,
    url: String,
}

impl DirectoryService {
    /// Create a service for the given upstream endpoint
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, UpstreamError> {
        Ok(Self::with_client(UpstreamClient::new(timeout)?, url))
    }

    /// Create a service with an existing client
    pub fn with_client(client: UpstreamClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Upstream endpoint this service reads from
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the directory and apply the query
    pub async fn fetch(&self, query: &EntryQuery) -> Result<Vec<DirectoryEntry>, UpstreamError> {
        let listing: DirectoryListing = self.client.get_json(&self.url).await?;

        debug!(
            upstream_count = listing.entries.len(),
            category = ?query.category,
            limit = ?query.limit,
            "Fetched directory"
        );

        Ok(apply_query(listing.entries, query))
    }
}

/// Keep entries matching the category, then cut to the limit
///
/// An empty category string means no filter. Upstream order is preserved.
pub fn apply_query(entries: Vec<DirectoryEntry>, query: &EntryQuery) -> Vec<DirectoryEntry> {
    let category = query.category.as_deref().filter(|c| !c.is_empty());
    let limit = query.limit.unwrap_or(usize::MAX);

    entries
        .into_iter()
        .filter(|entry| category.map_or(true, |c| entry.in_category(c)))
        .take(limit)
        .collect()
}
