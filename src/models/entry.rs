//! Public-API directory models
//!
//! Field names on the wire match the upstream directory (`API`, `Description`,
//! `Auth`, `HTTPS`, `Cors`, `Link`, `Category`) and are passed through as-is.

use serde::{Deserialize, Serialize};

/// One entry of the public-API directory
///
/// Upstream may send `null` for any field, so every field is optional and a
/// `null` is echoed back unchanged. Fields not listed here are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Name of the API
    #[serde(rename = "API", default)]
    pub name: Option<String>,

    #[serde(rename = "Description", default)]
    pub description: Option<String>,

    /// Authentication method (empty when none)
    #[serde(rename = "Auth", default)]
    pub auth: Option<String>,

    #[serde(rename = "HTTPS", default)]
    pub https: Option<bool>,

    /// CORS support ("yes", "no", "unknown")
    #[serde(rename = "Cors", default)]
    pub cors: Option<String>,

    #[serde(rename = "Link", default)]
    pub link: Option<String>,

    #[serde(rename = "Category", default)]
    pub category: Option<String>,

    /// Upstream fields without a typed counterpart
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl DirectoryEntry {
    /// Create an entry with the given name and category
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            auth: Some(String::new()),
            https: Some(true),
            cors: Some("unknown".to_string()),
            category: Some(category.into()),
            ..Self::default()
        }
    }

    /// Case-insensitive category match; an entry without a category never matches
    pub fn in_category(&self, category: &str) -> bool {
        self.category
            .as_deref()
            .is_some_and(|c| c.to_lowercase() == category.to_lowercase())
    }
}

/// Upstream directory response body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryListing {
    /// Number of entries reported by upstream
    #[serde(default)]
    pub count: u64,

    /// Entries; upstream sends `null` when nothing matches
    #[serde(default, deserialize_with = "null_as_empty")]
    pub entries: Vec<DirectoryEntry>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<DirectoryEntry>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let entries: Option<Vec<DirectoryEntry>> = Option::deserialize(deserializer)?;
    Ok(entries.unwrap_or_default())
}

/// Query options for a directory fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryQuery {
    /// Maximum number of entries to return
    pub limit: Option<usize>,

    /// Category to keep (case-insensitive)
    pub category: Option<String>,
}

impl EntryQuery {
    /// Create an empty query (no filter, no limit)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the result limit
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the category filter
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}
