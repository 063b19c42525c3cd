//! Reputation records and their cached projection

use serde::{Deserialize, Serialize};

/// Risk and category label used when a URL is absent from the dataset
pub const UNKNOWN: &str = "Unknown";

/// Reputation of a single URL as held by the backing store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReputationRecord {
    pub url: String,
    pub risk: String,
    pub category: String,
}

impl ReputationRecord {
    pub fn new(
        url: impl Into<String>,
        risk: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            risk: risk.into(),
            category: category.into(),
        }
    }

    /// Sentinel record for a URL found in neither cache nor store
    pub fn unknown(url: impl Into<String>) -> Self {
        Self::new(url, UNKNOWN, UNKNOWN)
    }

    pub fn is_unknown(&self) -> bool {
        self.risk == UNKNOWN && self.category == UNKNOWN
    }

    /// Rebuilds a record for `url` from its cached projection
    pub fn from_cache(url: impl Into<String>, entry: CacheEntry) -> Self {
        Self::new(url, entry.risk, entry.category)
    }

    pub fn to_cache_entry(&self) -> CacheEntry {
        CacheEntry {
            risk: self.risk.clone(),
            category: self.category.clone(),
        }
    }
}

/// Cached projection of a [`ReputationRecord`], keyed by its URL
///
/// Field names are capitalized so entries written by earlier deployments of
/// the service remain readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CacheEntry {
    pub risk: String,
    pub category: String,
}
