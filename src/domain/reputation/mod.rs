//! Reputation domain - URL keys, reputation records and the backing store contract

mod entity;
mod repository;
mod url_key;

pub use entity::{CacheEntry, ReputationRecord, UNKNOWN};
pub use repository::ReputationRepository;
pub use url_key::{percent_decode, UrlError, UrlKey, DEFAULT_SCHEME};

#[cfg(test)]
pub use repository::MockReputationRepository;
