//! Domain layer - Core types and collaborator contracts

pub mod cache;
pub mod error;
pub mod reputation;

pub use cache::{Cache, CacheExt, NO_EXPIRATION};
pub use error::DomainError;
pub use reputation::{
    CacheEntry, ReputationRecord, ReputationRepository, UrlError, UrlKey, DEFAULT_SCHEME, UNKNOWN,
};
