//! Cache-aside reputation lookup
//!
//! Every lookup goes cache first, backing store second. Whatever the store
//! yields, including the `Unknown` sentinel, is written back to the cache
//! without expiration, so a URL hits the store at most once per cache
//! lifetime. Neither collaborator can fail a lookup: cache and store errors
//! degrade to the next tier or to the sentinel.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::cache::{Cache, CacheExt, NO_EXPIRATION};
use crate::domain::{CacheEntry, DomainError, ReputationRecord, ReputationRepository, UrlKey};

/// Reputation lookups over an injected cache and backing store
#[derive(Clone)]
pub struct ReputationService {
    cache: Arc<dyn Cache>,
    repository: Arc<dyn ReputationRepository>,
}

impl std::fmt::Debug for ReputationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReputationService")
            .field("cache", &self.cache)
            .field("repository", &"<ReputationRepository>")
            .finish()
    }
}

impl ReputationService {
    pub fn new(cache: Arc<dyn Cache>, repository: Arc<dyn ReputationRepository>) -> Self {
        Self { cache, repository }
    }

    /// Resolves the reputation of `key`. Never fails; a URL unknown to both
    /// tiers resolves to `Unknown/Unknown`.
    pub async fn lookup(&self, key: &UrlKey) -> ReputationRecord {
        let url = key.as_str();

        // A miss, a read error and an undecodable payload all fall through
        match self.cache.get::<CacheEntry>(url).await {
            Ok(Some(entry)) => {
                debug!(url = %url, "Returning cached results");
                return ReputationRecord::from_cache(url, entry);
            }
            Ok(None) => debug!(url = %url, "No URL found in cache"),
            Err(e) => debug!(url = %url, error = %e, "Cache read failed"),
        }

        let record = match self.repository.find_one(url).await {
            Ok(Some(found)) => ReputationRecord::new(url, found.risk, found.category),
            Ok(None) => {
                debug!(url = %url, "No URL found in store");
                ReputationRecord::unknown(url)
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Store query failed, reporting unknown");
                ReputationRecord::unknown(url)
            }
        };

        if let Err(e) = self
            .cache
            .set(url, &record.to_cache_entry(), NO_EXPIRATION)
            .await
        {
            warn!(url = %url, error = %e, "Cache write failed");
        }

        record
    }

    /// Checks that the cache is reachable
    pub async fn check_cache(&self) -> Result<(), DomainError> {
        self.cache.ping().await
    }

    /// Checks that the backing store is reachable
    pub async fn check_store(&self) -> Result<(), DomainError> {
        self.repository.ping().await
    }
}
