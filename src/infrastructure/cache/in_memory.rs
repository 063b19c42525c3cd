//! In-memory cache implementation using moka

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;

use crate::domain::cache::Cache;
use crate::domain::DomainError;

/// Configuration for in-memory cache
#[derive(Debug, Clone)]
pub struct InMemoryCacheConfig {
    /// Maximum number of entries
    pub max_capacity: u64,
}

impl Default for InMemoryCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 100_000,
        }
    }
}

impl InMemoryCacheConfig {
    /// Sets the maximum number of entries
    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = capacity;
        self
    }
}

/// Cache entry stored in moka
#[derive(Debug, Clone)]
struct StoredValue {
    /// Serialized JSON value
    data: String,
    /// Expiration timestamp (millis since epoch), `None` for no expiration
    expires_at: Option<u64>,
}

/// Thread-safe in-memory cache implementation using moka
///
/// Intended for single-process deployments and development. The cache has no
/// time-to-live of its own; the capacity bound is the only eviction.
#[derive(Debug)]
pub struct InMemoryCache {
    cache: MokaCache<String, StoredValue>,
}

impl InMemoryCache {
    /// Creates a new in-memory cache with default configuration
    pub fn new() -> Self {
        Self::with_config(InMemoryCacheConfig::default())
    }

    /// Creates a new in-memory cache with the given configuration
    pub fn with_config(config: InMemoryCacheConfig) -> Self {
        Self {
            cache: MokaCache::builder()
                .max_capacity(config.max_capacity)
                .build(),
        }
    }

    fn current_time_millis() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }

    fn is_expired(value: &StoredValue) -> bool {
        value
            .expires_at
            .is_some_and(|expires_at| Self::current_time_millis() > expires_at)
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError> {
        match self.cache.get(key).await {
            Some(value) => {
                if Self::is_expired(&value) {
                    self.cache.remove(key).await;
                    return Ok(None);
                }

                Ok(Some(value.data))
            }
            None => Ok(None),
        }
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError> {
        let expires_at = if ttl.is_zero() {
            None
        } else {
            Some(Self::current_time_millis() + ttl.as_millis() as u64)
        };

        let stored = StoredValue {
            data: value.to_string(),
            expires_at,
        };

        self.cache.insert(key.to_string(), stored).await;
        Ok(())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
