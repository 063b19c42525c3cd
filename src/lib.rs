//! URL Reputation Service
//!
//! Answers whether a URL is known to be malicious:
//! - URL reconstruction and validation from request parts
//! - Cache-aside lookups against Redis or an in-process cache
//! - PostgreSQL or in-memory reputation stores

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::AppConfig;

use api::state::AppState;
use infrastructure::cache::CacheFactory;
use infrastructure::services::ReputationService;
use infrastructure::storage::StorageFactory;
use tracing::info;

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let store_config = config.storage.to_store_config()?;
    info!("Storage backend: {:?}", store_config.storage_type());
    let repository = StorageFactory::create(&store_config)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize reputation store: {}", e))?;

    let cache_config = config.cache.to_cache_config()?;
    info!("Cache backend: {}", cache_config.cache_type);
    let cache = CacheFactory::new()
        .create(&cache_config)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize cache: {}", e))?;

    Ok(AppState::new(ReputationService::new(cache, repository)))
}
