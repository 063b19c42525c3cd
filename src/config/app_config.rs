use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::DomainError;
use crate::infrastructure::cache::{CacheConfig as CacheFactoryConfig, CacheType};
use crate::infrastructure::storage::{PostgresConfig, StorageConfig as StoreConfig, StorageType};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Backing store settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: String,
    pub url: Option<String>,
    /// JSON file or dataset directory loaded into the in-memory store
    pub seed_path: Option<PathBuf>,
    pub table: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

/// Cache settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub backend: String,
    pub url: Option<String>,
    pub key_prefix: Option<String>,
    pub max_capacity: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let postgres = PostgresConfig::default();

        Self {
            backend: "in_memory".to_string(),
            url: None,
            seed_path: None,
            table: postgres.table,
            max_connections: postgres.max_connections,
            min_connections: postgres.min_connections,
            connect_timeout_secs: postgres.connect_timeout_secs,
            idle_timeout_secs: postgres.idle_timeout_secs,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: "in_memory".to_string(),
            url: None,
            key_prefix: None,
            max_capacity: None,
        }
    }
}

impl StorageConfig {
    /// Resolves the store backend selection
    pub fn to_store_config(&self) -> Result<StoreConfig, DomainError> {
        match self.backend.parse::<StorageType>()? {
            StorageType::InMemory => Ok(StoreConfig::InMemory {
                seed_path: self.seed_path.clone(),
            }),
            StorageType::Postgres => {
                let url = self.url.as_ref().ok_or_else(|| {
                    DomainError::configuration("storage.url is required for the postgres backend")
                })?;

                Ok(StoreConfig::Postgres(
                    PostgresConfig::new(url)
                        .with_table(&self.table)
                        .with_max_connections(self.max_connections)
                        .with_min_connections(self.min_connections)
                        .with_connect_timeout(self.connect_timeout_secs)
                        .with_idle_timeout(self.idle_timeout_secs),
                ))
            }
        }
    }
}

impl CacheConfig {
    /// Resolves the cache backend selection
    pub fn to_cache_config(&self) -> Result<CacheFactoryConfig, DomainError> {
        Ok(CacheFactoryConfig {
            cache_type: self.backend.parse::<CacheType>()?,
            redis_url: self.url.clone(),
            key_prefix: self.key_prefix.clone(),
            max_capacity: self.max_capacity,
        })
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
