//! Storage factory for runtime selection of the reputation store

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::{DomainError, ReputationRepository};

use super::in_memory::InMemoryReputationRepository;
use super::postgres::{PostgresConfig, PostgresReputationRepository};
use super::seed::load_seed;

/// Supported storage types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl std::str::FromStr for StorageType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            _ => Err(DomainError::configuration(format!(
                "Unknown storage type: {}. Valid types: in_memory, postgres",
                s
            ))),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// In-memory storage, optionally seeded from a JSON file or dataset directory
    InMemory { seed_path: Option<PathBuf> },
    /// PostgreSQL storage configuration
    Postgres(PostgresConfig),
}

impl StorageConfig {
    /// Returns the storage type
    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory { .. } => StorageType::InMemory,
            Self::Postgres(_) => StorageType::Postgres,
        }
    }
}

/// Factory for creating reputation store instances
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Creates a reputation store based on the configuration
    pub async fn create(
        config: &StorageConfig,
    ) -> Result<Arc<dyn ReputationRepository>, DomainError> {
        match config {
            StorageConfig::InMemory { seed_path: None } => {
                Ok(Arc::new(InMemoryReputationRepository::new()))
            }
            StorageConfig::InMemory {
                seed_path: Some(path),
            } => {
                let records = load_seed(path).await?;
                Ok(Arc::new(InMemoryReputationRepository::with_records(records)))
            }
            StorageConfig::Postgres(pg_config) => {
                let repository = PostgresReputationRepository::connect(pg_config).await?;
                repository.ensure_table().await?;
                Ok(Arc::new(repository))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_type_from_str() {
        assert_eq!("memory".parse::<StorageType>().unwrap(), StorageType::InMemory);
        assert_eq!("in_memory".parse::<StorageType>().unwrap(), StorageType::InMemory);
        assert_eq!("Postgres".parse::<StorageType>().unwrap(), StorageType::Postgres);
        assert_eq!("pg".parse::<StorageType>().unwrap(), StorageType::Postgres);
        assert!("mongodb".parse::<StorageType>().is_err());
    }

    #[test]
    fn test_storage_config_type() {
        assert_eq!(
            StorageConfig::InMemory { seed_path: None }.storage_type(),
            StorageType::InMemory
        );
        assert_eq!(
            StorageConfig::Postgres(PostgresConfig::default()).storage_type(),
            StorageType::Postgres
        );
    }

    #[tokio::test]
    async fn test_create_in_memory() {
        let repository = StorageFactory::create(&StorageConfig::InMemory { seed_path: None })
            .await
            .unwrap();

        assert!(repository.find_one("http://example.com/").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_in_memory_seeded() {
        let dir = std::env::temp_dir().join(format!("url-reputation-store-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("phishing.csv"), "http://login.example-bank.co/verify\n").unwrap();

        let repository = StorageFactory::create(&StorageConfig::InMemory {
            seed_path: Some(dir.clone()),
        })
        .await
        .unwrap();

        let found = repository
            .find_one("http://login.example-bank.co/verify")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.risk, "Medium");
        assert_eq!(found.category, "Phishing");
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_create_in_memory_bad_seed_path() {
        let result = StorageFactory::create(&StorageConfig::InMemory {
            seed_path: Some(PathBuf::from("/nonexistent/url-reputation-seed")),
        })
        .await;

        assert!(result.is_err());
    }
}
