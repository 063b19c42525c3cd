//! Storage infrastructure - Reputation store implementations

mod factory;
mod in_memory;
mod postgres;
mod seed;

pub use factory::{StorageConfig, StorageFactory, StorageType};
pub use in_memory::InMemoryReputationRepository;
pub use self::postgres::{PostgresConfig, PostgresReputationRepository};
pub use seed::load_seed;
