//! In-memory reputation store

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::{DomainError, ReputationRecord, ReputationRepository};

/// Thread-safe in-memory reputation store
///
/// Useful for testing and development. Data is lost when the process terminates.
#[derive(Debug, Default)]
pub struct InMemoryReputationRepository {
    records: RwLock<HashMap<String, ReputationRecord>>,
}

impl InMemoryReputationRepository {
    /// Creates a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with records
    pub fn with_records(records: impl IntoIterator<Item = ReputationRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.url.clone(), record))
            .collect();

        Self {
            records: RwLock::new(records),
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ReputationRepository for InMemoryReputationRepository {
    async fn find_one(&self, url: &str) -> Result<Option<ReputationRecord>, DomainError> {
        let records = self
            .records
            .read()
            .map_err(|e| DomainError::storage(format!("Lock poisoned: {}", e)))?;

        Ok(records.get(url).cloned())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
