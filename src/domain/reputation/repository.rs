//! Backing store contract for reputation records

use async_trait::async_trait;

use super::ReputationRecord;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Read-only access to the externally managed reputation dataset
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReputationRepository: Send + Sync {
    /// Finds the record whose URL equals `url` exactly
    async fn find_one(&self, url: &str) -> Result<Option<ReputationRecord>, DomainError>;

    /// Checks that the store is reachable
    async fn ping(&self) -> Result<(), DomainError>;
}
