//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::services::ReputationService;

/// State shared by all request handlers
#[derive(Clone, Debug)]
pub struct AppState {
    pub reputation_service: Arc<ReputationService>,
}

impl AppState {
    pub fn new(reputation_service: ReputationService) -> Self {
        Self {
            reputation_service: Arc::new(reputation_service),
        }
    }
}
