//! Infrastructure services

mod reputation_service;

pub use reputation_service::ReputationService;
