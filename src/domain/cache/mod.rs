//! Cache domain - key-value abstraction used for reputation memoization

mod repository;

pub use repository::{Cache, CacheExt, NO_EXPIRATION};

#[cfg(test)]
pub use repository::mock::MockCache;
