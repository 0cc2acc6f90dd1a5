//! # Infrastructure Layer
//!
//! Concrete backing stores for the Chatrooms session core. Today that
//! means Redis: the revocation registry needs a medium whose conditional
//! insert is atomic across processes, and Redis `SET NX` provides it.

// Re-export core error types for convenience
pub use cr_core::errors::{DomainError, DomainResult};

/// Cache module - Redis client and the revocation registry
pub mod cache;

use thiserror::Error;

/// Errors raised while setting up or talking to infrastructure services
#[derive(Debug, Error)]
pub enum InfrastructureError {
    /// Invalid configuration (bad URL, missing value)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Redis operation failed
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::Internal {
            message: err.to_string(),
        }
    }
}
