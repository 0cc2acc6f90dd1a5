//! Cache module for Redis-based storage
//!
//! Provides the Redis client plus the Redis implementation of the
//! revocation registry.

pub mod redis_client;
pub mod revocation;

pub use redis_client::RedisClient;
pub use revocation::RedisRevocationStore;

// Re-export commonly used types
pub use cr_shared::config::CacheConfig;
