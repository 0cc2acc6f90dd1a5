//! Shared configuration types for the Chatrooms server
//!
//! This crate provides the configuration surface consumed by the other
//! server crates. The authentication subsystem reads four independent
//! knobs from here: the signing secret, the access-token ttl, the
//! refresh-token ttl, and the session cookie max-age.

pub mod config;

// Re-export commonly used items at crate root
pub use config::{AuthConfig, CacheConfig, JwtConfig, SessionConfig};
