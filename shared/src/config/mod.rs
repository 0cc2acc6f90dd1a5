//! Configuration module with business-specific sub-modules
//!
//! - `auth` - Token signing, validity windows, and cookie transport
//! - `cache` - Redis connection settings for the revocation registry

pub mod auth;
pub mod cache;

pub use auth::{AuthConfig, JwtConfig, SessionConfig};
pub use cache::CacheConfig;
