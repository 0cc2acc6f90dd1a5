//! Domain layer containing the session core's business entities.

pub mod entities;

// Re-export commonly used domain types
pub use entities::*;
