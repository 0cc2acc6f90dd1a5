//! Revocation registry interface and the in-process implementation.

mod memory;
mod r#trait;

pub use memory::MemoryRevocationStore;
pub use r#trait::RevocationStore;
