//! Repository interfaces consumed by the session core.

pub mod credential;
pub mod revocation;

pub use credential::CredentialStore;
pub use revocation::{MemoryRevocationStore, RevocationStore};

#[cfg(test)]
pub use credential::MockCredentialStore;
