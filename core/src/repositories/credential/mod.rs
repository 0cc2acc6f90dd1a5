//! Credential store interface: the user-identity collaborator.

mod r#trait;
pub use r#trait::CredentialStore;

#[cfg(test)]
pub mod mock;
#[cfg(test)]
pub use mock::MockCredentialStore;
