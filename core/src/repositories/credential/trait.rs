//! Credential store trait defining the user-identity lookup interface.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{Credentials, Subject};
use crate::errors::DomainError;

/// Collaborator trait for subject identity lookups
///
/// The session core consumes this interface but does not implement it;
/// the surrounding application provides the backing store (typically a
/// relational database with hashed passwords).
///
/// # Security Considerations
/// Implementations must return `Ok(None)` for an unknown username AND for
/// a wrong password, and should take comparable time in both cases, so
/// that login failures carry no subject-enumeration signal.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up a subject by its credentials
    ///
    /// # Arguments
    /// * `credentials` - Username and plaintext password to verify
    ///
    /// # Returns
    /// * `Ok(Some(Subject))` - Credentials matched an account
    /// * `Ok(None)` - Unknown username or wrong password (indistinguishable)
    /// * `Err(DomainError)` - Store access failed
    async fn lookup(&self, credentials: &Credentials) -> Result<Option<Subject>, DomainError>;

    /// Check whether a subject still exists and is active
    ///
    /// Called at refresh time to re-validate the subject before a new
    /// token pair is issued.
    ///
    /// # Returns
    /// * `Ok(true)` - Subject exists and may refresh
    /// * `Ok(false)` - Subject was removed or deactivated
    /// * `Err(DomainError)` - Store access failed
    async fn is_active(&self, subject_id: Uuid) -> Result<bool, DomainError>;
}
