//! Revocation store trait defining the denylist interface for refresh tokens.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::RevocationEntry;
use crate::errors::DomainError;

/// Registry of refresh tokens that must be rejected before their natural
/// expiry (logout, detected reuse)
///
/// The registry is a bounded exception list, not a session table: entries
/// live at most one refresh-ttl window, after which [`sweep`] may drop
/// them because an expired token can never pass signature verification.
///
/// The conditional insert doubles as the rotation mutex. The store may be
/// shared across processes (e.g. Redis), so exclusivity must come from
/// the storage medium itself, never from an in-process lock.
///
/// [`sweep`]: RevocationStore::sweep
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Conditionally insert a revocation entry
    ///
    /// # Returns
    /// * `Ok(true)` - The identity was newly revoked by this call
    /// * `Ok(false)` - The identity was already present; the caller lost
    ///   the rotation race or the token was revoked earlier
    /// * `Err(DomainError)` - Storage access failed
    async fn insert_if_absent(&self, entry: RevocationEntry) -> Result<bool, DomainError>;

    /// Check whether a token identity has been revoked
    async fn is_revoked(&self, token_id: &str) -> Result<bool, DomainError>;

    /// Record the refresh token most recently issued to a subject
    ///
    /// This is the head of the subject's rotation chain; on reuse
    /// detection it is what gets defensively revoked.
    async fn record_issued(
        &self,
        subject: Uuid,
        entry: RevocationEntry,
    ) -> Result<(), DomainError>;

    /// Fetch the subject's current chain head, if any is still tracked
    async fn issued_for(&self, subject: Uuid) -> Result<Option<RevocationEntry>, DomainError>;

    /// Remove entries whose tokens have expired
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of entries removed
    ///
    /// Stores with native key expiry may implement this as a no-op.
    async fn sweep(&self, now: DateTime<Utc>) -> Result<usize, DomainError>;

    /// Idempotently revoke a token identity
    ///
    /// Revoking an already-revoked identity is not an error.
    async fn revoke(&self, entry: RevocationEntry) -> Result<(), DomainError> {
        self.insert_if_absent(entry).await.map(|_| ())
    }
}
