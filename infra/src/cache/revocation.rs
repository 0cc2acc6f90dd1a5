//! Redis-backed revocation registry
//!
//! Keys carry the token's own expiry via `EXAT`, so Redis evicts entries
//! the moment the underlying token can no longer pass verification;
//! `sweep` is therefore a no-op here. The `SET NX` conditional insert is
//! atomic server-side, which is what makes rotation exclusivity hold
//! across processes sharing this registry.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use cr_core::domain::entities::RevocationEntry;
use cr_core::errors::DomainError;
use cr_core::repositories::RevocationStore;

use super::redis_client::RedisClient;

/// Key prefix for revoked token identities
const REVOKED_PREFIX: &str = "revoked";

/// Key prefix for per-subject chain heads
const ISSUED_PREFIX: &str = "session:head";

/// Revocation registry stored in Redis
#[derive(Clone)]
pub struct RedisRevocationStore {
    client: RedisClient,
}

impl RedisRevocationStore {
    /// Create a registry over an established Redis connection
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn revoked_key(&self, token_id: &str) -> String {
        self.client.prefixed(&format!("{REVOKED_PREFIX}:{token_id}"))
    }

    fn issued_key(&self, subject: Uuid) -> String {
        self.client.prefixed(&format!("{ISSUED_PREFIX}:{subject}"))
    }
}

fn cache_error(context: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::Internal {
        message: format!("{context}: {e}"),
    }
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn insert_if_absent(&self, entry: RevocationEntry) -> Result<bool, DomainError> {
        let mut conn = self.client.connection();
        let key = self.revoked_key(&entry.token_id);
        let value = serde_json::to_string(&entry)
            .map_err(|e| cache_error("Failed to encode revocation entry", e))?;

        // SET NX EXAT is the whole trick: one round trip that both
        // claims the identity and schedules its eviction.
        let outcome: Option<String> = redis::cmd("SET")
            .arg(&key)
            .arg(&value)
            .arg("NX")
            .arg("EXAT")
            .arg(entry.expires_at.timestamp())
            .query_async(&mut conn)
            .await
            .map_err(|e| cache_error("Failed to insert revocation entry", e))?;

        let inserted = outcome.is_some();
        debug!(token_id = %entry.token_id, inserted, "Conditional revocation insert");
        Ok(inserted)
    }

    async fn is_revoked(&self, token_id: &str) -> Result<bool, DomainError> {
        let mut conn = self.client.connection();

        let exists: bool = redis::cmd("EXISTS")
            .arg(self.revoked_key(token_id))
            .query_async(&mut conn)
            .await
            .map_err(|e| cache_error("Failed to check revocation", e))?;

        Ok(exists)
    }

    async fn record_issued(
        &self,
        subject: Uuid,
        entry: RevocationEntry,
    ) -> Result<(), DomainError> {
        let mut conn = self.client.connection();
        let value = serde_json::to_string(&entry)
            .map_err(|e| cache_error("Failed to encode chain head", e))?;

        // Unconditional overwrite: the newest refresh token is the head.
        redis::cmd("SET")
            .arg(self.issued_key(subject))
            .arg(&value)
            .arg("EXAT")
            .arg(entry.expires_at.timestamp())
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(|e| cache_error("Failed to record chain head", e))?;

        Ok(())
    }

    async fn issued_for(&self, subject: Uuid) -> Result<Option<RevocationEntry>, DomainError> {
        let mut conn = self.client.connection();

        let value: Option<String> = redis::cmd("GET")
            .arg(self.issued_key(subject))
            .query_async(&mut conn)
            .await
            .map_err(|e| cache_error("Failed to fetch chain head", e))?;

        match value {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| cache_error("Failed to decode chain head", e)),
            None => Ok(None),
        }
    }

    async fn sweep(&self, _now: DateTime<Utc>) -> Result<usize, DomainError> {
        // Redis evicts keys itself at their EXAT deadline.
        Ok(0)
    }
}
