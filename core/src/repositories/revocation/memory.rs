//! In-process revocation store backed by a HashMap
//!
//! Suitable for tests and single-process deployments. Multi-process
//! deployments need a shared medium (see the Redis store in `cr_infra`),
//! since rotation exclusivity only holds within one registry.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::RevocationEntry;
use crate::errors::DomainError;

use super::r#trait::RevocationStore;

/// In-memory revocation registry
#[derive(Clone)]
pub struct MemoryRevocationStore {
    revoked: Arc<RwLock<HashMap<String, RevocationEntry>>>,
    issued: Arc<RwLock<HashMap<Uuid, RevocationEntry>>>,
}

impl MemoryRevocationStore {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            revoked: Arc::new(RwLock::new(HashMap::new())),
            issued: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of revocation entries currently held
    pub async fn len(&self) -> usize {
        self.revoked.read().await.len()
    }

    /// Whether the registry holds no revocation entries
    pub async fn is_empty(&self) -> bool {
        self.revoked.read().await.is_empty()
    }
}

impl Default for MemoryRevocationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RevocationStore for MemoryRevocationStore {
    async fn insert_if_absent(&self, entry: RevocationEntry) -> Result<bool, DomainError> {
        let mut revoked = self.revoked.write().await;

        // The write lock makes check-then-insert atomic; first writer wins.
        if revoked.contains_key(&entry.token_id) {
            return Ok(false);
        }

        revoked.insert(entry.token_id.clone(), entry);
        Ok(true)
    }

    async fn is_revoked(&self, token_id: &str) -> Result<bool, DomainError> {
        let revoked = self.revoked.read().await;
        Ok(revoked.contains_key(token_id))
    }

    async fn record_issued(
        &self,
        subject: Uuid,
        entry: RevocationEntry,
    ) -> Result<(), DomainError> {
        let mut issued = self.issued.write().await;
        issued.insert(subject, entry);
        Ok(())
    }

    async fn issued_for(&self, subject: Uuid) -> Result<Option<RevocationEntry>, DomainError> {
        let issued = self.issued.read().await;
        Ok(issued.get(&subject).cloned())
    }

    async fn sweep(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut revoked = self.revoked.write().await;
        let before = revoked.len();
        revoked.retain(|_, entry| !entry.is_expired_at(now));
        let removed = before - revoked.len();

        let mut issued = self.issued.write().await;
        issued.retain(|_, entry| !entry.is_expired_at(now));

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn entry(id: &str, in_seconds: i64) -> RevocationEntry {
        RevocationEntry::new(id, Uuid::new_v4(), Utc::now() + Duration::seconds(in_seconds))
    }

    #[tokio::test]
    async fn test_insert_if_absent_first_wins() {
        let store = MemoryRevocationStore::new();

        assert!(store.insert_if_absent(entry("t1", 60)).await.unwrap());
        assert!(!store.insert_if_absent(entry("t1", 60)).await.unwrap());
        assert!(store.is_revoked("t1").await.unwrap());
        assert!(!store.is_revoked("t2").await.unwrap());
    }

    #[tokio::test]
    async fn test_revoke_is_idempotent() {
        let store = MemoryRevocationStore::new();

        store.revoke(entry("t1", 60)).await.unwrap();
        store.revoke(entry("t1", 60)).await.unwrap();

        assert!(store.is_revoked("t1").await.unwrap());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_sweep_removes_only_expired_entries() {
        let store = MemoryRevocationStore::new();
        store.revoke(entry("live", 3600)).await.unwrap();
        store.revoke(entry("dead", -1)).await.unwrap();

        let removed = store.sweep(Utc::now()).await.unwrap();

        assert_eq!(removed, 1);
        assert!(store.is_revoked("live").await.unwrap());
        assert!(!store.is_revoked("dead").await.unwrap());
    }

    #[tokio::test]
    async fn test_record_issued_tracks_latest_chain_head() {
        let store = MemoryRevocationStore::new();
        let subject = Uuid::new_v4();

        let first = RevocationEntry::new("r1", subject, Utc::now() + Duration::hours(1));
        let second = RevocationEntry::new("r2", subject, Utc::now() + Duration::hours(1));

        store.record_issued(subject, first).await.unwrap();
        store.record_issued(subject, second).await.unwrap();

        let head = store.issued_for(subject).await.unwrap().unwrap();
        assert_eq!(head.token_id, "r2");
    }

    #[tokio::test]
    async fn test_concurrent_conditional_inserts_admit_one_winner() {
        let store = Arc::new(MemoryRevocationStore::new());
        let shared = entry("contended", 60);

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = Arc::clone(&store);
            let entry = shared.clone();
            handles.push(tokio::spawn(async move {
                store.insert_if_absent(entry).await.unwrap()
            }));
        }

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }

        assert_eq!(winners, 1);
    }
}
