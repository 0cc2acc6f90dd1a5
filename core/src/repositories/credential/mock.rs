//! Mock implementation of CredentialStore for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{Credentials, Subject};
use crate::errors::DomainError;

use super::r#trait::CredentialStore;

/// Mock credential store for testing
pub struct MockCredentialStore {
    accounts: Arc<RwLock<HashMap<String, (String, Subject)>>>,
}

impl MockCredentialStore {
    /// Create a new empty mock store
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register an account, returning its subject ID
    pub async fn add_account(&self, username: &str, password: &str) -> Uuid {
        let subject = Subject::new(Uuid::new_v4(), username);
        let id = subject.id;
        self.accounts
            .write()
            .await
            .insert(username.to_string(), (password.to_string(), subject));
        id
    }

    /// Deactivate an account by subject ID
    pub async fn deactivate(&self, subject_id: Uuid) {
        let mut accounts = self.accounts.write().await;
        for (_, subject) in accounts.values_mut() {
            if subject.id == subject_id {
                subject.is_active = false;
            }
        }
    }
}

impl Default for MockCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStore for MockCredentialStore {
    async fn lookup(&self, credentials: &Credentials) -> Result<Option<Subject>, DomainError> {
        let accounts = self.accounts.read().await;

        match accounts.get(&credentials.username) {
            Some((password, subject)) if *password == credentials.password => {
                Ok(Some(subject.clone()))
            }
            // Unknown username and wrong password are indistinguishable.
            _ => Ok(None),
        }
    }

    async fn is_active(&self, subject_id: Uuid) -> Result<bool, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .any(|(_, subject)| subject.id == subject_id && subject.is_active))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup_matches_registered_account() {
        let store = MockCredentialStore::new();
        let id = store.add_account("alice", "secret").await;

        let found = store
            .lookup(&Credentials::new("alice", "secret"))
            .await
            .unwrap();

        assert_eq!(found.unwrap().id, id);
    }

    #[tokio::test]
    async fn test_lookup_rejects_wrong_password_and_unknown_user_alike() {
        let store = MockCredentialStore::new();
        store.add_account("alice", "secret").await;

        let wrong_password = store
            .lookup(&Credentials::new("alice", "not-the-secret"))
            .await
            .unwrap();
        let unknown_user = store
            .lookup(&Credentials::new("mallory", "secret"))
            .await
            .unwrap();

        assert!(wrong_password.is_none());
        assert!(unknown_user.is_none());
    }

    #[tokio::test]
    async fn test_deactivated_subject_is_not_active() {
        let store = MockCredentialStore::new();
        let id = store.add_account("alice", "secret").await;

        assert!(store.is_active(id).await.unwrap());
        store.deactivate(id).await;
        assert!(!store.is_active(id).await.unwrap());
    }
}
