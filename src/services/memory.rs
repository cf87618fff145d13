// ABOUTME: In-memory session and document store backends
// Used by tests and demos; both can be switched offline to simulate backend failures

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::{check_key, DocumentStore, Identity, Record, ServiceError, ServiceResult, SessionService};

fn offline_error() -> ServiceError {
    ServiceError::Backend("service unavailable".to_string())
}

#[derive(Debug, Default)]
pub struct MemorySession {
    current: RwLock<Option<Identity>>,
    /// phone -> uid, so signing in again reuses the account
    accounts: RwLock<HashMap<String, String>>,
    offline: AtomicBool,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start already signed in as `identity`
    pub fn signed_in(identity: Identity) -> Self {
        let mut accounts = HashMap::new();
        accounts.insert(identity.phone.clone(), identity.uid.clone());
        Self {
            current: RwLock::new(Some(identity)),
            accounts: RwLock::new(accounts),
            offline: AtomicBool::new(false),
        }
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> ServiceResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(offline_error())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SessionService for MemorySession {
    async fn current_user(&self) -> ServiceResult<Option<Identity>> {
        self.check_online()?;
        Ok(self.current.read().await.clone())
    }

    async fn sign_in(&self, phone: &str) -> ServiceResult<Identity> {
        self.check_online()?;
        let uid = self
            .accounts
            .write()
            .await
            .entry(phone.to_string())
            .or_insert_with(|| Uuid::new_v4().to_string())
            .clone();
        let identity = Identity {
            uid,
            phone: phone.to_string(),
        };
        *self.current.write().await = Some(identity.clone());
        debug!(uid = %identity.uid, "memory session signed in");
        Ok(identity)
    }

    async fn sign_out(&self) -> ServiceResult<()> {
        self.check_online()?;
        *self.current.write().await = None;
        Ok(())
    }

    async fn delete_account(&self) -> ServiceResult<()> {
        self.check_online()?;
        let identity = self.current.write().await.take().ok_or(ServiceError::NotSignedIn)?;
        self.accounts.write().await.remove(&identity.phone);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<(String, String), Record>>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of stored documents across all collections
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    fn check_online(&self) -> ServiceResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(offline_error())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> ServiceResult<Option<Record>> {
        self.check_online()?;
        check_key(collection)?;
        check_key(id)?;
        let key = (collection.to_string(), id.to_string());
        Ok(self.documents.read().await.get(&key).cloned())
    }

    async fn set(&self, collection: &str, id: &str, record: Record) -> ServiceResult<()> {
        self.check_online()?;
        check_key(collection)?;
        check_key(id)?;
        self.documents
            .write()
            .await
            .insert((collection.to_string(), id.to_string()), record);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> ServiceResult<()> {
        self.check_online()?;
        check_key(collection)?;
        check_key(id)?;
        self.documents
            .write()
            .await
            .remove(&(collection.to_string(), id.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_sign_in_reuses_uid_for_same_phone() {
        let session = MemorySession::new();
        assert!(session.current_user().await.unwrap().is_none());

        let first = session.sign_in("9876543210").await.unwrap();
        session.sign_out().await.unwrap();
        let second = session.sign_in("9876543210").await.unwrap();
        assert_eq!(first.uid, second.uid);
        assert_eq!(session.current_user().await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn test_delete_account_requires_session() {
        let session = MemorySession::new();
        assert!(matches!(
            session.delete_account().await,
            Err(ServiceError::NotSignedIn)
        ));
    }

    #[tokio::test]
    async fn test_store_set_get_delete() {
        let store = MemoryStore::new();
        assert!(store.get("users", "u1").await.unwrap().is_none());
        store.set("users", "u1", json!({"first_name": "Asha"})).await.unwrap();
        assert_eq!(
            store.get("users", "u1").await.unwrap(),
            Some(json!({"first_name": "Asha"}))
        );
        store.delete("users", "u1").await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_offline_backends_fail() {
        let store = MemoryStore::new();
        store.set_offline(true);
        assert!(matches!(
            store.get("users", "u1").await,
            Err(ServiceError::Backend(_))
        ));

        let session = MemorySession::new();
        session.set_offline(true);
        assert!(session.sign_in("9876543210").await.is_err());
    }
}
