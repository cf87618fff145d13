// ABOUTME: Collaborator contracts consumed by the onboarding screens
// Session/identity, document store and navigation, plus local and in-memory backends

pub mod local;
pub mod memory;
pub mod navigation;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use local::{LocalSession, LocalStore};
pub use memory::{MemorySession, MemoryStore};
pub use navigation::{Navigator, Route};

#[cfg(test)]
pub use navigation::MockNavigator;

/// Collection holding one profile document per identity
pub const USERS_COLLECTION: &str = "users";

/// Opaque document payload
pub type Record = serde_json::Value;

/// Failures raised by session and document-store calls
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not signed in")]
    NotSignedIn,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("backend error: {0}")]
    Backend(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Signed-in identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: String,
    pub phone: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionService: Send + Sync {
    /// The signed-in identity, if any
    async fn current_user(&self) -> ServiceResult<Option<Identity>>;

    /// Start a session for a verified phone number
    async fn sign_in(&self, phone: &str) -> ServiceResult<Identity>;

    async fn sign_out(&self) -> ServiceResult<()>;

    /// Remove the signed-in account and end its session
    async fn delete_account(&self) -> ServiceResult<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// `Ok(None)` when the document does not exist
    async fn get(&self, collection: &str, id: &str) -> ServiceResult<Option<Record>>;

    async fn set(&self, collection: &str, id: &str, record: Record) -> ServiceResult<()>;

    async fn delete(&self, collection: &str, id: &str) -> ServiceResult<()>;
}

/// Collaborator handles passed explicitly into the app
#[derive(Clone)]
pub struct Services {
    pub session: Arc<dyn SessionService>,
    pub store: Arc<dyn DocumentStore>,
}

impl Services {
    pub fn new(session: Arc<dyn SessionService>, store: Arc<dyn DocumentStore>) -> Self {
        Self { session, store }
    }

    /// Fresh in-memory backends with nobody signed in
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySession::new()), Arc::new(MemoryStore::new()))
    }

    /// JSON-on-disk backends rooted at `data_dir`
    pub fn local(data_dir: impl Into<std::path::PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self::new(
            Arc::new(LocalSession::new(data_dir.clone())),
            Arc::new(LocalStore::new(data_dir)),
        )
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}

/// Reject ids that could escape a collection directory
pub(crate) fn check_key(key: &str) -> ServiceResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ServiceError::Backend(format!("invalid document key '{}'", key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_key() {
        assert!(check_key("users").is_ok());
        assert!(check_key("3f2b-9a_x").is_ok());
        assert!(check_key("").is_err());
        assert!(check_key("../etc").is_err());
        assert!(check_key("a/b").is_err());
    }

    #[tokio::test]
    async fn test_mock_store_not_found_is_ok_none() {
        let mut store = MockDocumentStore::new();
        store
            .expect_get()
            .withf(|c, id| c == USERS_COLLECTION && id == "u1")
            .times(1)
            .returning(|_, _| Ok(None));
        assert!(store.get(USERS_COLLECTION, "u1").await.unwrap().is_none());
    }
}
