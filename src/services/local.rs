// ABOUTME: JSON-on-disk session and document store used by the terminal app
// Layout: <data_dir>/session.json, accounts.json, collections/<collection>/<id>.json

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

use super::{check_key, DocumentStore, Identity, Record, ServiceError, ServiceResult, SessionService};

const SESSION_FILE: &str = "session.json";
const ACCOUNTS_FILE: &str = "accounts.json";
const COLLECTIONS_DIR: &str = "collections";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionFile {
    identity: Identity,
    signed_in_at: DateTime<Utc>,
}

/// Read a JSON file, treating a missing file as `None`
async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> ServiceResult<Option<T>> {
    match fs::read(path).await {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Write through a temp file and rename so readers never see a partial document
async fn write_json<T: Serialize>(path: &Path, value: &T) -> ServiceResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, serde_json::to_vec_pretty(value)?).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}

async fn remove_if_exists(path: &Path) -> ServiceResult<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[derive(Debug, Clone)]
pub struct LocalSession {
    data_dir: PathBuf,
}

impl LocalSession {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn session_path(&self) -> PathBuf {
        self.data_dir.join(SESSION_FILE)
    }

    fn accounts_path(&self) -> PathBuf {
        self.data_dir.join(ACCOUNTS_FILE)
    }

    async fn accounts(&self) -> ServiceResult<HashMap<String, String>> {
        Ok(read_json(&self.accounts_path()).await?.unwrap_or_default())
    }
}

#[async_trait]
impl SessionService for LocalSession {
    async fn current_user(&self) -> ServiceResult<Option<Identity>> {
        let session: Option<SessionFile> = read_json(&self.session_path()).await?;
        Ok(session.map(|s| s.identity))
    }

    async fn sign_in(&self, phone: &str) -> ServiceResult<Identity> {
        let mut accounts = self.accounts().await?;
        let uid = accounts
            .entry(phone.to_string())
            .or_insert_with(|| Uuid::new_v4().to_string())
            .clone();
        write_json(&self.accounts_path(), &accounts).await?;

        let identity = Identity {
            uid,
            phone: phone.to_string(),
        };
        let session = SessionFile {
            identity: identity.clone(),
            signed_in_at: Utc::now(),
        };
        write_json(&self.session_path(), &session).await?;
        info!(uid = %identity.uid, "signed in");
        Ok(identity)
    }

    async fn sign_out(&self) -> ServiceResult<()> {
        remove_if_exists(&self.session_path()).await?;
        info!("signed out");
        Ok(())
    }

    async fn delete_account(&self) -> ServiceResult<()> {
        let identity = self.current_user().await?.ok_or(ServiceError::NotSignedIn)?;
        let mut accounts = self.accounts().await?;
        accounts.remove(&identity.phone);
        write_json(&self.accounts_path(), &accounts).await?;
        remove_if_exists(&self.session_path()).await?;
        info!(uid = %identity.uid, "account deleted");
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct LocalStore {
    data_dir: PathBuf,
}

impl LocalStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn document_path(&self, collection: &str, id: &str) -> ServiceResult<PathBuf> {
        check_key(collection)?;
        check_key(id)?;
        Ok(self
            .data_dir
            .join(COLLECTIONS_DIR)
            .join(collection)
            .join(format!("{}.json", id)))
    }
}

#[async_trait]
impl DocumentStore for LocalStore {
    async fn get(&self, collection: &str, id: &str) -> ServiceResult<Option<Record>> {
        let path = self.document_path(collection, id)?;
        debug!(collection, id, "document read");
        read_json(&path).await
    }

    async fn set(&self, collection: &str, id: &str, record: Record) -> ServiceResult<()> {
        let path = self.document_path(collection, id)?;
        write_json(&path, &record).await?;
        debug!(collection, id, "document written");
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> ServiceResult<()> {
        let path = self.document_path(collection, id)?;
        remove_if_exists(&path).await?;
        debug!(collection, id, "document deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_session_survives_new_instance() {
        let dir = TempDir::new().unwrap();
        let identity = LocalSession::new(dir.path()).sign_in("9876543210").await.unwrap();

        let reopened = LocalSession::new(dir.path());
        assert_eq!(reopened.current_user().await.unwrap(), Some(identity.clone()));

        reopened.sign_out().await.unwrap();
        assert!(reopened.current_user().await.unwrap().is_none());
        // Sign-out is idempotent
        reopened.sign_out().await.unwrap();

        let again = reopened.sign_in("9876543210").await.unwrap();
        assert_eq!(again.uid, identity.uid);
    }

    #[tokio::test]
    async fn test_delete_account_forgets_uid() {
        let dir = TempDir::new().unwrap();
        let session = LocalSession::new(dir.path());
        let first = session.sign_in("9876543210").await.unwrap();
        session.delete_account().await.unwrap();
        assert!(session.current_user().await.unwrap().is_none());

        let second = session.sign_in("9876543210").await.unwrap();
        assert_ne!(first.uid, second.uid);
    }

    #[tokio::test]
    async fn test_store_round_trip_on_disk() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::new(dir.path());
        assert!(store.get("users", "u1").await.unwrap().is_none());

        store.set("users", "u1", json!({"email": "asha@luyona.app"})).await.unwrap();
        assert!(dir.path().join("collections/users/u1.json").exists());
        assert_eq!(
            store.get("users", "u1").await.unwrap(),
            Some(json!({"email": "asha@luyona.app"}))
        );

        store.delete("users", "u1").await.unwrap();
        store.delete("users", "u1").await.unwrap();
        assert!(store.get("users", "u1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_rejects_path_like_ids() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::new(dir.path());
        assert!(matches!(
            store.set("users", "../escape", json!({})).await,
            Err(ServiceError::Backend(_))
        ));
    }

    #[tokio::test]
    async fn test_corrupt_document_is_serialization_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("collections/users/u1.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{not json").unwrap();

        let store = LocalStore::new(dir.path());
        assert!(matches!(
            store.get("users", "u1").await,
            Err(ServiceError::Serialization(_))
        ));
    }
}
