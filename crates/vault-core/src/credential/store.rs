//! Credential store: the only mutation path for the record collection

use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use super::types::CredentialRecord;
use crate::error::{Result, VaultError};
use crate::storage::{MemoryStorage, VaultStorage};

/// Owns the newest-first record collection.
///
/// Each mutation builds the next collection, persists it, and swaps it in
/// only once the backend accepted it, so a failed save leaves the store
/// unchanged. The write lock is held across the whole sequence.
pub struct CredentialStore {
    /// Storage backend
    storage: Arc<dyn VaultStorage>,
    /// Current collection, newest first
    records: RwLock<Vec<CredentialRecord>>,
}

impl CredentialStore {
    /// Create an empty store backed by `storage`
    pub fn new(storage: Arc<dyn VaultStorage>) -> Self {
        Self {
            storage,
            records: RwLock::new(Vec::new()),
        }
    }

    /// Create a store with the default volatile backend
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Create a store populated from whatever `storage` already holds.
    ///
    /// Loaded records must have their required fields and unique ids;
    /// otherwise the store is not opened.
    pub async fn open(storage: Arc<dyn VaultStorage>) -> Result<Self> {
        let records = storage.load().await?;
        check_loaded(&records)?;
        debug!(
            "Opened credential store with {} records ({})",
            records.len(),
            storage.backend_name()
        );

        Ok(Self {
            storage,
            records: RwLock::new(records),
        })
    }

    /// Validate and add a new record at the front of the collection
    pub async fn create(
        &self,
        title: &str,
        username: &str,
        secret: &str,
        website: Option<&str>,
        notes: Option<&str>,
    ) -> Result<CredentialRecord> {
        let record = CredentialRecord::new(title, username, secret, website, notes)?;

        let mut records = self.records.write().await;
        let mut next = Vec::with_capacity(records.len() + 1);
        next.push(record.clone());
        next.extend(records.iter().cloned());

        self.storage.save(&next).await?;
        *records = next;

        info!("Added credential: {} ({})", record.title, record.id);
        Ok(record)
    }

    /// All records, newest first
    pub async fn list(&self) -> Vec<CredentialRecord> {
        self.records.read().await.clone()
    }

    /// Consistent copy of the collection for derived computations
    pub async fn snapshot(&self) -> Vec<CredentialRecord> {
        self.list().await
    }

    /// Get a record by ID
    pub async fn get(&self, id: Uuid) -> Option<CredentialRecord> {
        self.records.read().await.iter().find(|r| r.id == id).cloned()
    }

    /// Remove the record with `id`. Returns whether anything was removed;
    /// a missing id is not an error.
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut records = self.records.write().await;

        if !records.iter().any(|r| r.id == id) {
            debug!("Delete requested for unknown credential: {}", id);
            return Ok(false);
        }

        let next: Vec<CredentialRecord> = records.iter().filter(|r| r.id != id).cloned().collect();

        self.storage.save(&next).await?;
        *records = next;

        info!("Deleted credential: {}", id);
        Ok(true)
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Name of the storage backend in use
    pub fn backend_name(&self) -> &'static str {
        self.storage.backend_name()
    }
}

fn check_loaded(records: &[CredentialRecord]) -> Result<()> {
    let mut seen = HashSet::with_capacity(records.len());

    for record in records {
        record.validate().map_err(|e| {
            VaultError::StorageError(format!("Invalid stored record {}: {}", record.id, e))
        })?;

        if !seen.insert(record.id) {
            return Err(VaultError::StorageError(format!(
                "Duplicate stored record id {}",
                record.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::JsonFileStorage;
    use async_trait::async_trait;
    use tempfile::TempDir;

    /// Backend that rejects every save
    struct FailingStorage;

    #[async_trait]
    impl VaultStorage for FailingStorage {
        async fn load(&self) -> Result<Vec<CredentialRecord>> {
            Ok(Vec::new())
        }

        async fn save(&self, _records: &[CredentialRecord]) -> Result<()> {
            Err(VaultError::StorageError("disk full".to_string()))
        }

        async fn clear(&self) -> Result<()> {
            Ok(())
        }

        fn is_persistent(&self) -> bool {
            true
        }

        fn backend_name(&self) -> &'static str {
            "failing"
        }
    }

    #[tokio::test]
    async fn test_create_prepends() {
        let store = CredentialStore::in_memory();

        let a = store.create("A", "alice", "pw-a", None, None).await.unwrap();
        let b = store.create("B", "bob", "pw-b", None, None).await.unwrap();

        let ids: Vec<Uuid> = store.list().await.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }

    #[tokio::test]
    async fn test_create_empty_username_leaves_store_unchanged() {
        let store = CredentialStore::in_memory();
        store.create("A", "alice", "pw", None, None).await.unwrap();

        let result = store.create("B", "", "pw", None, None).await;
        assert!(matches!(result, Err(VaultError::Validation(_))));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_delete_existing() {
        let store = CredentialStore::in_memory();
        let a = store.create("A", "alice", "pw-a", None, None).await.unwrap();
        let b = store.create("B", "bob", "pw-b", None, None).await.unwrap();

        assert!(store.delete(a.id).await.unwrap());

        let remaining = store.list().await;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, b.id);
        assert!(store.get(a.id).await.is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_is_noop() {
        let store = CredentialStore::in_memory();
        store.create("A", "alice", "pw-a", None, None).await.unwrap();
        store.create("B", "bob", "pw-b", None, None).await.unwrap();
        let before: Vec<Uuid> = store.list().await.iter().map(|r| r.id).collect();

        assert!(!store.delete(Uuid::new_v4()).await.unwrap());

        let after: Vec<Uuid> = store.list().await.iter().map(|r| r.id).collect();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_failed_save_is_atomic() {
        let store = CredentialStore::new(Arc::new(FailingStorage));

        let result = store.create("A", "alice", "pw", None, None).await;
        assert!(matches!(result, Err(VaultError::StorageError(_))));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_open_restores_persisted_records() {
        let temp_dir = TempDir::new().unwrap();
        let created = {
            let storage = JsonFileStorage::with_dir(temp_dir.path().to_path_buf()).unwrap();
            let store = CredentialStore::new(Arc::new(storage));
            store.create("A", "alice", "pw-a", None, None).await.unwrap();
            store.create("B", "bob", "pw-b", None, Some("note")).await.unwrap()
        };

        let storage = JsonFileStorage::with_dir(temp_dir.path().to_path_buf()).unwrap();
        let store = CredentialStore::open(Arc::new(storage)).await.unwrap();

        let records = store.list().await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, created.id);
        assert_eq!(records[0].notes.as_deref(), Some("note"));
        assert_eq!(store.backend_name(), "JSON File Storage");
    }

    fn write_vault_file(dir: &TempDir, records: serde_json::Value) -> JsonFileStorage {
        let storage = JsonFileStorage::with_dir(dir.path().to_path_buf()).unwrap();
        let file = serde_json::json!({ "version": 1, "records": records });
        std::fs::write(storage.storage_file_path(), file.to_string()).unwrap();
        storage
    }

    #[tokio::test]
    async fn test_open_rejects_record_with_empty_fields() {
        let temp_dir = TempDir::new().unwrap();
        let storage = write_vault_file(
            &temp_dir,
            serde_json::json!([{
                "id": "6f1c2d8e-0a4b-4c7e-9d2f-1b3a5c7e9f01",
                "title": "",
                "username": "",
                "secret": "",
                "createdAt": "2024-01-01T00:00:00Z"
            }]),
        );

        let result = CredentialStore::open(Arc::new(storage)).await;
        assert!(matches!(result, Err(VaultError::StorageError(_))));
    }

    #[tokio::test]
    async fn test_open_rejects_duplicate_ids() {
        let temp_dir = TempDir::new().unwrap();
        let id = "6f1c2d8e-0a4b-4c7e-9d2f-1b3a5c7e9f01";
        let storage = write_vault_file(
            &temp_dir,
            serde_json::json!([
                { "id": id, "title": "A", "username": "a", "secret": "pw-a",
                  "createdAt": "2024-01-01T00:00:00Z" },
                { "id": id, "title": "dup", "username": "b", "secret": "pw-b",
                  "createdAt": "2024-01-02T00:00:00Z" }
            ]),
        );

        match CredentialStore::open(Arc::new(storage)).await {
            Err(VaultError::StorageError(message)) => assert!(message.contains("Duplicate")),
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("store opened with duplicate ids"),
        }
    }
}
