//! Volatile in-memory storage backend

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::VaultStorage;
use crate::credential::CredentialRecord;
use crate::error::Result;

/// In-memory storage. Contents are lost when the process exits.
#[derive(Default)]
pub struct MemoryStorage {
    records: RwLock<Vec<CredentialRecord>>,
}

impl MemoryStorage {
    /// Create an empty in-memory storage
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VaultStorage for MemoryStorage {
    async fn load(&self) -> Result<Vec<CredentialRecord>> {
        Ok(self.records.read().await.clone())
    }

    async fn save(&self, records: &[CredentialRecord]) -> Result<()> {
        *self.records.write().await = records.to_vec();
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.records.write().await.clear();
        Ok(())
    }

    fn is_persistent(&self) -> bool {
        false
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_and_load() {
        let storage = MemoryStorage::new();
        assert!(storage.load().await.unwrap().is_empty());

        let record = CredentialRecord::new("A", "u", "s", None, None).unwrap();
        storage.save(&[record.clone()]).await.unwrap();

        let loaded = storage.load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, record.id);

        storage.clear().await.unwrap();
        assert!(storage.load().await.unwrap().is_empty());
        assert!(!storage.is_persistent());
    }
}
