//! JSON file storage backend
//!
//! Stores the credential collection in a single versioned JSON file in the
//! user's data directory. Values are written in plaintext.

use async_trait::async_trait;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::VaultStorage;
use crate::credential::CredentialRecord;
use crate::error::{Result, VaultError};

const STORAGE_FILE: &str = "vault.json";
const FORMAT_VERSION: u32 = 1;

/// File format for persistent storage
#[derive(Debug, Serialize, Deserialize)]
struct StorageFile {
    version: u32,
    records: Vec<CredentialRecord>,
}

/// JSON file storage backend
pub struct JsonFileStorage {
    /// Directory for storage files
    storage_dir: PathBuf,
}

impl JsonFileStorage {
    /// Create with a custom storage directory
    pub fn with_dir(storage_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&storage_dir)?;

        debug!("File storage initialized at: {:?}", storage_dir);
        Ok(Self { storage_dir })
    }

    /// Get the path to the storage file
    pub fn storage_file_path(&self) -> PathBuf {
        self.storage_dir.join(STORAGE_FILE)
    }
}

/// Platform data directory for Passvault files
pub fn default_data_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "passvault", "passvault")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| VaultError::StorageError("Could not determine data directory".to_string()))
}

/// Write `contents` to `path` via a temp file and rename.
pub(crate) async fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let temp_path = path.with_extension("tmp");

    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(&temp_path).await?;

    // A leftover temp file keeps its old mode; tighten it before writing
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600)).await?;
    }

    file.write_all(contents).await?;
    file.sync_all().await?;
    drop(file);

    tokio::fs::rename(&temp_path, path).await?;
    Ok(())
}

#[async_trait]
impl VaultStorage for JsonFileStorage {
    async fn load(&self) -> Result<Vec<CredentialRecord>> {
        let path = self.storage_file_path();

        if !path.exists() {
            debug!("No existing storage file found");
            return Ok(Vec::new());
        }

        let contents = tokio::fs::read_to_string(&path).await?;
        let file: StorageFile = serde_json::from_str(&contents)?;

        if file.version != FORMAT_VERSION {
            return Err(VaultError::StorageError(format!(
                "Unsupported storage format version {}",
                file.version
            )));
        }

        debug!("Loaded {} records from storage", file.records.len());
        Ok(file.records)
    }

    async fn save(&self, records: &[CredentialRecord]) -> Result<()> {
        let file = StorageFile {
            version: FORMAT_VERSION,
            records: records.to_vec(),
        };

        let contents = serde_json::to_string_pretty(&file)?;
        write_atomic(&self.storage_file_path(), contents.as_bytes()).await?;

        debug!("Saved {} records to storage", records.len());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let path = self.storage_file_path();
        if path.exists() {
            tokio::fs::remove_file(&path).await?;
            debug!("Removed storage file");
        }
        Ok(())
    }

    fn is_persistent(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "JSON File Storage"
    }
}
