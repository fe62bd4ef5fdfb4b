//! Application settings management
//!
//! Stores non-sensitive configuration in a plain JSON file next to the
//! vault data. Missing files and missing keys fall back to defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

use crate::error::{Result, VaultError};
use crate::generator;
use crate::storage::write_atomic;

const SETTINGS_FILE: &str = "settings.json";
const DEFAULT_AUTH_URL: &str = "http://localhost:8000";

/// Where credential records are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Process memory only
    #[default]
    Memory,
    /// JSON file in the data directory
    File,
}

impl FromStr for StorageBackend {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            other => Err(VaultError::Validation(format!(
                "unknown storage backend '{}' (expected 'memory' or 'file')",
                other
            ))),
        }
    }
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Settings file version
    pub version: u32,
    /// Base URL of the authentication service
    pub auth_url: String,
    /// Record storage backend
    pub storage: StorageBackend,
    /// Length of generated secrets
    pub generated_length: usize,
    /// HTTP timeout for authentication requests
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: 1,
            auth_url: DEFAULT_AUTH_URL.to_string(),
            storage: StorageBackend::default(),
            generated_length: generator::DEFAULT_LENGTH,
            request_timeout_secs: 30,
        }
    }
}

/// Settings manager
pub struct SettingsManager {
    settings_file: PathBuf,
    settings: Settings,
}

impl SettingsManager {
    /// Load settings from `storage_dir`, using defaults if none are saved
    pub fn new(storage_dir: &Path) -> Result<Self> {
        let settings_file = storage_dir.join(SETTINGS_FILE);
        let settings = Self::load_from_file(&settings_file)?;

        Ok(Self {
            settings_file,
            settings,
        })
    }

    fn load_from_file(path: &Path) -> Result<Settings> {
        if !path.exists() {
            debug!("No settings file found, using defaults");
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&contents)?;
        debug!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Save settings to file
    pub async fn save(&self) -> Result<()> {
        if let Some(parent) = self.settings_file.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let contents = serde_json::to_string_pretty(&self.settings)?;
        write_atomic(&self.settings_file, contents.as_bytes()).await?;

        debug!("Saved settings to {:?}", self.settings_file);
        Ok(())
    }

    /// Get current settings
    pub fn get(&self) -> &Settings {
        &self.settings
    }

    /// Get mutable settings
    pub fn get_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_settings_default() {
        let temp_dir = TempDir::new().unwrap();
        let manager = SettingsManager::new(temp_dir.path()).unwrap();

        let settings = manager.get();
        assert_eq!(settings.auth_url, "http://localhost:8000");
        assert_eq!(settings.storage, StorageBackend::Memory);
        assert_eq!(settings.generated_length, 16);
    }

    #[tokio::test]
    async fn test_settings_persistence() {
        let temp_dir = TempDir::new().unwrap();

        {
            let mut manager = SettingsManager::new(temp_dir.path()).unwrap();
            manager.get_mut().storage = StorageBackend::File;
            manager.get_mut().auth_url = "https://auth.example.com".to_string();
            manager.save().await.unwrap();
        }

        let manager = SettingsManager::new(temp_dir.path()).unwrap();
        assert_eq!(manager.get().storage, StorageBackend::File);
        assert_eq!(manager.get().auth_url, "https://auth.example.com");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("settings.json"), r#"{"storage":"file"}"#).unwrap();

        let manager = SettingsManager::new(temp_dir.path()).unwrap();
        assert_eq!(manager.get().storage, StorageBackend::File);
        assert_eq!(manager.get().request_timeout_secs, 30);
    }

    #[test]
    fn test_storage_backend_from_str() {
        assert_eq!("memory".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
        assert_eq!("FILE".parse::<StorageBackend>().unwrap(), StorageBackend::File);
        assert!("keychain".parse::<StorageBackend>().is_err());
    }
}
