//! Error types for vault-core

use thiserror::Error;

/// Result type alias for vault operations
pub type Result<T> = std::result::Result<T, VaultError>;

/// Vault error types
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Not logged in - authenticate before accessing the vault")]
    NotAuthenticated,

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl VaultError {
    /// Whether this error was caused by caller input rather than a system fault
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
