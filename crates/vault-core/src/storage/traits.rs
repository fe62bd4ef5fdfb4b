//! Storage trait definitions

use async_trait::async_trait;

use crate::credential::CredentialRecord;
use crate::error::Result;

/// Trait for credential storage backends.
///
/// Backends persist the whole collection at once; the store hands them the
/// complete newest-first snapshot on every mutation.
#[async_trait]
pub trait VaultStorage: Send + Sync {
    /// Load the persisted collection (newest first)
    async fn load(&self) -> Result<Vec<CredentialRecord>>;

    /// Replace the persisted collection
    async fn save(&self, records: &[CredentialRecord]) -> Result<()>;

    /// Clear all stored data
    async fn clear(&self) -> Result<()>;

    /// Whether records survive a process restart
    fn is_persistent(&self) -> bool;

    /// Get a human-readable name for this storage backend
    fn backend_name(&self) -> &'static str;
}
