//! Main vault orchestration

use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::audit::SecurityReport;
use crate::credential::{CredentialRecord, CredentialStore};
use crate::error::{Result, VaultError};
use crate::filter::SearchQuery;
use crate::session::SessionContext;
use crate::settings::StorageBackend;
use crate::storage::{JsonFileStorage, MemoryStorage, VaultStorage};
use crate::strength::{self, StrengthReport};

/// Session-gated access to the credential store.
///
/// Derived views (search results, security report) are recomputed from a
/// fresh snapshot on every call.
pub struct Vault {
    /// Credential store
    credentials: CredentialStore,
    /// Who is signed in
    session: SessionContext,
}

impl Vault {
    /// Create a vault with volatile in-memory storage
    pub fn new() -> Self {
        Self::with_store(CredentialStore::in_memory())
    }

    /// Create a vault around an existing store
    pub fn with_store(credentials: CredentialStore) -> Self {
        Self {
            credentials,
            session: SessionContext::default(),
        }
    }

    /// Open a vault on `storage`, loading any persisted records
    pub async fn open(storage: Arc<dyn VaultStorage>) -> Result<Self> {
        let credentials = CredentialStore::open(storage).await?;
        Ok(Self::with_store(credentials))
    }

    /// Open a vault on the configured backend. `data_dir` is only used by
    /// file storage.
    pub async fn open_backend(backend: StorageBackend, data_dir: &Path) -> Result<Self> {
        let storage: Arc<dyn VaultStorage> = match backend {
            StorageBackend::Memory => Arc::new(MemoryStorage::new()),
            StorageBackend::File => Arc::new(JsonFileStorage::with_dir(data_dir.to_path_buf())?),
        };
        info!("Opening vault with {} backend", storage.backend_name());
        Self::open(storage).await
    }

    /// Name of the storage backend in use
    pub fn backend_name(&self) -> &'static str {
        self.credentials.backend_name()
    }

    /// Current session
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Record that `username` passed remote authentication
    pub fn login(&mut self, username: &str) {
        self.session.login(username);
    }

    /// End the session. Records stay in the store.
    pub fn logout(&mut self) {
        self.session.logout();
    }

    fn ensure_authenticated(&self) -> Result<()> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            Err(VaultError::NotAuthenticated)
        }
    }

    /// Add a record
    pub async fn add(
        &self,
        title: &str,
        username: &str,
        secret: &str,
        website: Option<&str>,
        notes: Option<&str>,
    ) -> Result<CredentialRecord> {
        self.ensure_authenticated()?;
        self.credentials
            .create(title, username, secret, website, notes)
            .await
    }

    /// All records, newest first
    pub async fn list(&self) -> Result<Vec<CredentialRecord>> {
        self.ensure_authenticated()?;
        Ok(self.credentials.list().await)
    }

    /// Delete a record; `false` if no record had that id
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        self.ensure_authenticated()?;
        self.credentials.delete(id).await
    }

    /// Records matching `query`, newest first
    pub async fn search(&self, query: &str) -> Result<Vec<CredentialRecord>> {
        self.ensure_authenticated()?;
        let snapshot = self.credentials.snapshot().await;
        let query = SearchQuery::new(query);

        let matches: Vec<CredentialRecord> = query.filter(&snapshot).into_iter().cloned().collect();
        debug!("Search matched {} of {} records", matches.len(), snapshot.len());
        Ok(matches)
    }

    /// Security overview of the current collection
    pub async fn security_report(&self) -> Result<SecurityReport> {
        self.ensure_authenticated()?;
        let snapshot = self.credentials.snapshot().await;
        let report = SecurityReport::analyze(&snapshot);

        info!(
            "Security report: score {} ({}), {} weak, {} duplicate group(s)",
            report.overall_score,
            report.status,
            report.weak.len(),
            report.duplicates.len()
        );
        Ok(report)
    }

    /// Score an arbitrary secret. Needs no session.
    pub fn strength(&self, secret: &str) -> StrengthReport {
        strength::evaluate(secret)
    }
}

impl Default for Vault {
    fn default() -> Self {
        Self::new()
    }
}
