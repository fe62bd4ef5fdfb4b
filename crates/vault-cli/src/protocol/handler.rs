//! Request handler

use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::types::*;
use vault_core::{generate_secret, Vault, VaultError};

/// Dispatches protocol requests to the vault
pub struct RequestHandler {
    /// Vault reference
    vault: Arc<RwLock<Vault>>,
    /// Length used when a generate request gives none
    generated_length: usize,
}

impl RequestHandler {
    /// Create a new request handler
    pub fn new(vault: Arc<RwLock<Vault>>, generated_length: usize) -> Self {
        Self {
            vault,
            generated_length,
        }
    }

    /// Handle one request
    pub async fn handle(&self, request: VaultRequest) -> VaultResponse {
        match self.dispatch(request).await {
            Ok(response) => response,
            Err(err) => {
                if !err.is_validation() {
                    warn!("Request failed: {}", err);
                }
                VaultResponse::from(err)
            }
        }
    }

    async fn dispatch(&self, request: VaultRequest) -> Result<VaultResponse, VaultError> {
        match request {
            VaultRequest::Add {
                title,
                username,
                secret,
                website,
                notes,
            } => {
                let vault = self.vault.read().await;
                let record = vault
                    .add(&title, &username, &secret, website.as_deref(), notes.as_deref())
                    .await?;
                Ok(VaultResponse::success(json!(RecordView::new(&record, false))))
            }
            VaultRequest::List { reveal } => {
                let vault = self.vault.read().await;
                let records = vault.list().await?;
                let views: Vec<RecordView> =
                    records.iter().map(|r| RecordView::new(r, reveal)).collect();
                Ok(VaultResponse::success(json!(views)))
            }
            VaultRequest::Delete { id } => {
                let vault = self.vault.read().await;
                let removed = vault.delete(id).await?;
                Ok(VaultResponse::success(json!({ "removed": removed })))
            }
            VaultRequest::Search { query, reveal } => {
                let vault = self.vault.read().await;
                let records = vault.search(&query).await?;
                let views: Vec<RecordView> =
                    records.iter().map(|r| RecordView::new(r, reveal)).collect();
                Ok(VaultResponse::success(json!(views)))
            }
            VaultRequest::Report { reveal } => {
                let vault = self.vault.read().await;
                let report = vault.security_report().await?;
                Ok(VaultResponse::success(json!(ReportView::new(&report, reveal))))
            }
            VaultRequest::Strength { secret } => {
                let vault = self.vault.read().await;
                Ok(VaultResponse::success(json!(vault.strength(&secret))))
            }
            VaultRequest::Generate { length } => {
                let secret = generate_secret(length.unwrap_or(self.generated_length))?;
                Ok(VaultResponse::success(json!({ "secret": secret.expose() })))
            }
            VaultRequest::Whoami => {
                let vault = self.vault.read().await;
                Ok(VaultResponse::success(json!({
                    "session": vault.session(),
                    "displayName": vault.session().display_name(),
                })))
            }
            VaultRequest::Logout => {
                let mut vault = self.vault.write().await;
                vault.logout();
                debug!("Logout handled");
                Ok(VaultResponse::success(json!({ "loggedOut": true })))
            }
        }
    }
}
