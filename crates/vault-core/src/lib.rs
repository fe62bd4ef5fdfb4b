//! # vault-core
//!
//! Core vault functionality for Passvault including:
//! - Credential store with newest-first ordering and validated creation
//! - Per-secret strength scoring and vault-wide security analysis
//! - Case-insensitive search over stored records
//! - Pluggable storage (volatile in-memory by default, JSON file optional)

pub mod audit;
pub mod credential;
pub mod error;
pub mod filter;
pub mod generator;
pub mod session;
pub mod settings;
pub mod storage;
pub mod strength;
mod vault;

pub use audit::{DuplicateGroup, Recommendation, SecurityReport, SecurityStatus};
pub use credential::{CredentialRecord, CredentialStore, Secret};
pub use error::{Result, VaultError};
pub use filter::SearchQuery;
pub use generator::generate_secret;
pub use session::SessionContext;
pub use settings::{Settings, SettingsManager, StorageBackend};
pub use storage::{JsonFileStorage, MemoryStorage, VaultStorage};
pub use strength::{evaluate, StrengthCategory, StrengthReport};
pub use vault::Vault;
