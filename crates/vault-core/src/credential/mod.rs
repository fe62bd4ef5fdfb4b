//! Credential records and the store that owns them

mod store;
mod types;

pub use store::CredentialStore;
pub use types::*;
