//! # vault-cli
//!
//! Command line front-end for Passvault: the authentication service client
//! and a JSON-lines vault session over stdio.

pub mod auth;
pub mod protocol;
pub mod transport;

pub use auth::{AuthClient, AuthError};
pub use protocol::{RequestHandler, VaultRequest, VaultResponse};
pub use transport::StdioSession;
