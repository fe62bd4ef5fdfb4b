//! Session context
//!
//! Tracks who is signed in. The remote authentication exchange happens
//! outside this crate; callers record its successful outcome here and pass
//! the context to whatever needs it.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

/// Name shown when no username is known
const FALLBACK_DISPLAY_NAME: &str = "User";

/// Who, if anyone, is signed in
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionContext {
    #[default]
    Anonymous,
    Authenticated {
        username: String,
        since: DateTime<Utc>,
    },
}

impl SessionContext {
    /// Record a successful authentication for `username`
    pub fn login(&mut self, username: &str) {
        *self = Self::Authenticated {
            username: username.to_string(),
            since: Utc::now(),
        };
        info!("Session started for {}", username);
    }

    /// Drop back to anonymous
    pub fn logout(&mut self) {
        if let Self::Authenticated { username, .. } = self {
            info!("Session ended for {}", username);
        }
        *self = Self::Anonymous;
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Self::Authenticated { username, .. } => Some(username),
            Self::Anonymous => None,
        }
    }

    /// Username for greetings, falling back to "User"
    pub fn display_name(&self) -> &str {
        match self.username() {
            Some(name) if !name.is_empty() => name,
            _ => FALLBACK_DISPLAY_NAME,
        }
    }
}
