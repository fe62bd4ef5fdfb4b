//! Credential type definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Result, VaultError};

/// Secret value - automatically zeroed when dropped
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret {
    value: String,
}

impl Secret {
    /// Wrap a secret value
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }

    /// Get the secret value (use carefully)
    pub fn expose(&self) -> &str {
        &self.value
    }

    /// Masked form for display, one bullet per character
    pub fn masked(&self) -> String {
        "•".repeat(self.value.chars().count())
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// A stored credential. Records are never edited after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    /// Unique identifier, stable for the record's lifetime
    pub id: Uuid,

    /// Display label (e.g., "Gmail")
    pub title: String,

    /// Account identifier
    pub username: String,

    /// The password itself
    pub secret: Secret,

    /// Optional site URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    /// Optional free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl CredentialRecord {
    /// Validate the input fields and build a new record.
    ///
    /// `title`, `username` and `secret` must be non-empty. Optional fields
    /// supplied as empty strings are stored as absent.
    pub fn new(
        title: &str,
        username: &str,
        secret: &str,
        website: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Self> {
        check_required(title, username, secret)?;

        Ok(Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            username: username.to_string(),
            secret: Secret::new(secret),
            website: non_empty(website),
            notes: non_empty(notes),
            created_at: Utc::now(),
        })
    }
}

impl CredentialRecord {
    /// Check the required fields of an existing record, e.g. one read back
    /// from storage
    pub fn validate(&self) -> Result<()> {
        check_required(&self.title, &self.username, self.secret.expose())
    }
}

fn check_required(title: &str, username: &str, secret: &str) -> Result<()> {
    let missing: Vec<&str> = [("title", title), ("username", username), ("secret", secret)]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(VaultError::Validation(format!(
            "please fill in all required fields (missing: {})",
            missing.join(", ")
        )))
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record() {
        let record = CredentialRecord::new(
            "Gmail",
            "me@example.com",
            "hunter2",
            Some("https://mail.google.com"),
            None,
        )
        .unwrap();

        assert_eq!(record.title, "Gmail");
        assert_eq!(record.username, "me@example.com");
        assert_eq!(record.secret.expose(), "hunter2");
        assert_eq!(record.website.as_deref(), Some("https://mail.google.com"));
        assert!(record.notes.is_none());
    }

    #[test]
    fn test_missing_fields_rejected() {
        let err = CredentialRecord::new("", "user", "", None, None).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("title, secret"));
    }

    #[test]
    fn test_empty_optionals_are_absent() {
        let record = CredentialRecord::new("A", "u", "s", Some(""), Some("")).unwrap();
        assert!(record.website.is_none());
        assert!(record.notes.is_none());
    }

    #[test]
    fn test_validate_existing_record() {
        let mut record = CredentialRecord::new("A", "u", "s", None, None).unwrap();
        assert!(record.validate().is_ok());

        record.username.clear();
        let err = record.validate().unwrap_err();
        assert!(err.to_string().contains("missing: username"));
    }

    #[test]
    fn test_unique_ids() {
        let a = CredentialRecord::new("A", "u", "s", None, None).unwrap();
        let b = CredentialRecord::new("A", "u", "s", None, None).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_secret_is_redacted() {
        let secret = Secret::new("topsecret");
        assert_eq!(format!("{:?}", secret), "[REDACTED]");
        assert_eq!(secret.masked().chars().count(), 9);
    }

    #[test]
    fn test_record_serializes_secret_transparently() {
        let record = CredentialRecord::new("A", "u", "pw", None, None).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["secret"], "pw");
        assert!(json.get("website").is_none());
        assert!(json.get("createdAt").is_some());
    }
}
