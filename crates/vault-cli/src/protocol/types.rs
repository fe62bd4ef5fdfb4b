//! Protocol message types
//!
//! One JSON object per line in each direction. Requests are tagged by `op`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use vault_core::{
    strength, CredentialRecord, DuplicateGroup, Recommendation, SecurityReport, SecurityStatus,
    StrengthCategory, VaultError,
};

/// Incoming request
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum VaultRequest {
    /// Missing required fields are left empty and rejected by the store
    Add {
        #[serde(default)]
        title: String,
        #[serde(default)]
        username: String,
        #[serde(default)]
        secret: String,
        #[serde(default)]
        website: Option<String>,
        #[serde(default)]
        notes: Option<String>,
    },
    List {
        #[serde(default)]
        reveal: bool,
    },
    Delete {
        id: Uuid,
    },
    Search {
        #[serde(default)]
        query: String,
        #[serde(default)]
        reveal: bool,
    },
    Report {
        #[serde(default)]
        reveal: bool,
    },
    Strength {
        secret: String,
    },
    Generate {
        #[serde(default)]
        length: Option<usize>,
    },
    Whoami,
    Logout,
}

/// Error category reported to the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Parse,
    Validation,
    NotAuthenticated,
    Storage,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub message: String,
}

/// Outgoing response
#[derive(Debug, Clone, Serialize)]
pub struct VaultResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl VaultResponse {
    pub fn success(result: Value) -> Self {
        Self {
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            result: None,
            error: Some(ErrorBody {
                kind,
                message: message.into(),
            }),
        }
    }

    pub fn parse_error(detail: impl std::fmt::Display) -> Self {
        Self::failure(ErrorKind::Parse, format!("Invalid request: {}", detail))
    }
}

impl From<VaultError> for VaultResponse {
    fn from(err: VaultError) -> Self {
        let kind = match &err {
            VaultError::Validation(_) => ErrorKind::Validation,
            VaultError::NotAuthenticated => ErrorKind::NotAuthenticated,
            _ => ErrorKind::Storage,
        };
        Self::failure(kind, err.to_string())
    }
}

/// A record as shown to the client
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordView {
    pub id: Uuid,
    pub title: String,
    pub username: String,
    /// Masked unless the request asked to reveal it
    pub secret: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: String,
    pub strength: StrengthCategory,
}

impl RecordView {
    pub fn new(record: &CredentialRecord, reveal: bool) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            username: record.username.clone(),
            secret: show_secret(&record.secret, reveal),
            website: record.website.clone(),
            notes: record.notes.clone(),
            created_at: record.created_at.to_rfc3339(),
            strength: strength::evaluate(record.secret.expose()).category,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WeakView {
    pub id: Uuid,
    pub title: String,
    pub score: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct DuplicateView {
    pub secret: String,
    pub titles: Vec<String>,
}

impl DuplicateView {
    pub fn new(group: &DuplicateGroup, reveal: bool) -> Self {
        Self {
            secret: show_secret(&group.secret, reveal),
            titles: group.titles.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationView {
    pub kind: &'static str,
    pub count: usize,
    pub message: String,
}

impl From<&Recommendation> for RecommendationView {
    fn from(recommendation: &Recommendation) -> Self {
        let (kind, count) = match *recommendation {
            Recommendation::StrengthenWeak { count } => ("strengthen_weak", count),
            Recommendation::ReplaceDuplicates { count } => ("replace_duplicates", count),
        };
        Self {
            kind,
            count,
            message: recommendation.to_string(),
        }
    }
}

/// The security overview as shown to the client
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub total_records: usize,
    pub overall_score: u8,
    pub status: SecurityStatus,
    pub protection: &'static str,
    pub weak: Vec<WeakView>,
    pub duplicates: Vec<DuplicateView>,
    pub recommendations: Vec<RecommendationView>,
}

impl ReportView {
    pub fn new(report: &SecurityReport, reveal: bool) -> Self {
        Self {
            total_records: report.total_records,
            overall_score: report.overall_score,
            status: report.status,
            protection: report.protection_label(),
            weak: report
                .weak
                .iter()
                .map(|r| WeakView {
                    id: r.id,
                    title: r.title.clone(),
                    score: strength::evaluate(r.secret.expose()).score,
                })
                .collect(),
            duplicates: report
                .duplicates
                .iter()
                .map(|g| DuplicateView::new(g, reveal))
                .collect(),
            recommendations: report
                .recommendations
                .iter()
                .map(RecommendationView::from)
                .collect(),
        }
    }
}

fn show_secret(secret: &vault_core::Secret, reveal: bool) -> String {
    if reveal {
        secret.expose().to_string()
    } else {
        secret.masked()
    }
}
