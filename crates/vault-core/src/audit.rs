//! Vault-wide security analysis
//!
//! Everything here is recomputed from a record snapshot on each call:
//! - Overall score (0-100) and its status band
//! - Weak records (strength score <= 3)
//! - Secrets shared by two or more records
//! - Advisory recommendations derived from the two sets above

use indexmap::IndexMap;
use serde::Serialize;

use crate::credential::{CredentialRecord, Secret};
use crate::strength::{self, MAX_SCORE};

/// Records scoring at or below this need attention. This is one point looser
/// than the `Weak` display category.
pub const WEAK_SCORE_THRESHOLD: u8 = 3;

/// Overall score reported for an empty vault
pub const EMPTY_VAULT_SCORE: u8 = 100;

/// Status band for the overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SecurityStatus {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl SecurityStatus {
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            Self::Excellent
        } else if score >= 60 {
            Self::Good
        } else if score >= 40 {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}

impl std::fmt::Display for SecurityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        };
        f.write_str(label)
    }
}

/// A secret value used by more than one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    pub secret: Secret,
    /// Titles of the records sharing the secret, in collection order
    pub titles: Vec<String>,
}

/// Advisory message for the security overview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recommendation {
    StrengthenWeak { count: usize },
    ReplaceDuplicates { count: usize },
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StrengthenWeak { count } => {
                write!(f, "Consider strengthening {} weak password(s)", count)
            }
            Self::ReplaceDuplicates { count } => write!(
                f,
                "Found {} duplicate password(s) - use unique passwords for each account",
                count
            ),
        }
    }
}

/// Overall score: 100 for an empty vault, otherwise
/// `round(100 * sum(score) / (6 * n))`.
pub fn overall_score(records: &[CredentialRecord]) -> u8 {
    if records.is_empty() {
        return EMPTY_VAULT_SCORE;
    }

    let total: u64 = records
        .iter()
        .map(|r| u64::from(strength::evaluate(r.secret.expose()).score))
        .sum();
    let max = u64::from(MAX_SCORE) * records.len() as u64;

    // Integer round-half-up of 100 * total / max
    ((200 * total + max) / (2 * max)) as u8
}

/// Records whose strength score is at or below [`WEAK_SCORE_THRESHOLD`]
pub fn weak_records(records: &[CredentialRecord]) -> Vec<CredentialRecord> {
    records
        .iter()
        .filter(|r| strength::evaluate(r.secret.expose()).score <= WEAK_SCORE_THRESHOLD)
        .cloned()
        .collect()
}

/// Group records by exact secret in one pass. Groups appear in the order
/// their secret was first seen; only groups of two or more are returned.
pub fn duplicate_groups(records: &[CredentialRecord]) -> Vec<DuplicateGroup> {
    let mut groups: IndexMap<&str, Vec<String>> = IndexMap::new();
    for record in records {
        groups
            .entry(record.secret.expose())
            .or_default()
            .push(record.title.clone());
    }

    groups
        .into_iter()
        .filter(|(_, titles)| titles.len() > 1)
        .map(|(secret, titles)| DuplicateGroup {
            secret: Secret::new(secret),
            titles,
        })
        .collect()
}

/// Advisories for non-empty weak and duplicate sets
pub fn recommendations(weak: usize, duplicates: usize) -> Vec<Recommendation> {
    let mut out = Vec::new();
    if weak > 0 {
        out.push(Recommendation::StrengthenWeak { count: weak });
    }
    if duplicates > 0 {
        out.push(Recommendation::ReplaceDuplicates { count: duplicates });
    }
    out
}

/// Full security overview for a snapshot
#[derive(Debug, Clone)]
pub struct SecurityReport {
    pub total_records: usize,
    pub overall_score: u8,
    pub status: SecurityStatus,
    pub weak: Vec<CredentialRecord>,
    pub duplicates: Vec<DuplicateGroup>,
    pub recommendations: Vec<Recommendation>,
}

impl SecurityReport {
    pub fn analyze(records: &[CredentialRecord]) -> Self {
        let overall_score = overall_score(records);
        let weak = weak_records(records);
        let duplicates = duplicate_groups(records);
        let recommendations = recommendations(weak.len(), duplicates.len());

        Self {
            total_records: records.len(),
            overall_score,
            status: SecurityStatus::from_score(overall_score),
            weak,
            duplicates,
            recommendations,
        }
    }

    /// "Protected" once the vault holds anything
    pub fn is_protected(&self) -> bool {
        self.total_records > 0
    }

    pub fn protection_label(&self) -> &'static str {
        if self.is_protected() {
            "Protected"
        } else {
            "No passwords"
        }
    }
}
