//! Case-insensitive record search

use crate::credential::CredentialRecord;

/// A folded search needle. The empty query matches every record.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.to_lowercase(),
        }
    }

    /// Substring match against title, username, or website
    pub fn matches(&self, record: &CredentialRecord) -> bool {
        if self.needle.is_empty() {
            return true;
        }

        contains_folded(&record.title, &self.needle)
            || contains_folded(&record.username, &self.needle)
            || record
                .website
                .as_deref()
                .is_some_and(|site| contains_folded(site, &self.needle))
    }

    /// Matching records in their existing order
    pub fn filter<'a>(&self, records: &'a [CredentialRecord]) -> Vec<&'a CredentialRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
