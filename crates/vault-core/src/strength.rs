//! Password strength scoring
//!
//! Length is measured in UTF-16 code units, so a character outside the
//! Basic Multilingual Plane counts twice.
//!
//! Six independent criteria, one point each:
//! length >= 8, a lowercase letter, an uppercase letter, a digit,
//! a character outside `[A-Za-z0-9]`, and length >= 12.

use serde::Serialize;

/// Highest attainable score
pub const MAX_SCORE: u8 = 6;

/// Display category for a single secret
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum StrengthCategory {
    Weak,
    Fair,
    Good,
    Strong,
}

impl StrengthCategory {
    /// Map a 0..=6 score to its category
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=2 => Self::Weak,
            3..=4 => Self::Fair,
            5 => Self::Good,
            _ => Self::Strong,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weak => "Weak",
            Self::Fair => "Fair",
            Self::Good => "Good",
            Self::Strong => "Strong",
        }
    }
}

impl std::fmt::Display for StrengthCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of scoring one secret
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrengthReport {
    /// 0..=6
    pub score: u8,
    pub category: StrengthCategory,
    /// Hints for each failed criterion, in criterion order
    pub feedback: Vec<&'static str>,
}

/// Score a secret. Total and pure: the empty string scores 0.
pub fn evaluate(secret: &str) -> StrengthReport {
    let length = secret.encode_utf16().count();

    let checks = [
        (length >= 8, Some("At least 8 characters")),
        (secret.chars().any(|c| c.is_ascii_lowercase()), Some("Include lowercase letters")),
        (secret.chars().any(|c| c.is_ascii_uppercase()), Some("Include uppercase letters")),
        (secret.chars().any(|c| c.is_ascii_digit()), Some("Include numbers")),
        (secret.chars().any(|c| !c.is_ascii_alphanumeric()), Some("Include special characters")),
        (length >= 12, None),
    ];

    let mut score = 0;
    let mut feedback = Vec::new();
    for (passed, hint) in checks {
        if passed {
            score += 1;
        } else if let Some(hint) = hint {
            feedback.push(hint);
        }
    }

    StrengthReport {
        score,
        category: StrengthCategory::from_score(score),
        feedback,
    }
}
