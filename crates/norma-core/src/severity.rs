//! # Issue Severity
//!
//! The single severity vocabulary used by requirement checks, compliance
//! issues, status derivation and the score convention. Defined once;
//! exhaustive `match` everywhere.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Ordinal importance of a compliance finding.
///
/// Variants are declared in escalation order so that the derived `Ord`
/// ranks `Low < Medium < High < Critical`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational finding; counts as a passed check under the scoring
    /// convention.
    Low,
    /// Deficiency that should be corrected but does not block approval.
    Medium,
    /// Serious deficiency requiring attention before approval.
    High,
    /// Blocking deficiency; forces non-compliant status regardless of score.
    Critical,
}

impl Severity {
    /// All severities in ascending order.
    pub fn all_severities() -> Vec<Severity> {
        vec![
            Severity::Low,
            Severity::Medium,
            Severity::High,
            Severity::Critical,
        ]
    }

    /// Stable snake_case string form (matches the serde representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    /// Lenient parse for severity labels arriving from the judge:
    /// case-insensitive, unknown values become [`Severity::Medium`].
    pub fn parse_lenient(s: &str) -> Severity {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Severity::Low,
            "high" => Severity::High,
            "critical" => Severity::Critical,
            _ => Severity::Medium,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            other => Err(ValidationError::UnknownSeverity(other.to_string())),
        }
    }
}
