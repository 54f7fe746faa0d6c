//! # Compliance Status
//!
//! Project-level compliance verdicts. Status derivation itself lives next
//! to the aggregation rules in the engine; this module owns the vocabulary
//! and the worst-of merge used when several verdicts are combined into one
//! (per-document verdicts into a project verdict, checklist rollups).

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The compliance verdict for a project, document or floor.
///
/// Variants are declared in ascending order of concern so that the derived
/// `Ord` ranks `Pending < Compliant < PartiallyCompliant < NonCompliant <
/// Error`, and [`ComplianceStatus::worst`] is a plain `max`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    /// Not yet evaluated.
    Pending,
    /// Score ≥ 90 with no critical issues.
    Compliant,
    /// Score ≥ 70 with no critical issues.
    PartiallyCompliant,
    /// Any critical issue, or score below 70.
    NonCompliant,
    /// Evaluation itself failed; no verdict could be produced.
    Error,
}

impl ComplianceStatus {
    /// All statuses in ascending order of concern.
    pub fn all_statuses() -> Vec<ComplianceStatus> {
        vec![
            ComplianceStatus::Pending,
            ComplianceStatus::Compliant,
            ComplianceStatus::PartiallyCompliant,
            ComplianceStatus::NonCompliant,
            ComplianceStatus::Error,
        ]
    }

    /// Stable snake_case string form (matches the serde representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceStatus::Pending => "pending",
            ComplianceStatus::Compliant => "compliant",
            ComplianceStatus::PartiallyCompliant => "partially_compliant",
            ComplianceStatus::NonCompliant => "non_compliant",
            ComplianceStatus::Error => "error",
        }
    }

    /// Merge two verdicts, keeping the more concerning one.
    pub fn worst(self, other: ComplianceStatus) -> ComplianceStatus {
        self.max(other)
    }
}

impl std::fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ComplianceStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ComplianceStatus::Pending),
            "compliant" => Ok(ComplianceStatus::Compliant),
            "partially_compliant" => Ok(ComplianceStatus::PartiallyCompliant),
            "non_compliant" => Ok(ComplianceStatus::NonCompliant),
            "error" => Ok(ComplianceStatus::Error),
            other => Err(ValidationError::UnknownComplianceStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn five_statuses_total() {
        assert_eq!(ComplianceStatus::all_statuses().len(), 5);
    }

    #[test]
    fn string_forms_are_unique() {
        let strings: HashSet<&str> = ComplianceStatus::all_statuses()
            .iter()
            .map(ComplianceStatus::as_str)
            .collect();
        assert_eq!(strings.len(), 5);
    }

    #[test]
    fn from_str_roundtrips_all_variants() {
        for status in ComplianceStatus::all_statuses() {
            let parsed: ComplianceStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn worst_prefers_more_concerning_verdict() {
        use ComplianceStatus::*;
        assert_eq!(Compliant.worst(NonCompliant), NonCompliant);
        assert_eq!(NonCompliant.worst(Compliant), NonCompliant);
        assert_eq!(Pending.worst(Compliant), Compliant);
        assert_eq!(Error.worst(NonCompliant), Error);
        assert_eq!(PartiallyCompliant.worst(PartiallyCompliant), PartiallyCompliant);
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&ComplianceStatus::PartiallyCompliant).unwrap();
        assert_eq!(json, "\"partially_compliant\"");
    }

    #[test]
    fn unknown_status_is_a_typed_error() {
        let err = "approved".parse::<ComplianceStatus>().unwrap_err();
        assert!(format!("{err}").contains("approved"));
    }
}
