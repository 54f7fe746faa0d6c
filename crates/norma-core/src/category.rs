//! # Check Categories
//!
//! The verification topics that requirement checks, evaluation briefs and
//! compliance issues are grouped under. The mapping from a regulatory
//! document's name to its category drives both requirement generation and
//! brief selection, so it lives here rather than being re-derived per crate.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The topic a requirement check or compliance issue belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckCategory {
    /// Energy demand, insulation, renewable contribution.
    Energy,
    /// Noise protection and acoustic insulation.
    Acoustic,
    /// Fire propagation, evacuation, detection and suppression.
    FireSafety,
    /// Accessibility and usability for reduced-mobility occupants.
    Accessibility,
    /// Structural safety and load assumptions.
    Structural,
    /// Residential habitability and dwelling-program rules.
    Residential,
    /// Industrial activity, emissions and hazard rules.
    Industrial,
    /// Parking-bay dimensions, circulation and garage ventilation.
    Parking,
    /// Administrative completeness of the submission dossier.
    Documentation,
    /// Anything without a more specific topic.
    General,
}

impl CheckCategory {
    /// All categories, in declaration order.
    pub fn all_categories() -> Vec<CheckCategory> {
        vec![
            CheckCategory::Energy,
            CheckCategory::Acoustic,
            CheckCategory::FireSafety,
            CheckCategory::Accessibility,
            CheckCategory::Structural,
            CheckCategory::Residential,
            CheckCategory::Industrial,
            CheckCategory::Parking,
            CheckCategory::Documentation,
            CheckCategory::General,
        ]
    }

    /// Stable snake_case string form (matches the serde representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckCategory::Energy => "energy",
            CheckCategory::Acoustic => "acoustic",
            CheckCategory::FireSafety => "fire_safety",
            CheckCategory::Accessibility => "accessibility",
            CheckCategory::Structural => "structural",
            CheckCategory::Residential => "residential",
            CheckCategory::Industrial => "industrial",
            CheckCategory::Parking => "parking",
            CheckCategory::Documentation => "documentation",
            CheckCategory::General => "general",
        }
    }

    /// Derive the verification category from a regulatory document's name.
    ///
    /// Substring-based on the lowercased name, recognizing both the CTE
    /// basic-document codes (`db-he`, `db-si`, ...) and plain topic words
    /// (`energy`, `garage`, ...). Names without a recognized topic fall
    /// back to [`CheckCategory::General`].
    pub fn for_document_name(name: &str) -> CheckCategory {
        let lower = name.to_ascii_lowercase();
        if lower.contains("db-se") || lower.contains("structur") {
            CheckCategory::Structural
        } else if lower.contains("db-sua") || lower.contains("access") {
            CheckCategory::Accessibility
        } else if lower.contains("db-si") || lower.contains("fire") {
            CheckCategory::FireSafety
        } else if lower.contains("db-he") || lower.contains("energy") {
            CheckCategory::Energy
        } else if lower.contains("db-hr") || lower.contains("acoustic") || lower.contains("noise")
        {
            CheckCategory::Acoustic
        } else if lower.contains("residential") {
            CheckCategory::Residential
        } else if lower.contains("industrial") {
            CheckCategory::Industrial
        } else if lower.contains("garage") || lower.contains("parking") {
            CheckCategory::Parking
        } else {
            CheckCategory::General
        }
    }
}

impl std::fmt::Display for CheckCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CheckCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CheckCategory::all_categories()
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownCheckCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ten_categories_total() {
        assert_eq!(CheckCategory::all_categories().len(), 10);
    }

    #[test]
    fn string_forms_are_unique() {
        let strings: HashSet<&str> = CheckCategory::all_categories()
            .iter()
            .map(CheckCategory::as_str)
            .collect();
        assert_eq!(strings.len(), 10);
    }

    #[test]
    fn from_str_roundtrips_all_variants() {
        for category in CheckCategory::all_categories() {
            let parsed: CheckCategory = category.as_str().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn document_name_mapping_recognizes_cte_codes() {
        assert_eq!(
            CheckCategory::for_document_name("cte-db-se"),
            CheckCategory::Structural
        );
        assert_eq!(
            CheckCategory::for_document_name("cte-db-si"),
            CheckCategory::FireSafety
        );
        assert_eq!(
            CheckCategory::for_document_name("cte-db-sua"),
            CheckCategory::Accessibility
        );
        assert_eq!(
            CheckCategory::for_document_name("cte-db-he"),
            CheckCategory::Energy
        );
        assert_eq!(
            CheckCategory::for_document_name("cte-db-hr"),
            CheckCategory::Acoustic
        );
        // Health and sanitation has no dedicated category.
        assert_eq!(
            CheckCategory::for_document_name("cte-db-hs"),
            CheckCategory::General
        );
    }

    #[test]
    fn document_name_mapping_recognizes_topic_words() {
        assert_eq!(
            CheckCategory::for_document_name("zoning-residential"),
            CheckCategory::Residential
        );
        assert_eq!(
            CheckCategory::for_document_name("zoning-garage"),
            CheckCategory::Parking
        );
        assert_eq!(
            CheckCategory::for_document_name("ZONING-GARAGE"),
            CheckCategory::Parking
        );
        assert_eq!(
            CheckCategory::for_document_name("support-energy-annex-1"),
            CheckCategory::Energy
        );
        assert_eq!(
            CheckCategory::for_document_name("zoning-universal"),
            CheckCategory::General
        );
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&CheckCategory::FireSafety).unwrap();
        assert_eq!(json, "\"fire_safety\"");
    }
}
