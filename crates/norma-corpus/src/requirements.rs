//! # Requirement Check Tables
//!
//! Maps each regulatory document to the concrete checks an evaluation must
//! perform against it. Check identifiers are the join key across the stack:
//! compliance issues cite them in `id`, and checklist items reuse them so a
//! finding can seed the checklist directly.
//!
//! Matching is by name substring rather than exact name, so a custom corpus
//! that names its fire code `municipal-db-si-2023` still picks up the fire
//! safety checks.

use serde::{Deserialize, Serialize};

use norma_core::{CheckCategory, Severity};

use crate::document::{DocCategory, RegulatoryDocument};

/// One concrete check to perform against a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementCheck {
    /// Stable check identifier, shared with issue ids and checklist items.
    pub id: String,
    /// Short title.
    pub title: String,
    /// What to verify.
    pub description: String,
    /// Severity of a violation of this check.
    pub severity: Severity,
    /// Requirement category.
    pub category: CheckCategory,
}

fn check(
    id: &str,
    title: &str,
    description: &str,
    severity: Severity,
    category: CheckCategory,
) -> RequirementCheck {
    RequirementCheck {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        severity,
        category,
    }
}

/// The checks to perform against a document.
///
/// Support documents share one fixed check set regardless of name. Baseline
/// and zoning documents are matched by name substring; a document with no
/// matching table gets an empty check list and is still evaluated against
/// its category brief.
pub fn checks_for(document: &RegulatoryDocument) -> Vec<RequirementCheck> {
    if document.category == DocCategory::Support {
        return vec![
            check(
                "current-code-adaptation",
                "Adaptation to current code",
                "Verify the existing building is brought up to the code in force.",
                Severity::Medium,
                CheckCategory::General,
            ),
            check(
                "accessibility-improvement",
                "Accessibility improvements",
                "Verify accessibility upgrades required for existing buildings.",
                Severity::High,
                CheckCategory::Accessibility,
            ),
        ];
    }

    let name = document.name.to_ascii_lowercase();

    if name.contains("db-se") {
        vec![
            check(
                "structural-load-analysis",
                "Structural load analysis",
                "Verify load assumptions and structural safety factors.",
                Severity::Critical,
                CheckCategory::Structural,
            ),
            check(
                "structural-element-sizing",
                "Structural element sizing",
                "Verify beams, columns, and slabs are sized per the code.",
                Severity::High,
                CheckCategory::Structural,
            ),
        ]
    } else if name.contains("db-si") {
        vec![
            check(
                "fire-resistance-rating",
                "Fire resistance rating",
                "Verify the fire resistance classification for the use and height.",
                Severity::Critical,
                CheckCategory::FireSafety,
            ),
            check(
                "fire-evacuation-routes",
                "Evacuation routes",
                "Verify evacuation route dimensions and travel distances.",
                Severity::Critical,
                CheckCategory::FireSafety,
            ),
            check(
                "fire-extinguisher-coverage",
                "Extinguisher coverage",
                "Verify extinguisher placement meets maximum travel distance.",
                Severity::High,
                CheckCategory::FireSafety,
            ),
        ]
    } else if name.contains("db-sua") {
        vec![
            check(
                "accessible-route",
                "Accessible route",
                "Verify an accessible route connects entrances and common areas.",
                Severity::High,
                CheckCategory::Accessibility,
            ),
            check(
                "fall-protection",
                "Fall protection",
                "Verify barrier heights and glazing protection against falls.",
                Severity::High,
                CheckCategory::Accessibility,
            ),
        ]
    } else if name.contains("db-he") {
        vec![
            check(
                "energy-demand-limit",
                "Energy demand limit",
                "Verify heating and cooling demand within the permitted limits.",
                Severity::High,
                CheckCategory::Energy,
            ),
            check(
                "thermal-installation-efficiency",
                "Thermal installation efficiency",
                "Verify the efficiency of thermal installations.",
                Severity::High,
                CheckCategory::Energy,
            ),
        ]
    } else if name.contains("db-hr") {
        vec![check(
            "airborne-sound-insulation",
            "Airborne sound insulation",
            "Verify airborne and impact sound insulation values.",
            Severity::Medium,
            CheckCategory::Acoustic,
        )]
    } else if name.contains("db-hs") {
        vec![
            check(
                "damp-protection",
                "Damp protection",
                "Verify protection against ground and rain moisture.",
                Severity::Medium,
                CheckCategory::General,
            ),
            check(
                "indoor-air-quality",
                "Indoor air quality",
                "Verify ventilation flows for habitable rooms.",
                Severity::Medium,
                CheckCategory::General,
            ),
        ]
    } else if name.contains("universal") {
        vec![
            check(
                "plot-occupancy-limit",
                "Plot occupancy limit",
                "Verify built occupancy against the plot's permitted maximum.",
                Severity::High,
                CheckCategory::General,
            ),
            check(
                "permitted-height",
                "Permitted height",
                "Verify building height against the plan's permitted maximum.",
                Severity::High,
                CheckCategory::General,
            ),
        ]
    } else if name.contains("residential") {
        vec![
            check(
                "dwelling-minimum-area",
                "Dwelling minimum area",
                "Verify dwelling floor areas against the ordinance minimums.",
                Severity::High,
                CheckCategory::Residential,
            ),
            check(
                "natural-lighting",
                "Natural lighting",
                "Verify habitable rooms receive the required natural light.",
                Severity::Medium,
                CheckCategory::Residential,
            ),
        ]
    } else if name.contains("industrial") {
        vec![
            check(
                "dwelling-separation-distance",
                "Separation from dwellings",
                "Verify the minimum distance between industrial activity and dwellings.",
                Severity::Critical,
                CheckCategory::Industrial,
            ),
            check(
                "industrial-vehicle-access",
                "Industrial vehicle access",
                "Verify access and circulation for industrial vehicles.",
                Severity::High,
                CheckCategory::Industrial,
            ),
        ]
    } else if name.contains("garage") || name.contains("parking") {
        vec![
            check(
                "parking-bay-dimensions",
                "Parking bay dimensions",
                "Verify bay dimensions against the ordinance minimums.",
                Severity::High,
                CheckCategory::Parking,
            ),
            check(
                "garage-ventilation",
                "Garage ventilation",
                "Verify the garage ventilation system meets the required capacity.",
                Severity::Critical,
                CheckCategory::Parking,
            ),
        ]
    } else {
        Vec::new()
    }
}
