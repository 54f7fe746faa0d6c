//! Checklist templates.
//!
//! Fixed category/item tables instantiated at generation time. Item
//! identifiers deliberately reuse the corpus requirement-check
//! identifiers so that compliance issues citing a check seed the
//! matching checklist item.

use norma_core::BuildingUse;

use crate::item::ItemPriority;

/// Template for one checklist item.
#[derive(Debug, Clone, Copy)]
pub struct ItemTemplate {
    /// Stable identifier, shared with the corpus requirement checks
    /// where one exists.
    pub id: &'static str,
    /// Short title.
    pub title: &'static str,
    /// What has to be verified.
    pub description: &'static str,
    /// Urgency.
    pub priority: ItemPriority,
    /// Citation of the regulation behind the requirement.
    pub normative_reference: &'static str,
    /// The dossier artifact the requirement demands.
    pub document_requirement: &'static str,
    /// How the requirement is verified.
    pub verification_method: &'static str,
    /// Evidence files the verification needs.
    pub evidence_required: &'static [&'static str],
}

/// Template for one checklist category.
#[derive(Debug, Clone, Copy)]
pub struct CategoryTemplate {
    /// Stable category identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// What the category covers.
    pub description: &'static str,
    /// The items the category instantiates.
    pub items: &'static [ItemTemplate],
}

static DOCUMENTATION: CategoryTemplate = CategoryTemplate {
    id: "documentation",
    name: "Project documentation",
    description: "Mandatory submission dossier content.",
    items: &[
        ItemTemplate {
            id: "project-descriptive-memory",
            title: "Descriptive memory",
            description: "Complete descriptive memory of the project.",
            priority: ItemPriority::Critical,
            normative_reference: "CTE Part I, Art. 2.1",
            document_requirement: "Descriptive memory signed by a competent technician",
            verification_method: "Content and signature check",
            evidence_required: &["descriptive-memory.pdf", "technician-signature.pdf"],
        },
        ItemTemplate {
            id: "architectural-plans",
            title: "Architectural plans",
            description: "Floor plans, elevations and sections.",
            priority: ItemPriority::Critical,
            normative_reference: "CTE Part I, Art. 2.2",
            document_requirement: "Plans at 1:100 or 1:200 scale",
            verification_method: "Scale and content check",
            evidence_required: &["floor-plans.pdf", "elevations.pdf", "sections.pdf"],
        },
        ItemTemplate {
            id: "calculation-report",
            title: "Calculation report",
            description: "Structural and installation calculations.",
            priority: ItemPriority::High,
            normative_reference: "CTE Part I, Art. 2.3",
            document_requirement: "Calculations signed by a competent technician",
            verification_method: "Calculation and signature check",
            evidence_required: &["structural-calculations.pdf", "installation-calculations.pdf"],
        },
    ],
};

static STRUCTURAL_SAFETY: CategoryTemplate = CategoryTemplate {
    id: "structural-safety",
    name: "Structural safety",
    description: "Structural safety verification.",
    items: &[
        ItemTemplate {
            id: "structural-load-analysis",
            title: "Load analysis",
            description: "Verify the load assumptions and combinations.",
            priority: ItemPriority::Critical,
            normative_reference: "CTE DB-SE",
            document_requirement: "Load calculation per the structural code",
            verification_method: "Calculation check",
            evidence_required: &["load-calculations.pdf", "structural-plans.pdf"],
        },
        ItemTemplate {
            id: "structural-element-sizing",
            title: "Element sizing",
            description: "Verify the sizing of structural elements.",
            priority: ItemPriority::High,
            normative_reference: "CTE DB-SE, Art. 3.1",
            document_requirement: "Element sizing per the structural code",
            verification_method: "Dimension check",
            evidence_required: &["beam-sizing.pdf", "column-sizing.pdf"],
        },
    ],
};

static FIRE_SAFETY: CategoryTemplate = CategoryTemplate {
    id: "fire-safety",
    name: "Fire safety",
    description: "Fire safety verification.",
    items: &[
        ItemTemplate {
            id: "fire-resistance-rating",
            title: "Fire resistance rating",
            description: "Verify the fire resistance classification of elements.",
            priority: ItemPriority::Critical,
            normative_reference: "CTE DB-SI, Art. 2.1",
            document_requirement: "Classification per use and height",
            verification_method: "Classification check",
            evidence_required: &["fire-resistance-classification.pdf"],
        },
        ItemTemplate {
            id: "fire-evacuation-routes",
            title: "Evacuation routes",
            description: "Verify evacuation route dimensions and distances.",
            priority: ItemPriority::Critical,
            normative_reference: "CTE DB-SI, Art. 3.1",
            document_requirement: "Evacuation provisions per the fire code",
            verification_method: "Dimension and distance check",
            evidence_required: &["evacuation-plans.pdf", "evacuation-calculations.pdf"],
        },
        ItemTemplate {
            id: "fire-extinguisher-coverage",
            title: "Extinguisher coverage",
            description: "Verify extinguishing equipment coverage.",
            priority: ItemPriority::High,
            normative_reference: "CTE DB-SI, Art. 4.1",
            document_requirement: "Equipment layout per the fire code",
            verification_method: "Coverage check",
            evidence_required: &["extinguisher-layout.pdf"],
        },
    ],
};

static ACCESSIBILITY: CategoryTemplate = CategoryTemplate {
    id: "accessibility",
    name: "Accessibility",
    description: "Universal accessibility verification.",
    items: &[
        ItemTemplate {
            id: "accessible-route",
            title: "Accessible route",
            description: "Verify accessible routes, ramps and lifts.",
            priority: ItemPriority::High,
            normative_reference: "CTE DB-SUA, Art. 2.1",
            document_requirement: "Accessibility provisions per the utilization code",
            verification_method: "Dimension and slope check",
            evidence_required: &["accessibility-plans.pdf", "accessibility-memory.pdf"],
        },
        ItemTemplate {
            id: "fall-protection",
            title: "Fall protection",
            description: "Verify barriers and fall protection heights.",
            priority: ItemPriority::High,
            normative_reference: "CTE DB-SUA, Art. 1.1",
            document_requirement: "Barrier heights per the utilization code",
            verification_method: "Height check",
            evidence_required: &["barrier-details.pdf"],
        },
    ],
};

static ENERGY_EFFICIENCY: CategoryTemplate = CategoryTemplate {
    id: "energy-efficiency",
    name: "Energy efficiency",
    description: "Energy efficiency verification.",
    items: &[
        ItemTemplate {
            id: "energy-demand-limit",
            title: "Energy demand limit",
            description: "Verify compliance with energy demand limits.",
            priority: ItemPriority::High,
            normative_reference: "CTE DB-HE, Art. 2.1",
            document_requirement: "Demand calculation within the permitted limits",
            verification_method: "Energy calculation check",
            evidence_required: &["energy-demand-calculation.pdf", "efficiency-certificate.pdf"],
        },
        ItemTemplate {
            id: "thermal-installation-efficiency",
            title: "Thermal installation efficiency",
            description: "Verify the efficiency of thermal installations.",
            priority: ItemPriority::Medium,
            normative_reference: "CTE DB-HE, Art. 3.1",
            document_requirement: "Installation efficiency data sheets",
            verification_method: "Data sheet check",
            evidence_required: &["thermal-installation-sheets.pdf"],
        },
    ],
};

static HEALTH_AND_COMFORT: CategoryTemplate = CategoryTemplate {
    id: "health-and-comfort",
    name: "Health and comfort",
    description: "Acoustic and health verification.",
    items: &[
        ItemTemplate {
            id: "airborne-sound-insulation",
            title: "Airborne sound insulation",
            description: "Verify airborne sound insulation between units.",
            priority: ItemPriority::Medium,
            normative_reference: "CTE DB-HR",
            document_requirement: "Insulation values per the acoustic code",
            verification_method: "Insulation value check",
            evidence_required: &["acoustic-report.pdf"],
        },
        ItemTemplate {
            id: "damp-protection",
            title: "Damp protection",
            description: "Verify protection against damp.",
            priority: ItemPriority::Medium,
            normative_reference: "CTE DB-HS, Art. 1.1",
            document_requirement: "Damp-proofing details",
            verification_method: "Detail check",
            evidence_required: &["damp-proofing-details.pdf"],
        },
    ],
};

static ZONING_CONFORMITY: CategoryTemplate = CategoryTemplate {
    id: "zoning-conformity",
    name: "Zoning conformity",
    description: "Conformity with the applicable zoning plan.",
    items: &[
        ItemTemplate {
            id: "plot-occupancy-limit",
            title: "Plot occupancy",
            description: "Verify occupancy against the plan limit.",
            priority: ItemPriority::High,
            normative_reference: "General plan, universal conditions",
            document_requirement: "Occupancy calculation on the plot plan",
            verification_method: "Occupancy calculation check",
            evidence_required: &["plot-plan.pdf"],
        },
        ItemTemplate {
            id: "permitted-height",
            title: "Permitted height",
            description: "Verify building height against the plan limit.",
            priority: ItemPriority::High,
            normative_reference: "General plan, universal conditions",
            document_requirement: "Height justification on the elevations",
            verification_method: "Height check",
            evidence_required: &["elevations.pdf"],
        },
    ],
};

static RESIDENTIAL_HABITABILITY: CategoryTemplate = CategoryTemplate {
    id: "residential-habitability",
    name: "Residential habitability",
    description: "Dwelling habitability verification.",
    items: &[
        ItemTemplate {
            id: "dwelling-minimum-area",
            title: "Minimum dwelling area",
            description: "Verify dwelling areas against the zoning minimums.",
            priority: ItemPriority::High,
            normative_reference: "Residential zoning ordinance",
            document_requirement: "Dwelling area schedule",
            verification_method: "Area schedule check",
            evidence_required: &["area-schedule.pdf"],
        },
        ItemTemplate {
            id: "natural-lighting",
            title: "Natural lighting",
            description: "Verify habitable rooms have natural lighting.",
            priority: ItemPriority::Medium,
            normative_reference: "Residential zoning ordinance",
            document_requirement: "Window schedule per room",
            verification_method: "Window ratio check",
            evidence_required: &["window-schedule.pdf"],
        },
    ],
};

static INDUSTRIAL_COMPATIBILITY: CategoryTemplate = CategoryTemplate {
    id: "industrial-compatibility",
    name: "Industrial compatibility",
    description: "Industrial use compatibility verification.",
    items: &[
        ItemTemplate {
            id: "dwelling-separation-distance",
            title: "Separation from dwellings",
            description: "Verify separation distances to residential uses.",
            priority: ItemPriority::High,
            normative_reference: "Industrial zoning ordinance",
            document_requirement: "Separation distances on the site plan",
            verification_method: "Distance check",
            evidence_required: &["site-plan.pdf"],
        },
        ItemTemplate {
            id: "industrial-vehicle-access",
            title: "Industrial vehicle access",
            description: "Verify heavy vehicle access and maneuvering.",
            priority: ItemPriority::Medium,
            normative_reference: "Industrial zoning ordinance",
            document_requirement: "Access layout for heavy vehicles",
            verification_method: "Layout check",
            evidence_required: &["access-layout.pdf"],
        },
    ],
};

static PARKING_PROVISIONS: CategoryTemplate = CategoryTemplate {
    id: "parking-provisions",
    name: "Parking provisions",
    description: "Garage and parking verification.",
    items: &[
        ItemTemplate {
            id: "parking-bay-dimensions",
            title: "Parking bay dimensions",
            description: "Verify bay dimensions and circulation widths.",
            priority: ItemPriority::High,
            normative_reference: "Garage zoning ordinance",
            document_requirement: "Parking layout with dimensions",
            verification_method: "Dimension check",
            evidence_required: &["parking-layout.pdf"],
        },
        ItemTemplate {
            id: "garage-ventilation",
            title: "Garage ventilation",
            description: "Verify garage ventilation provisions.",
            priority: ItemPriority::High,
            normative_reference: "Garage zoning ordinance",
            document_requirement: "Ventilation calculation for the garage",
            verification_method: "Ventilation calculation check",
            evidence_required: &["ventilation-calculation.pdf"],
        },
    ],
};

/// The category templates for a primary use: the shared base plus the
/// use-specific extension where one exists.
pub fn template_for(primary_use: BuildingUse) -> Vec<&'static CategoryTemplate> {
    let mut categories = vec![
        &DOCUMENTATION,
        &STRUCTURAL_SAFETY,
        &FIRE_SAFETY,
        &ACCESSIBILITY,
        &ENERGY_EFFICIENCY,
        &HEALTH_AND_COMFORT,
        &ZONING_CONFORMITY,
    ];
    match primary_use {
        BuildingUse::Residential => categories.push(&RESIDENTIAL_HABITABILITY),
        BuildingUse::Industrial => categories.push(&INDUSTRIAL_COMPATIBILITY),
        BuildingUse::Garage => categories.push(&PARKING_PROVISIONS),
        _ => {}
    }
    categories
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn every_use_gets_the_shared_base() {
        for building_use in BuildingUse::all_uses() {
            let template = template_for(building_use);
            assert!(template.len() >= 7);
            assert_eq!(template[0].id, "documentation");
        }
    }

    #[test]
    fn use_specific_categories_are_appended() {
        let residential = template_for(BuildingUse::Residential);
        assert_eq!(residential.last().unwrap().id, "residential-habitability");

        let industrial = template_for(BuildingUse::Industrial);
        assert_eq!(industrial.last().unwrap().id, "industrial-compatibility");

        let garage = template_for(BuildingUse::Garage);
        assert_eq!(garage.last().unwrap().id, "parking-provisions");

        let tertiary = template_for(BuildingUse::Tertiary);
        assert_eq!(tertiary.last().unwrap().id, "zoning-conformity");
    }

    #[test]
    fn item_ids_are_unique_within_a_template() {
        for building_use in BuildingUse::all_uses() {
            let mut seen = BTreeSet::new();
            for category in template_for(building_use) {
                for item in category.items {
                    assert!(seen.insert(item.id), "duplicate item id {}", item.id);
                }
            }
        }
    }

    #[test]
    fn fire_safety_items_reuse_requirement_check_ids() {
        let ids: Vec<&str> = FIRE_SAFETY.items.iter().map(|i| i.id).collect();
        assert_eq!(
            ids,
            vec![
                "fire-resistance-rating",
                "fire-evacuation-routes",
                "fire-extinguisher-coverage"
            ]
        );
    }
}
