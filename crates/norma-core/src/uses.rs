//! # Building Uses and Use Assignments
//!
//! [`BuildingUse`] is the single vocabulary of use categories that zoning
//! documents key on. [`UseAssignment`] is the caller-supplied description of
//! how a building is used: one primary use for the building as a whole, plus
//! secondary uses pinned to explicit floor sets (a garage in the basements
//! of a residential block, retail on the ground floor of an office tower).
//!
//! A floor claimed by more than one secondary entry is valid input here —
//! the applicability resolver detects and flags the conflict rather than
//! this type rejecting it, because the conflict-union policy needs the full
//! corpus context to apply.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::floor::FloorId;

/// A building-use category recognized by the zoning layer of the corpus.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BuildingUse {
    /// Dwellings of any tenure.
    Residential,
    /// Manufacturing, workshops, storage with industrial activity.
    Industrial,
    /// Offices, retail, hospitality and other tertiary services.
    Tertiary,
    /// Vehicle parking and garages.
    Garage,
    /// Public-administration facilities.
    PublicAdministration,
    /// Sports facilities.
    Sports,
    /// Community facilities: education, culture, health, worship.
    CommunityFacility,
    /// Technical infrastructure installations.
    Infrastructure,
    /// Public-service facilities (emergency services, maintenance depots).
    PublicServices,
    /// Transport facilities and interchanges.
    Transport,
    /// Public rights-of-way.
    PublicRightOfWay,
    /// Green space and open-air public areas.
    GreenSpace,
}

impl BuildingUse {
    /// All use categories, in declaration order.
    pub fn all_uses() -> Vec<BuildingUse> {
        vec![
            BuildingUse::Residential,
            BuildingUse::Industrial,
            BuildingUse::Tertiary,
            BuildingUse::Garage,
            BuildingUse::PublicAdministration,
            BuildingUse::Sports,
            BuildingUse::CommunityFacility,
            BuildingUse::Infrastructure,
            BuildingUse::PublicServices,
            BuildingUse::Transport,
            BuildingUse::PublicRightOfWay,
            BuildingUse::GreenSpace,
        ]
    }

    /// Stable snake_case string form (matches the serde representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildingUse::Residential => "residential",
            BuildingUse::Industrial => "industrial",
            BuildingUse::Tertiary => "tertiary",
            BuildingUse::Garage => "garage",
            BuildingUse::PublicAdministration => "public_administration",
            BuildingUse::Sports => "sports",
            BuildingUse::CommunityFacility => "community_facility",
            BuildingUse::Infrastructure => "infrastructure",
            BuildingUse::PublicServices => "public_services",
            BuildingUse::Transport => "transport",
            BuildingUse::PublicRightOfWay => "public_right_of_way",
            BuildingUse::GreenSpace => "green_space",
        }
    }
}

impl std::fmt::Display for BuildingUse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BuildingUse {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BuildingUse::all_uses()
            .into_iter()
            .find(|u| u.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownBuildingUse(s.to_string()))
    }
}

/// A secondary use pinned to an explicit set of floors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryUse {
    /// The use category of this entry.
    pub use_type: BuildingUse,
    /// The floors this entry claims. Deserializes from floor numbers or
    /// labels (see [`FloorId`]).
    pub floors: BTreeSet<FloorId>,
}

impl SecondaryUse {
    /// Create a secondary-use entry from a use type and floor numbers.
    pub fn new(use_type: BuildingUse, floors: impl IntoIterator<Item = i32>) -> Self {
        Self {
            use_type,
            floors: floors.into_iter().map(FloorId::new).collect(),
        }
    }
}

/// How a building is used: the input to applicability resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseAssignment {
    /// The building's primary use.
    pub primary_use: BuildingUse,
    /// Secondary uses, each with its own floor set.
    #[serde(default)]
    pub secondary_uses: Vec<SecondaryUse>,
    /// Whether the submission concerns an existing building (retrofit,
    /// change of use) rather than new construction.
    #[serde(default)]
    pub existing_building: bool,
}

impl UseAssignment {
    /// Create an assignment with only a primary use.
    pub fn new(primary_use: BuildingUse) -> Self {
        Self {
            primary_use,
            secondary_uses: Vec::new(),
            existing_building: false,
        }
    }

    /// Add a secondary use on the given floors.
    pub fn with_secondary(
        mut self,
        use_type: BuildingUse,
        floors: impl IntoIterator<Item = i32>,
    ) -> Self {
        self.secondary_uses.push(SecondaryUse::new(use_type, floors));
        self
    }

    /// Mark the assignment as concerning an existing building.
    pub fn for_existing_building(mut self) -> Self {
        self.existing_building = true;
        self
    }

    /// Structural validation of the assignment data itself.
    ///
    /// Floor conflicts between secondary entries are not an error here —
    /// the resolver flags them with full context. What is rejected is data
    /// that no policy can interpret: a secondary entry with no floors.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyFloorSet`] naming the offending use.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for entry in &self.secondary_uses {
            if entry.floors.is_empty() {
                return Err(ValidationError::EmptyFloorSet {
                    use_type: entry.use_type.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Union of all floors claimed by secondary entries.
    pub fn secondary_floors(&self) -> BTreeSet<FloorId> {
        self.secondary_uses
            .iter()
            .flat_map(|entry| entry.floors.iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn twelve_uses_total() {
        assert_eq!(BuildingUse::all_uses().len(), 12);
    }

    #[test]
    fn string_forms_are_unique() {
        let strings: HashSet<&str> = BuildingUse::all_uses()
            .iter()
            .map(BuildingUse::as_str)
            .collect();
        assert_eq!(strings.len(), 12);
    }

    #[test]
    fn from_str_roundtrips_all_variants() {
        for building_use in BuildingUse::all_uses() {
            let parsed: BuildingUse = building_use.as_str().parse().unwrap();
            assert_eq!(parsed, building_use);
        }
    }

    #[test]
    fn from_str_is_case_sensitive() {
        assert!("Residential".parse::<BuildingUse>().is_err());
        assert!("GARAGE".parse::<BuildingUse>().is_err());
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&BuildingUse::PublicRightOfWay).unwrap();
        assert_eq!(json, "\"public_right_of_way\"");
    }

    #[test]
    fn assignment_builders_compose() {
        let assignment = UseAssignment::new(BuildingUse::Residential)
            .with_secondary(BuildingUse::Garage, [-1, -2])
            .with_secondary(BuildingUse::Tertiary, [0])
            .for_existing_building();

        assert_eq!(assignment.primary_use, BuildingUse::Residential);
        assert_eq!(assignment.secondary_uses.len(), 2);
        assert!(assignment.existing_building);
        assert_eq!(assignment.secondary_floors().len(), 3);
    }

    #[test]
    fn validate_rejects_empty_floor_set() {
        let assignment = UseAssignment::new(BuildingUse::Residential)
            .with_secondary(BuildingUse::Garage, std::iter::empty::<i32>());
        let err = assignment.validate().unwrap_err();
        assert!(format!("{err}").contains("garage"));
    }

    #[test]
    fn validate_accepts_conflicting_claims() {
        // Two entries claiming floor 3 is flagged by the resolver, not
        // rejected as input.
        let assignment = UseAssignment::new(BuildingUse::Residential)
            .with_secondary(BuildingUse::Garage, [3])
            .with_secondary(BuildingUse::Tertiary, [3]);
        assert!(assignment.validate().is_ok());
    }

    #[test]
    fn assignment_deserializes_floor_labels() {
        let json = r#"{
            "primary_use": "residential",
            "secondary_uses": [
                { "use_type": "garage", "floors": ["basement 1", "-2"] }
            ],
            "existing_building": false
        }"#;
        let assignment: UseAssignment = serde_json::from_str(json).unwrap();
        let floors = assignment.secondary_floors();
        assert!(floors.contains(&FloorId::new(-1)));
        assert!(floors.contains(&FloorId::new(-2)));
    }

    #[test]
    fn assignment_defaults_optional_fields() {
        let json = r#"{ "primary_use": "industrial" }"#;
        let assignment: UseAssignment = serde_json::from_str(json).unwrap();
        assert!(assignment.secondary_uses.is_empty());
        assert!(!assignment.existing_building);
    }
}
