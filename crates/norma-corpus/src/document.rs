//! # Regulatory Documents
//!
//! [`RegulatoryDocument`] is one entry in the corpus catalog: a named body
//! of regulation with a category (baseline, zoning, support), a use scope,
//! and a floor scope. Scopes answer the only two questions applicability
//! resolution asks of a document: does it cover this use, and does it cover
//! this floor.
//!
//! Scopes serialize as either the string `"all"` or an explicit list, so a
//! corpus file reads naturally:
//!
//! ```yaml
//! uses: all
//! floors: [-1, -2, "ground"]
//! ```

use std::collections::BTreeSet;

use serde::de::{SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use norma_core::{BuildingUse, FloorId};

// ---------------------------------------------------------------------------
// Document categories
// ---------------------------------------------------------------------------

/// The three corpus categories, ordered by application priority.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DocCategory {
    /// Technical baseline codes. Apply to every submission.
    Baseline,
    /// Zoning ordinances. Scoped by building use.
    Zoning,
    /// Support and guidance documents. Apply only to existing buildings.
    Support,
}

impl DocCategory {
    /// All categories, in application-priority order.
    pub fn all_categories() -> Vec<DocCategory> {
        vec![DocCategory::Baseline, DocCategory::Zoning, DocCategory::Support]
    }

    /// Stable snake_case string form (matches the serde representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            DocCategory::Baseline => "baseline",
            DocCategory::Zoning => "zoning",
            DocCategory::Support => "support",
        }
    }

    /// Default application priority. Lower applies first.
    pub fn default_priority(&self) -> u8 {
        match self {
            DocCategory::Baseline => 1,
            DocCategory::Zoning => 2,
            DocCategory::Support => 3,
        }
    }
}

impl std::fmt::Display for DocCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Scopes
// ---------------------------------------------------------------------------

/// Which building uses a document covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UseScope {
    /// Covers every use.
    All,
    /// Covers exactly the listed uses.
    Only(BTreeSet<BuildingUse>),
}

impl UseScope {
    /// Build a scope from an explicit list of uses.
    pub fn only(uses: impl IntoIterator<Item = BuildingUse>) -> Self {
        UseScope::Only(uses.into_iter().collect())
    }

    /// Whether the scope covers the given use.
    pub fn includes(&self, building_use: BuildingUse) -> bool {
        match self {
            UseScope::All => true,
            UseScope::Only(uses) => uses.contains(&building_use),
        }
    }

    /// Whether the scope is the wildcard.
    pub fn is_all(&self) -> bool {
        matches!(self, UseScope::All)
    }
}

impl Default for UseScope {
    fn default() -> Self {
        UseScope::All
    }
}

impl Serialize for UseScope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            UseScope::All => serializer.serialize_str("all"),
            UseScope::Only(uses) => uses.serialize(serializer),
        }
    }
}

struct UseScopeVisitor;

impl<'de> Visitor<'de> for UseScopeVisitor {
    type Value = UseScope;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("the string \"all\" or a list of building uses")
    }

    fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<Self::Value, E> {
        if value == "all" {
            Ok(UseScope::All)
        } else {
            Err(E::custom(format!(
                "unknown use scope keyword {value:?} (expected \"all\" or a list)"
            )))
        }
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut uses = BTreeSet::new();
        while let Some(building_use) = seq.next_element::<BuildingUse>()? {
            uses.insert(building_use);
        }
        Ok(UseScope::Only(uses))
    }
}

impl<'de> Deserialize<'de> for UseScope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(UseScopeVisitor)
    }
}

/// Which floors a document covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FloorScope {
    /// Covers every floor.
    All,
    /// Covers exactly the listed floors.
    Only(BTreeSet<FloorId>),
}

impl FloorScope {
    /// Build a scope from explicit floor numbers.
    pub fn only(floors: impl IntoIterator<Item = i32>) -> Self {
        FloorScope::Only(floors.into_iter().map(FloorId::new).collect())
    }

    /// Whether the scope covers the given floor.
    pub fn includes(&self, floor: FloorId) -> bool {
        match self {
            FloorScope::All => true,
            FloorScope::Only(floors) => floors.contains(&floor),
        }
    }

    /// Whether the scope is the wildcard.
    pub fn is_all(&self) -> bool {
        matches!(self, FloorScope::All)
    }
}

impl Default for FloorScope {
    fn default() -> Self {
        FloorScope::All
    }
}

impl Serialize for FloorScope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FloorScope::All => serializer.serialize_str("all"),
            FloorScope::Only(floors) => floors.serialize(serializer),
        }
    }
}

struct FloorScopeVisitor;

impl<'de> Visitor<'de> for FloorScopeVisitor {
    type Value = FloorScope;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("the string \"all\" or a list of floors")
    }

    fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<Self::Value, E> {
        if value == "all" {
            Ok(FloorScope::All)
        } else {
            Err(E::custom(format!(
                "unknown floor scope keyword {value:?} (expected \"all\" or a list)"
            )))
        }
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut floors = BTreeSet::new();
        while let Some(floor) = seq.next_element::<FloorId>()? {
            floors.insert(floor);
        }
        Ok(FloorScope::Only(floors))
    }
}

impl<'de> Deserialize<'de> for FloorScope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FloorScopeVisitor)
    }
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// One regulatory document in the corpus catalog.
///
/// `name` is the stable identifier used everywhere downstream: floor
/// assignments, compliance results, and issue references all cite it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegulatoryDocument {
    /// Stable identifier, e.g. `cte-db-si` or `zoning-residential`.
    pub name: String,
    /// Human-readable title.
    pub title: String,
    /// Corpus category.
    pub category: DocCategory,
    /// Building uses the document covers. Defaults to all.
    #[serde(default)]
    pub uses: UseScope,
    /// Floors the document covers. Defaults to all.
    #[serde(default)]
    pub floors: FloorScope,
    /// Application priority. Lower applies first.
    pub priority: u8,
    /// One-line description of what the document regulates.
    pub description: String,
    /// Citation for the underlying regulation, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl RegulatoryDocument {
    /// Create a document with wildcard scopes and the category's default
    /// priority. Narrow with the builder methods.
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        category: DocCategory,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            category,
            uses: UseScope::All,
            floors: FloorScope::All,
            priority: category.default_priority(),
            description: description.into(),
            source: None,
        }
    }

    /// Restrict the document to the given uses.
    pub fn for_uses(mut self, uses: impl IntoIterator<Item = BuildingUse>) -> Self {
        self.uses = UseScope::only(uses);
        self
    }

    /// Restrict the document to the given floors.
    pub fn on_floors(mut self, floors: impl IntoIterator<Item = i32>) -> Self {
        self.floors = FloorScope::only(floors);
        self
    }

    /// Override the application priority.
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    /// Attach a citation for the underlying regulation.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Whether the document covers the given building use.
    pub fn applies_to_use(&self, building_use: BuildingUse) -> bool {
        self.uses.includes(building_use)
    }

    /// Whether the document covers the given floor.
    pub fn applies_to_floor(&self, floor: FloorId) -> bool {
        self.floors.includes(floor)
    }
}
