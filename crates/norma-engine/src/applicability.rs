//! Applicability resolution.
//!
//! Maps a project's use assignment onto the corpus: which documents apply
//! to which floors. The resolver is pure; the same assignment and corpus
//! always produce the same result, and the result records the corpus
//! fingerprint it was derived from.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use norma_core::{BuildingUse, FloorId, FloorRange, UseAssignment, ValidationError};
use norma_corpus::{checks_for, Corpus, DocCategory, RegulatoryDocument, RequirementCheck};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tunables for [`resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Floor universe the resolution covers. Secondary floors outside this
    /// range are rejected as an input error.
    pub floor_range: FloorRange,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            floor_range: FloorRange::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// A corpus document selected for the project, paired with its requirement
/// checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicableDocument {
    /// The catalog entry.
    pub document: RegulatoryDocument,
    /// Concrete checks evaluation will brief the judge with.
    pub checks: Vec<RequirementCheck>,
}

/// A floor claimed by more than one secondary use.
///
/// Conflicts widen coverage rather than narrowing it: every claimant's
/// zoning document applies on the contested floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorConflict {
    /// The contested floor.
    pub floor: FloorId,
    /// Every secondary use claiming it, in declaration order.
    pub claimed_by: Vec<BuildingUse>,
}

/// The full document-to-floor mapping for one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicabilityResult {
    /// Every selected document in `(priority, name)` order, each appearing
    /// once regardless of how many floors it covers.
    pub documents: Vec<ApplicableDocument>,
    /// Document names applying on each floor of the configured range.
    pub floor_documents: BTreeMap<FloorId, BTreeSet<String>>,
    /// Floors claimed by more than one secondary use.
    pub conflicts: Vec<FloorConflict>,
    /// Fingerprint of the corpus this mapping was derived from.
    pub corpus_fingerprint: String,
}

impl ApplicabilityResult {
    /// Look up a selected document by name.
    pub fn document(&self, name: &str) -> Option<&ApplicableDocument> {
        self.documents.iter().find(|d| d.document.name == name)
    }

    /// Documents applying on one floor, in `(priority, name)` order.
    pub fn documents_on(&self, floor: FloorId) -> Vec<&ApplicableDocument> {
        let Some(names) = self.floor_documents.get(&floor) else {
            return Vec::new();
        };
        self.documents
            .iter()
            .filter(|d| names.contains(&d.document.name))
            .collect()
    }

    /// Every `(floor, document)` evaluation pair, floors ascending and
    /// document names ascending within a floor.
    pub fn pairs(&self) -> impl Iterator<Item = (FloorId, &ApplicableDocument)> {
        self.floor_documents.iter().flat_map(move |(floor, names)| {
            names
                .iter()
                .filter_map(move |name| self.document(name).map(|doc| (*floor, doc)))
        })
    }

    /// Total number of evaluation pairs.
    pub fn pair_count(&self) -> usize {
        self.floor_documents.values().map(BTreeSet::len).sum()
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve which documents apply to which floors of a project.
///
/// Selection rules, applied over the corpus in `(priority, name)` order:
///
/// * Baseline documents and universal zoning documents cover every floor
///   in the configured range.
/// * A zoning document scoped to the primary use covers the floors no
///   secondary entry claims.
/// * A zoning document scoped to a secondary use covers exactly that
///   entry's floors.
/// * Support documents cover every floor, but only for existing buildings.
///
/// A document's own floor scope always intersects the rules above. Floors
/// claimed by several secondary uses get every claimant's documents and
/// are reported in [`ApplicabilityResult::conflicts`].
///
/// # Errors
///
/// Returns [`ValidationError::EmptyFloorSet`] for a secondary entry with
/// no floors, and [`ValidationError::FloorOutOfRange`] for a secondary
/// floor outside the configured range.
pub fn resolve(
    assignment: &UseAssignment,
    corpus: &Corpus,
    config: &ResolverConfig,
) -> Result<ApplicabilityResult, ValidationError> {
    assignment.validate()?;

    let range = &config.floor_range;
    let mut claims: BTreeMap<FloorId, Vec<BuildingUse>> = BTreeMap::new();
    for entry in &assignment.secondary_uses {
        for &floor in &entry.floors {
            if !range.contains(floor) {
                return Err(ValidationError::FloorOutOfRange {
                    floor: floor.level(),
                    low: range.lowest().level(),
                    high: range.highest().level(),
                });
            }
            claims.entry(floor).or_default().push(entry.use_type);
        }
    }

    let conflicts: Vec<FloorConflict> = claims
        .iter()
        .filter(|(_, claimants)| claimants.len() > 1)
        .map(|(&floor, claimants)| FloorConflict {
            floor,
            claimed_by: claimants.clone(),
        })
        .collect();
    for conflict in &conflicts {
        warn!(
            floor = %conflict.floor,
            claimants = conflict.claimed_by.len(),
            "floor claimed by multiple secondary uses; applying all claimants"
        );
    }

    let secondary_floors: BTreeSet<FloorId> = claims.keys().copied().collect();

    let mut floor_documents: BTreeMap<FloorId, BTreeSet<String>> =
        range.iter().map(|floor| (floor, BTreeSet::new())).collect();
    let mut selected: BTreeSet<String> = BTreeSet::new();

    for document in corpus.in_priority_order() {
        let candidate_floors: Vec<FloorId> = match document.category {
            DocCategory::Baseline => range.iter().collect(),
            DocCategory::Zoning if document.uses.is_all() => range.iter().collect(),
            DocCategory::Zoning => {
                let mut floors = Vec::new();
                if document.applies_to_use(assignment.primary_use) {
                    floors.extend(range.iter().filter(|f| !secondary_floors.contains(f)));
                }
                for entry in &assignment.secondary_uses {
                    if document.applies_to_use(entry.use_type) {
                        floors.extend(entry.floors.iter().copied());
                    }
                }
                floors
            }
            DocCategory::Support => {
                if assignment.existing_building {
                    range.iter().collect()
                } else {
                    Vec::new()
                }
            }
        };

        for floor in candidate_floors {
            if !document.applies_to_floor(floor) {
                continue;
            }
            if let Some(names) = floor_documents.get_mut(&floor) {
                if names.insert(document.name.clone()) {
                    selected.insert(document.name.clone());
                }
            }
        }
    }

    let documents: Vec<ApplicableDocument> = corpus
        .in_priority_order()
        .into_iter()
        .filter(|d| selected.contains(&d.name))
        .map(|d| ApplicableDocument {
            checks: checks_for(d),
            document: d.clone(),
        })
        .collect();

    debug!(
        documents = documents.len(),
        floors = floor_documents.len(),
        pairs = floor_documents.values().map(BTreeSet::len).sum::<usize>(),
        conflicts = conflicts.len(),
        fingerprint = corpus.fingerprint(),
        "applicability resolved"
    );

    Ok(ApplicabilityResult {
        documents,
        floor_documents,
        conflicts,
        corpus_fingerprint: corpus.fingerprint().to_string(),
    })
}
