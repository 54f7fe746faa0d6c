//! # Corpus Loading and Fingerprinting
//!
//! [`Corpus`] is the immutable catalog the rest of the stack resolves
//! against. It can be built three ways: the in-code built-in catalog, an
//! explicit document list, or a YAML/JSON file on disk. However built, the
//! catalog is fingerprinted with SHA-256 over its canonical JSON form, and
//! the fingerprint is stamped into every applicability result so a stored
//! result can be traced to the exact catalog it was resolved against.
//!
//! Documents are held in a `BTreeMap` keyed by name. Iteration order is
//! therefore deterministic, which the fingerprint and the resolver both
//! rely on.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::info;

use norma_core::BuildingUse;

use crate::document::{DocCategory, RegulatoryDocument};
use crate::error::{CorpusError, CorpusResult};

/// On-disk corpus file layout: a single `documents` list.
#[derive(Debug, Serialize, Deserialize)]
struct CorpusFile {
    documents: Vec<RegulatoryDocument>,
}

/// An immutable, fingerprinted catalog of regulatory documents.
#[derive(Debug, Clone)]
pub struct Corpus {
    documents: BTreeMap<String, RegulatoryDocument>,
    fingerprint: String,
    loaded_from: Option<PathBuf>,
}

impl Corpus {
    /// Build a corpus from an explicit document list.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError::EmptyCorpus`] for an empty list and
    /// [`CorpusError::DuplicateDocument`] when two documents share a name.
    pub fn from_documents(documents: Vec<RegulatoryDocument>) -> CorpusResult<Self> {
        if documents.is_empty() {
            return Err(CorpusError::EmptyCorpus);
        }
        let mut map = BTreeMap::new();
        for document in documents {
            let name = document.name.clone();
            if map.insert(name.clone(), document).is_some() {
                return Err(CorpusError::DuplicateDocument { name });
            }
        }
        let fingerprint = compute_fingerprint(&map)?;
        Ok(Self {
            documents: map,
            fingerprint,
            loaded_from: None,
        })
    }

    /// The built-in catalog: six baseline technical codes, the universal
    /// zoning ordinance plus one ordinance per building use, and three
    /// support annexes for existing buildings.
    pub fn builtin() -> CorpusResult<Self> {
        Self::from_documents(builtin_documents())
    }

    /// Load a corpus from a YAML or JSON file.
    ///
    /// The format is chosen by extension: `.yaml`/`.yml` or `.json`.
    pub fn load(path: &Path) -> CorpusResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CorpusError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                CorpusError::Io(e)
            }
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let file: CorpusFile = match extension.as_deref() {
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&content).map_err(|e| CorpusError::YamlParse {
                    path: path.to_path_buf(),
                    source: e,
                })?
            }
            Some("json") => {
                serde_json::from_str(&content).map_err(|e| CorpusError::JsonParse {
                    path: path.to_path_buf(),
                    source: e,
                })?
            }
            _ => {
                return Err(CorpusError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        let mut corpus = Self::from_documents(file.documents)?;
        corpus.loaded_from = Some(path.to_path_buf());
        info!(
            path = %path.display(),
            documents = corpus.len(),
            fingerprint = %corpus.fingerprint(),
            "corpus loaded"
        );
        Ok(corpus)
    }

    /// Re-read the corpus from the file it was loaded from.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError::NotFileBacked`] for corpora built via
    /// [`Corpus::from_documents`] or [`Corpus::builtin`].
    pub fn reload(&self) -> CorpusResult<Self> {
        match &self.loaded_from {
            Some(path) => Self::load(path),
            None => Err(CorpusError::NotFileBacked),
        }
    }

    /// Look up a document by name.
    pub fn get(&self, name: &str) -> Option<&RegulatoryDocument> {
        self.documents.get(name)
    }

    /// Look up a document by name, failing if absent.
    pub fn require(&self, name: &str) -> CorpusResult<&RegulatoryDocument> {
        self.documents
            .get(name)
            .ok_or_else(|| CorpusError::UnknownDocument {
                name: name.to_string(),
            })
    }

    /// All documents, in name order.
    pub fn documents(&self) -> impl Iterator<Item = &RegulatoryDocument> {
        self.documents.values()
    }

    /// All documents, sorted by `(priority, name)`.
    pub fn in_priority_order(&self) -> Vec<&RegulatoryDocument> {
        let mut docs: Vec<&RegulatoryDocument> = self.documents.values().collect();
        docs.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then_with(|| a.name.cmp(&b.name))
        });
        docs
    }

    /// Number of documents in the catalog.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the catalog is empty. Always false for a constructed corpus.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// SHA-256 fingerprint of the catalog's canonical JSON form.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// The file this corpus was loaded from, if any.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.loaded_from.as_deref()
    }
}

/// SHA-256 over the canonical JSON form of the document map.
///
/// `BTreeMap` serialization is key-ordered, so equal catalogs produce equal
/// bytes regardless of construction order.
fn compute_fingerprint(
    documents: &BTreeMap<String, RegulatoryDocument>,
) -> CorpusResult<String> {
    let canonical = serde_json::to_vec(documents).map_err(CorpusError::Fingerprint)?;
    let digest = Sha256::digest(&canonical);
    Ok(digest.iter().map(|b| format!("{b:02x}")).collect())
}

/// The built-in document catalog.
fn builtin_documents() -> Vec<RegulatoryDocument> {
    let mut docs = vec![
        RegulatoryDocument::new(
            "cte-db-se",
            "Structural safety code",
            DocCategory::Baseline,
            "Load-bearing capacity, stability, and structural safety factors.",
        )
        .with_source("CTE DB-SE"),
        RegulatoryDocument::new(
            "cte-db-si",
            "Fire safety code",
            DocCategory::Baseline,
            "Fire compartmentation, evacuation routes, and extinguishing equipment.",
        )
        .with_source("CTE DB-SI"),
        RegulatoryDocument::new(
            "cte-db-sua",
            "Safety of use and accessibility code",
            DocCategory::Baseline,
            "Fall protection, accessible routes, and safety of circulation.",
        )
        .with_source("CTE DB-SUA"),
        RegulatoryDocument::new(
            "cte-db-he",
            "Energy performance code",
            DocCategory::Baseline,
            "Envelope performance, energy demand limits, and renewable contribution.",
        )
        .with_source("CTE DB-HE"),
        RegulatoryDocument::new(
            "cte-db-hr",
            "Protection against noise code",
            DocCategory::Baseline,
            "Airborne and impact sound insulation between units and from outside.",
        )
        .with_source("CTE DB-HR"),
        RegulatoryDocument::new(
            "cte-db-hs",
            "Health and sanitation code",
            DocCategory::Baseline,
            "Damp protection, water supply, waste water, and indoor air quality.",
        )
        .with_source("CTE DB-HS"),
        RegulatoryDocument::new(
            "zoning-universal",
            "Universal zoning provisions",
            DocCategory::Zoning,
            "General urban-plan conditions that apply to every use.",
        ),
    ];

    for building_use in BuildingUse::all_uses() {
        let slug = building_use.as_str().replace('_', "-");
        docs.push(
            RegulatoryDocument::new(
                format!("zoning-{slug}"),
                format!("Zoning ordinance for {building_use} use"),
                DocCategory::Zoning,
                format!("Urban-plan conditions specific to {building_use} use."),
            )
            .for_uses([building_use]),
        );
    }

    docs.extend([
        RegulatoryDocument::new(
            "support-energy-annex-1",
            "Energy calculation annex 1",
            DocCategory::Support,
            "Worked envelope-transmittance calculations for retrofit projects.",
        ),
        RegulatoryDocument::new(
            "support-energy-annex-2",
            "Energy calculation annex 2",
            DocCategory::Support,
            "Worked demand-limit calculations for retrofit projects.",
        ),
        RegulatoryDocument::new(
            "support-acoustic-annex",
            "Acoustic verification annex",
            DocCategory::Support,
            "Measurement and verification guidance for sound insulation in existing buildings.",
        ),
    ]);

    docs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn tiny_corpus() -> Vec<RegulatoryDocument> {
        vec![
            RegulatoryDocument::new(
                "cte-db-si",
                "Fire safety code",
                DocCategory::Baseline,
                "Fire safety requirements.",
            ),
            RegulatoryDocument::new(
                "zoning-universal",
                "Universal zoning provisions",
                DocCategory::Zoning,
                "Conditions for every use.",
            ),
        ]
    }

    #[test]
    fn builtin_catalog_shape() {
        let corpus = Corpus::builtin().unwrap();
        let baseline = corpus
            .documents()
            .filter(|d| d.category == DocCategory::Baseline)
            .count();
        let zoning = corpus
            .documents()
            .filter(|d| d.category == DocCategory::Zoning)
            .count();
        let support = corpus
            .documents()
            .filter(|d| d.category == DocCategory::Support)
            .count();

        assert_eq!(baseline, 6);
        // Universal plus one ordinance per use.
        assert_eq!(zoning, 1 + BuildingUse::all_uses().len());
        assert_eq!(support, 3);
        assert_eq!(corpus.len(), baseline + zoning + support);
    }

    #[test]
    fn builtin_has_one_zoning_doc_per_use() {
        let corpus = Corpus::builtin().unwrap();
        for building_use in BuildingUse::all_uses() {
            let specific: Vec<_> = corpus
                .documents()
                .filter(|d| {
                    d.category == DocCategory::Zoning
                        && !d.uses.is_all()
                        && d.applies_to_use(building_use)
                })
                .collect();
            assert_eq!(specific.len(), 1, "expected one ordinance for {building_use}");
        }
    }

    #[test]
    fn empty_corpus_rejected() {
        let err = Corpus::from_documents(Vec::new()).unwrap_err();
        assert!(matches!(err, CorpusError::EmptyCorpus));
    }

    #[test]
    fn duplicate_names_rejected() {
        let mut docs = tiny_corpus();
        docs.push(docs[0].clone());
        let err = Corpus::from_documents(docs).unwrap_err();
        assert!(matches!(err, CorpusError::DuplicateDocument { name } if name == "cte-db-si"));
    }

    #[test]
    fn fingerprint_ignores_construction_order() {
        let forward = Corpus::from_documents(tiny_corpus()).unwrap();
        let mut reversed_docs = tiny_corpus();
        reversed_docs.reverse();
        let reversed = Corpus::from_documents(reversed_docs).unwrap();
        assert_eq!(forward.fingerprint(), reversed.fingerprint());
    }

    #[test]
    fn fingerprint_tracks_content() {
        let original = Corpus::from_documents(tiny_corpus()).unwrap();
        let mut edited_docs = tiny_corpus();
        edited_docs[0].description = "Amended fire safety requirements.".to_string();
        let edited = Corpus::from_documents(edited_docs).unwrap();
        assert_ne!(original.fingerprint(), edited.fingerprint());
    }

    #[test]
    fn fingerprint_is_sha256_hex() {
        let corpus = Corpus::builtin().unwrap();
        assert_eq!(corpus.fingerprint().len(), 64);
        assert!(corpus
            .fingerprint()
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn require_unknown_document_fails() {
        let corpus = Corpus::from_documents(tiny_corpus()).unwrap();
        let err = corpus.require("zoning-asteroid").unwrap_err();
        assert!(matches!(err, CorpusError::UnknownDocument { .. }));
    }

    #[test]
    fn priority_order_is_deterministic() {
        let corpus = Corpus::builtin().unwrap();
        let ordered = corpus.in_priority_order();
        let priorities: Vec<u8> = ordered.iter().map(|d| d.priority).collect();
        let mut sorted = priorities.clone();
        sorted.sort_unstable();
        assert_eq!(priorities, sorted);
        // Baseline codes come before any zoning ordinance.
        assert_eq!(ordered[0].category, DocCategory::Baseline);
    }

    #[test]
    fn load_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            "documents:\n\
             \x20 - name: cte-db-si\n\
             \x20   title: Fire safety code\n\
             \x20   category: baseline\n\
             \x20   priority: 1\n\
             \x20   description: Fire safety requirements.\n\
             \x20 - name: zoning-garage\n\
             \x20   title: Garage zoning ordinance\n\
             \x20   category: zoning\n\
             \x20   uses: [garage]\n\
             \x20   floors: [-1, -2]\n\
             \x20   priority: 2\n\
             \x20   description: Parking provisions.\n"
        )
        .unwrap();

        let corpus = Corpus::load(&path).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.loaded_from(), Some(path.as_path()));
        let garage = corpus.get("zoning-garage").unwrap();
        assert!(garage.applies_to_use(norma_core::BuildingUse::Garage));
        assert!(!garage.applies_to_floor(norma_core::FloorId::new(0)));
    }

    #[test]
    fn load_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        let file = CorpusFile {
            documents: tiny_corpus(),
        };
        std::fs::write(&path, serde_json::to_string(&file).unwrap()).unwrap();

        let corpus = Corpus::load(&path).unwrap();
        assert_eq!(corpus.len(), 2);
    }

    #[test]
    fn load_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.toml");
        std::fs::write(&path, "documents = []").unwrap();
        let err = Corpus::load(&path).unwrap_err();
        assert!(matches!(err, CorpusError::UnsupportedFormat { .. }));
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let err = Corpus::load(Path::new("/nonexistent/corpus.yaml")).unwrap_err();
        assert!(matches!(err, CorpusError::FileNotFound { .. }));
    }

    #[test]
    fn reload_reflects_file_edits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        let file = CorpusFile {
            documents: tiny_corpus(),
        };
        std::fs::write(&path, serde_json::to_string(&file).unwrap()).unwrap();
        let corpus = Corpus::load(&path).unwrap();

        let mut edited = tiny_corpus();
        edited.push(RegulatoryDocument::new(
            "cte-db-he",
            "Energy performance code",
            DocCategory::Baseline,
            "Energy demand limits.",
        ));
        let file = CorpusFile { documents: edited };
        std::fs::write(&path, serde_json::to_string(&file).unwrap()).unwrap();

        let reloaded = corpus.reload().unwrap();
        assert_eq!(reloaded.len(), 3);
        assert_ne!(reloaded.fingerprint(), corpus.fingerprint());
    }

    #[test]
    fn reload_requires_file_backing() {
        let corpus = Corpus::builtin().unwrap();
        let err = corpus.reload().unwrap_err();
        assert!(matches!(err, CorpusError::NotFileBacked));
    }
}
