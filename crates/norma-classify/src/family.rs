//! # Document Families
//!
//! The classifier sorts submission documents into two families: narrative
//! documents (memoranda, calculation reports, specifications) and drawing
//! documents (plans, elevations, sections). Every downstream consumer keys
//! on exactly this two-way split, so it is a closed enum rather than a
//! free-form label.

use serde::{Deserialize, Serialize};

use norma_core::ValidationError;

/// The two document families the classifier distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocFamily {
    /// Prose documents: descriptive memoranda, calculation reports,
    /// specifications, certificates.
    Narrative,
    /// Graphic documents: floor plans, elevations, sections, detail sheets.
    Drawing,
}

impl DocFamily {
    /// Both families.
    pub fn all_families() -> Vec<DocFamily> {
        vec![DocFamily::Narrative, DocFamily::Drawing]
    }

    /// Stable snake_case string form (matches the serde representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            DocFamily::Narrative => "narrative",
            DocFamily::Drawing => "drawing",
        }
    }
}

impl std::fmt::Display for DocFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocFamily {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocFamily::all_families()
            .into_iter()
            .find(|family| family.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownDocFamily(s.to_string()))
    }
}
