//! Caller-supplied project snapshot.

use serde::{Deserialize, Serialize};

use norma_core::{ProjectId, UseAssignment};

/// Everything the engine needs to know about one submission.
///
/// The engine never mutates the input; evaluation derives applicability
/// from the assignment and judges the supplied text excerpt against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInput {
    /// Identifier the result and every graph emission is keyed by.
    pub id: ProjectId,
    /// Human-readable project name, quoted in evaluation briefs.
    pub name: String,
    /// Declared primary and secondary uses.
    pub assignment: UseAssignment,
}

impl ProjectInput {
    /// Create an input with a freshly generated identifier.
    pub fn new(name: impl Into<String>, assignment: UseAssignment) -> Self {
        Self {
            id: ProjectId::generate(),
            name: name.into(),
            assignment,
        }
    }

    /// Replace the generated identifier with an external one.
    #[must_use]
    pub fn with_id(mut self, id: ProjectId) -> Self {
        self.id = id;
        self
    }
}

#[cfg(test)]
mod tests {
    use norma_core::BuildingUse;

    use super::*;

    #[test]
    fn new_inputs_get_distinct_ids() {
        let a = ProjectInput::new("A", UseAssignment::new(BuildingUse::Residential));
        let b = ProjectInput::new("B", UseAssignment::new(BuildingUse::Residential));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn with_id_overrides_the_generated_one() {
        let id = ProjectId::new("PRJ-2026-0142").unwrap();
        let input = ProjectInput::new("Depot", UseAssignment::new(BuildingUse::Industrial))
            .with_id(id.clone());
        assert_eq!(input.id, id);
    }
}
