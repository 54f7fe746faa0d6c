//! Evaluation briefs.
//!
//! A brief is the document-specific half of a judge prompt: which floor
//! and document are under evaluation, what the document regulates, and
//! the numbered requirement checks the verdict should cover. The project
//! text excerpt travels separately as evidence.

use norma_core::{CheckCategory, FloorId};

use crate::applicability::ApplicableDocument;
use crate::project::ProjectInput;

/// One sentence steering the judge toward a category's subject matter.
pub fn category_focus(category: CheckCategory) -> &'static str {
    match category {
        CheckCategory::Energy => {
            "Focus on energy demand limits, envelope transmittance and the \
             efficiency of thermal installations."
        }
        CheckCategory::Acoustic => {
            "Focus on airborne and impact sound insulation between units and \
             against outdoor noise."
        }
        CheckCategory::FireSafety => {
            "Focus on fire resistance of elements, compartmentation, \
             evacuation routes and extinguishing equipment."
        }
        CheckCategory::Accessibility => {
            "Focus on accessible routes, ramp slopes and widths, lifts and \
             fall protection."
        }
        CheckCategory::Structural => {
            "Focus on load assumptions, safety factors and the sizing of \
             structural elements."
        }
        CheckCategory::Residential => {
            "Focus on dwelling habitability: minimum areas, ceiling heights, \
             natural light and ventilation."
        }
        CheckCategory::Industrial => {
            "Focus on separation from dwellings and on industrial vehicle \
             access."
        }
        CheckCategory::Parking => {
            "Focus on parking bay dimensions, circulation and garage \
             ventilation."
        }
        CheckCategory::Documentation => {
            "Focus on completeness of the submission dossier against the \
             required document list."
        }
        CheckCategory::General => {
            "Focus on conformity with the general conditions of the \
             applicable plan."
        }
    }
}

/// Render the brief for one `(floor, document)` evaluation pair.
///
/// The text names every check with its severity so the judge can cite
/// check identifiers back in its findings.
pub fn build_brief(
    project: &ProjectInput,
    applicable: &ApplicableDocument,
    floor: FloorId,
) -> String {
    let document = &applicable.document;
    let category = CheckCategory::for_document_name(&document.name);

    let mut brief = String::new();
    brief.push_str(&format!(
        "Evaluate floor {floor} of project \"{name}\" against \"{title}\" ({doc}).\n",
        name = project.name,
        title = document.title,
        doc = document.name,
    ));
    brief.push_str(category_focus(category));
    brief.push('\n');
    brief.push_str(&format!("Document scope: {}\n", document.description));

    let assignment = &project.assignment;
    brief.push_str(&format!(
        "Project profile: primary use {}, {}",
        assignment.primary_use,
        if assignment.existing_building {
            "existing building"
        } else {
            "new construction"
        },
    ));
    if !assignment.secondary_uses.is_empty() {
        let secondaries: Vec<String> = assignment
            .secondary_uses
            .iter()
            .map(|entry| {
                let floors: Vec<String> =
                    entry.floors.iter().map(|f| f.to_string()).collect();
                format!("{} on floors {}", entry.use_type, floors.join(", "))
            })
            .collect();
        brief.push_str(&format!("; secondary uses: {}", secondaries.join("; ")));
    }
    brief.push_str(".\n");

    if applicable.checks.is_empty() {
        brief.push_str("Checks: evaluate general conformity with the document scope.\n");
    } else {
        brief.push_str("Checks:\n");
        for (n, check) in applicable.checks.iter().enumerate() {
            brief.push_str(&format!(
                "  {}. [{}] {} ({}): {}\n",
                n + 1,
                check.severity,
                check.title,
                check.id,
                check.description,
            ));
        }
    }
    brief
}
