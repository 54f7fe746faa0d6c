//! # Pattern Vocabularies
//!
//! Fixed vocabularies for the text signal. A pattern either appears in the
//! (lowercased) text or it does not; repeated occurrences do not increase
//! its contribution. Scoring normalizes per-family hit counts by the total
//! hits across both vocabularies, so a document dense in both vocabularies
//! yields a low-margin verdict rather than two high confidences.

use crate::family::DocFamily;

/// Patterns indicating a narrative document: report titles, section
/// conventions, and calculation terminology.
pub const NARRATIVE_PATTERNS: &[&str] = &[
    // Title conventions.
    "descriptive report",
    "calculation report",
    "technical report",
    "construction report",
    "justification report",
    "technical specification",
    // Content conventions.
    "scope of the project",
    "general description",
    "design criteria",
    "applicable regulations",
    "general conditions",
    "construction systems",
    "building services",
    "safety measures",
    "energy efficiency",
    // Section conventions.
    "introduction",
    "conclusions",
    "annex",
    "bibliography",
    // Calculation terminology.
    "load case",
    "safety factor",
    "deflection",
    "stress",
    "modulus",
    "verification",
    "technical building code",
];

/// Patterns indicating a drawing document: sheet titles, annotation
/// conventions, and drawn-element terminology.
pub const DRAWING_PATTERNS: &[&str] = &[
    // Sheet titles.
    "floor plan",
    "site plan",
    "roof plan",
    "elevation",
    "cross section",
    "longitudinal section",
    "detail sheet",
    "facade",
    // Annotation conventions.
    "scale 1:",
    "north arrow",
    "spot level",
    "dimension line",
    "legend",
    "ground floor",
    "first floor",
    "basement",
    "mezzanine",
    // Drawn elements.
    "partition wall",
    "load-bearing wall",
    "slab edge",
    "beam",
    "column grid",
    "door swing",
    "window opening",
    "staircase",
    "ramp",
    "elevator shaft",
    "parking bay",
];

/// Visual-detection labels that indicate a drawing. Labels outside this set
/// (logos, stamps, photographs) do not count toward the visual signal.
pub const DRAWING_INDICATOR_LABELS: &[&str] = &[
    "wall",
    "door",
    "window",
    "room",
    "stair",
    "column",
    "dimension",
    "axis_grid",
    "section_mark",
    "north_arrow",
    "scale_bar",
    "legend",
];

/// The text vocabulary for a family.
pub fn patterns_for(family: DocFamily) -> &'static [&'static str] {
    match family {
        DocFamily::Narrative => NARRATIVE_PATTERNS,
        DocFamily::Drawing => DRAWING_PATTERNS,
    }
}

/// The patterns from a family's vocabulary present in the text.
///
/// Matching is case-insensitive containment over the already-lowercased
/// text; callers lowercase once and reuse.
pub fn matched_patterns(lowercased_text: &str, family: DocFamily) -> Vec<&'static str> {
    patterns_for(family)
        .iter()
        .copied()
        .filter(|pattern| lowercased_text.contains(pattern))
        .collect()
}

/// Whether a visual-detection label counts as a drawing indicator.
pub fn is_drawing_indicator(label: &str) -> bool {
    DRAWING_INDICATOR_LABELS
        .iter()
        .any(|indicator| indicator.eq_ignore_ascii_case(label))
}
