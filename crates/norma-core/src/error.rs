//! # Error Hierarchy
//!
//! Structured error types for the whole stack, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Each subsystem defines specific error variants that carry diagnostic
//! context: the value that was rejected, the bounds that were violated, and
//! actionable information for operators.

use thiserror::Error;

/// Top-level error type for the Norma Stack.
#[derive(Error, Debug)]
pub enum NormaError {
    /// Domain primitive or assignment validation failure.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A floor label could not be normalized to a floor number.
    #[error("floor parse error: {0}")]
    FloorParse(#[from] FloorParseError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation errors for domain primitives and assignment data.
///
/// Each variant carries the invalid input and the expected shape so that
/// operators can diagnose bad submission data without guesswork.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Project identifier is empty or whitespace-only.
    #[error("invalid project ID: must be non-empty")]
    InvalidProjectId,

    /// A building-use string does not name a known use category.
    #[error("unknown building use: {0:?}")]
    UnknownBuildingUse(String),

    /// A severity string does not name a known severity.
    #[error("unknown severity: {0:?}")]
    UnknownSeverity(String),

    /// A compliance-status string does not name a known status.
    #[error("unknown compliance status: {0:?}")]
    UnknownComplianceStatus(String),

    /// A check-category string does not name a known category.
    #[error("unknown check category: {0:?}")]
    UnknownCheckCategory(String),

    /// A document-family string does not name a known family.
    #[error("unknown document family: {0:?}")]
    UnknownDocFamily(String),

    /// A secondary-use entry was declared without any floors.
    #[error("secondary use entry for {use_type} has an empty floor set")]
    EmptyFloorSet {
        /// The use type of the offending entry.
        use_type: String,
    },

    /// A floor range was declared with its bounds inverted.
    #[error("invalid floor range: lowest {low} is above highest {high}")]
    InvalidFloorRange {
        /// Declared lower bound.
        low: i32,
        /// Declared upper bound.
        high: i32,
    },

    /// An assignment references a floor outside the configured universe.
    #[error("floor {floor} is outside the configured range {low}..={high}")]
    FloorOutOfRange {
        /// The out-of-range floor number.
        floor: i32,
        /// Lower bound of the configured range.
        low: i32,
        /// Upper bound of the configured range.
        high: i32,
    },
}

/// A floor label that could not be normalized to a floor number.
///
/// Produced by [`FloorId::parse_label`](crate::FloorId::parse_label) for
/// labels outside the recognized vocabulary (including half-floor labels
/// such as mezzanines, which this model deliberately does not represent).
#[derive(Error, Debug)]
#[error("unrecognized floor label {label:?}")]
pub struct FloorParseError {
    /// The label as received.
    pub label: String,
}
