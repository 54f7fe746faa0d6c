//! # Compliance Issues
//!
//! [`ComplianceIssue`] is the atomic finding produced by compliance
//! evaluation: one concrete deviation from one regulatory document, carrying
//! enough context (floor, measured vs. required value, page reference) for a
//! reviewer to locate and act on it. Issue identifiers double as the join key
//! into checklist items, so they are stable strings, not synthetic UUIDs.

use serde::{Deserialize, Serialize};

use crate::category::CheckCategory;
use crate::floor::FloorId;
use crate::severity::Severity;
use crate::temporal::Timestamp;

/// A single compliance finding against a regulatory document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceIssue {
    /// Stable identifier, e.g. `fire-extinguisher-coverage`. Matches the
    /// check-identifier space used by checklist templates.
    pub id: String,
    /// Short human-readable summary.
    pub title: String,
    /// Full description of the deviation.
    pub description: String,
    /// How severe the deviation is.
    pub severity: Severity,
    /// The requirement category the finding belongs to.
    pub category: CheckCategory,
    /// Name of the regulatory document the finding cites.
    pub document_reference: String,
    /// The floor the finding applies to, when floor-specific.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<FloorId>,
    /// The value observed in the submission, when quantifiable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_value: Option<String>,
    /// The value the document requires, when quantifiable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_value: Option<String>,
    /// Suggested remediation.
    pub recommendation: String,
    /// Page or section of the submission where the deviation was observed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_reference: Option<String>,
    /// When the finding was recorded.
    pub detected_at: Timestamp,
}

impl ComplianceIssue {
    /// Create an issue with the required fields; optional context is added
    /// with the `with_*` builders.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
        category: CheckCategory,
        document_reference: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            severity,
            category,
            document_reference: document_reference.into(),
            floor: None,
            current_value: None,
            required_value: None,
            recommendation: recommendation.into(),
            page_reference: None,
            detected_at: Timestamp::now(),
        }
    }

    /// Pin the issue to a floor.
    pub fn with_floor(mut self, floor: FloorId) -> Self {
        self.floor = Some(floor);
        self
    }

    /// Record the observed and required values.
    pub fn with_values(
        mut self,
        current: impl Into<String>,
        required: impl Into<String>,
    ) -> Self {
        self.current_value = Some(current.into());
        self.required_value = Some(required.into());
        self
    }

    /// Record where in the submission the deviation was observed.
    pub fn with_page_reference(mut self, page: impl Into<String>) -> Self {
        self.page_reference = Some(page.into());
        self
    }

    /// Override the detection timestamp (used when replaying stored results).
    pub fn with_detected_at(mut self, detected_at: Timestamp) -> Self {
        self.detected_at = detected_at;
        self
    }

    /// Whether the finding blocks approval on its own.
    pub fn is_blocking(&self) -> bool {
        self.severity == Severity::Critical
    }
}
