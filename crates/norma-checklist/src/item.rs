//! Checklist items: the leaves of the checklist hierarchy.

use serde::{Deserialize, Serialize};

use norma_core::Timestamp;

use crate::template::ItemTemplate;

/// Progress state of one checklist item.
///
/// Only [`ItemStatus::Completed`] counts toward completion percentages;
/// `NotApplicable` items stay in the totals so a checklist cannot reach
/// 100% by waving items away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// Not yet worked on.
    Pending,
    /// Someone is on it.
    InProgress,
    /// Done and verified.
    Completed,
    /// Verification found a blocking problem.
    Failed,
    /// The requirement does not apply to this project.
    NotApplicable,
    /// Verification found a problem that needs follow-up.
    RequiresAttention,
}

impl ItemStatus {
    /// Canonical snake_case label.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Pending => "pending",
            ItemStatus::InProgress => "in_progress",
            ItemStatus::Completed => "completed",
            ItemStatus::Failed => "failed",
            ItemStatus::NotApplicable => "not_applicable",
            ItemStatus::RequiresAttention => "requires_attention",
        }
    }

    /// Whether the item still needs someone's attention.
    pub fn is_open(&self) -> bool {
        !matches!(self, ItemStatus::Completed | ItemStatus::NotApplicable)
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ItemStatus {
    type Err = crate::error::ChecklistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ItemStatus::Pending),
            "in_progress" => Ok(ItemStatus::InProgress),
            "completed" => Ok(ItemStatus::Completed),
            "failed" => Ok(ItemStatus::Failed),
            "not_applicable" => Ok(ItemStatus::NotApplicable),
            "requires_attention" => Ok(ItemStatus::RequiresAttention),
            other => Err(crate::error::ChecklistError::UnknownStatus {
                value: other.to_string(),
            }),
        }
    }
}

/// Urgency of a checklist item. Independent of issue severity: an item
/// can be informational even when the regulation behind it is strict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemPriority {
    /// Must be resolved before submission.
    Critical,
    /// Should be resolved before submission.
    High,
    /// Resolve during the review cycle.
    Medium,
    /// Nice to have.
    Low,
    /// Informational only.
    Info,
}

impl ItemPriority {
    /// Canonical snake_case label.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemPriority::Critical => "critical",
            ItemPriority::High => "high",
            ItemPriority::Medium => "medium",
            ItemPriority::Low => "low",
            ItemPriority::Info => "info",
        }
    }
}

impl std::fmt::Display for ItemPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One verifiable requirement in the checklist.
///
/// Item identifiers reuse the requirement-check identifiers from the
/// corpus, so compliance issues reported against a check seed the
/// matching item's initial status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Stable identifier, shared with the corpus requirement checks.
    pub id: String,
    /// Short title.
    pub title: String,
    /// What has to be verified.
    pub description: String,
    /// Identifier of the owning category.
    pub category: String,
    /// Urgency.
    pub priority: ItemPriority,
    /// Progress state. Mutated only through checklist updates.
    pub status: ItemStatus,
    /// Citation of the regulation behind the requirement.
    pub normative_reference: String,
    /// The dossier artifact the requirement demands.
    pub document_requirement: String,
    /// How the requirement is verified.
    pub verification_method: String,
    /// Evidence files the verification needs.
    pub evidence_required: Vec<String>,
    /// Evidence collected so far.
    pub current_evidence: Vec<String>,
    /// Free-form reviewer notes.
    pub notes: String,
    /// When the item was created.
    pub created_at: Timestamp,
    /// When the item was last mutated.
    pub updated_at: Timestamp,
}

impl ChecklistItem {
    /// Instantiate an item from its template with a seeded status.
    pub fn from_template(template: &ItemTemplate, category: &str, status: ItemStatus) -> Self {
        let now = Timestamp::now();
        Self {
            id: template.id.to_string(),
            title: template.title.to_string(),
            description: template.description.to_string(),
            category: category.to_string(),
            priority: template.priority,
            status,
            normative_reference: template.normative_reference.to_string(),
            document_requirement: template.document_requirement.to_string(),
            verification_method: template.verification_method.to_string(),
            evidence_required: template
                .evidence_required
                .iter()
                .map(|e| e.to_string())
                .collect(),
            current_evidence: Vec::new(),
            notes: String::new(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}
