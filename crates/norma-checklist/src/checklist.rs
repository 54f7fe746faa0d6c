//! Checklist generation and mutation.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use norma_core::{BuildingUse, ComplianceIssue, ProjectId, Severity, Timestamp};
use norma_engine::{ApplicabilityResult, ComplianceResult, ProjectInput};

use crate::error::ChecklistError;
use crate::item::{ChecklistItem, ItemPriority, ItemStatus};
use crate::template::template_for;

/// Lifecycle state of a checklist, derived from its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistStatus {
    /// No item has been completed yet.
    Draft,
    /// Some items are completed.
    InProgress,
    /// Every item is completed.
    Completed,
}

impl ChecklistStatus {
    /// Canonical snake_case label.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChecklistStatus::Draft => "draft",
            ChecklistStatus::InProgress => "in_progress",
            ChecklistStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for ChecklistStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One group of related checklist items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistCategory {
    /// Stable category identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// What the category covers.
    pub description: String,
    /// The items in the category.
    pub items: Vec<ChecklistItem>,
    /// Completed items over total items, as a percentage.
    pub completion_percentage: f64,
    /// Item count.
    pub total_items: usize,
    /// Completed item count.
    pub completed_items: usize,
}

/// Fields an update may change on one item. Everything else is fixed at
/// generation time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemUpdate {
    /// New progress state.
    pub status: Option<ItemStatus>,
    /// Replacement reviewer notes.
    pub notes: Option<String>,
    /// Replacement evidence list.
    pub current_evidence: Option<Vec<String>>,
}

/// The hierarchical progress structure for one project.
///
/// Percentages and counters are derived state: they are recomputed from
/// the full item set after every mutation and never adjusted
/// incrementally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checklist {
    /// Project the checklist tracks.
    pub project_id: ProjectId,
    /// Human-readable project name.
    pub project_name: String,
    /// Primary use the template was selected by.
    pub primary_use: BuildingUse,
    /// Whether the project is an existing building.
    pub existing_building: bool,
    /// Fingerprint of the corpus the seeding evaluation ran against.
    pub corpus_fingerprint: String,
    /// The categories, in template order.
    pub categories: Vec<ChecklistCategory>,
    /// Completed items over total items, as a percentage.
    pub overall_completion: f64,
    /// Item count across categories.
    pub total_items: usize,
    /// Completed item count across categories.
    pub completed_items: usize,
    /// Items with critical priority.
    pub critical_items: usize,
    /// Items with high priority.
    pub high_priority_items: usize,
    /// Lifecycle state, derived from completion.
    pub status: ChecklistStatus,
    /// When the checklist was generated.
    pub created_at: Timestamp,
    /// When the checklist was last mutated.
    pub updated_at: Timestamp,
}

impl Checklist {
    /// Look up an item anywhere in the hierarchy.
    pub fn item(&self, item_id: &str) -> Option<&ChecklistItem> {
        self.items().find(|item| item.id == item_id)
    }

    /// Every item across categories, in template order.
    pub fn items(&self) -> impl Iterator<Item = &ChecklistItem> {
        self.categories.iter().flat_map(|c| c.items.iter())
    }

    /// Apply an update to one item and recompute all derived state.
    ///
    /// # Errors
    ///
    /// Returns [`ChecklistError::ItemNotFound`] when no item has the
    /// given identifier; the checklist is left untouched.
    pub fn update_item(&mut self, item_id: &str, update: ItemUpdate) -> Result<(), ChecklistError> {
        {
            let item = self
                .categories
                .iter_mut()
                .flat_map(|c| c.items.iter_mut())
                .find(|item| item.id == item_id)
                .ok_or_else(|| ChecklistError::ItemNotFound {
                    item_id: item_id.to_string(),
                })?;
            if let Some(status) = update.status {
                item.status = status;
            }
            if let Some(notes) = update.notes {
                item.notes = notes;
            }
            if let Some(evidence) = update.current_evidence {
                item.current_evidence = evidence;
            }
            item.updated_at = Timestamp::now();
        }
        self.updated_at = Timestamp::now();
        self.recompute();
        debug!(item = item_id, "checklist item updated");
        Ok(())
    }

    /// Recompute every derived counter and percentage from the current
    /// item set.
    fn recompute(&mut self) {
        let mut total = 0usize;
        let mut completed = 0usize;
        let mut critical = 0usize;
        let mut high = 0usize;

        for category in &mut self.categories {
            let category_total = category.items.len();
            let category_completed = category
                .items
                .iter()
                .filter(|item| item.status == ItemStatus::Completed)
                .count();
            category.total_items = category_total;
            category.completed_items = category_completed;
            category.completion_percentage = percentage(category_completed, category_total);

            total += category_total;
            completed += category_completed;
            critical += category
                .items
                .iter()
                .filter(|item| item.priority == ItemPriority::Critical)
                .count();
            high += category
                .items
                .iter()
                .filter(|item| item.priority == ItemPriority::High)
                .count();
        }

        self.total_items = total;
        self.completed_items = completed;
        self.critical_items = critical;
        self.high_priority_items = high;
        self.overall_completion = percentage(completed, total);
        self.status = if total > 0 && completed == total {
            ChecklistStatus::Completed
        } else if completed > 0 {
            ChecklistStatus::InProgress
        } else {
            ChecklistStatus::Draft
        };
    }
}

fn percentage(completed: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        completed as f64 / total as f64 * 100.0
    }
}

/// Instantiate the checklist for a project from its template, seeding
/// item statuses from the compliance issues.
///
/// Seeding matches issues to items by exact identifier: a critical issue
/// marks the item failed, a high issue marks it requiring attention, any
/// other match and no match at all leave it pending.
pub fn generate(
    project: &ProjectInput,
    applicability: &ApplicabilityResult,
    result: &ComplianceResult,
) -> Checklist {
    let now = Timestamp::now();
    let categories: Vec<ChecklistCategory> = template_for(project.assignment.primary_use)
        .into_iter()
        .map(|template| ChecklistCategory {
            id: template.id.to_string(),
            name: template.name.to_string(),
            description: template.description.to_string(),
            items: template
                .items
                .iter()
                .map(|item| {
                    ChecklistItem::from_template(
                        item,
                        template.id,
                        seeded_status(item.id, &result.issues),
                    )
                })
                .collect(),
            completion_percentage: 0.0,
            total_items: 0,
            completed_items: 0,
        })
        .collect();

    let mut checklist = Checklist {
        project_id: project.id.clone(),
        project_name: project.name.clone(),
        primary_use: project.assignment.primary_use,
        existing_building: project.assignment.existing_building,
        corpus_fingerprint: applicability.corpus_fingerprint.clone(),
        categories,
        overall_completion: 0.0,
        total_items: 0,
        completed_items: 0,
        critical_items: 0,
        high_priority_items: 0,
        status: ChecklistStatus::Draft,
        created_at: now.clone(),
        updated_at: now,
    };
    checklist.recompute();

    info!(
        project = %checklist.project_id,
        categories = checklist.categories.len(),
        items = checklist.total_items,
        "checklist generated"
    );
    checklist
}

fn seeded_status(item_id: &str, issues: &[ComplianceIssue]) -> ItemStatus {
    for issue in issues {
        if issue.id == item_id {
            return match issue.severity {
                Severity::Critical => ItemStatus::Failed,
                Severity::High => ItemStatus::RequiresAttention,
                _ => ItemStatus::Pending,
            };
        }
    }
    ItemStatus::Pending
}
