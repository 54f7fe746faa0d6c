//! Progress reporting.
//!
//! Renders a [`Checklist`](crate::Checklist) into the structure review
//! meetings and submission dossiers consume: headline statistics,
//! per-category rows, the outstanding critical items and rule-derived
//! recommendations and next steps.

use serde::{Deserialize, Serialize};

use norma_core::{BuildingUse, ProjectId, Timestamp};

use crate::checklist::{Checklist, ChecklistStatus};
use crate::item::{ChecklistItem, ItemPriority, ItemStatus};

/// Headline counters for the whole checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistStatistics {
    /// Item count across categories.
    pub total_items: usize,
    /// Completed items.
    pub completed_items: usize,
    /// Completed over total, as a percentage.
    pub completion_percentage: f64,
    /// Items in the failed state.
    pub failed_items: usize,
    /// Items flagged as requiring attention.
    pub requires_attention_items: usize,
    /// Items with critical priority.
    pub critical_items: usize,
    /// Items with high priority.
    pub high_priority_items: usize,
}

/// One per-category progress row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRow {
    /// Category identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Completed over total, as a percentage.
    pub completion_percentage: f64,
    /// Item count.
    pub total_items: usize,
    /// Completed items.
    pub completed_items: usize,
    /// Items in the failed state.
    pub failed_items: usize,
}

/// A prioritized recommendation with the items it refers to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistRecommendation {
    /// Urgency of the recommendation.
    pub priority: ItemPriority,
    /// What to do.
    pub action: String,
    /// Titles of the items the action covers.
    pub items: Vec<String>,
}

/// A machine-addressable next step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextStep {
    /// Stable action keyword.
    pub action: String,
    /// Human-readable description.
    pub description: String,
    /// Titles of the items the step covers.
    pub items: Vec<String>,
}

/// Snapshot report over one checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistReport {
    /// Project the checklist tracks.
    pub project_id: ProjectId,
    /// Human-readable project name.
    pub project_name: String,
    /// Primary use the template was selected by.
    pub primary_use: BuildingUse,
    /// Whether the project is an existing building.
    pub existing_building: bool,
    /// Lifecycle state of the checklist.
    pub status: ChecklistStatus,
    /// Headline counters.
    pub statistics: ChecklistStatistics,
    /// Per-category progress, in template order.
    pub categories: Vec<CategoryRow>,
    /// Titles of critical-priority items that are still open.
    pub outstanding_critical: Vec<String>,
    /// Rule-derived recommendations, highest urgency first.
    pub recommendations: Vec<ChecklistRecommendation>,
    /// Rule-derived next steps.
    pub next_steps: Vec<NextStep>,
    /// When the report was built.
    pub generated_at: Timestamp,
}

/// Build the progress report for a checklist.
pub fn build_checklist_report(checklist: &Checklist) -> ChecklistReport {
    let statistics = ChecklistStatistics {
        total_items: checklist.total_items,
        completed_items: checklist.completed_items,
        completion_percentage: checklist.overall_completion,
        failed_items: count_status(checklist, ItemStatus::Failed),
        requires_attention_items: count_status(checklist, ItemStatus::RequiresAttention),
        critical_items: checklist.critical_items,
        high_priority_items: checklist.high_priority_items,
    };

    let categories = checklist
        .categories
        .iter()
        .map(|category| CategoryRow {
            id: category.id.clone(),
            name: category.name.clone(),
            completion_percentage: category.completion_percentage,
            total_items: category.total_items,
            completed_items: category.completed_items,
            failed_items: category
                .items
                .iter()
                .filter(|item| item.status == ItemStatus::Failed)
                .count(),
        })
        .collect();

    let outstanding_critical: Vec<String> = checklist
        .items()
        .filter(|item| item.priority == ItemPriority::Critical && item.status.is_open())
        .map(|item| item.title.clone())
        .collect();

    ChecklistReport {
        project_id: checklist.project_id.clone(),
        project_name: checklist.project_name.clone(),
        primary_use: checklist.primary_use,
        existing_building: checklist.existing_building,
        status: checklist.status,
        statistics,
        categories,
        outstanding_critical: outstanding_critical.clone(),
        recommendations: recommendations(checklist, &outstanding_critical),
        next_steps: next_steps(checklist),
        generated_at: Timestamp::now(),
    }
}

fn count_status(checklist: &Checklist, status: ItemStatus) -> usize {
    checklist.items().filter(|item| item.status == status).count()
}

fn open_titles<'a>(items: impl Iterator<Item = &'a ChecklistItem>) -> Vec<String> {
    items
        .filter(|item| item.status.is_open())
        .map(|item| item.title.clone())
        .collect()
}

fn recommendations(
    checklist: &Checklist,
    outstanding_critical: &[String],
) -> Vec<ChecklistRecommendation> {
    let mut recs = Vec::new();

    if !outstanding_critical.is_empty() {
        recs.push(ChecklistRecommendation {
            priority: ItemPriority::Critical,
            action: format!(
                "Close the {} open critical item(s) before submitting the licence application.",
                outstanding_critical.len()
            ),
            items: outstanding_critical.to_vec(),
        });
    }

    for category in &checklist.categories {
        if category.total_items > 0 && category.completion_percentage < 50.0 {
            recs.push(ChecklistRecommendation {
                priority: ItemPriority::High,
                action: format!(
                    "Advance the {} category, currently at {:.0}% completion.",
                    category.name, category.completion_percentage
                ),
                items: open_titles(category.items.iter()),
            });
        }
    }

    recs
}

fn next_steps(checklist: &Checklist) -> Vec<NextStep> {
    let high_priority_open: Vec<String> = checklist
        .items()
        .filter(|item| {
            matches!(item.priority, ItemPriority::Critical | ItemPriority::High)
                && item.status.is_open()
        })
        .map(|item| item.title.clone())
        .collect();

    let mut steps = Vec::new();
    if !high_priority_open.is_empty() {
        let count = high_priority_open.len();
        steps.push(NextStep {
            action: "complete_high_priority".to_string(),
            description: format!("Complete the {count} open critical and high priority item(s)."),
            items: high_priority_open.into_iter().take(3).collect(),
        });
    } else if checklist.status == ChecklistStatus::Completed {
        steps.push(NextStep {
            action: "prepare_submission".to_string(),
            description: "Every item is complete; assemble the submission dossier.".to_string(),
            items: Vec::new(),
        });
    }
    steps
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use norma_core::{
        BuildingUse, CheckCategory, ComplianceIssue, ComplianceStatus, FloorId, FloorRange,
        Severity, UseAssignment,
    };
    use norma_engine::{
        resolve, ApplicabilityResult, ComplianceResult, EvaluationSummary, ProjectInput,
        ResolverConfig, SeverityCounts,
    };

    use crate::checklist::{generate, ItemUpdate};

    use super::*;

    fn fixture(issues: Vec<ComplianceIssue>) -> Checklist {
        let corpus = norma_corpus::Corpus::builtin().unwrap();
        let project = ProjectInput::new(
            "Report fixture",
            UseAssignment::new(BuildingUse::Residential),
        );
        let config = ResolverConfig {
            floor_range: FloorRange::new(0, 1).unwrap(),
        };
        let applicability = resolve(&project.assignment, &corpus, &config).unwrap();
        let result = result_with_issues(&project, &applicability, issues);
        generate(&project, &applicability, &result)
    }

    fn result_with_issues(
        project: &ProjectInput,
        applicability: &ApplicabilityResult,
        issues: Vec<ComplianceIssue>,
    ) -> ComplianceResult {
        ComplianceResult {
            project_id: project.id.clone(),
            corpus_fingerprint: applicability.corpus_fingerprint.clone(),
            compliance_score: 100.0,
            status: ComplianceStatus::Compliant,
            total_checks: issues.len(),
            passed_checks: 0,
            failed_checks: issues.len(),
            severity_counts: SeverityCounts::tally(&issues),
            issues,
            floor_scores: BTreeMap::new(),
            document_stats: BTreeMap::new(),
            unresolved: Vec::new(),
            summary: EvaluationSummary {
                project_id: project.id.clone(),
                primary_use: project.assignment.primary_use,
                existing_building: project.assignment.existing_building,
                total_documents: applicability.documents.len(),
                total_floors: applicability.floor_documents.len(),
                overall_score: 100.0,
                status: ComplianceStatus::Compliant,
            },
            evaluated_at: Timestamp::now(),
        }
    }

    fn critical_issue(id: &str) -> ComplianceIssue {
        ComplianceIssue::new(
            id,
            "Fire resistance below the required rating",
            "REI 30 where REI 60 is required.",
            Severity::Critical,
            CheckCategory::FireSafety,
            "cte-db-si",
            "Upgrade the separating elements.",
        )
        .with_floor(FloorId::new(0))
    }

    fn complete_everything(checklist: &mut Checklist) {
        let ids: Vec<String> = checklist.items().map(|i| i.id.clone()).collect();
        for id in ids {
            checklist
                .update_item(
                    &id,
                    ItemUpdate {
                        status: Some(ItemStatus::Completed),
                        ..ItemUpdate::default()
                    },
                )
                .unwrap();
        }
    }

    #[test]
    fn statistics_mirror_the_checklist_counters() {
        let checklist = fixture(vec![critical_issue("fire-resistance-rating")]);
        let report = build_checklist_report(&checklist);

        assert_eq!(report.statistics.total_items, checklist.total_items);
        assert_eq!(report.statistics.completed_items, 0);
        assert_eq!(report.statistics.failed_items, 1);
        assert_eq!(report.statistics.critical_items, checklist.critical_items);
        assert_eq!(report.categories.len(), checklist.categories.len());
        let fire_row = report
            .categories
            .iter()
            .find(|row| row.id == "fire-safety")
            .unwrap();
        assert_eq!(fire_row.failed_items, 1);
    }

    #[test]
    fn outstanding_critical_lists_only_open_critical_items() {
        let mut checklist = fixture(vec![critical_issue("fire-resistance-rating")]);
        let before = build_checklist_report(&checklist);
        assert!(before
            .outstanding_critical
            .iter()
            .any(|title| title.contains("Fire resistance")));

        checklist
            .update_item(
                "fire-resistance-rating",
                ItemUpdate {
                    status: Some(ItemStatus::Completed),
                    ..ItemUpdate::default()
                },
            )
            .unwrap();
        let after = build_checklist_report(&checklist);
        assert!(!after
            .outstanding_critical
            .iter()
            .any(|title| title.contains("Fire resistance")));
    }

    #[test]
    fn fresh_checklist_recommends_every_lagging_category() {
        let checklist = fixture(Vec::new());
        let report = build_checklist_report(&checklist);

        assert_eq!(report.recommendations[0].priority, ItemPriority::Critical);
        let high_recs = report
            .recommendations
            .iter()
            .filter(|rec| rec.priority == ItemPriority::High)
            .count();
        assert_eq!(high_recs, checklist.categories.len());
    }

    #[test]
    fn next_steps_carry_at_most_three_titles() {
        let checklist = fixture(Vec::new());
        let report = build_checklist_report(&checklist);

        let step = &report.next_steps[0];
        assert_eq!(step.action, "complete_high_priority");
        assert_eq!(step.items.len(), 3);
        assert!(step.description.contains("open critical and high"));
    }

    #[test]
    fn completed_checklist_reports_submission_readiness() {
        let mut checklist = fixture(Vec::new());
        complete_everything(&mut checklist);
        let report = build_checklist_report(&checklist);

        assert_eq!(report.status, ChecklistStatus::Completed);
        assert!(report.recommendations.is_empty());
        assert!(report.outstanding_critical.is_empty());
        assert_eq!(report.next_steps[0].action, "prepare_submission");
    }

    #[test]
    fn report_serializes_with_snake_case_priorities() {
        let checklist = fixture(vec![critical_issue("fire-resistance-rating")]);
        let report = build_checklist_report(&checklist);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["recommendations"][0]["priority"], "critical");
        assert_eq!(json["next_steps"][0]["action"], "complete_high_priority");
    }
}
