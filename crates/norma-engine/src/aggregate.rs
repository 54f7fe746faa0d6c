//! Result aggregation.
//!
//! Folds judged `(floor, document)` pairs into one [`ComplianceResult`]:
//! per-floor and per-document scores, severity tallies, the overall score
//! and the derived verdict. Pairs that produced no judgment contribute a
//! zero score and are listed as unresolved rather than dropped.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use norma_core::{
    BuildingUse, ComplianceIssue, ComplianceStatus, FloorId, ProjectId, Severity, Timestamp,
};

use crate::applicability::ApplicabilityResult;
use crate::project::ProjectInput;

// ---------------------------------------------------------------------------
// Pair outcomes
// ---------------------------------------------------------------------------

/// Why a `(floor, document)` pair produced no judgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedReason {
    /// Every retry and credential was exhausted without a completion.
    JudgeFailure,
    /// The completion and its strict retry both failed to parse.
    MalformedJudgment,
    /// The run was cancelled before the pair was dispatched.
    Cancelled,
}

impl UnresolvedReason {
    /// Canonical snake_case label.
    pub fn as_str(&self) -> &'static str {
        match self {
            UnresolvedReason::JudgeFailure => "judge_failure",
            UnresolvedReason::MalformedJudgment => "malformed_judgment",
            UnresolvedReason::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pair that contributed a zero score instead of a judgment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedPair {
    /// Floor of the failed pair.
    pub floor: FloorId,
    /// Document of the failed pair.
    pub document: String,
    /// What went wrong.
    pub reason: UnresolvedReason,
}

/// One evaluated pair, ready for aggregation.
#[derive(Debug, Clone)]
pub(crate) struct PairOutcome {
    pub(crate) floor: FloorId,
    pub(crate) document: String,
    pub(crate) score: f64,
    pub(crate) issues: Vec<ComplianceIssue>,
    pub(crate) unresolved: Option<UnresolvedReason>,
}

impl PairOutcome {
    pub(crate) fn resolved(
        floor: FloorId,
        document: String,
        score: f64,
        issues: Vec<ComplianceIssue>,
    ) -> Self {
        Self {
            floor,
            document,
            score,
            issues,
            unresolved: None,
        }
    }

    /// An unresolved pair scores zero and reports no issues.
    pub(crate) fn unresolved(floor: FloorId, document: String, reason: UnresolvedReason) -> Self {
        Self {
            floor,
            document,
            score: 0.0,
            issues: Vec::new(),
            unresolved: Some(reason),
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregated result
// ---------------------------------------------------------------------------

/// Issue tallies per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    /// Blocking findings.
    pub critical: usize,
    /// Major deviations.
    pub high: usize,
    /// Moderate deviations.
    pub medium: usize,
    /// Minor observations.
    pub low: usize,
}

impl SeverityCounts {
    /// Tally a set of issues.
    pub fn tally(issues: &[ComplianceIssue]) -> Self {
        let mut counts = Self::default();
        for issue in issues {
            match issue.severity {
                Severity::Critical => counts.critical += 1,
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => counts.low += 1,
            }
        }
        counts
    }

    /// Total issues across severities.
    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }
}

/// Per-document aggregation.
///
/// Check counting follows the reporting convention downstream consumers
/// expect: every reported issue counts as one executed check, a
/// low-severity issue counts as a pass, anything above as a failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Mean pair score across the floors the document applied to.
    pub score: f64,
    /// Issues reported against the document.
    pub total_checks: usize,
    /// Low-severity issues.
    pub passed_checks: usize,
    /// Issues above low severity.
    pub failed_checks: usize,
}

/// Headline figures for dashboards and log lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    /// Evaluated project.
    pub project_id: ProjectId,
    /// Declared primary use.
    pub primary_use: BuildingUse,
    /// Whether the project is an existing building.
    pub existing_building: bool,
    /// Number of documents that applied.
    pub total_documents: usize,
    /// Number of floors in the evaluated range.
    pub total_floors: usize,
    /// Overall score, 0 to 100.
    pub overall_score: f64,
    /// Derived verdict.
    pub status: ComplianceStatus,
}

/// The aggregated outcome of one evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceResult {
    /// Evaluated project.
    pub project_id: ProjectId,
    /// Fingerprint of the corpus the applicability was derived from.
    pub corpus_fingerprint: String,
    /// Share of low-severity issues among all issues, as a percentage.
    /// An evaluation with no issues at all scores 100.
    pub compliance_score: f64,
    /// Derived verdict. See [`derive_status`].
    pub status: ComplianceStatus,
    /// Reporting-convention check count (see [`DocumentStats`]).
    pub total_checks: usize,
    /// Low-severity issue count.
    pub passed_checks: usize,
    /// Issues above low severity.
    pub failed_checks: usize,
    /// Tallies per severity.
    pub severity_counts: SeverityCounts,
    /// Every issue, ordered by floor then document.
    pub issues: Vec<ComplianceIssue>,
    /// Mean pair score per floor. A floor with no evaluated documents
    /// scores 100.
    pub floor_scores: BTreeMap<FloorId, f64>,
    /// Per-document aggregation.
    pub document_stats: BTreeMap<String, DocumentStats>,
    /// Pairs that produced no judgment.
    pub unresolved: Vec<UnresolvedPair>,
    /// Headline figures.
    pub summary: EvaluationSummary,
    /// When aggregation ran.
    pub evaluated_at: Timestamp,
}

/// Verdict from the overall score and the critical-issue count. Any
/// critical issue is an automatic non-compliance regardless of score.
pub fn derive_status(score: f64, critical_issues: usize) -> ComplianceStatus {
    if critical_issues > 0 {
        ComplianceStatus::NonCompliant
    } else if score >= 90.0 {
        ComplianceStatus::Compliant
    } else if score >= 70.0 {
        ComplianceStatus::PartiallyCompliant
    } else {
        ComplianceStatus::NonCompliant
    }
}

fn mean_or(scores: &[f64], empty_value: f64) -> f64 {
    if scores.is_empty() {
        empty_value
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

pub(crate) fn aggregate(
    project: &ProjectInput,
    applicability: &ApplicabilityResult,
    outcomes: &[PairOutcome],
) -> ComplianceResult {
    // Every floor in the range appears in floor_scores, including floors
    // no document applied to.
    let mut floor_acc: BTreeMap<FloorId, Vec<f64>> = applicability
        .floor_documents
        .keys()
        .map(|&floor| (floor, Vec::new()))
        .collect();
    let mut document_acc: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    let mut issues: Vec<ComplianceIssue> = Vec::new();
    let mut unresolved: Vec<UnresolvedPair> = Vec::new();

    for outcome in outcomes {
        floor_acc
            .entry(outcome.floor)
            .or_default()
            .push(outcome.score);
        document_acc
            .entry(outcome.document.clone())
            .or_default()
            .push(outcome.score);
        issues.extend(outcome.issues.iter().cloned());
        if let Some(reason) = outcome.unresolved {
            unresolved.push(UnresolvedPair {
                floor: outcome.floor,
                document: outcome.document.clone(),
                reason,
            });
        }
    }

    issues.sort_by(|a, b| {
        a.floor
            .cmp(&b.floor)
            .then_with(|| a.document_reference.cmp(&b.document_reference))
    });
    unresolved.sort_by(|a, b| {
        a.floor
            .cmp(&b.floor)
            .then_with(|| a.document.cmp(&b.document))
    });

    let floor_scores: BTreeMap<FloorId, f64> = floor_acc
        .iter()
        .map(|(&floor, scores)| (floor, mean_or(scores, 100.0)))
        .collect();

    let document_stats: BTreeMap<String, DocumentStats> = document_acc
        .iter()
        .map(|(name, scores)| {
            let total = issues
                .iter()
                .filter(|i| i.document_reference == *name)
                .count();
            let passed = issues
                .iter()
                .filter(|i| i.document_reference == *name && i.severity == Severity::Low)
                .count();
            (
                name.clone(),
                DocumentStats {
                    score: mean_or(scores, 100.0),
                    total_checks: total,
                    passed_checks: passed,
                    failed_checks: total - passed,
                },
            )
        })
        .collect();

    let severity_counts = SeverityCounts::tally(&issues);
    let total_checks = issues.len();
    let passed_checks = severity_counts.low;
    let failed_checks = total_checks - passed_checks;
    let compliance_score = if total_checks == 0 {
        100.0
    } else {
        passed_checks as f64 / total_checks as f64 * 100.0
    };
    let status = derive_status(compliance_score, severity_counts.critical);

    let summary = EvaluationSummary {
        project_id: project.id.clone(),
        primary_use: project.assignment.primary_use,
        existing_building: project.assignment.existing_building,
        total_documents: applicability.documents.len(),
        total_floors: applicability.floor_documents.len(),
        overall_score: compliance_score,
        status,
    };

    ComplianceResult {
        project_id: project.id.clone(),
        corpus_fingerprint: applicability.corpus_fingerprint.clone(),
        compliance_score,
        status,
        total_checks,
        passed_checks,
        failed_checks,
        severity_counts,
        issues,
        floor_scores,
        document_stats,
        unresolved,
        summary,
        evaluated_at: Timestamp::now(),
    }
}
