//! Human-oriented evaluation reports.
//!
//! A report is a print-ready view of a [`ComplianceResult`]: the same
//! facts reorganized for reading, plus prioritized follow-up actions
//! derived from the findings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use norma_core::{ComplianceIssue, ComplianceStatus, FloorId, Severity, Timestamp};

use crate::aggregate::{
    ComplianceResult, DocumentStats, EvaluationSummary, SeverityCounts, UnresolvedPair,
};

/// A prioritized follow-up action. Urgency reuses the issue severity
/// scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// How urgently the action is needed.
    pub priority: Severity,
    /// What to do.
    pub action: String,
}

/// Headline block of the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportOverall {
    /// Overall score, 0 to 100.
    pub score: f64,
    /// Derived verdict.
    pub status: ComplianceStatus,
    /// Reporting-convention check count.
    pub total_checks: usize,
    /// Low-severity issue count.
    pub passed_checks: usize,
    /// Issues above low severity.
    pub failed_checks: usize,
}

/// Print-ready view of one evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Who and what was evaluated.
    pub project: EvaluationSummary,
    /// Headline figures.
    pub overall: ReportOverall,
    /// Issue tallies per severity.
    pub issues_by_severity: SeverityCounts,
    /// Mean score per floor.
    pub floor_analysis: BTreeMap<FloorId, f64>,
    /// Per-document scores and check counts.
    pub document_analysis: BTreeMap<String, DocumentStats>,
    /// Blocking findings, pulled out for visibility.
    pub critical_issues: Vec<ComplianceIssue>,
    /// Every finding, most severe first.
    pub detailed_issues: Vec<ComplianceIssue>,
    /// Pairs that produced no judgment.
    pub unresolved: Vec<UnresolvedPair>,
    /// Prioritized follow-up actions.
    pub recommendations: Vec<Recommendation>,
    /// When the report was generated.
    pub generated_at: Timestamp,
}

/// Build the report view of a result.
pub fn build_report(result: &ComplianceResult) -> EvaluationReport {
    let mut detailed = result.issues.clone();
    detailed.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| a.floor.cmp(&b.floor))
            .then_with(|| a.id.cmp(&b.id))
    });
    let critical: Vec<ComplianceIssue> = detailed
        .iter()
        .filter(|issue| issue.severity == Severity::Critical)
        .cloned()
        .collect();

    EvaluationReport {
        project: result.summary.clone(),
        overall: ReportOverall {
            score: result.compliance_score,
            status: result.status,
            total_checks: result.total_checks,
            passed_checks: result.passed_checks,
            failed_checks: result.failed_checks,
        },
        issues_by_severity: result.severity_counts,
        floor_analysis: result.floor_scores.clone(),
        document_analysis: result.document_stats.clone(),
        critical_issues: critical,
        detailed_issues: detailed,
        unresolved: result.unresolved.clone(),
        recommendations: recommendations(result),
        generated_at: Timestamp::now(),
    }
}

fn recommendations(result: &ComplianceResult) -> Vec<Recommendation> {
    let mut actions = Vec::new();
    let counts = &result.severity_counts;

    if counts.critical > 0 {
        actions.push(Recommendation {
            priority: Severity::Critical,
            action: format!(
                "Resolve the {} critical finding(s) before submitting the licence application.",
                counts.critical
            ),
        });
    }
    if !result.unresolved.is_empty() {
        actions.push(Recommendation {
            priority: Severity::High,
            action: format!(
                "Re-run the {} document evaluation(s) that produced no judgment.",
                result.unresolved.len()
            ),
        });
    }
    if result.total_checks > 0 && result.compliance_score < 70.0 {
        actions.push(Recommendation {
            priority: Severity::High,
            action: "Overall compliance is below 70; work through the failed checks document \
                     by document."
                .to_string(),
        });
    }
    if let Some((category, count)) = dominant_category(&result.issues) {
        actions.push(Recommendation {
            priority: Severity::Medium,
            action: format!("Review the {count} {category} finding(s) together."),
        });
    }
    if result.issues.is_empty() && result.unresolved.is_empty() {
        actions.push(Recommendation {
            priority: Severity::Low,
            action: "No deviations found; archive the evaluation with the submission dossier."
                .to_string(),
        });
    }
    actions
}

/// Category with the most findings above low severity. Ties break toward
/// the lexicographically later label, which keeps the choice stable.
fn dominant_category(issues: &[ComplianceIssue]) -> Option<(&'static str, usize)> {
    let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
    for issue in issues.iter().filter(|issue| issue.severity > Severity::Low) {
        *counts.entry(issue.category.as_str()).or_default() += 1;
    }
    counts.into_iter().max_by_key(|&(_, count)| count)
}
