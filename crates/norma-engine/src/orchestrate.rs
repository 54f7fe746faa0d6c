//! Concurrent evaluation orchestration.
//!
//! Fans the `(floor, document)` pairs of an [`ApplicabilityResult`] out to
//! the judge with bounded concurrency, converts each judgment into domain
//! issues, and folds everything into one [`ComplianceResult`]. Evaluation
//! never fails: pairs whose judgment cannot be obtained contribute a zero
//! score and are listed as unresolved.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use norma_core::{CheckCategory, ComplianceIssue, FloorId, Severity};
use norma_judge::{JudgeClient, Judgment, ParseOutcome, ReportedIssue};

use crate::aggregate::{aggregate, ComplianceResult, PairOutcome, UnresolvedReason};
use crate::applicability::ApplicabilityResult;
use crate::brief::build_brief;
use crate::cancel::CancelToken;
use crate::project::ProjectInput;
use crate::sink::{GraphEvent, GraphSink, NullSink};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tunables for [`Orchestrator::evaluate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Maximum judge calls in flight at once. Zero behaves as one.
    pub max_in_flight: usize,
    /// Maximum characters of project text forwarded to the judge as
    /// evidence. Clipping never splits a code point.
    pub text_window: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_in_flight: 4,
            text_window: 2000,
        }
    }
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Runs the full evaluation for one project.
#[derive(Clone)]
pub struct Orchestrator {
    judge: Arc<JudgeClient>,
    sink: Arc<dyn GraphSink>,
    config: OrchestratorConfig,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("judge", &self.judge)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    /// Create an orchestrator emitting graph events to the given sink.
    pub fn new(judge: Arc<JudgeClient>, sink: Arc<dyn GraphSink>, config: OrchestratorConfig) -> Self {
        Self {
            judge,
            sink,
            config,
        }
    }

    /// Create an orchestrator that discards graph events.
    pub fn without_sink(judge: Arc<JudgeClient>, config: OrchestratorConfig) -> Self {
        Self::new(judge, Arc::new(NullSink), config)
    }

    /// Evaluate every applicable `(floor, document)` pair and aggregate
    /// the judgments.
    ///
    /// At most [`OrchestratorConfig::max_in_flight`] judge calls run
    /// concurrently. Cancellation is checked before each dispatch: calls
    /// already in flight finish and aggregate, pairs not yet dispatched
    /// come back unresolved as cancelled.
    pub async fn evaluate(
        &self,
        project: &ProjectInput,
        applicability: &ApplicabilityResult,
        project_text: &str,
        cancel: &CancelToken,
    ) -> ComplianceResult {
        let excerpt = clip_chars(project_text, self.config.text_window);
        let evidence = format!("Project text excerpt:\n{excerpt}");

        info!(
            project = %project.id,
            documents = applicability.documents.len(),
            pairs = applicability.pair_count(),
            "compliance evaluation started"
        );
        self.emit(GraphEvent::ProjectNode {
            project_id: project.id.as_str().to_string(),
            name: project.name.clone(),
        });
        for applicable in &applicability.documents {
            self.emit(GraphEvent::DocumentNode {
                project_id: project.id.as_str().to_string(),
                document: applicable.document.name.clone(),
            });
        }

        let pair_futures: Vec<_> = applicability
            .pairs()
            .map(|(floor, applicable)| {
                let brief = build_brief(project, applicable, floor);
                let document = applicable.document.name.clone();
                let evidence = evidence.clone();
                async move { self.judge_pair(floor, document, brief, evidence, cancel).await }
            })
            .collect();

        let mut outcomes: Vec<PairOutcome> = stream::iter(pair_futures)
            .buffer_unordered(self.config.max_in_flight.max(1))
            .collect()
            .await;
        outcomes.sort_by(|a, b| {
            a.floor
                .cmp(&b.floor)
                .then_with(|| a.document.cmp(&b.document))
        });

        for outcome in &outcomes {
            for issue in &outcome.issues {
                self.emit(GraphEvent::IssueNode {
                    project_id: project.id.as_str().to_string(),
                    document: outcome.document.clone(),
                    issue_id: issue.id.clone(),
                    severity: issue.severity.as_str().to_string(),
                });
            }
        }

        let result = aggregate(project, applicability, &outcomes);
        info!(
            project = %project.id,
            score = result.compliance_score,
            status = %result.status,
            issues = result.issues.len(),
            unresolved = result.unresolved.len(),
            "compliance evaluation finished"
        );
        debug!(credentials = ?self.judge.credential_stats(), "judge credential usage");
        result
    }

    async fn judge_pair(
        &self,
        floor: FloorId,
        document: String,
        brief: String,
        evidence: String,
        cancel: &CancelToken,
    ) -> PairOutcome {
        if cancel.is_cancelled() {
            return PairOutcome::unresolved(floor, document, UnresolvedReason::Cancelled);
        }
        match self.judge.evaluate(&brief, &evidence).await {
            Ok(ParseOutcome::Parsed(judgment)) => {
                let issues = issues_from_judgment(&document, floor, &judgment);
                debug!(
                    %floor,
                    document = %document,
                    score = judgment.compliance_score,
                    issues = issues.len(),
                    "pair judged"
                );
                PairOutcome::resolved(floor, document, judgment.compliance_score, issues)
            }
            Ok(ParseOutcome::Malformed { .. }) => {
                warn!(%floor, document = %document, "judgment unparseable after strict retry");
                PairOutcome::unresolved(floor, document, UnresolvedReason::MalformedJudgment)
            }
            Err(e) => {
                warn!(%floor, document = %document, error = %e, "judge call failed");
                PairOutcome::unresolved(floor, document, UnresolvedReason::JudgeFailure)
            }
        }
    }

    fn emit(&self, event: GraphEvent) {
        if let Err(e) = self.sink.emit(event) {
            warn!(error = %e, "graph emission failed; continuing");
        }
    }
}

// ---------------------------------------------------------------------------
// Judgment conversion
// ---------------------------------------------------------------------------

fn issues_from_judgment(
    document: &str,
    floor: FloorId,
    judgment: &Judgment,
) -> Vec<ComplianceIssue> {
    judgment
        .issues
        .iter()
        .enumerate()
        .map(|(ordinal, reported)| issue_from_report(document, floor, ordinal, reported))
        .collect()
}

/// Convert one judge-reported issue into a domain issue.
///
/// Missing fields get stable fallbacks: the identifier becomes
/// `{document}-{ordinal}`, the severity defaults to medium, and the
/// category is derived from the document name.
fn issue_from_report(
    document: &str,
    floor: FloorId,
    ordinal: usize,
    reported: &ReportedIssue,
) -> ComplianceIssue {
    let severity = reported
        .severity
        .as_deref()
        .map(Severity::parse_lenient)
        .unwrap_or(Severity::Medium);
    let id = reported
        .id
        .clone()
        .unwrap_or_else(|| format!("{document}-{ordinal}"));
    let title = reported
        .title
        .clone()
        .unwrap_or_else(|| "Compliance finding".to_string());

    let mut issue = ComplianceIssue::new(
        id,
        title,
        reported.description.clone().unwrap_or_default(),
        severity,
        CheckCategory::for_document_name(document),
        document,
        reported.recommendation.clone().unwrap_or_default(),
    )
    .with_floor(floor);
    if let (Some(current), Some(required)) = (
        reported.current_value.clone(),
        reported.required_value.clone(),
    ) {
        issue = issue.with_values(current, required);
    }
    if let Some(page) = reported.page_reference.clone() {
        issue = issue.with_page_reference(page);
    }
    issue
}

/// Clip to at most `max_chars` characters without splitting a code point.
fn clip_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
