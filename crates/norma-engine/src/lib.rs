//! # norma-engine — Applicability and Evaluation Orchestration
//!
//! Resolves which regulatory documents apply to which floors of a
//! project, fans the resulting `(floor, document)` pairs out to the judge
//! with bounded concurrency, and folds the judgments into one compliance
//! result with per-floor and per-document scores.
//!
//! ## Design Principles
//!
//! 1. **Resolution is pure.** [`resolve`] is a function of the use
//!    assignment, the corpus and the configured floor range. No I/O, no
//!    clock; identical inputs always produce the identical mapping, and
//!    every result records the corpus fingerprint it came from.
//! 2. **Evaluation never fails.** Judge errors, unparseable completions
//!    and cancellation fold into the result as unresolved pairs with zero
//!    scores. The caller always gets a [`ComplianceResult`] to act on.
//! 3. **Persistence is advisory.** Graph emissions go through the
//!    [`GraphSink`] seam; a failing sink is logged and never changes the
//!    evaluation outcome.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod aggregate;
pub mod applicability;
pub mod brief;
pub mod cancel;
pub mod orchestrate;
pub mod project;
pub mod report;
pub mod sink;

pub use aggregate::{
    derive_status, ComplianceResult, DocumentStats, EvaluationSummary, SeverityCounts,
    UnresolvedPair, UnresolvedReason,
};
pub use applicability::{
    resolve, ApplicabilityResult, ApplicableDocument, FloorConflict, ResolverConfig,
};
pub use brief::{build_brief, category_focus};
pub use cancel::CancelToken;
pub use orchestrate::{Orchestrator, OrchestratorConfig};
pub use project::ProjectInput;
pub use report::{build_report, EvaluationReport, Recommendation, ReportOverall};
pub use sink::{GraphEvent, GraphSink, MemorySink, NullSink, SinkError};
