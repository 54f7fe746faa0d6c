//! # Classification Signals
//!
//! One [`ClassificationSignal`] is one independent source's verdict about a
//! document's family, with its own confidence and supporting evidence. The
//! three sources carry fixed fusion weights; a signal's weight is a property
//! of its source, not of the individual observation.

use serde::{Deserialize, Serialize};

use crate::family::DocFamily;

/// Fusion weight of the text-vocabulary signal.
pub const TEXT_WEIGHT: f64 = 0.4;
/// Fusion weight of the visual-element signal.
pub const VISUAL_WEIGHT: f64 = 0.3;
/// Fusion weight of the external-judge signal.
pub const JUDGE_WEIGHT: f64 = 0.3;

/// Where a classification signal came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalSource {
    /// Vocabulary-pattern matching over extracted text.
    Text,
    /// Visual-element detections from the plan-feature collaborator.
    Visual,
    /// A verdict from the external judgment capability.
    ExternalJudge,
}

impl SignalSource {
    /// All sources, in fusion-weight order.
    pub fn all_sources() -> Vec<SignalSource> {
        vec![
            SignalSource::Text,
            SignalSource::Visual,
            SignalSource::ExternalJudge,
        ]
    }

    /// Stable snake_case string form (matches the serde representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalSource::Text => "text",
            SignalSource::Visual => "visual",
            SignalSource::ExternalJudge => "external_judge",
        }
    }

    /// The source's fixed fusion weight.
    pub fn weight(&self) -> f64 {
        match self {
            SignalSource::Text => TEXT_WEIGHT,
            SignalSource::Visual => VISUAL_WEIGHT,
            SignalSource::ExternalJudge => JUDGE_WEIGHT,
        }
    }
}

impl std::fmt::Display for SignalSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One source's classification verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationSignal {
    /// Which source produced the verdict.
    pub source: SignalSource,
    /// The family the source votes for.
    pub family: DocFamily,
    /// Confidence in `[0, 1]`. Clamped at construction.
    pub confidence: f64,
    /// Supporting evidence: matched patterns, detected element labels, or
    /// the judge's reasoning.
    #[serde(default)]
    pub evidence: Vec<String>,
}

impl ClassificationSignal {
    /// Create a signal, clamping confidence into `[0, 1]`.
    pub fn new(source: SignalSource, family: DocFamily, confidence: f64) -> Self {
        Self {
            source,
            family,
            confidence: confidence.clamp(0.0, 1.0),
            evidence: Vec::new(),
        }
    }

    /// Attach supporting evidence.
    pub fn with_evidence(mut self, evidence: Vec<String>) -> Self {
        self.evidence = evidence;
        self
    }

    /// The signal's weighted contribution when it agrees with the winner.
    pub fn weighted_confidence(&self) -> f64 {
        self.source.weight() * self.confidence
    }
}

/// A visual-element detection supplied by the plan-feature collaborator.
///
/// The classifier only reads the label; detection confidence is kept for
/// the evidence trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualElement {
    /// Detected element label, e.g. `wall` or `door`.
    pub label: String,
    /// Detector confidence in `[0, 1]`.
    pub confidence: f64,
}

impl VisualElement {
    /// Create a detection, clamping confidence into `[0, 1]`.
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

/// A typed verdict from the external judgment capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgeVerdict {
    /// The family the judge voted for.
    pub family: DocFamily,
    /// Judge-reported confidence in `[0, 1]`.
    pub confidence: f64,
    /// Free-text reasoning returned by the judge.
    #[serde(default)]
    pub reasoning: String,
}
