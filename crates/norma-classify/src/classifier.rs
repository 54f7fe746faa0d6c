//! # Signal Fusion
//!
//! [`SignalClassifier`] fuses up to three independent signals into one
//! [`DocumentClassification`].
//!
//! The family is chosen by the text and judge verdicts alone: when both are
//! present and disagree, the one with the higher individual confidence wins,
//! text winning exact ties. The visual signal never chooses the family; it
//! only adds confidence when it agrees with the chosen one. Combined
//! confidence is the weighted sum over agreeing signals only, so a
//! dissenting signal contributes nothing rather than a negative weight.
//!
//! Zero usable signals is not an error: the result falls back to the
//! configured family with confidence 0.0 and `needs_review` set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::family::DocFamily;
use crate::signal::{ClassificationSignal, JudgeVerdict, SignalSource, VisualElement};
use crate::vocab::{is_drawing_indicator, matched_patterns};

/// Tunables for the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Indicator count at which the visual signal saturates to 1.0.
    pub visual_saturation: u32,
    /// Family assigned when no signal is usable.
    pub fallback_family: DocFamily,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            visual_saturation: 10,
            fallback_family: DocFamily::Narrative,
        }
    }
}

/// Everything known about one document before classification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationInput {
    /// Extracted text, if OCR produced any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Visual-element detections from the plan-feature collaborator.
    #[serde(default)]
    pub visual_elements: Vec<VisualElement>,
    /// Verdict from the external judgment capability, if one was obtained.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub judge_verdict: Option<JudgeVerdict>,
}

impl ClassificationInput {
    /// Input carrying only extracted text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Attach visual-element detections.
    pub fn with_visual_elements(mut self, elements: Vec<VisualElement>) -> Self {
        self.visual_elements = elements;
        self
    }

    /// Attach an external-judge verdict.
    pub fn with_judge_verdict(mut self, verdict: JudgeVerdict) -> Self {
        self.judge_verdict = Some(verdict);
        self
    }
}

/// One source's verdict, condensed for the reasoning trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerdictSummary {
    /// The family the source voted for.
    pub family: DocFamily,
    /// The source's individual confidence.
    pub confidence: f64,
}

/// Structured record of how the final verdict was reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningTrace {
    /// Text verdict, if the text produced any vocabulary hits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<VerdictSummary>,
    /// Visual verdict, if any drawing indicators were detected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual: Option<VerdictSummary>,
    /// External-judge verdict, if one was supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub judge: Option<VerdictSummary>,
    /// The family the fusion chose.
    pub chosen: DocFamily,
    /// Sources whose verdict matched the chosen family.
    pub agreeing: Vec<SignalSource>,
    /// Sources whose verdict did not.
    pub dissenting: Vec<SignalSource>,
}

/// The classifier's final, immutable output for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentClassification {
    /// The fused verdict.
    pub family: DocFamily,
    /// Combined confidence in `[0, 1]`, summed over agreeing signals.
    pub confidence: f64,
    /// Set when no signal was usable and the fallback family was assigned.
    pub needs_review: bool,
    /// How the verdict was reached.
    pub trace: ReasoningTrace,
    /// The contributing signals, with evidence.
    pub signals: Vec<ClassificationSignal>,
}

/// Fuses text, visual, and external-judge signals into one classification.
#[derive(Debug, Clone, Default)]
pub struct SignalClassifier {
    config: ClassifierConfig,
}

impl SignalClassifier {
    /// Create a classifier with the given tunables.
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// The classifier's tunables.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify one document from whatever signals its input carries.
    pub fn classify(&self, input: &ClassificationInput) -> DocumentClassification {
        let text_signal = input.text.as_deref().and_then(text_signal);
        let visual_signal = self.visual_signal(&input.visual_elements);
        let judge_signal = input.judge_verdict.as_ref().map(judge_signal);

        let signals: Vec<ClassificationSignal> = [&text_signal, &visual_signal, &judge_signal]
            .into_iter()
            .filter_map(|signal| signal.clone())
            .collect();

        if signals.is_empty() {
            debug!(
                fallback = %self.config.fallback_family,
                "no usable classification signals"
            );
            return DocumentClassification {
                family: self.config.fallback_family,
                confidence: 0.0,
                needs_review: true,
                trace: ReasoningTrace {
                    text: None,
                    visual: None,
                    judge: None,
                    chosen: self.config.fallback_family,
                    agreeing: Vec::new(),
                    dissenting: Vec::new(),
                },
                signals,
            };
        }

        // Text and judge choose the family; ties go to text. The visual
        // signal chooses only when it is the sole signal present.
        let chosen = match (&text_signal, &judge_signal) {
            (Some(text), Some(judge)) => {
                if judge.confidence > text.confidence {
                    judge.family
                } else {
                    text.family
                }
            }
            (Some(text), None) => text.family,
            (None, Some(judge)) => judge.family,
            (None, None) => visual_signal
                .as_ref()
                .map(|visual| visual.family)
                .unwrap_or(self.config.fallback_family),
        };

        let confidence: f64 = signals
            .iter()
            .filter(|signal| signal.family == chosen)
            .map(ClassificationSignal::weighted_confidence)
            .sum::<f64>()
            .min(1.0);

        let agreeing: Vec<SignalSource> = signals
            .iter()
            .filter(|signal| signal.family == chosen)
            .map(|signal| signal.source)
            .collect();
        let dissenting: Vec<SignalSource> = signals
            .iter()
            .filter(|signal| signal.family != chosen)
            .map(|signal| signal.source)
            .collect();

        debug!(
            family = %chosen,
            confidence,
            agreeing = agreeing.len(),
            dissenting = dissenting.len(),
            "document classified"
        );

        DocumentClassification {
            family: chosen,
            confidence,
            needs_review: false,
            trace: ReasoningTrace {
                text: text_signal.as_ref().map(summarize),
                visual: visual_signal.as_ref().map(summarize),
                judge: judge_signal.as_ref().map(summarize),
                chosen,
                agreeing,
                dissenting,
            },
            signals,
        }
    }

    /// Count drawing-indicator detections and map the count to a confidence
    /// that saturates at `visual_saturation`.
    fn visual_signal(&self, elements: &[VisualElement]) -> Option<ClassificationSignal> {
        let mut label_counts: BTreeMap<&str, usize> = BTreeMap::new();
        for element in elements {
            if is_drawing_indicator(&element.label) {
                *label_counts.entry(element.label.as_str()).or_default() += 1;
            }
        }
        let indicator_count: usize = label_counts.values().sum();
        if indicator_count == 0 {
            return None;
        }

        let confidence =
            (indicator_count as f64 / f64::from(self.config.visual_saturation.max(1))).min(1.0);
        let evidence = label_counts
            .iter()
            .map(|(label, count)| format!("{label} ({count})"))
            .collect();
        Some(
            ClassificationSignal::new(SignalSource::Visual, DocFamily::Drawing, confidence)
                .with_evidence(evidence),
        )
    }
}

/// Score the text against both vocabularies; the family with more hits wins,
/// ties going to drawing. Confidence is the winning family's share of all
/// hits. No hits at all means no text signal.
fn text_signal(text: &str) -> Option<ClassificationSignal> {
    let lowered = text.to_lowercase();
    let narrative_hits = matched_patterns(&lowered, DocFamily::Narrative);
    let drawing_hits = matched_patterns(&lowered, DocFamily::Drawing);
    let total = narrative_hits.len() + drawing_hits.len();
    if total == 0 {
        return None;
    }

    let (family, hits) = if drawing_hits.len() >= narrative_hits.len() {
        (DocFamily::Drawing, drawing_hits)
    } else {
        (DocFamily::Narrative, narrative_hits)
    };
    let confidence = hits.len() as f64 / total as f64;
    Some(
        ClassificationSignal::new(SignalSource::Text, family, confidence)
            .with_evidence(hits.into_iter().map(str::to_string).collect()),
    )
}

fn judge_signal(verdict: &JudgeVerdict) -> ClassificationSignal {
    let mut signal = ClassificationSignal::new(
        SignalSource::ExternalJudge,
        verdict.family,
        verdict.confidence,
    );
    if !verdict.reasoning.is_empty() {
        signal = signal.with_evidence(vec![verdict.reasoning.clone()]);
    }
    signal
}

fn summarize(signal: &ClassificationSignal) -> VerdictSummary {
    VerdictSummary {
        family: signal.family,
        confidence: signal.confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn walls(count: usize) -> Vec<VisualElement> {
        (0..count).map(|_| VisualElement::new("wall", 0.9)).collect()
    }

    fn drawing_verdict(confidence: f64) -> JudgeVerdict {
        JudgeVerdict {
            family: DocFamily::Drawing,
            confidence,
            reasoning: "sheet layout with title block".to_string(),
        }
    }

    // Nine narrative patterns against one drawing pattern: text verdict
    // narrative at confidence 0.9.
    const NARRATIVE_HEAVY: &str = "descriptive report | design criteria | \
        applicable regulations | general conditions | safety measures | \
        energy efficiency | introduction | conclusions | safety factor | beam";

    #[test]
    fn strong_text_beats_weak_judge() {
        let classifier = SignalClassifier::default();
        let input =
            ClassificationInput::from_text(NARRATIVE_HEAVY).with_judge_verdict(drawing_verdict(0.3));

        let result = classifier.classify(&input);
        assert_eq!(result.family, DocFamily::Narrative);
        let text = result.trace.text.unwrap();
        assert!((text.confidence - 0.9).abs() < 1e-9);
        assert_eq!(result.trace.dissenting, vec![SignalSource::ExternalJudge]);
    }

    #[test]
    fn strong_judge_beats_weak_text() {
        let classifier = SignalClassifier::default();
        // One hit per family: tie, drawing wins at 0.5 text confidence.
        let input = ClassificationInput::from_text("introduction and a beam")
            .with_judge_verdict(JudgeVerdict {
                family: DocFamily::Narrative,
                confidence: 0.9,
                reasoning: String::new(),
            });

        let result = classifier.classify(&input);
        assert_eq!(result.family, DocFamily::Narrative);
        // Only the judge agrees with the winner.
        assert!((result.confidence - 0.3 * 0.9).abs() < 1e-9);
    }

    #[test]
    fn text_wins_exact_ties_against_judge() {
        let classifier = SignalClassifier::default();
        // Only narrative hits: text confidence 1.0.
        let input = ClassificationInput::from_text("introduction, conclusions")
            .with_judge_verdict(drawing_verdict(1.0));

        let result = classifier.classify(&input);
        assert_eq!(result.family, DocFamily::Narrative);
    }

    #[test]
    fn visual_never_overrides_text() {
        let classifier = SignalClassifier::default();
        let input = ClassificationInput::from_text("introduction, conclusions")
            .with_visual_elements(walls(30));

        let result = classifier.classify(&input);
        assert_eq!(result.family, DocFamily::Narrative);
        // Visual dissents and contributes nothing.
        assert!((result.confidence - 0.4).abs() < 1e-9);
        assert_eq!(result.trace.dissenting, vec![SignalSource::Visual]);
    }

    #[test]
    fn agreeing_visual_adds_confidence() {
        let classifier = SignalClassifier::default();
        let input = ClassificationInput::from_text("floor plan at scale 1:100")
            .with_visual_elements(walls(5))
            .with_judge_verdict(drawing_verdict(1.0));

        let result = classifier.classify(&input);
        assert_eq!(result.family, DocFamily::Drawing);
        // text 0.4 * 1.0 + visual 0.3 * 0.5 + judge 0.3 * 1.0
        assert!((result.confidence - 0.85).abs() < 1e-9);
        assert_eq!(result.trace.agreeing.len(), 3);
        assert!(result.trace.dissenting.is_empty());
    }

    #[test]
    fn visual_alone_votes_drawing() {
        let classifier = SignalClassifier::default();
        let input = ClassificationInput::default().with_visual_elements(walls(5));

        let result = classifier.classify(&input);
        assert_eq!(result.family, DocFamily::Drawing);
        assert!((result.confidence - 0.15).abs() < 1e-9);
        assert!(!result.needs_review);
    }

    #[test]
    fn visual_saturates_at_configured_count() {
        let classifier = SignalClassifier::default();
        let result =
            classifier.classify(&ClassificationInput::default().with_visual_elements(walls(25)));
        let visual = result.trace.visual.unwrap();
        assert_eq!(visual.confidence, 1.0);
    }

    #[test]
    fn non_indicator_labels_do_not_count() {
        let classifier = SignalClassifier::default();
        let elements = vec![
            VisualElement::new("company_logo", 0.99),
            VisualElement::new("stamp", 0.8),
        ];
        let result =
            classifier.classify(&ClassificationInput::default().with_visual_elements(elements));
        assert!(result.needs_review);
    }

    #[test]
    fn zero_signals_fall_back_flagged() {
        let classifier = SignalClassifier::default();
        let result = classifier.classify(&ClassificationInput::default());

        assert_eq!(result.family, DocFamily::Narrative);
        assert_eq!(result.confidence, 0.0);
        assert!(result.needs_review);
        assert!(result.signals.is_empty());
    }

    #[test]
    fn text_without_vocabulary_hits_is_absent() {
        let classifier = SignalClassifier::default();
        let result = classifier.classify(&ClassificationInput::from_text("lorem ipsum dolor"));
        assert!(result.needs_review);
        assert!(result.trace.text.is_none());
    }

    #[test]
    fn text_ties_go_to_drawing() {
        let classifier = SignalClassifier::default();
        // One hit per family.
        let result = classifier.classify(&ClassificationInput::from_text(
            "introduction to the floor plan",
        ));
        assert_eq!(result.family, DocFamily::Drawing);
        let text = result.trace.text.unwrap();
        assert!((text.confidence - 0.5).abs() < 1e-9);
    }

    #[test]
    fn evidence_lists_matched_patterns() {
        let classifier = SignalClassifier::default();
        let result =
            classifier.classify(&ClassificationInput::from_text("floor plan at scale 1:50"));
        let text = result
            .signals
            .iter()
            .find(|s| s.source == SignalSource::Text)
            .unwrap();
        assert!(text.evidence.contains(&"floor plan".to_string()));
        assert!(text.evidence.contains(&"scale 1:".to_string()));
    }

    fn arb_input() -> impl Strategy<Value = ClassificationInput> {
        let text = prop::option::of(prop_oneof![
            Just(NARRATIVE_HEAVY.to_string()),
            Just("floor plan, elevation, cross section".to_string()),
            Just("no vocabulary words here".to_string()),
        ]);
        let visual = prop::collection::vec(
            prop_oneof![
                Just(VisualElement::new("wall", 0.9)),
                Just(VisualElement::new("door", 0.8)),
                Just(VisualElement::new("company_logo", 0.7)),
            ],
            0..30,
        );
        let judge = prop::option::of((any::<bool>(), 0.0f64..=1.0f64).prop_map(
            |(is_drawing, confidence)| JudgeVerdict {
                family: if is_drawing {
                    DocFamily::Drawing
                } else {
                    DocFamily::Narrative
                },
                confidence,
                reasoning: String::new(),
            },
        ));

        (text, visual, judge).prop_map(|(text, visual_elements, judge_verdict)| {
            ClassificationInput {
                text,
                visual_elements,
                judge_verdict,
            }
        })
    }

    proptest! {
        /// Combined confidence never leaves the unit interval, whatever
        /// mixture of signals is present.
        #[test]
        fn confidence_stays_in_unit_interval(input in arb_input()) {
            let result = SignalClassifier::default().classify(&input);
            prop_assert!(result.confidence >= 0.0);
            prop_assert!(result.confidence <= 1.0);
        }

        /// The chosen family always comes from a contributing signal unless
        /// the fallback was used, in which case `needs_review` is set.
        #[test]
        fn chosen_family_is_grounded(input in arb_input()) {
            let result = SignalClassifier::default().classify(&input);
            if result.needs_review {
                prop_assert!(result.signals.is_empty());
            } else {
                prop_assert!(result.signals.iter().any(|s| s.family == result.family));
            }
        }
    }
}
