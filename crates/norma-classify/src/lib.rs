//! # norma-classify — Multi-Signal Document Classification
//!
//! Sorts submission documents into the narrative/drawing families by fusing
//! three independent signals: vocabulary-pattern matches over extracted
//! text, drawing-indicator counts from visual detections, and an optional
//! external-judge verdict.
//!
//! ## Design Principles
//!
//! 1. **Signals are independent and optional.** Any subset may be present;
//!    a missing signal carries zero weight rather than failing the
//!    classification.
//! 2. **Dissent is not negative evidence.** A signal disagreeing with the
//!    chosen family contributes nothing to the combined confidence; it does
//!    not subtract.
//! 3. **The verdict is auditable.** Every classification carries a
//!    [`ReasoningTrace`] recording each source's verdict and which sources
//!    agreed with the outcome.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod classifier;
pub mod family;
pub mod signal;
pub mod vocab;

pub use classifier::{
    ClassificationInput, ClassifierConfig, DocumentClassification, ReasoningTrace,
    SignalClassifier, VerdictSummary,
};
pub use family::DocFamily;
pub use signal::{
    ClassificationSignal, JudgeVerdict, SignalSource, VisualElement, JUDGE_WEIGHT, TEXT_WEIGHT,
    VISUAL_WEIGHT,
};
