//! # Classify Subcommand
//!
//! Classifies one submission document into the narrative/drawing families
//! and prints the [`DocumentClassification`] as JSON, including the
//! reasoning trace.
//!
//! Signals are supplied as files: the extracted text as a plain-text file,
//! visual detections as a JSON list of `{label, confidence}` objects, and
//! an external-judge verdict as a JSON `{family, confidence, reasoning}`
//! object. Any subset may be present.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use norma_classify::{
    ClassificationInput, DocumentClassification, JudgeVerdict, SignalClassifier, VisualElement,
};

use crate::{print_json, read_json};

/// Arguments for the `norma classify` subcommand.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Plain-text file with the document's extracted text.
    #[arg(value_name = "TEXT_FILE")]
    pub text: PathBuf,

    /// JSON file with visual-element detections.
    #[arg(long)]
    pub detections: Option<PathBuf>,

    /// JSON file with an external-judge verdict.
    #[arg(long)]
    pub judge_verdict: Option<PathBuf>,
}

/// Execute the classify subcommand.
pub fn run_classify(args: &ClassifyArgs, pretty: bool) -> Result<u8> {
    let classification = cmd_classify(args)?;
    print_json(&classification, pretty)?;
    Ok(0)
}

fn cmd_classify(args: &ClassifyArgs) -> Result<DocumentClassification> {
    let text = std::fs::read_to_string(&args.text)
        .with_context(|| format!("failed to read {}", args.text.display()))?;
    let mut input = ClassificationInput::from_text(text);

    if let Some(path) = &args.detections {
        let elements: Vec<VisualElement> = read_json(path)?;
        input = input.with_visual_elements(elements);
    }
    if let Some(path) = &args.judge_verdict {
        let verdict: JudgeVerdict = read_json(path)?;
        input = input.with_judge_verdict(verdict);
    }

    Ok(SignalClassifier::default().classify(&input))
}

#[cfg(test)]
mod tests {
    use norma_classify::DocFamily;

    use super::*;

    fn write_file(dir: &std::path::Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn narrative_text_classifies_as_narrative() {
        let dir = tempfile::tempdir().unwrap();
        let text = write_file(
            dir.path(),
            "memory.txt",
            "Descriptive report covering applicable regulations and design criteria.",
        );

        let args = ClassifyArgs {
            text,
            detections: None,
            judge_verdict: None,
        };
        let classification = cmd_classify(&args).unwrap();
        assert_eq!(classification.family, DocFamily::Narrative);
        assert!(!classification.needs_review);
    }

    #[test]
    fn detections_and_verdict_files_feed_the_fusion() {
        let dir = tempfile::tempdir().unwrap();
        let text = write_file(dir.path(), "plan.txt", "floor plan at scale 1:100");
        let detections = write_file(
            dir.path(),
            "detections.json",
            r#"[{"label": "wall", "confidence": 0.9}, {"label": "door", "confidence": 0.8}]"#,
        );
        let verdict = write_file(
            dir.path(),
            "verdict.json",
            r#"{"family": "drawing", "confidence": 0.8, "reasoning": "title block present"}"#,
        );

        let args = ClassifyArgs {
            text,
            detections: Some(detections),
            judge_verdict: Some(verdict),
        };
        let classification = cmd_classify(&args).unwrap();
        assert_eq!(classification.family, DocFamily::Drawing);
        assert_eq!(classification.trace.agreeing.len(), 3);
    }

    #[test]
    fn missing_text_file_reports_the_path() {
        let args = ClassifyArgs {
            text: PathBuf::from("/nonexistent/memory.txt"),
            detections: None,
            judge_verdict: None,
        };
        let err = cmd_classify(&args).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/memory.txt"));
    }

    #[test]
    fn malformed_detections_report_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let text = write_file(dir.path(), "plan.txt", "floor plan");
        let detections = write_file(dir.path(), "detections.json", "[{broken");

        let args = ClassifyArgs {
            text,
            detections: Some(detections),
            judge_verdict: None,
        };
        let err = cmd_classify(&args).unwrap_err();
        assert!(err.to_string().contains("detections.json"));
    }
}
