//! # norma-cli — CLI Tool for the Norma Stack
//!
//! Provides the `norma` command-line interface over the stack's library
//! crates: corpus inspection, applicability resolution, document
//! classification, full compliance evaluation, and file-backed checklist
//! management.
//!
//! ## Subcommands
//!
//! - `norma corpus` — Load and inspect a regulatory corpus.
//! - `norma resolve` — Resolve document applicability for a use assignment.
//! - `norma classify` — Classify a submission document from its signals.
//! - `norma evaluate` — Run the full per-floor compliance evaluation.
//! - `norma checklist` — Generate, update, and report on checklists.
//! - `norma report` — Render an evaluation result as a structured report.
//!
//! Commands that produce structured output print JSON to stdout; `--pretty`
//! switches to indented form. Exit codes: 0 on success, 1 on operational
//! failure, 2 on usage errors.

pub mod checklist;
pub mod classify;
pub mod corpus;
pub mod evaluate;
pub mod report;
pub mod resolve;

use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Read and deserialize a JSON file, attaching the path to any failure.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

/// Serialize a value and print it to stdout.
pub fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    println!("{}", render_json(value, pretty)?);
    Ok(())
}

/// Serialize a value to a JSON string, indented when `pretty` is set.
pub fn render_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(rendered)
}

/// Write a value to a file as indented JSON.
///
/// File artifacts are always indented; they are meant to be read and
/// diffed, and the `--pretty` flag only governs stdout.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)?;
    std::fs::write(path, rendered)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_json_reports_the_failing_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = read_json::<serde_json::Value>(&path).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn write_then_read_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("value.json");
        write_json(&path, &serde_json::json!({"answer": 42})).unwrap();
        let value: serde_json::Value = read_json(&path).unwrap();
        assert_eq!(value["answer"], 42);
    }

    #[test]
    fn render_json_compact_by_default() {
        let compact = render_json(&serde_json::json!({"a": 1}), false).unwrap();
        assert_eq!(compact, r#"{"a":1}"#);
        let pretty = render_json(&serde_json::json!({"a": 1}), true).unwrap();
        assert!(pretty.contains('\n'));
    }
}
