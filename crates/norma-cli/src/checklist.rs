//! # Checklist Subcommand
//!
//! File-backed checklist management. The checklist lives as a JSON file;
//! `generate` creates it from a stored evaluation, `update` mutates one
//! item in place, and `report` renders the progress report.
//!
//! ## Subcommands
//!
//! - `generate` — Instantiate and seed a checklist from an evaluation.
//! - `update` — Change one item's status, notes, or evidence.
//! - `report` — Print the progress report as JSON.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use norma_checklist::{
    build_checklist_report, generate, Checklist, ItemStatus, ItemUpdate,
};
use norma_core::UseAssignment;
use norma_engine::{ApplicabilityResult, ComplianceResult, ProjectInput};

use crate::{print_json, read_json, write_json};

/// Arguments for the `norma checklist` subcommand.
#[derive(Args, Debug)]
pub struct ChecklistArgs {
    #[command(subcommand)]
    pub command: ChecklistCommand,
}

/// Checklist subcommands.
#[derive(Subcommand, Debug)]
pub enum ChecklistCommand {
    /// Generate a checklist from a stored evaluation.
    Generate {
        /// Use assignment JSON file (the one the evaluation ran with).
        #[arg(long)]
        assignment: PathBuf,
        /// Project name recorded in the checklist.
        #[arg(long)]
        name: String,
        /// Stored ApplicabilityResult JSON file.
        #[arg(long)]
        applicability: PathBuf,
        /// Stored ComplianceResult JSON file.
        #[arg(long)]
        result: PathBuf,
        /// Where to write the checklist.
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Update one item in a checklist file, in place.
    Update {
        /// Checklist JSON file to mutate.
        #[arg(long)]
        checklist: PathBuf,
        /// Identifier of the item to update.
        #[arg(long)]
        item: String,
        /// New status label (e.g. `completed`, `requires_attention`).
        #[arg(long)]
        status: Option<String>,
        /// Replacement reviewer notes.
        #[arg(long)]
        notes: Option<String>,
        /// Replacement evidence entry. Repeat to supply several.
        #[arg(long)]
        evidence: Vec<String>,
    },

    /// Print the progress report for a checklist file.
    Report {
        /// Checklist JSON file.
        #[arg(long)]
        checklist: PathBuf,
    },
}

/// Execute the checklist subcommand.
pub fn run_checklist(args: &ChecklistArgs, pretty: bool) -> Result<u8> {
    match &args.command {
        ChecklistCommand::Generate {
            assignment,
            name,
            applicability,
            result,
            output,
        } => cmd_generate(assignment, name, applicability, result, output),

        ChecklistCommand::Update {
            checklist,
            item,
            status,
            notes,
            evidence,
        } => cmd_update(checklist, item, status.as_deref(), notes.clone(), evidence),

        ChecklistCommand::Report { checklist } => cmd_report(checklist, pretty),
    }
}

fn cmd_generate(
    assignment: &Path,
    name: &str,
    applicability: &Path,
    result: &Path,
    output: &Path,
) -> Result<u8> {
    let assignment: UseAssignment = read_json(assignment)?;
    let applicability: ApplicabilityResult = read_json(applicability)?;
    let result: ComplianceResult = read_json(result)?;

    // Rebuild the project under the id the evaluation ran with, so the
    // checklist and the stored result stay attributable to each other.
    let project = ProjectInput::new(name, assignment).with_id(result.project_id.clone());
    let checklist = generate(&project, &applicability, &result);
    write_json(output, &checklist)?;

    println!(
        "OK: checklist for {} written to {} ({} items, {} categories)",
        checklist.project_id,
        output.display(),
        checklist.total_items,
        checklist.categories.len()
    );
    Ok(0)
}

fn cmd_update(
    path: &Path,
    item: &str,
    status: Option<&str>,
    notes: Option<String>,
    evidence: &[String],
) -> Result<u8> {
    let mut checklist: Checklist = read_json(path)?;

    let status = status
        .map(str::parse::<ItemStatus>)
        .transpose()
        .context("invalid --status")?;
    let update = ItemUpdate {
        status,
        notes,
        current_evidence: if evidence.is_empty() {
            None
        } else {
            Some(evidence.to_vec())
        },
    };

    checklist
        .update_item(item, update)
        .with_context(|| format!("failed to update {}", path.display()))?;
    write_json(path, &checklist)?;

    println!(
        "OK: item {item} updated; checklist at {:.1}% ({}/{} completed)",
        checklist.overall_completion, checklist.completed_items, checklist.total_items
    );
    Ok(0)
}

fn cmd_report(path: &Path, pretty: bool) -> Result<u8> {
    let checklist: Checklist = read_json(path)?;
    let report = build_checklist_report(&checklist);
    print_json(&report, pretty)?;
    Ok(0)
}
