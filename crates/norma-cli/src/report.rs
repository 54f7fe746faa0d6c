//! # Report Subcommand
//!
//! Renders the human-oriented compliance report for a stored
//! [`ComplianceResult`] file.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use norma_engine::{build_report, ComplianceResult};

use crate::{print_json, read_json};

/// Arguments for the `norma report` subcommand.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Stored ComplianceResult JSON file.
    #[arg(value_name = "RESULT")]
    pub result: PathBuf,
}

/// Execute the report subcommand.
pub fn run_report(args: &ReportArgs, pretty: bool) -> Result<u8> {
    let result: ComplianceResult = read_json(&args.result)?;
    let report = build_report(&result);
    print_json(&report, pretty)?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use norma_core::{BuildingUse, ComplianceStatus, Timestamp, UseAssignment};
    use norma_engine::{EvaluationSummary, ProjectInput, SeverityCounts};

    use crate::write_json;

    use super::*;

    fn clean_result() -> ComplianceResult {
        let project = ProjectInput::new(
            "Calle Mayor 12",
            UseAssignment::new(BuildingUse::Residential),
        );
        ComplianceResult {
            project_id: project.id.clone(),
            corpus_fingerprint: "0".repeat(64),
            compliance_score: 100.0,
            status: ComplianceStatus::Compliant,
            total_checks: 4,
            passed_checks: 4,
            failed_checks: 0,
            severity_counts: SeverityCounts::default(),
            issues: Vec::new(),
            floor_scores: Default::default(),
            document_stats: Default::default(),
            unresolved: Vec::new(),
            summary: EvaluationSummary {
                project_id: project.id.clone(),
                primary_use: BuildingUse::Residential,
                existing_building: false,
                total_documents: 4,
                total_floors: 1,
                overall_score: 100.0,
                status: ComplianceStatus::Compliant,
            },
            evaluated_at: Timestamp::now(),
        }
    }

    #[test]
    fn report_renders_a_stored_result() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.json");
        write_json(&path, &clean_result()).unwrap();

        let args = ReportArgs { result: path };
        assert_eq!(run_report(&args, true).unwrap(), 0);
    }

    #[test]
    fn corrupt_result_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.json");
        std::fs::write(&path, "{not json").unwrap();

        let args = ReportArgs { result: path.clone() };
        let err = run_report(&args, false).unwrap_err();
        assert!(format!("{err:#}").contains(&path.display().to_string()));
    }
}
