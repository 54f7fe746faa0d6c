//! # norma CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Uses clap derive macros; verbosity maps repeated `-v` flags onto the
//! tracing filter.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use norma_cli::checklist::{run_checklist, ChecklistArgs};
use norma_cli::classify::{run_classify, ClassifyArgs};
use norma_cli::corpus::{run_corpus, CorpusArgs};
use norma_cli::evaluate::{run_evaluate, EvaluateArgs};
use norma_cli::report::{run_report, ReportArgs};
use norma_cli::resolve::{run_resolve, ResolveArgs};

/// Norma Stack CLI
///
/// Municipal licensing compliance toolchain: resolves which regulatory
/// documents apply to a project floor by floor, evaluates the project
/// against them, and manages the resulting submission checklist.
#[derive(Parser, Debug)]
#[command(name = "norma", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Indent JSON printed to stdout.
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load and inspect a regulatory corpus.
    Corpus(CorpusArgs),

    /// Resolve document applicability for a use assignment.
    Resolve(ResolveArgs),

    /// Classify a submission document from text, visual, and judge signals.
    Classify(ClassifyArgs),

    /// Run the full per-floor compliance evaluation against the judge.
    Evaluate(EvaluateArgs),

    /// Generate, update, and report on submission checklists.
    Checklist(ChecklistArgs),

    /// Render a stored evaluation result as a structured report.
    Report(ReportArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Corpus(args) => run_corpus(&args),
        Commands::Resolve(args) => run_resolve(&args, cli.pretty),
        Commands::Classify(args) => run_classify(&args, cli.pretty),
        Commands::Evaluate(args) => run_evaluate(&args, cli.pretty),
        Commands::Checklist(args) => run_checklist(&args, cli.pretty),
        Commands::Report(args) => run_report(&args, cli.pretty),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
