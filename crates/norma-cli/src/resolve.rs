//! # Resolve Subcommand
//!
//! Resolves which regulatory documents apply to each floor of a project
//! and prints the [`ApplicabilityResult`] as JSON.
//!
//! The use assignment is read from a JSON file:
//!
//! ```json
//! {
//!   "primary_use": "residential",
//!   "secondary_uses": [{ "use_type": "garage", "floors": [-1, -2] }],
//!   "existing_building": false
//! }
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use norma_core::{FloorRange, UseAssignment};
use norma_corpus::Corpus;
use norma_engine::{resolve, ApplicabilityResult, ResolverConfig};

use crate::{print_json, read_json, write_json};

/// Arguments for the `norma resolve` subcommand.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Use assignment JSON file.
    #[arg(value_name = "ASSIGNMENT")]
    pub assignment: PathBuf,

    /// Corpus manifest (YAML or JSON). Defaults to the built-in catalog.
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Lowest floor of the evaluated range.
    #[arg(long, default_value_t = -5, allow_hyphen_values = true)]
    pub lowest: i32,

    /// Highest floor of the evaluated range.
    #[arg(long, default_value_t = 20)]
    pub highest: i32,

    /// Also write the result to a file (always indented).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the resolve subcommand.
pub fn run_resolve(args: &ResolveArgs, pretty: bool) -> Result<u8> {
    let result = cmd_resolve(args)?;
    if let Some(path) = &args.output {
        write_json(path, &result)?;
    }
    print_json(&result, pretty)?;
    Ok(0)
}

fn cmd_resolve(args: &ResolveArgs) -> Result<ApplicabilityResult> {
    let assignment: UseAssignment = read_json(&args.assignment)?;
    let corpus = match &args.manifest {
        Some(path) => Corpus::load(path)
            .with_context(|| format!("failed to load corpus from {}", path.display()))?,
        None => Corpus::builtin().context("failed to build the built-in corpus")?,
    };
    let config = ResolverConfig {
        floor_range: FloorRange::new(args.lowest, args.highest)
            .context("invalid floor range")?,
    };

    resolve(&assignment, &corpus, &config).context("applicability resolution failed")
}
