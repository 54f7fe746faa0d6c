//! # Corpus Subcommand
//!
//! Loads a regulatory corpus and prints its contents and fingerprint.
//!
//! ## Subcommands
//!
//! - `show` — Print the documents, their scopes, and the catalog
//!   fingerprint.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use norma_core::BuildingUse;
use norma_corpus::{Corpus, UseScope};

/// Arguments for the `norma corpus` subcommand.
#[derive(Args, Debug)]
pub struct CorpusArgs {
    #[command(subcommand)]
    pub command: CorpusCommand,
}

/// Corpus subcommands.
#[derive(Subcommand, Debug)]
pub enum CorpusCommand {
    /// Print the catalog contents and fingerprint.
    Show {
        /// Corpus manifest (YAML or JSON). Defaults to the built-in catalog.
        #[arg(long)]
        manifest: Option<PathBuf>,
    },
}

/// Execute the corpus subcommand.
pub fn run_corpus(args: &CorpusArgs) -> Result<u8> {
    match &args.command {
        CorpusCommand::Show { manifest } => cmd_show(manifest.as_deref()),
    }
}

fn load_corpus(manifest: Option<&Path>) -> Result<Corpus> {
    match manifest {
        Some(path) => {
            Corpus::load(path).with_context(|| format!("failed to load corpus from {}", path.display()))
        }
        None => Corpus::builtin().context("failed to build the built-in corpus"),
    }
}

fn cmd_show(manifest: Option<&Path>) -> Result<u8> {
    let corpus = load_corpus(manifest)?;

    match corpus.loaded_from() {
        Some(path) => println!("Corpus: {} ({} documents)", path.display(), corpus.len()),
        None => println!("Corpus: built-in catalog ({} documents)", corpus.len()),
    }

    for document in corpus.in_priority_order() {
        let uses = match &document.uses {
            UseScope::All => "all uses".to_string(),
            UseScope::Only(uses) => uses
                .iter()
                .map(BuildingUse::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        };
        println!(
            "  [{}] {}: {} ({}, {})",
            document.priority, document.name, document.title, document.category, uses
        );
    }

    println!("Fingerprint: {}", corpus.fingerprint());
    Ok(0)
}
