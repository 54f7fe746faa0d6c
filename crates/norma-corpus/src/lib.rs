//! # norma-corpus — The Regulatory Corpus
//!
//! The catalog of regulatory documents the Norma Stack resolves against,
//! with loading, fingerprinting, and the per-document requirement check
//! tables.
//!
//! ## Design Principles
//!
//! 1. **The catalog is immutable.** A [`Corpus`] never changes after
//!    construction; picking up file edits means building a new corpus via
//!    [`Corpus::reload`]. Stored results stay attributable to the catalog
//!    that produced them.
//! 2. **Every catalog is fingerprinted.** SHA-256 over canonical JSON,
//!    stamped into downstream results.
//! 3. **Scopes are data, not code.** A document declares which uses and
//!    floors it covers; applicability policy lives in the resolver, not in
//!    the catalog.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod corpus;
pub mod document;
pub mod error;
pub mod requirements;

pub use corpus::Corpus;
pub use document::{DocCategory, FloorScope, RegulatoryDocument, UseScope};
pub use error::{CorpusError, CorpusResult};
pub use requirements::{checks_for, RequirementCheck};
