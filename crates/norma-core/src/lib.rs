#![deny(missing_docs)]

//! # norma-core — Foundational Types for the Norma Stack
//!
//! This crate defines the foundational types that every other crate in the
//! workspace depends on. It has no internal crate dependencies — only `serde`,
//! `serde_json`, `thiserror`, `chrono`, and `uuid` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** Every identifier is a
//!    distinct type. You cannot pass a floor number where a [`ProjectId`] is
//!    expected, and a [`FloorId`] is constructed through validated parsing,
//!    not raw integer casts scattered through the codebase.
//!
//! 2. **Single source of truth vocabularies.** [`BuildingUse`], [`Severity`],
//!    [`ComplianceStatus`] and [`CheckCategory`] are each defined once, with
//!    exhaustive `match` everywhere. No stringly-typed category lists that
//!    can diverge between the resolver, the orchestrator and the checklist.
//!
//! 3. **UTC timestamps only.** All times flow through [`Timestamp`]; local
//!    time is a presentation concern for callers.
//!
//! 4. **[`NormaError`] hierarchy.** Structured errors with `thiserror` — no
//!    `Box<dyn Error>`, no `.unwrap()` outside tests.

pub mod category;
pub mod error;
pub mod floor;
pub mod ids;
pub mod issue;
pub mod severity;
pub mod status;
pub mod temporal;
pub mod uses;

// Re-export primary types at crate root for ergonomic imports.
pub use category::CheckCategory;
pub use error::{FloorParseError, NormaError, ValidationError};
pub use floor::{FloorId, FloorRange};
pub use ids::ProjectId;
pub use issue::ComplianceIssue;
pub use severity::Severity;
pub use status::ComplianceStatus;
pub use temporal::Timestamp;
pub use uses::{BuildingUse, SecondaryUse, UseAssignment};
