//! # norma-checklist — Licence Submission Checklists
//!
//! Turns an evaluation outcome into the working document a project team
//! actually tracks: a hierarchical checklist of the evidence and
//! verifications a municipal licence submission needs, seeded from the
//! compliance findings and updated item by item as the dossier comes
//! together.
//!
//! ## Design Principles
//!
//! 1. **Templates are static data.** The category and item catalogue is
//!    compiled in; generation instantiates it for a primary use and
//!    never invents items at runtime.
//! 2. **Derived state is recomputed, never adjusted.** Every mutation
//!    recomputes category and checklist percentages from the full item
//!    set. There is no incremental arithmetic to drift.
//! 3. **Item identifiers are the join key.** Checklist items reuse the
//!    requirement-check identifiers, so compliance issues seed item
//!    statuses by exact id match and updates address items the same way.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod checklist;
pub mod error;
pub mod item;
pub mod report;
pub mod template;

pub use checklist::{generate, Checklist, ChecklistCategory, ChecklistStatus, ItemUpdate};
pub use error::ChecklistError;
pub use item::{ChecklistItem, ItemPriority, ItemStatus};
pub use report::{
    build_checklist_report, CategoryRow, ChecklistRecommendation, ChecklistReport,
    ChecklistStatistics, NextStep,
};
pub use template::{template_for, CategoryTemplate, ItemTemplate};
