//! # norma-judge — judge API client with credential rotation
//!
//! Typed client for the OpenAI-compatible chat-completions endpoint
//! that backs compliance judgments and document-family verdicts. The
//! rest of the stack calls the judge only through this crate.
//!
//! ## Design Principles
//!
//! 1. **Rotate, don't fail.** Free-tier throttles and per-key
//!    rejections are routine; calls walk a credential pool and spend a
//!    bounded attempt budget before surfacing an error.
//! 2. **Tolerant decode, strict retry.** The first completion may wrap
//!    its JSON in fences or prose; only after a tolerant decode fails
//!    is the call repeated once under an enforced JSON contract.
//! 3. **Secrets stay out of logs.** Configuration, pool, and
//!    statistics types redact credentials in their `Debug` and
//!    serialized forms.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod protocol;

pub use client::JudgeClient;
pub use config::{ConfigError, JudgeConfig, DEFAULT_ENDPOINT, DEFAULT_MODEL};
pub use credentials::{CredentialPool, CredentialStats};
pub use error::JudgeApiError;
pub use protocol::{decode_judgment, Judgment, ParseOutcome, ReportedIssue};
