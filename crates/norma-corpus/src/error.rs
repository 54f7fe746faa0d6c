//! Corpus-specific error types.
//!
//! Structured errors for corpus loading and lookup. All errors carry
//! context (file paths, document names) so a failed load can be traced
//! to the exact file and field that caused it.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during corpus operations.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// YAML parsing failed.
    #[error("failed to parse YAML at {path}: {source}")]
    YamlParse {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying serde_yaml error.
        source: serde_yaml::Error,
    },

    /// JSON parsing failed.
    #[error("failed to parse JSON at {path}: {source}")]
    JsonParse {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying serde_json error.
        source: serde_json::Error,
    },

    /// The corpus file was not found.
    #[error("corpus file not found: {path}")]
    FileNotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// The file extension does not map to a supported format.
    #[error("unsupported corpus format for {path} (expected .yaml, .yml, or .json)")]
    UnsupportedFormat {
        /// Path with the unrecognized extension.
        path: PathBuf,
    },

    /// The corpus contains no documents.
    #[error("corpus contains no documents")]
    EmptyCorpus,

    /// Two documents share the same name.
    #[error("duplicate document name in corpus: {name:?}")]
    DuplicateDocument {
        /// The colliding document name.
        name: String,
    },

    /// A lookup referenced a document the corpus does not contain.
    #[error("unknown document: {name:?}")]
    UnknownDocument {
        /// The requested document name.
        name: String,
    },

    /// Reload was requested on a corpus that was not loaded from a file.
    #[error("corpus is not file-backed; reload requires a corpus created via load()")]
    NotFileBacked,

    /// Fingerprint serialization failed.
    #[error("failed to serialize corpus for fingerprinting: {0}")]
    Fingerprint(serde_json::Error),

    /// Core validation error.
    #[error(transparent)]
    Validation(#[from] norma_core::ValidationError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for corpus operations.
pub type CorpusResult<T> = Result<T, CorpusError>;
