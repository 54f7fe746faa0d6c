//! # Identity Newtypes
//!
//! Domain-primitive newtypes for identifiers. String-based identifiers
//! validate at construction time; generated identifiers are always valid
//! by construction.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// A unique identifier for a construction-project submission.
///
/// Submissions arrive from upstream systems with their own identifier
/// schemes, so the inner representation is an opaque non-empty string.
/// Projects created inside the stack get a generated UUID string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(String);

impl ProjectId {
    /// Create a project identifier from an existing value.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidProjectId`] if the value is empty
    /// or whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.trim().is_empty() {
            return Err(ValidationError::InvalidProjectId);
        }
        Ok(Self(s))
    }

    /// Generate a fresh random project identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
