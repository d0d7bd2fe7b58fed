//! Error types for normalization and construction.
//!
//! This module provides the [`BibError`] type for all library operations
//! and the [`Result`] convenience type.

use crate::schema::ValidationErrors;
use thiserror::Error;

/// Error type for all library operations.
#[derive(Error, Debug)]
pub enum BibError {
    /// A normalizer received a shape it cannot handle at all.
    ///
    /// Guarded normalization steps absorb this variant and leave the
    /// offending field as it was found.
    #[error("Type mismatch in {context}: expected {expected}, found {found}")]
    TypeMismatch {
        /// Normalizer or step that rejected the value
        context: &'static str,
        /// Shape the normalizer accepts
        expected: &'static str,
        /// Shape it actually received
        found: &'static str,
    },

    /// The strict schema rejected the record.
    #[error("Schema validation failed: {0}")]
    SchemaValidation(#[from] ValidationErrors),

    /// A record was expected to be a mapping but was not.
    #[error("Expected a mapping for the record, found {0}")]
    NotAMapping(&'static str),

    /// JSON parse or serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BibError {
    /// Shorthand for building a [`BibError::TypeMismatch`].
    #[must_use]
    pub fn type_mismatch(
        context: &'static str,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        BibError::TypeMismatch {
            context,
            expected,
            found,
        }
    }

    /// Whether this is a [`BibError::TypeMismatch`].
    #[must_use]
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, BibError::TypeMismatch { .. })
    }
}

/// Convenience type alias for [`std::result::Result`] with [`BibError`].
pub type Result<T> = std::result::Result<T, BibError>;
