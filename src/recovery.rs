//! Recovery behavior for malformed input.
//!
//! Two knobs live here: [`ValidationMode`], which decides whether schema
//! non-conformance is fatal, and [`absorb_type_mismatch`], which every guarded
//! normalization step uses to swallow shape errors without hiding anything else.

use crate::error::{BibError, Result};

/// How construction treats records the strict schema rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Strict mode: schema validation errors are returned as errors (default)
    #[default]
    Strict,
    /// Lenient mode: build a best-effort item and report the errors alongside it
    Lenient,
}

impl ValidationMode {
    /// Whether this mode is [`ValidationMode::Strict`].
    #[must_use]
    pub const fn is_strict(self) -> bool {
        matches!(self, ValidationMode::Strict)
    }
}

impl From<bool> for ValidationMode {
    /// `true` selects [`ValidationMode::Strict`].
    fn from(strict: bool) -> Self {
        if strict {
            ValidationMode::Strict
        } else {
            ValidationMode::Lenient
        }
    }
}

/// Absorbs a [`BibError::TypeMismatch`] raised by a guarded step.
///
/// Returns `Ok(Some(value))` on success and `Ok(None)` when the step hit a
/// shape it cannot normalize; the caller then leaves its field untouched.
///
/// # Errors
///
/// Any error other than `TypeMismatch` is passed through unchanged.
pub fn absorb_type_mismatch<T>(result: Result<T>, step: &str) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err @ BibError::TypeMismatch { .. }) => {
            tracing::debug!(step, error = %err, "normalization step skipped");
            Ok(None)
        },
        Err(other) => Err(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ValidationErrors;

    #[test]
    fn test_default_mode_is_strict() {
        assert_eq!(ValidationMode::default(), ValidationMode::Strict);
        assert!(ValidationMode::default().is_strict());
    }

    #[test]
    fn test_mode_from_bool() {
        assert_eq!(ValidationMode::from(true), ValidationMode::Strict);
        assert_eq!(ValidationMode::from(false), ValidationMode::Lenient);
    }

    #[test]
    fn test_absorb_passes_success_through() {
        let result = absorb_type_mismatch(Ok(5), "test");
        assert_eq!(result.unwrap(), Some(5));
    }

    #[test]
    fn test_absorb_swallows_type_mismatch() {
        let result: Result<Option<()>> = absorb_type_mismatch(
            Err(BibError::type_mismatch("version", "string", "number")),
            "version",
        );
        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn test_absorb_propagates_other_errors() {
        let result: Result<Option<()>> =
            absorb_type_mismatch(Err(BibError::NotAMapping("string")), "relation");
        assert!(matches!(result, Err(BibError::NotAMapping("string"))));

        let result: Result<Option<()>> = absorb_type_mismatch(
            Err(BibError::SchemaValidation(ValidationErrors::default())),
            "relation",
        );
        assert!(matches!(result, Err(BibError::SchemaValidation(_))));
    }
}
