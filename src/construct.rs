//! Lenient construction of canonical items from relaxed records.
//!
//! [`construct_bibitem`] is the pipeline entry point: it normalizes the raw
//! record in place, then builds a [`BibliographicItem`] from it. In
//! [`ValidationMode::Lenient`] a schema failure never surfaces as an error;
//! the caller gets a best-effort item and the list of issues instead.
//!
//! # Examples
//!
//! ```
//! use bibrelax::{construct_bibitem, record_from_value, ValidationMode};
//! use serde_json::json;
//!
//! let mut record = record_from_value(json!({
//!     "id": "RFC8446",
//!     "docid": [{"id": "RFC 8446", "type": "IETF", "primary": true}],
//!     "date": {"value": "2018-08"},
//! }))?;
//!
//! let (item, issues) = construct_bibitem(&mut record, ValidationMode::Lenient)?;
//! assert_eq!(item.id.as_deref(), Some("RFC8446"));
//! assert_eq!(issues.map(|i| i.len()), Some(1));
//! assert!(item.unvalidated.contains_key("date"));
//! # Ok::<(), bibrelax::BibError>(())
//! ```

use crate::error::Result;
use crate::normalize::normalize_relaxed;
use crate::recovery::{absorb_type_mismatch, ValidationMode};
use crate::schema::{self, BibliographicItem, ValidationIssue};
use crate::tree::{stringify, RawRecord};

/// A constructed item plus the issues found, if construction fell back.
///
/// The issue list is `None` when the record validated.
pub type Constructed = (BibliographicItem, Option<Vec<ValidationIssue>>);

/// Normalizes `data` in place and builds a canonical item from it.
///
/// Normalization is best-effort: a shape error it raises is logged at debug
/// level and construction proceeds on whatever it managed to normalize.
///
/// # Errors
///
/// In [`ValidationMode::Strict`], returns [`crate::BibError::SchemaValidation`]
/// if the normalized record does not conform to the schema. In
/// [`ValidationMode::Lenient`] schema failures are returned as data and this
/// function does not fail because of them.
pub fn construct_bibitem(data: &mut RawRecord, mode: ValidationMode) -> Result<Constructed> {
    absorb_type_mismatch(normalize_relaxed(data).map(|_| ()), "relaxed normalization")?;

    match schema::construct(data) {
        Ok(item) => Ok((item, None)),
        Err(errors) if mode.is_strict() => Err(errors.into()),
        Err(errors) => {
            let docid = data
                .get("docid")
                .map_or_else(|| "docid N/A".to_string(), stringify);
            tracing::warn!(
                docid = %docid,
                error = %errors,
                "Unexpected bibliographic item format"
            );
            Ok((schema::construct_unchecked(data), Some(errors.into_issues())))
        },
    }
}
