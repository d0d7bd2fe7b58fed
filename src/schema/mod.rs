//! Strict bibliographic item schema.
//!
//! The schema is the target of relaxed normalization. [`construct`] validates
//! a raw record and fails with every field-level issue it finds;
//! [`construct_unchecked`] builds the same item without failing, keeping
//! whatever did not validate in [`BibliographicItem::unvalidated`].
//!
//! List-valued fields accept a single value as a one-item list, so a record
//! that carries `"title": {...}` validates the same as one with
//! `"title": [{...}]`.

mod types;
mod validation;

pub use types::{
    Address, Affiliation, BibliographicDate, BibliographicItem, ContactMethod, Contributor,
    DocId, Edition, Forename, FullName, GenericStringValue, GivenName, Link, Organization,
    Person, Phone, Relation, Role, Title, VersionInfo,
};
pub use validation::{IssueKind, LocSegment, ValidationErrors, ValidationIssue};

use crate::tree::RawRecord;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Map;

/// Validates a raw record and builds the canonical item.
///
/// # Errors
///
/// Returns every validation issue found, each with its location, if any
/// field (at any nesting depth) does not match the schema.
pub fn construct(data: &RawRecord) -> Result<BibliographicItem, ValidationErrors> {
    let (item, issues) = validation::read_item(data, Vec::new());
    if issues.is_empty() {
        Ok(item)
    } else {
        Err(ValidationErrors::new(issues))
    }
}

/// Builds the canonical item without validation failures.
///
/// Fields that fail validation are kept verbatim in `unvalidated`. This never
/// fails.
///
/// A list field is all-or-nothing: if one element fails, the typed field is
/// left empty and the whole raw list goes to `unvalidated`, valid elements
/// included. Each field therefore has exactly one home, and serializing the
/// item writes the list back as found. Read the raw list from `unvalidated`
/// when the valid elements are needed, e.g. with
/// [`get_primary_docid`](crate::get_primary_docid) on `unvalidated["docid"]`.
#[must_use]
pub fn construct_unchecked(data: &RawRecord) -> BibliographicItem {
    validation::read_item(data, Vec::new()).0
}

impl<'de> Deserialize<'de> for BibliographicItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let data = Map::deserialize(deserializer)?;
        construct(&data).map_err(D::Error::custom)
    }
}
