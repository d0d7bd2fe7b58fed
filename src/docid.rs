//! Primary document identifier selection.
//!
//! An item should carry exactly one "true primary" identifier: flagged
//! `primary`, with both `id` and `type` set and no `scope`. Records in the
//! wild sometimes flag several, or none. [`get_primary_docid`] picks one
//! anyway and logs a warning when the choice is ambiguous.
//!
//! Selection works over anything implementing [`DocIdentifier`], so it
//! applies to constructed items and to raw docid mappings alike.
//!
//! # Examples
//!
//! ```
//! use bibrelax::{get_primary_docid, DocId};
//!
//! let ids = vec![
//!     DocId { id: "10.17487/RFC8446".into(), r#type: "DOI".into(), scope: None, primary: None },
//!     DocId { id: "RFC 8446".into(), r#type: "IETF".into(), scope: None, primary: Some(true) },
//! ];
//! assert_eq!(get_primary_docid(&ids).map(|d| d.id.as_str()), Some("RFC 8446"));
//! ```

use crate::schema::{BibliographicItem, DocId};
use indexmap::IndexSet;
use serde_json::Value;
use std::collections::BTreeSet;

/// Read access to the parts of a document identifier that selection needs.
pub trait DocIdentifier {
    /// Identifier value, if present.
    fn id(&self) -> Option<&str>;

    /// Identifier scheme, if present.
    fn id_type(&self) -> Option<&str>;

    /// Whether a scope narrows the identifier.
    fn has_scope(&self) -> bool;

    /// Whether the identifier is flagged primary.
    fn is_primary(&self) -> bool;

    /// Primary, with `id` and `type` present and no scope.
    fn is_true_primary(&self) -> bool {
        self.is_primary() && self.id().is_some() && self.id_type().is_some() && !self.has_scope()
    }
}

impl DocIdentifier for DocId {
    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn id_type(&self) -> Option<&str> {
        Some(&self.r#type)
    }

    fn has_scope(&self) -> bool {
        self.scope.is_some()
    }

    fn is_primary(&self) -> bool {
        self.primary == Some(true)
    }
}

/// Raw docid mappings. Non-string `id`/`type` count as absent.
impl DocIdentifier for Value {
    fn id(&self) -> Option<&str> {
        self.get("id").and_then(Value::as_str)
    }

    fn id_type(&self) -> Option<&str> {
        self.get("type").and_then(Value::as_str)
    }

    fn has_scope(&self) -> bool {
        self.get("scope").is_some_and(|scope| !scope.is_null())
    }

    fn is_primary(&self) -> bool {
        self.get("primary") == Some(&Value::Bool(true))
    }
}

/// Outcome of primary identifier selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimarySelection<'a, T> {
    /// First true-primary identifier in input order
    pub primary: Option<&'a T>,
    /// Number of true-primary identifiers, duplicates included
    pub matched: usize,
    /// Number of distinct `{id, type}` pairs among them
    pub distinct: usize,
}

impl<T> PrimarySelection<'_, T> {
    /// Whether exactly one distinct primary identifier was found.
    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.distinct == 1
    }
}

/// Finds the true-primary identifiers without logging.
///
/// Duplicates are judged on the unordered `{id, type}` pair, so an entry
/// whose id and type are swapped counts as the same identifier.
#[must_use]
pub fn select_primary_docid<T: DocIdentifier>(docids: &[T]) -> PrimarySelection<'_, T> {
    let matches: Vec<&T> = docids.iter().filter(|d| d.is_true_primary()).collect();

    let distinct: IndexSet<BTreeSet<&str>> = matches
        .iter()
        .map(|d| d.id().into_iter().chain(d.id_type()).collect())
        .collect();

    PrimarySelection {
        primary: matches.first().copied(),
        matched: matches.len(),
        distinct: distinct.len(),
    }
}

/// Returns the item's primary identifier.
///
/// Logs a warning, citing the whole input, when the number of distinct
/// true-primary identifiers is not exactly one. The first match is returned
/// even then.
#[must_use]
pub fn get_primary_docid<T>(docids: &[T]) -> Option<&T>
where
    T: DocIdentifier + std::fmt::Debug,
{
    let selection = select_primary_docid(docids);
    if !selection.is_unique() {
        tracing::warn!(
            docids = ?docids,
            matched = selection.matched,
            distinct = selection.distinct,
            "Expected exactly one primary document identifier"
        );
    }
    selection.primary
}

impl BibliographicItem {
    /// The item's primary identifier, as chosen by [`get_primary_docid`].
    #[must_use]
    pub fn primary_docid(&self) -> Option<&DocId> {
        get_primary_docid(&self.docid)
    }
}
