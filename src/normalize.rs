//! Relaxed canonicalization of whole records.
//!
//! [`normalize_relaxed`] rewrites abbreviated or legacy field shapes into the
//! shapes the strict schema expects, recursing into related items. It works
//! in place on a record the caller owns exclusively; callers that need the
//! original should clone it first.
//!
//! Normalization is idempotent: running it twice gives the same tree as
//! running it once.
//!
//! # Examples
//!
//! ```
//! use bibrelax::{normalize_relaxed, record_from_value};
//! use serde_json::json;
//!
//! let mut record = record_from_value(json!({
//!     "version": "2020-draft",
//!     "edition": "2",
//!     "keyword": [{"content": "routing"}, "ipv6"],
//! }))?;
//! normalize_relaxed(&mut record)?;
//!
//! assert_eq!(record["version"], json!([{"draft": "2020-draft"}]));
//! assert_eq!(record["edition"], json!({"content": "2"}));
//! assert_eq!(record["keyword"], json!(["routing", "ipv6"]));
//! # Ok::<(), bibrelax::BibError>(())
//! ```

use crate::contributor::normalize_contributor;
use crate::error::Result;
use crate::field_normalizers::{normalize_version, to_formatted_string, to_plain_string};
use crate::recovery::absorb_type_mismatch;
use crate::tree::{as_list, into_list, is_truthy, RawRecord};
use serde_json::Value;

/// Normalizes a relaxed record in place and returns it.
///
/// Version, contact, given-name and relation normalization are each guarded:
/// a shape error there leaves that field as found. The contributor pass is
/// not guarded at this level.
///
/// # Errors
///
/// Returns [`crate::BibError::TypeMismatch`] if a contributor entry is not a
/// mapping. Fields normalized before the failure stay normalized.
pub fn normalize_relaxed(data: &mut RawRecord) -> Result<&mut RawRecord> {
    normalize_versions(data)?;
    normalize_edition(data);
    normalize_keywords(data);
    normalize_contributors(data)?;
    normalize_relations(data)?;
    Ok(data)
}

fn normalize_versions(data: &mut RawRecord) -> Result<()> {
    let Some(raw) = data.get("version") else {
        return Ok(());
    };
    let versions = as_list(raw);
    if versions.is_empty() {
        return Ok(());
    }

    let normalized = versions
        .into_iter()
        .map(|item| {
            if item.is_string() {
                normalize_version(item)
            } else {
                Ok(item.clone())
            }
        })
        .collect::<Result<Vec<_>>>();

    if let Some(versions) = absorb_type_mismatch(normalized, "version")? {
        data.insert("version".to_string(), Value::Array(versions));
    }
    Ok(())
}

fn normalize_edition(data: &mut RawRecord) {
    let Some(edition) = data
        .get("edition")
        .filter(|e| e.as_str().is_some_and(|s| !s.is_empty()))
    else {
        return;
    };
    let edition = to_formatted_string(edition);
    data.insert("edition".to_string(), edition);
}

fn normalize_keywords(data: &mut RawRecord) {
    let Some(raw) = data.get("keyword").filter(|v| is_truthy(v)) else {
        return;
    };
    let keywords = as_list(raw)
        .into_iter()
        .map(|keyword| Value::String(to_plain_string(keyword)))
        .collect();
    data.insert("keyword".to_string(), Value::Array(keywords));
}

fn normalize_contributors(data: &mut RawRecord) -> Result<()> {
    match data.get_mut("contributor") {
        None | Some(Value::Null) => Ok(()),
        Some(Value::Array(contributors)) => {
            contributors.iter_mut().try_for_each(normalize_contributor)
        },
        Some(single) => normalize_contributor(single),
    }
}

/// Recurses into related items and drops relations without one.
fn normalize_relations(data: &mut RawRecord) -> Result<()> {
    rewrite_relations(data, |nested| {
        absorb_type_mismatch(normalize_relaxed(nested).map(|_| ()), "relation bibitem").map(|_| ())
    })
}

/// Applies `normalize` to every related item that is a mapping, then drops
/// relations without a truthy `bibitem`.
///
/// If `normalize` fails, nothing is dropped: the relations are written back
/// with the items normalized so far, and the error is returned.
fn rewrite_relations<F>(data: &mut RawRecord, mut normalize: F) -> Result<()>
where
    F: FnMut(&mut RawRecord) -> Result<()>,
{
    let Some(raw) = data.get_mut("relation").filter(|v| is_truthy(v)) else {
        return Ok(());
    };
    let mut relations = into_list(std::mem::take(raw));

    let outcome = relations
        .iter_mut()
        .filter_map(|relation| relation.get_mut("bibitem"))
        .filter_map(Value::as_object_mut)
        .filter(|nested| !nested.is_empty())
        .try_for_each(&mut normalize);
    if outcome.is_ok() {
        relations.retain(|relation| relation.get("bibitem").is_some_and(is_truthy));
    }

    data.insert("relation".to_string(), Value::Array(relations));
    outcome
}
