//! JSON input and output for records and items.
//!
//! Relaxed records usually arrive as JSON (or as YAML already loaded into a
//! JSON-compatible tree). These helpers accept such input as a [`RawRecord`]
//! and turn constructed items back into JSON.
//!
//! # Examples
//!
//! ```
//! use bibrelax::json::{bibitem_to_json, record_from_json_str};
//! use bibrelax::{construct_bibitem, ValidationMode};
//!
//! let mut record = record_from_json_str(r#"{"id": "X", "edition": "2"}"#)?;
//! let (item, _) = construct_bibitem(&mut record, ValidationMode::Strict)?;
//! let json = bibitem_to_json(&item)?;
//! assert_eq!(json["edition"]["content"], "2");
//! # Ok::<(), bibrelax::BibError>(())
//! ```

use crate::error::{BibError, Result};
use crate::schema::BibliographicItem;
use crate::tree::{kind_name, RawRecord};
use serde_json::Value;

/// Parses a JSON document whose top level is an object.
///
/// # Errors
///
/// Returns [`BibError::Json`] if the text is not valid JSON, or
/// [`BibError::NotAMapping`] if the top level is not an object.
pub fn record_from_json_str(text: &str) -> Result<RawRecord> {
    let value: Value = serde_json::from_str(text)?;
    record_from_value(value)
}

/// Unwraps a JSON value into a record.
///
/// # Errors
///
/// Returns [`BibError::NotAMapping`] if the value is not an object.
pub fn record_from_value(value: Value) -> Result<RawRecord> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(BibError::NotAMapping(kind_name(&other))),
    }
}

/// Serializes a constructed item.
///
/// Keys outside the schema and unvalidated fields are written back at the
/// top level, alongside the schema fields.
///
/// # Errors
///
/// Returns [`BibError::Json`] if serialization fails.
pub fn bibitem_to_json(item: &BibliographicItem) -> Result<Value> {
    Ok(serde_json::to_value(item)?)
}
