//! Parallel normalization and construction using Rayon.
//!
//! Each record in a batch is handed to exactly one task, which normalizes it
//! in place and builds its item. Records share nothing, so the batch runs on
//! Rayon's work-stealing pool without locking. Results come back in input
//! order, one per record; a failing record does not stop the others.
//!
//! # Examples
//!
//! ```
//! use bibrelax::batch::construct_batch;
//! use bibrelax::{record_from_value, ValidationMode};
//! use serde_json::json;
//!
//! let mut records = vec![
//!     record_from_value(json!({"id": "A", "version": "d1"}))?,
//!     record_from_value(json!({"id": "B", "docid": {"id": "no type"}}))?,
//! ];
//! let results = construct_batch(&mut records, ValidationMode::Strict);
//! assert!(results[0].is_ok());
//! assert!(results[1].is_err());
//! # Ok::<(), bibrelax::BibError>(())
//! ```

use crate::construct::{construct_bibitem, Constructed};
use crate::error::Result;
use crate::normalize::normalize_relaxed;
use crate::recovery::ValidationMode;
use crate::tree::RawRecord;
use rayon::prelude::*;

/// Normalizes and constructs every record in parallel.
///
/// The pool size follows Rayon's defaults, including `RAYON_NUM_THREADS`.
#[must_use]
pub fn construct_batch(
    records: &mut [RawRecord],
    mode: ValidationMode,
) -> Vec<Result<Constructed>> {
    records
        .par_iter_mut()
        .map(|record| construct_bibitem(record, mode))
        .collect()
}

/// Normalizes every record in place, in parallel.
///
/// Returns one result per record; records after a failing one are still
/// normalized.
#[must_use]
pub fn normalize_batch(records: &mut [RawRecord]) -> Vec<Result<()>> {
    records
        .par_iter_mut()
        .map(|record| normalize_relaxed(record).map(|_| ()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn record(value: Value) -> RawRecord {
        match value {
            Value::Object(map) => map,
            _ => panic!("test record must be a mapping"),
        }
    }

    #[test]
    fn test_construct_batch_empty() {
        let mut records: Vec<RawRecord> = Vec::new();
        assert!(construct_batch(&mut records, ValidationMode::Lenient).is_empty());
    }

    #[test]
    fn test_construct_batch_preserves_order() {
        let mut records: Vec<RawRecord> = (0..64)
            .map(|i| record(json!({"id": format!("R{i}"), "edition": i.to_string()})))
            .collect();
        let results = construct_batch(&mut records, ValidationMode::Strict);
        assert_eq!(results.len(), 64);
        for (i, result) in results.into_iter().enumerate() {
            let (item, issues) = result.unwrap();
            assert_eq!(item.id, Some(format!("R{i}")));
            assert!(issues.is_none());
        }
        assert_eq!(records[7]["edition"], json!({"content": "7"}));
    }

    #[test]
    fn test_lenient_batch_never_fails_on_schema() {
        let mut records = vec![
            record(json!({"docid": [{"id": "A"}]})),
            record(json!({"title": 5})),
        ];
        let results = construct_batch(&mut records, ValidationMode::Lenient);
        assert!(results.iter().all(Result::is_ok));
    }

    #[test]
    fn test_normalize_batch_reports_per_record() {
        let mut records = vec![
            record(json!({"contributor": [1]})),
            record(json!({"keyword": {"content": "k"}})),
        ];
        let results = normalize_batch(&mut records);
        assert!(results[0].as_ref().unwrap_err().is_type_mismatch());
        assert!(results[1].is_ok());
        assert_eq!(records[1]["keyword"], json!(["k"]));
    }
}
