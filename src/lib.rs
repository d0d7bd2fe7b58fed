#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # bibrelax: relaxed bibliographic records
//!
//! Turns loosely written bibliographic records into items that conform to a
//! strict schema, without failing on malformed input unless asked to.
//!
//! ## Quick Start
//!
//! ### Normalizing a Record
//!
//! ```
//! use bibrelax::{normalize_relaxed, record_from_value};
//! use serde_json::json;
//!
//! let mut record = record_from_value(json!({
//!     "contributor": {
//!         "person": {"name": {"surname": {"content": "Doe"}}},
//!         "role": "author",
//!     },
//! }))?;
//! normalize_relaxed(&mut record)?;
//! assert_eq!(record["contributor"]["role"], json!([{"type": "author"}]));
//! # Ok::<(), bibrelax::BibError>(())
//! ```
//!
//! ### Lenient Construction
//!
//! ```
//! use bibrelax::{construct_bibitem, record_from_value, ValidationMode};
//! use serde_json::json;
//!
//! let mut record = record_from_value(json!({
//!     "id": "RFC8446",
//!     "title": {"content": "TLS 1.3"},
//!     "docid": [{"id": "RFC 8446"}],
//! }))?;
//!
//! let (item, issues) = construct_bibitem(&mut record, ValidationMode::Lenient)?;
//! assert_eq!(item.title[0].content, "TLS 1.3");
//! assert_eq!(issues.unwrap()[0].loc_string(), "docid.0");
//! # Ok::<(), bibrelax::BibError>(())
//! ```
//!
//! ## Modules
//!
//! - [`normalize`]: Whole-record relaxed normalization
//! - [`field_normalizers`]: Normalizers for individual field shapes
//! - [`contributor`]: Contributor entry normalization
//! - [`construct`]: Lenient construction of canonical items
//! - [`schema`]: Canonical item types and strict validation
//! - [`docid`]: Primary document identifier selection
//! - [`contributor_queries`]: Author filtering and name rendering
//! - [`batch`]: Parallel batch construction with Rayon
//! - [`json`]: JSON input and output
//! - [`tree`]: Helpers over the untyped record tree
//! - [`recovery`]: Validation modes and narrow error absorption
//! - [`error`]: Error types and result type

pub mod batch;
pub mod construct;
pub mod contributor;
pub mod contributor_queries;
pub mod docid;
pub mod error;
pub mod field_normalizers;
pub mod json;
pub mod normalize;
pub mod recovery;
/// Canonical item types and strict validation
pub mod schema;
pub mod tree;

pub use batch::{construct_batch, normalize_batch};
pub use construct::{construct_bibitem, Constructed};
pub use contributor::normalize_contributor;
pub use contributor_queries::{filter_authors, AUTHOR_ROLES, RFC_PUBLISHER};
pub use docid::{get_primary_docid, select_primary_docid, DocIdentifier, PrimarySelection};
pub use error::{BibError, Result};
pub use json::{bibitem_to_json, record_from_json_str, record_from_value};
pub use normalize::normalize_relaxed;
pub use recovery::{absorb_type_mismatch, ValidationMode};
pub use schema::{
    BibliographicItem, Contributor, DocId, FullName, IssueKind, LocSegment, Relation,
    ValidationErrors, ValidationIssue,
};
pub use tree::RawRecord;
