//! Field-by-field validation of raw records against the canonical schema.
//!
//! Every top-level field, and every element of a list-valued field, is
//! checked on its own, so a single pass reports all failing fields rather
//! than stopping at the first. Related items are validated recursively and
//! report nested locations such as `relation.0.bibitem.docid.1`.

use super::types::{BibliographicItem, GenericStringValue, Relation};
use crate::tree::{as_list, RawRecord};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Keys modeled by [`BibliographicItem`]; anything else lands in `extra`.
const ITEM_FIELDS: [&str; 15] = [
    "id",
    "type",
    "formattedref",
    "title",
    "docid",
    "docnumber",
    "edition",
    "version",
    "keyword",
    "contributor",
    "date",
    "link",
    "relation",
    "language",
    "script",
];

/// One step in the path to a failing value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocSegment {
    /// Mapping key
    Key(String),
    /// Sequence index
    Index(usize),
}

impl fmt::Display for LocSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocSegment::Key(key) => write!(f, "{key}"),
            LocSegment::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for LocSegment {
    fn from(key: &str) -> Self {
        LocSegment::Key(key.to_string())
    }
}

impl From<usize> for LocSegment {
    fn from(index: usize) -> Self {
        LocSegment::Index(index)
    }
}

/// Category of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// A required field is absent
    Missing,
    /// A value has the wrong shape
    InvalidType,
    /// A value has the right shape but breaks a schema rule
    InvalidValue,
}

impl IssueKind {
    /// Classifies a deserialization error message.
    fn from_message(msg: &str) -> Self {
        if msg.starts_with("missing field") {
            IssueKind::Missing
        } else if msg.starts_with("invalid type") {
            IssueKind::InvalidType
        } else {
            IssueKind::InvalidValue
        }
    }
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Path to the failing value
    pub loc: Vec<LocSegment>,
    /// Human-readable message
    pub msg: String,
    /// Failure category
    pub kind: IssueKind,
}

impl ValidationIssue {
    /// The location rendered as a dotted path, e.g. `contributor.0`.
    #[must_use]
    pub fn loc_string(&self) -> String {
        self.loc
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loc = self.loc_string();
        let loc = if loc.is_empty() { "__root__" } else { &loc };
        write!(f, "{loc}: {}", self.msg)
    }
}

/// All validation failures for one record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    issues: Vec<ValidationIssue>,
}

impl ValidationErrors {
    /// Wraps a list of issues.
    #[must_use]
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        ValidationErrors { issues }
    }

    /// The individual issues.
    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Consumes the errors, returning the individual issues.
    #[must_use]
    pub fn into_issues(self) -> Vec<ValidationIssue> {
        self.issues
    }

    /// Number of issues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Whether there are no issues.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.issues.len();
        let plural = if count == 1 { "" } else { "s" };
        write!(f, "{count} validation error{plural} for BibliographicItem")?;
        for (i, issue) in self.issues.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Reads one item's fields, collecting issues instead of stopping.
struct ItemReader<'a> {
    data: &'a RawRecord,
    loc: Vec<LocSegment>,
    issues: Vec<ValidationIssue>,
    unvalidated: Map<String, Value>,
}

impl<'a> ItemReader<'a> {
    fn new(data: &'a RawRecord, loc: Vec<LocSegment>) -> Self {
        ItemReader {
            data,
            loc,
            issues: Vec::new(),
            unvalidated: Map::new(),
        }
    }

    fn path(&self, tail: &[LocSegment]) -> Vec<LocSegment> {
        self.loc.iter().chain(tail).cloned().collect()
    }

    fn push_issue(&mut self, tail: &[LocSegment], msg: String, kind: IssueKind) {
        let loc = self.path(tail);
        self.issues.push(ValidationIssue { loc, msg, kind });
    }

    fn push_serde_issue(&mut self, tail: &[LocSegment], err: &serde_json::Error) {
        let msg = err.to_string();
        let kind = IssueKind::from_message(&msg);
        self.push_issue(tail, msg, kind);
    }

    fn reject(&mut self, key: &str) {
        if let Some(raw) = self.data.get(key) {
            self.unvalidated.insert(key.to_string(), raw.clone());
        }
    }

    fn single<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        let data = self.data;
        let value = data.get(key).filter(|v| !v.is_null())?;
        match T::deserialize(value) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                self.push_serde_issue(&[key.into()], &err);
                self.reject(key);
                None
            },
        }
    }

    /// Reads a list-valued field. A single value counts as a one-item list.
    ///
    /// If any element fails, the whole field is kept in `unvalidated`.
    fn list<T: DeserializeOwned>(&mut self, key: &str) -> Vec<T> {
        let data = self.data;
        let Some(value) = data.get(key) else {
            return Vec::new();
        };
        let indexed = value.is_array();

        let mut parsed = Vec::new();
        let mut failed = false;
        for (index, item) in as_list(value).into_iter().enumerate() {
            match T::deserialize(item) {
                Ok(item) => parsed.push(item),
                Err(err) => {
                    failed = true;
                    if indexed {
                        self.push_serde_issue(&[key.into(), index.into()], &err);
                    } else {
                        self.push_serde_issue(&[key.into()], &err);
                    }
                },
            }
        }

        if failed {
            self.reject(key);
            Vec::new()
        } else {
            parsed
        }
    }

    fn relations(&mut self, key: &str) -> Vec<Relation> {
        let data = self.data;
        let Some(value) = data.get(key) else {
            return Vec::new();
        };
        let indexed = value.is_array();

        let mut relations = Vec::new();
        let mut failed = false;
        for (index, item) in as_list(value).into_iter().enumerate() {
            let mut tail: Vec<LocSegment> = vec![key.into()];
            if indexed {
                tail.push(index.into());
            }
            match self.relation(item, &tail) {
                Some(relation) => relations.push(relation),
                None => failed = true,
            }
        }

        if failed {
            self.reject(key);
            Vec::new()
        } else {
            relations
        }
    }

    fn relation(&mut self, item: &Value, tail: &[LocSegment]) -> Option<Relation> {
        let Value::Object(entry) = item else {
            self.push_issue(
                tail,
                format!("invalid type: {}, expected a relation mapping", describe(item)),
                IssueKind::InvalidType,
            );
            return None;
        };
        let field = |name: &str| -> Vec<LocSegment> {
            tail.iter().cloned().chain([LocSegment::from(name)]).collect()
        };

        let relation_type = match entry.get("type") {
            Some(Value::String(t)) => Some(t.clone()),
            Some(other) => {
                self.push_issue(
                    &field("type"),
                    format!("invalid type: {}, expected a string", describe(other)),
                    IssueKind::InvalidType,
                );
                None
            },
            None => {
                let msg = "missing field `type`".to_string();
                self.push_issue(&field("type"), msg, IssueKind::Missing);
                None
            },
        };

        let description = match entry.get("description").filter(|v| !v.is_null()) {
            Some(raw) => match GenericStringValue::deserialize(raw) {
                Ok(description) => Some(Some(description)),
                Err(err) => {
                    self.push_serde_issue(&field("description"), &err);
                    None
                },
            },
            None => Some(None),
        };

        let bibitem = match entry.get("bibitem") {
            Some(Value::Object(nested)) => {
                let (bibitem, issues) = read_item(nested, self.path(&field("bibitem")));
                self.issues.extend(issues);
                Some(bibitem)
            },
            Some(other) => {
                self.push_issue(
                    &field("bibitem"),
                    format!(
                        "invalid type: {}, expected a bibliographic item mapping",
                        describe(other)
                    ),
                    IssueKind::InvalidType,
                );
                None
            },
            None => {
                let msg = "missing field `bibitem`".to_string();
                self.push_issue(&field("bibitem"), msg, IssueKind::Missing);
                None
            },
        };

        Some(Relation {
            r#type: relation_type?,
            description: description?,
            bibitem: Box::new(bibitem?),
        })
    }

    fn extra(&self) -> Map<String, Value> {
        self.data
            .iter()
            .filter(|(key, _)| !ITEM_FIELDS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => format!("string {s:?}"),
        other => crate::tree::kind_name(other).to_string(),
    }
}

/// Reads an item, returning the best-effort result and every issue found.
///
/// `loc` is the location of this item inside its root record.
pub(crate) fn read_item(
    data: &RawRecord,
    loc: Vec<LocSegment>,
) -> (BibliographicItem, Vec<ValidationIssue>) {
    let mut reader = ItemReader::new(data, loc);
    let item = BibliographicItem {
        id: reader.single("id"),
        r#type: reader.single("type"),
        formattedref: reader.single("formattedref"),
        title: reader.list("title"),
        docid: reader.list("docid"),
        docnumber: reader.single("docnumber"),
        edition: reader.single("edition"),
        version: reader.list("version"),
        keyword: reader.list("keyword"),
        contributor: reader.list("contributor"),
        date: reader.list("date"),
        link: reader.list("link"),
        relation: reader.relations("relation"),
        language: reader.list("language"),
        script: reader.list("script"),
        extra: reader.extra(),
        unvalidated: Map::new(),
    };
    (
        BibliographicItem {
            unvalidated: reader.unvalidated,
            ..item
        },
        reader.issues,
    )
}
