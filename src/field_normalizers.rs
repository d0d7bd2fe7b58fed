//! Normalizers for individual ambiguous field shapes.
//!
//! Each function converts one loosely-typed tree value into the canonical
//! mapping shape the strict schema expects. Role and contact inputs come in
//! several shapes, so they are first classified into a closed set of variants
//! ([`RoleShape`], [`ContactShape`]) and then converted by matching on the
//! variant.
//!
//! # Examples
//!
//! ```
//! use bibrelax::field_normalizers::{normalize_contact, normalize_role};
//! use serde_json::json;
//!
//! assert_eq!(normalize_role(&json!("editor")), json!({"type": "editor"}));
//!
//! let contact = normalize_contact(&json!({"type": "email", "value": "a@b.com"}))?;
//! assert_eq!(contact, Some(json!({"email": "a@b.com"})));
//! # Ok::<(), bibrelax::BibError>(())
//! ```

use crate::error::{BibError, Result};
use crate::tree::{is_truthy, kind_name, stringify, truthy_field};
use serde_json::{json, Map, Value};

/// Returns the plain text of a keyword-like value.
///
/// Strings are returned unchanged, formatted-string mappings yield their
/// `content`, and anything else is stringified. Never fails.
#[must_use]
pub fn to_plain_string(raw: &Value) -> String {
    match raw {
        Value::String(s) => s.clone(),
        Value::Object(map) => {
            truthy_field(map, "content").map_or_else(|| stringify(raw), stringify)
        },
        other => stringify(other),
    }
}

/// Shape of a raw contributor role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoleShape<'a> {
    /// A bare role category such as `"author"`
    Category(&'a str),
    /// A mapping that already carries `type` and/or `description`
    Structured(&'a Map<String, Value>),
    /// Anything else
    Unrecognized(&'a Value),
}

impl<'a> RoleShape<'a> {
    /// Classifies a raw role value.
    #[must_use]
    pub fn classify(raw: &'a Value) -> Self {
        match raw {
            Value::String(category) => RoleShape::Category(category),
            Value::Object(map) if map.contains_key("type") || map.contains_key("description") => {
                RoleShape::Structured(map)
            },
            other => RoleShape::Unrecognized(other),
        }
    }

    /// Converts the role into its canonical mapping.
    ///
    /// Unrecognized roles are kept as a stringified `description` so no
    /// information is dropped.
    #[must_use]
    pub fn into_canonical(self) -> Value {
        match self {
            RoleShape::Category(category) => json!({ "type": category }),
            RoleShape::Structured(map) => Value::Object(map.clone()),
            RoleShape::Unrecognized(other) => json!({ "description": stringify(other) }),
        }
    }
}

/// Normalizes a role into a `{type}` or `{description}` mapping. Never fails.
#[must_use]
pub fn normalize_role(raw: &Value) -> Value {
    RoleShape::classify(raw).into_canonical()
}

/// Lifts a value into a formatted string mapping (`{content: ...}`). Never fails.
#[must_use]
pub fn to_formatted_string(raw: &Value) -> Value {
    match raw {
        Value::String(s) => json!({ "content": s }),
        Value::Object(map) if map.get("content").is_some_and(Value::is_string) => raw.clone(),
        other => json!({ "content": stringify(other) }),
    }
}

/// Makes sure a formatted string mapping has a `content` key.
///
/// Forenames, for example, may legitimately omit their content, but the
/// schema still needs the key. Empty or missing content becomes `""`; the
/// other keys are kept.
///
/// # Errors
///
/// Returns [`BibError::TypeMismatch`] if `raw` is not a mapping.
pub fn ensure_formatted_string_content(raw: &Value) -> Result<Value> {
    let Value::Object(map) = raw else {
        return Err(BibError::type_mismatch(
            "formatted string",
            "mapping",
            kind_name(raw),
        ));
    };

    if truthy_field(map, "content").is_some() {
        return Ok(raw.clone());
    }

    let mut ensured = Map::with_capacity(map.len() + 1);
    ensured.insert("content".to_string(), Value::String(String::new()));
    for (key, value) in map {
        if key != "content" {
            ensured.insert(key.clone(), value.clone());
        }
    }
    Ok(Value::Object(ensured))
}

/// Turns a bare version string into a `{draft}` version mapping.
///
/// # Errors
///
/// Returns [`BibError::TypeMismatch`] if `raw` is not a string.
pub fn normalize_version(raw: &Value) -> Result<Value> {
    match raw {
        Value::String(draft) => Ok(json!({ "draft": draft })),
        other => Err(BibError::type_mismatch("version", "string", kind_name(other))),
    }
}

/// Contact method a typed `{type, value}` contact maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    /// `type: email`
    Email,
    /// `type: uri` or `type: url`
    Uri,
    /// `type: phone`
    Phone,
}

impl ContactKind {
    /// Parses the `type` tag of a typed contact.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "email" => Some(ContactKind::Email),
            "uri" | "url" => Some(ContactKind::Uri),
            "phone" => Some(ContactKind::Phone),
            _ => None,
        }
    }
}

const CANONICAL_CONTACT_KEYS: [&str; 4] = ["email", "uri", "phone", "address"];

/// Shape of a raw contact mapping. Variants are tried in declaration order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactShape<'a> {
    /// `{type, value}` with a known type and a non-empty value
    Typed {
        /// Target contact method
        kind: ContactKind,
        /// The contact value
        value: &'a Value,
    },
    /// `{type, value}` with an empty value: there is no contact
    Empty,
    /// Postal fields (`city`, `country`) at the top level
    Address,
    /// A bare `phone` string
    BarePhone(&'a str),
    /// Already `{email}`, `{uri}`, `{phone}` or `{address}`
    Canonical,
    /// None of the above
    Unrecognized,
}

impl<'a> ContactShape<'a> {
    /// Classifies a raw contact mapping.
    #[must_use]
    pub fn classify(raw: &'a Map<String, Value>) -> Self {
        if let (Some(tag), Some(value)) = (truthy_field(raw, "type"), raw.get("value")) {
            if !is_truthy(value) {
                return ContactShape::Empty;
            }
            if let Some(kind) = tag.as_str().and_then(ContactKind::from_tag) {
                return ContactShape::Typed { kind, value };
            }
        }

        if raw.contains_key("city") || raw.contains_key("country") {
            return ContactShape::Address;
        }

        if let Some(Value::String(phone)) = raw.get("phone") {
            return ContactShape::BarePhone(phone);
        }

        if CANONICAL_CONTACT_KEYS.iter().any(|key| raw.contains_key(*key)) {
            return ContactShape::Canonical;
        }

        ContactShape::Unrecognized
    }
}

/// Normalizes a raw contact into a canonical contact method mapping.
///
/// Returns `Ok(None)` when the contact is empty and should be dropped.
/// Unrecognized mappings are passed through unchanged (and logged), leaving
/// the schema to decide.
///
/// # Errors
///
/// Returns [`BibError::TypeMismatch`] if `raw` is not a mapping.
pub fn normalize_contact(raw: &Value) -> Result<Option<Value>> {
    let Value::Object(map) = raw else {
        return Err(BibError::type_mismatch("contact", "mapping", kind_name(raw)));
    };

    let normalized = match ContactShape::classify(map) {
        ContactShape::Typed { kind, value } => match kind {
            ContactKind::Email => json!({ "email": value }),
            ContactKind::Uri => json!({ "uri": value }),
            ContactKind::Phone => json!({ "phone": { "content": value } }),
        },
        ContactShape::Empty => return Ok(None),
        ContactShape::Address => json!({ "address": map }),
        ContactShape::BarePhone(phone) => json!({ "phone": { "content": phone } }),
        ContactShape::Canonical => raw.clone(),
        ContactShape::Unrecognized => {
            tracing::warn!(contact = %raw, "unrecognized contact shape passed through unchanged");
            raw.clone()
        },
    };
    Ok(Some(normalized))
}
