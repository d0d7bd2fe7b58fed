//! Normalization of contributor entries.
//!
//! A contributor carries either a `person` or an `organization`, plus an
//! optional list of roles. Contact entries that are not mappings are dropped.
//! Given names are normalized best-effort: if any forename has a shape the
//! normalizers cannot handle, the given name is left exactly as it was found.
//! Roles are always normalizable.
//! A contributor that is not a mapping at all is an error for the caller to
//! deal with.

use crate::error::{BibError, Result};
use crate::field_normalizers::{ensure_formatted_string_content, normalize_contact, normalize_role};
use crate::recovery::absorb_type_mismatch;
use crate::tree::{as_list, is_truthy, kind_name};
use serde_json::{Map, Value};

/// Normalizes one contributor entry in place.
///
/// # Errors
///
/// Returns [`BibError::TypeMismatch`] if the entry is not a mapping. Shape
/// problems inside contacts or given names are absorbed.
pub fn normalize_contributor(contributor: &mut Value) -> Result<()> {
    let found = kind_name(contributor);
    let Value::Object(contributor) = contributor else {
        return Err(BibError::type_mismatch("contributor", "mapping", found));
    };

    let entity_key = ["person", "organization"]
        .into_iter()
        .find(|key| contributor.get(*key).is_some_and(is_truthy));

    if let Some(key) = entity_key {
        if let Some(Value::Object(entity)) = contributor.get_mut(key) {
            absorb_type_mismatch(normalize_contacts(entity), "contact")?;
            if key == "person" {
                absorb_type_mismatch(normalize_given_name(entity), "given name")?;
            }
        }
    }

    normalize_roles(contributor);
    Ok(())
}

/// Replaces `contact` with normalized contact methods, dropping empty ones
/// and entries that are not mappings.
///
/// Nothing is written unless every remaining entry normalizes.
fn normalize_contacts(entity: &mut Map<String, Value>) -> Result<()> {
    let Some(raw) = entity.get("contact") else {
        return Ok(());
    };
    let contacts = as_list(raw);
    if contacts.is_empty() {
        return Ok(());
    }

    let normalized = contacts
        .into_iter()
        .filter(|contact| contact.is_object())
        .map(normalize_contact)
        .collect::<Result<Vec<_>>>()?;

    entity.insert(
        "contact".to_string(),
        Value::Array(normalized.into_iter().flatten().collect()),
    );
    Ok(())
}

/// Ensures every forename and the formatted initials carry `content`.
fn normalize_given_name(person: &mut Map<String, Value>) -> Result<()> {
    let Some(name) = person.get_mut("name") else {
        return Ok(());
    };
    let found = kind_name(name);
    let Value::Object(name) = name else {
        return Err(BibError::type_mismatch("person name", "mapping", found));
    };
    let Some(given) = name.get_mut("given").filter(|g| is_truthy(g)) else {
        return Ok(());
    };
    let found = kind_name(given);
    let Value::Object(given) = given else {
        return Err(BibError::type_mismatch("given name", "mapping", found));
    };

    let forenames = match given.get("forename") {
        Some(raw) => {
            let forenames = as_list(raw);
            if forenames.is_empty() {
                None
            } else {
                Some(
                    forenames
                        .into_iter()
                        .map(ensure_formatted_string_content)
                        .collect::<Result<Vec<_>>>()?,
                )
            }
        },
        None => None,
    };

    let initials = match given.get("formatted_initials") {
        Some(raw) if !raw.is_null() => Some(ensure_formatted_string_content(raw)?),
        _ => None,
    };

    if let Some(forenames) = forenames {
        given.insert("forename".to_string(), Value::Array(forenames));
    }
    if let Some(initials) = initials {
        given.insert("formatted_initials".to_string(), initials);
    }
    Ok(())
}

fn normalize_roles(contributor: &mut Map<String, Value>) {
    let Some(raw) = contributor.get("role") else {
        return;
    };
    let roles: Vec<Value> = as_list(raw).into_iter().map(normalize_role).collect();
    if !roles.is_empty() {
        contributor.insert("role".to_string(), Value::Array(roles));
    }
}
