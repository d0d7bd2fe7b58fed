//! Canonical bibliographic item types.

use crate::tree::into_list;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Accepts either a single value or a sequence for a list-valued field.
fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    into_list(value)
        .into_iter()
        .map(|item| T::deserialize(item).map_err(D::Error::custom))
        .collect()
}

/// Text with optional format and language metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericStringValue {
    /// The text itself
    pub content: String,
    /// MIME type of `content`, e.g. `text/plain`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Language code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Script code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
}

/// A typed title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    /// Title text
    pub content: String,
    /// Title type, e.g. `main`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    /// MIME type of `content`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Language code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Script code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
}

/// A document identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocId {
    /// Identifier value, e.g. `RFC 8446`
    pub id: String,
    /// Identifier scheme, e.g. `IETF` or `DOI`
    pub r#type: String,
    /// Narrows what the identifier refers to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Whether this is the item's primary identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,
}

/// Edition statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edition {
    /// Edition text
    pub content: String,
    /// Edition number, if distinct from the text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
}

/// Version of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Revision date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_date: Option<String>,
    /// Draft label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft: Option<String>,
}

/// Postal address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Street lines
    #[serde(default, deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub street: Vec<String>,
    /// City
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// State or province
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Country
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Postal code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    /// Free-form address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
}

/// Phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phone {
    /// The number
    pub content: String,
    /// Phone type, e.g. `mobile`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
}

/// One way of contacting a person or organization.
///
/// Exactly one method is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ContactFields")]
pub struct ContactMethod {
    /// Postal address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    /// Phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Phone>,
    /// Email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// URI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename = "ContactMethod")]
struct ContactFields {
    address: Option<Address>,
    phone: Option<Phone>,
    email: Option<String>,
    uri: Option<String>,
}

impl TryFrom<ContactFields> for ContactMethod {
    type Error = String;

    fn try_from(fields: ContactFields) -> Result<Self, Self::Error> {
        let set = [
            fields.address.is_some(),
            fields.phone.is_some(),
            fields.email.is_some(),
            fields.uri.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count();
        if set != 1 {
            return Err(format!(
                "contact method must specify exactly one of address, phone, email, uri \
                 (found {set})"
            ));
        }
        Ok(ContactMethod {
            address: fields.address,
            phone: fields.phone,
            email: fields.email,
            uri: fields.uri,
        })
    }
}

/// Organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Names, in any number of languages
    #[serde(default, deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<GenericStringValue>,
    /// Abbreviated name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<GenericStringValue>,
    /// Web site
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Contact methods
    #[serde(default, deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub contact: Vec<ContactMethod>,
}

/// A person's affiliation with an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affiliation {
    /// The organization
    pub organization: Organization,
}

/// A forename. `content` may be empty when only the initial is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forename {
    /// The forename
    pub content: String,
    /// Initial letter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<String>,
    /// Language code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Script code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
}

/// Given names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GivenName {
    /// Forenames
    #[serde(default, deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub forename: Vec<Forename>,
    /// Initials as they should be printed, e.g. `J. Q.`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_initials: Option<GenericStringValue>,
}

/// A person's name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullName {
    /// The complete name as a single string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completename: Option<GenericStringValue>,
    /// Given names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given: Option<GivenName>,
    /// Surname
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<GenericStringValue>,
    /// Name prefix, e.g. `Dr.`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<GenericStringValue>,
    /// Name addition, e.g. `Jr.`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addition: Option<GenericStringValue>,
}

/// Person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Name
    pub name: FullName,
    /// Affiliations
    #[serde(default, deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub affiliation: Vec<Affiliation>,
    /// Contact methods
    #[serde(default, deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub contact: Vec<ContactMethod>,
}

/// A contributor's role. Has a `type`, a `description`, or both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RoleFields")]
pub struct Role {
    /// Role category, e.g. `author`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    /// Free-form description
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub description: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename = "Role")]
struct RoleFields {
    r#type: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    description: Vec<String>,
}

impl TryFrom<RoleFields> for Role {
    type Error = String;

    fn try_from(fields: RoleFields) -> Result<Self, Self::Error> {
        if fields.r#type.is_none() && fields.description.is_empty() {
            return Err("role must specify a type or a description".to_string());
        }
        Ok(Role {
            r#type: fields.r#type,
            description: fields.description,
        })
    }
}

/// A person or organization that contributed to an item.
///
/// Exactly one of `person` and `organization` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ContributorFields")]
pub struct Contributor {
    /// The contributing person
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person: Option<Person>,
    /// The contributing organization
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,
    /// Roles
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub role: Vec<Role>,
}

#[derive(Deserialize)]
#[serde(rename = "Contributor")]
struct ContributorFields {
    person: Option<Person>,
    organization: Option<Organization>,
    #[serde(default, deserialize_with = "one_or_many")]
    role: Vec<Role>,
}

impl TryFrom<ContributorFields> for Contributor {
    type Error = String;

    fn try_from(fields: ContributorFields) -> Result<Self, Self::Error> {
        match (fields.person.is_some(), fields.organization.is_some()) {
            (true, false) | (false, true) => Ok(Contributor {
                person: fields.person,
                organization: fields.organization,
                role: fields.role,
            }),
            (false, false) => {
                Err("contributor must specify a person or an organization".to_string())
            },
            (true, true) => {
                Err("contributor must not specify both a person and an organization".to_string())
            },
        }
    }
}

/// A dated event in the item's life, e.g. publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibliographicDate {
    /// Event type, e.g. `published`
    pub r#type: String,
    /// Date value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// A typed link to a representation of the item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// URI
    pub content: String,
    /// Link type, e.g. `src` or `pdf`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
}

/// A typed relation to another item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Relation {
    /// Relation type, e.g. `includes` or `obsoletes`
    pub r#type: String,
    /// Description of the relation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<GenericStringValue>,
    /// The related item
    pub bibitem: Box<BibliographicItem>,
}

/// A canonical bibliographic item.
///
/// Built by [`super::construct`] (validated) or [`super::construct_unchecked`]
/// (best effort). Keys the schema does not model are kept in `extra`; fields
/// that failed validation during best-effort construction are kept, as found,
/// in `unvalidated`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BibliographicItem {
    /// Local identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Item type, e.g. `standard`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    /// Preformatted reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formattedref: Option<GenericStringValue>,
    /// Titles
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub title: Vec<Title>,
    /// Document identifiers
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub docid: Vec<DocId>,
    /// Document number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docnumber: Option<String>,
    /// Edition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edition: Option<Edition>,
    /// Versions
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub version: Vec<VersionInfo>,
    /// Keywords
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keyword: Vec<String>,
    /// Contributors
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contributor: Vec<Contributor>,
    /// Dates
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub date: Vec<BibliographicDate>,
    /// Links
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub link: Vec<Link>,
    /// Relations to other items
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub relation: Vec<Relation>,
    /// Language codes
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub language: Vec<String>,
    /// Script codes
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub script: Vec<String>,
    /// Keys outside the schema, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// Fields that failed validation, kept verbatim
    #[serde(flatten)]
    pub unvalidated: Map<String, Value>,
}

impl BibliographicItem {
    /// Whether this item, or any related item, carries unvalidated fields.
    #[must_use]
    pub fn has_unvalidated_fields(&self) -> bool {
        !self.unvalidated.is_empty()
            || self
                .relation
                .iter()
                .any(|relation| relation.bibitem.has_unvalidated_fields())
    }
}
