//! Queries over constructed contributors.
//!
//! Helpers for picking out the people and organizations that count as a
//! document's authors, and for rendering their names.

use crate::schema::{Contributor, FullName, Organization};

/// Role types that make a contributor an author.
pub const AUTHOR_ROLES: [&str; 3] = ["author", "editor", "publisher"];

/// Name of the organization that publishes RFCs on the authors' behalf.
pub const RFC_PUBLISHER: &str = "RFC Publisher";

impl Contributor {
    /// Whether any of the contributor's roles is in [`AUTHOR_ROLES`].
    #[must_use]
    pub fn is_author(&self) -> bool {
        self.role
            .iter()
            .filter_map(|role| role.r#type.as_deref())
            .any(|kind| AUTHOR_ROLES.contains(&kind))
    }

    /// Whether the contributor is the [`RFC_PUBLISHER`] organization.
    #[must_use]
    pub fn is_rfc_publisher(&self) -> bool {
        self.organization
            .as_ref()
            .is_some_and(|org| org.name.iter().any(|name| name.content == RFC_PUBLISHER))
    }

    /// The organization itself, or a person's first affiliation.
    #[must_use]
    pub fn affiliated_organization(&self) -> Option<&Organization> {
        self.organization.as_ref().or_else(|| {
            self.person
                .as_ref()
                .and_then(|person| person.affiliation.first())
                .map(|affiliation| &affiliation.organization)
        })
    }
}

/// Authors, excluding the RFC Publisher, in input order.
#[must_use]
pub fn filter_authors(contributors: &[Contributor]) -> Vec<&Contributor> {
    contributors
        .iter()
        .filter(|c| c.is_author() && !c.is_rfc_publisher())
        .collect()
}

impl FullName {
    /// Formatted initials with surrounding whitespace removed.
    #[must_use]
    pub fn initials(&self) -> Option<&str> {
        self.given
            .as_ref()
            .and_then(|given| given.formatted_initials.as_ref())
            .map(|initials| initials.content.trim())
            .filter(|initials| !initials.is_empty())
    }

    /// The name as it should be displayed.
    ///
    /// Uses `completename` when present. Otherwise the name is assembled from
    /// prefix, forenames, initials, surname and addition, skipping empty parts.
    #[must_use]
    pub fn display_name(&self) -> String {
        if let Some(complete) = &self.completename {
            return complete.content.clone();
        }

        let forenames = self
            .given
            .iter()
            .flat_map(|given| &given.forename)
            .map(|forename| forename.content.as_str());

        self.prefix
            .as_ref()
            .map(|p| p.content.as_str())
            .into_iter()
            .chain(forenames)
            .chain(self.initials())
            .chain(self.surname.as_ref().map(|s| s.content.as_str()))
            .chain(self.addition.as_ref().map(|a| a.content.as_str()))
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
