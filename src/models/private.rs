// src/models/private.rs

//! Private higher-education institutions.

use serde::{Deserialize, Serialize};

use crate::models::Searchable;
use crate::models::de::{blank_as_none, string_or_number, trimmed};
use crate::utils::slug::compose_slug;

/// A private university or school, as listed in `universites_privees.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrivateInstitution {
    /// Unique identifier (numbers in the source file are kept as text)
    #[serde(rename = "ID", deserialize_with = "string_or_number")]
    pub id: String,

    /// Display name; records without one are never listed
    #[serde(rename = "Nom", default, deserialize_with = "trimmed")]
    pub name: String,

    /// Legal designation (e.g., "Université privée", "Institut")
    #[serde(
        rename = "Designation",
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub designation: Option<String>,

    /// Short code (e.g., "ESG")
    #[serde(
        rename = "Sigle",
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub abbreviation: Option<String>,

    #[serde(
        rename = "Localisation",
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,

    #[serde(flatten)]
    pub contact: Contact,

    /// Logo image URL
    #[serde(
        rename = "Logo",
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub logo: Option<String>,
}

/// Contact block of a private institution.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    #[serde(
        rename = "Telephone",
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<String>,

    #[serde(
        rename = "Email",
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,

    #[serde(
        rename = "Site",
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub website: Option<String>,

    #[serde(
        rename = "Adresse",
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub address: Option<String>,

    #[serde(
        rename = "Facebook",
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub social: Option<String>,
}

impl PrivateInstitution {
    /// Whether the record can be listed and addressed by slug.
    pub fn is_listable(&self) -> bool {
        !self.name.is_empty()
    }

    /// Composite slug: short code (or name) followed by the identifier.
    ///
    /// `{ID: "42", Nom: "École Supérieure de Gestion", Sigle: "ESG"}` → `esg-42`.
    pub fn slug(&self) -> String {
        let label = self.abbreviation.as_deref().unwrap_or(&self.name);
        compose_slug(&[label, &self.id])
    }
}

impl Searchable for PrivateInstitution {
    fn name(&self) -> &str {
        &self.name
    }

    fn abbreviation(&self) -> Option<&str> {
        self.abbreviation.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> PrivateInstitution {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_slug_prefers_abbreviation() {
        let esg = parse(r#"{"ID": "42", "Nom": "École Supérieure de Gestion", "Sigle": "ESG"}"#);
        assert_eq!(esg.slug(), "esg-42");
    }

    #[test]
    fn test_slug_falls_back_to_name() {
        let inst = parse(r#"{"ID": 7, "Nom": "Institut Kôrê", "Sigle": "  "}"#);
        assert!(inst.abbreviation.is_none());
        assert_eq!(inst.slug(), "institut-kore-7");
    }

    #[test]
    fn test_contact_fields() {
        let inst = parse(
            r#"{"ID": "1", "Nom": "ESG", "Telephone": "+223 20 00 00 00", "Site": "", "Email": null}"#,
        );
        assert_eq!(inst.contact.phone.as_deref(), Some("+223 20 00 00 00"));
        assert!(inst.contact.website.is_none());
        assert!(inst.contact.email.is_none());
    }

    #[test]
    fn test_missing_name_not_listable() {
        let inst = parse(r#"{"ID": "3"}"#);
        assert!(!inst.is_listable());
    }

    #[test]
    fn test_missing_id_rejected() {
        assert!(serde_json::from_str::<PrivateInstitution>(r#"{"Nom": "ESG"}"#).is_err());
    }
}
