// src/models/series.rs

//! Baccalaureate series catalog (`series.json`).

use serde::{Deserialize, Deserializer, Serialize};

use crate::models::Searchable;
use crate::models::de::{blank_as_none, trimmed};
use crate::utils::slug::slugify;

/// Descriptor of one baccalaureate series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeriesDescriptor {
    /// Short code (e.g., "TSExp")
    #[serde(rename = "sigle", default, deserialize_with = "trimmed")]
    pub abbreviation: String,

    /// Full name (e.g., "Terminale Sciences Expérimentales")
    #[serde(rename = "nom", default, deserialize_with = "trimmed")]
    pub name: String,

    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    /// Advantages of choosing this series
    #[serde(
        rename = "avantages",
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub advantages: Option<String>,

    #[serde(rename = "icone", default)]
    pub icon: SeriesIcon,
}

impl SeriesDescriptor {
    pub fn is_listable(&self) -> bool {
        !self.name.is_empty()
    }

    /// Slug from the short code, or from the name when no code is set.
    pub fn slug(&self) -> String {
        if self.abbreviation.is_empty() {
            slugify(&self.name)
        } else {
            slugify(&self.abbreviation)
        }
    }
}

impl Searchable for SeriesDescriptor {
    fn name(&self) -> &str {
        &self.name
    }

    fn abbreviation(&self) -> Option<&str> {
        Some(self.abbreviation.as_str()).filter(|s| !s.is_empty())
    }
}

/// Fixed set of icons a series card can show.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SeriesIcon {
    Science,
    Math,
    Literature,
    Language,
    Economy,
    Art,
    Technology,
    #[default]
    Default,
}

impl SeriesIcon {
    /// Map a free-form icon key from the dataset to a known icon.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_lowercase().as_str() {
            "science" | "sciences" | "flask" | "microscope" => Self::Science,
            "math" | "maths" | "calculator" => Self::Math,
            "literature" | "lettres" | "book" => Self::Literature,
            "language" | "langues" | "languages" | "globe" => Self::Language,
            "economy" | "economie" | "chart" => Self::Economy,
            "art" | "arts" | "palette" => Self::Art,
            "technology" | "technique" | "cpu" | "wrench" => Self::Technology,
            _ => Self::Default,
        }
    }
}

impl<'de> Deserialize<'de> for SeriesIcon {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let key: Option<String> = Option::deserialize(deserializer)?;
        Ok(key.as_deref().map(Self::from_key).unwrap_or_default())
    }
}
