// src/models/public.rs

//! Public university tree: series → university → faculty → programme.

use serde::{Deserialize, Serialize};

use crate::models::Searchable;
use crate::models::de::{blank_as_none, trimmed};
use crate::utils::slug::slugify;

/// Public universities reachable from one baccalaureate series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeriesGroup {
    /// Series label (e.g., "Sciences Exactes et Expérimentales")
    #[serde(rename = "nom", default, deserialize_with = "trimmed")]
    pub name: String,

    #[serde(rename = "universites", default)]
    pub universities: Vec<University>,
}

impl SeriesGroup {
    pub fn is_listable(&self) -> bool {
        !self.name.is_empty()
    }

    pub fn slug(&self) -> String {
        slugify(&self.name)
    }

    /// Universities that can be listed and addressed by slug.
    pub fn listable_universities(&self) -> impl Iterator<Item = &University> {
        self.universities.iter().filter(|u| u.is_listable())
    }

    /// Count programmes across every faculty of every university.
    pub fn program_count(&self) -> usize {
        self.universities
            .iter()
            .flat_map(|u| &u.faculties)
            .map(|f| f.programs.len())
            .sum()
    }
}

/// A public university with its faculties.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct University {
    #[serde(rename = "nom", default, deserialize_with = "trimmed")]
    pub name: String,

    #[serde(rename = "facultes", default)]
    pub faculties: Vec<Faculty>,
}

impl University {
    pub fn is_listable(&self) -> bool {
        !self.name.is_empty()
    }

    pub fn slug(&self) -> String {
        slugify(&self.name)
    }
}

/// A faculty (or institute) inside a public university.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Faculty {
    #[serde(rename = "nom", default, deserialize_with = "trimmed")]
    pub name: String,

    #[serde(
        rename = "sigle",
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub abbreviation: Option<String>,

    /// Admission condition text
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub condition: Option<String>,

    /// Tuition fee text
    #[serde(
        rename = "frais",
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub fees: Option<String>,

    #[serde(rename = "licences", default)]
    pub programs: Vec<Program>,
}

/// A licence programme and its career outcomes ("débouchés").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Program {
    #[serde(rename = "nom", default, deserialize_with = "trimmed")]
    pub name: String,

    #[serde(rename = "debouches", default)]
    pub outcomes: Vec<String>,
}

impl Searchable for SeriesGroup {
    fn name(&self) -> &str {
        &self.name
    }

    fn abbreviation(&self) -> Option<&str> {
        None
    }
}

impl Searchable for University {
    fn name(&self) -> &str {
        &self.name
    }

    fn abbreviation(&self) -> Option<&str> {
        None
    }
}

impl Searchable for Faculty {
    fn name(&self) -> &str {
        &self.name
    }

    fn abbreviation(&self) -> Option<&str> {
        self.abbreviation.as_deref()
    }
}
