// src/directory/dataset.rs

//! Static dataset loading.
//!
//! The three JSON files under `data/` are the directory's whole database.
//! They are parsed once into typed collections; any shape mismatch aborts the
//! load.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};
use crate::models::{PathsConfig, PrivateInstitution, SeriesDescriptor, SeriesGroup};

pub const PRIVATE_FILE: &str = "universites_privees.json";
pub const PUBLIC_FILE: &str = "universites_publiques.json";
pub const SERIES_FILE: &str = "series.json";

const BUNDLED_PRIVATE: &str = include_str!("../../data/universites_privees.json");
const BUNDLED_PUBLIC: &str = include_str!("../../data/universites_publiques.json");
const BUNDLED_SERIES: &str = include_str!("../../data/series.json");

/// The three root collections, exactly as loaded.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub private: Vec<PrivateInstitution>,
    pub public: Vec<SeriesGroup>,
    pub series: Vec<SeriesDescriptor>,
}

impl Dataset {
    /// Parse the datasets compiled into the binary.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_PRIVATE, BUNDLED_PUBLIC, BUNDLED_SERIES)
    }

    /// Parse the three datasets from JSON text and validate them.
    pub fn from_json(private: &str, public: &str, series: &str) -> Result<Self> {
        let dataset = Self {
            private: parse(PRIVATE_FILE, private)?,
            public: parse(PUBLIC_FILE, public)?,
            series: parse(SERIES_FILE, series)?,
        };
        dataset.validate()?;
        Ok(dataset)
    }

    /// Load datasets using configured paths, falling back to the bundled copy
    /// for any path left unset.
    pub fn load(paths: &PathsConfig, base: &Path) -> Result<Self> {
        let read = |configured: &Option<String>, bundled: &'static str| -> Result<String> {
            match configured {
                Some(path) => {
                    let full = PathsConfig::resolve(base, path);
                    log::debug!("Reading dataset {}", full.display());
                    Ok(fs::read_to_string(full)?)
                }
                None => Ok(bundled.to_string()),
            }
        };

        let private = read(&paths.private_universities, BUNDLED_PRIVATE)?;
        let public = read(&paths.public_universities, BUNDLED_PUBLIC)?;
        let series = read(&paths.series, BUNDLED_SERIES)?;
        Self::from_json(&private, &public, &series)
    }

    /// Check invariants serde cannot express.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for institution in &self.private {
            if institution.id.is_empty() {
                return Err(AppError::dataset(
                    PRIVATE_FILE,
                    format!("record '{}' has an empty ID", institution.name),
                ));
            }
            if !seen.insert(institution.id.as_str()) {
                return Err(AppError::dataset(
                    PRIVATE_FILE,
                    format!("duplicate ID '{}'", institution.id),
                ));
            }
        }
        Ok(())
    }

    /// Records dropped from every listing because they have no name.
    pub fn unnamed_count(&self) -> usize {
        let private = self.private.iter().filter(|p| !p.is_listable()).count();
        let groups = self.public.iter().filter(|g| !g.is_listable()).count();
        let universities = self
            .public
            .iter()
            .flat_map(|g| &g.universities)
            .filter(|u| !u.is_listable())
            .count();
        let series = self.series.iter().filter(|s| !s.is_listable()).count();
        private + groups + universities + series
    }
}

fn parse<T: DeserializeOwned>(name: &str, content: &str) -> Result<Vec<T>> {
    serde_json::from_str(content).map_err(|e| AppError::dataset(name, e))
}
