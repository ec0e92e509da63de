// src/directory/mod.rs

//! Static university and series directory.
//!
//! - `dataset`: parse and validate the bundled JSON collections
//! - `lookup`: slug → record resolution
//! - `paths`: enumerate every detail route for pre-rendering
//! - `routes`: parse site paths into routes
//! - `filter`: free-text list filtering

pub mod dataset;
pub mod filter;
pub mod lookup;
pub mod paths;
pub mod routes;

use std::collections::HashMap;

pub use dataset::Dataset;
pub use filter::filter;
pub use lookup::PublicEntry;
pub use routes::Route;

use crate::error::{AppError, Result};
use crate::models::{DuplicatePolicy, PrivateInstitution, SeriesDescriptor, SeriesGroup};

/// Immutable, shareable view over a loaded dataset.
///
/// Built once at startup and passed by reference to every page render.
#[derive(Debug, Clone)]
pub struct Directory {
    dataset: Dataset,
}

/// Outcome of resolving a route against the directory.
#[derive(Debug, Clone, Copy)]
pub enum Resolved<'a> {
    Private(&'a PrivateInstitution),
    PublicSeries(&'a SeriesGroup),
    Public(PublicEntry<'a>),
    Series(&'a SeriesDescriptor),
    NotFound,
}

impl Resolved<'_> {
    pub fn is_found(&self) -> bool {
        !matches!(self, Self::NotFound)
    }
}

/// Two or more records sharing one route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateRoute {
    pub route: Route,
    pub count: usize,
}

impl Directory {
    /// Build the directory, applying the duplicate-slug policy.
    pub fn new(dataset: Dataset, policy: DuplicatePolicy) -> Result<Self> {
        let directory = Self { dataset };
        let duplicates = directory.duplicate_routes();

        if !duplicates.is_empty() {
            let listed = duplicates
                .iter()
                .map(|d| format!("{} (x{})", d.route, d.count))
                .collect::<Vec<_>>()
                .join(", ");
            match policy {
                DuplicatePolicy::FirstWins => {
                    log::warn!("Duplicate slugs, first record wins: {}", listed);
                }
                DuplicatePolicy::Reject => {
                    return Err(AppError::validation(format!("Duplicate slugs: {listed}")));
                }
            }
        }

        let skipped = directory.dataset.unnamed_count();
        if skipped > 0 {
            log::debug!("{} unnamed record(s) excluded from listings", skipped);
        }

        Ok(directory)
    }

    /// Directory over the bundled datasets with first-match-wins slugs.
    pub fn bundled() -> Result<Self> {
        Self::new(Dataset::bundled()?, DuplicatePolicy::FirstWins)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Private institutions shown in listings.
    pub fn private(&self) -> Vec<&PrivateInstitution> {
        self.dataset
            .private
            .iter()
            .filter(|i| i.is_listable())
            .collect()
    }

    /// Public series groups shown in listings.
    pub fn public(&self) -> Vec<&SeriesGroup> {
        self.dataset
            .public
            .iter()
            .filter(|g| g.is_listable())
            .collect()
    }

    /// Series descriptors shown in listings.
    pub fn series(&self) -> Vec<&SeriesDescriptor> {
        self.dataset
            .series
            .iter()
            .filter(|s| s.is_listable())
            .collect()
    }

    pub fn find_private(&self, slug: &str) -> Option<&PrivateInstitution> {
        lookup::find_private(&self.dataset.private, slug)
    }

    pub fn find_series(&self, slug: &str) -> Option<&SeriesDescriptor> {
        lookup::find_series(&self.dataset.series, slug)
    }

    pub fn find_series_group(&self, slug: &str) -> Option<&SeriesGroup> {
        lookup::find_series_group(&self.dataset.public, slug)
    }

    pub fn find_public(&self, series: &str, university: &str) -> Option<PublicEntry<'_>> {
        lookup::find_public(&self.dataset.public, series, university)
    }

    /// Resolve a parsed route to its record.
    pub fn resolve(&self, route: &Route) -> Resolved<'_> {
        let resolved = match route {
            Route::Private { slug } => self.find_private(slug).map(Resolved::Private),
            Route::PublicSeries { series } => {
                self.find_series_group(series).map(Resolved::PublicSeries)
            }
            Route::Public { series, university } => {
                self.find_public(series, university).map(Resolved::Public)
            }
            Route::Series { slug } => self.find_series(slug).map(Resolved::Series),
        };
        resolved.unwrap_or(Resolved::NotFound)
    }

    /// Parse a site path and resolve it. Unknown paths are `NotFound`.
    pub fn resolve_path(&self, path: &str) -> Resolved<'_> {
        Route::parse(path)
            .map(|route| self.resolve(&route))
            .unwrap_or(Resolved::NotFound)
    }

    /// Every detail route, in collection order, duplicates included.
    pub fn all_paths(&self) -> Vec<Route> {
        let mut routes = paths::private_paths(&self.dataset.private);
        routes.extend(paths::public_paths(&self.dataset.public));
        routes.extend(paths::series_paths(&self.dataset.series));
        routes
    }

    /// Routes claimed by more than one record, in first-seen order.
    pub fn duplicate_routes(&self) -> Vec<DuplicateRoute> {
        let mut counts: HashMap<Route, usize> = HashMap::new();
        let mut order = Vec::new();
        for route in self.all_paths() {
            let count = counts.entry(route.clone()).or_insert(0);
            if *count == 0 {
                order.push(route);
            }
            *count += 1;
        }

        order
            .into_iter()
            .filter_map(|route| {
                let count = counts[&route];
                (count > 1).then_some(DuplicateRoute { route, count })
            })
            .collect()
    }
}
