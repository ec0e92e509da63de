// src/directory/paths.rs

//! Static path enumeration for pre-rendering.
//!
//! Produces one route per listable record, in collection order. Records
//! without a name never get a route.

use crate::directory::routes::Route;
use crate::models::{PrivateInstitution, SeriesDescriptor, SeriesGroup};

/// Detail routes of every listable private institution.
pub fn private_paths(institutions: &[PrivateInstitution]) -> Vec<Route> {
    institutions
        .iter()
        .filter(|i| i.is_listable())
        .map(|i| i.slug())
        .filter(|slug| !slug.is_empty())
        .map(|slug| Route::Private { slug })
        .collect()
}

/// Series-level and university-level routes of the public directory.
pub fn public_paths(groups: &[SeriesGroup]) -> Vec<Route> {
    let mut routes = Vec::new();
    for group in groups.iter().filter(|g| g.is_listable()) {
        let series = group.slug();
        if series.is_empty() {
            continue;
        }
        routes.push(Route::PublicSeries {
            series: series.clone(),
        });
        for university in group.listable_universities() {
            let slug = university.slug();
            if slug.is_empty() {
                continue;
            }
            routes.push(Route::Public {
                series: series.clone(),
                university: slug,
            });
        }
    }
    routes
}

/// Detail routes of every listable series descriptor.
pub fn series_paths(series: &[SeriesDescriptor]) -> Vec<Route> {
    series
        .iter()
        .filter(|s| s.is_listable())
        .map(|s| s.slug())
        .filter(|slug| !slug.is_empty())
        .map(|slug| Route::Series { slug })
        .collect()
}
