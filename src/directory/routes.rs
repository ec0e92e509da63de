// src/directory/routes.rs

//! Site routes for directory detail pages.
//!
//! | Route | Path |
//! |-------|------|
//! | `Private` | `/universites/privees/{slug}` |
//! | `PublicSeries` | `/universites/publiques/{series}` |
//! | `Public` | `/universites/publiques/{series}/{university}` |
//! | `Series` | `/series/{slug}` |

use std::fmt;
use std::sync::LazyLock;

use serde::Serialize;
use url::Url;

/// Base used to parse site-relative paths.
static SITE_BASE: LazyLock<Url> =
    LazyLock::new(|| Url::parse("http://localhost/").expect("static base url"));

/// A detail page addressed by slug(s).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Route {
    Private { slug: String },
    PublicSeries { series: String },
    Public { series: String, university: String },
    Series { slug: String },
}

impl Route {
    /// Parse a site path (`/universites/privees/esg-42`) or an absolute URL.
    ///
    /// Query strings, fragments and a trailing slash are ignored. Returns
    /// `None` for paths that are not directory detail pages.
    pub fn parse(input: &str) -> Option<Self> {
        let url = Url::parse(input)
            .or_else(|_| SITE_BASE.join(input))
            .ok()?;
        let segments: Vec<&str> = url
            .path_segments()?
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            ["universites", "privees", slug] => Some(Self::Private {
                slug: slug.to_string(),
            }),
            ["universites", "publiques", series] => Some(Self::PublicSeries {
                series: series.to_string(),
            }),
            ["universites", "publiques", series, university] => Some(Self::Public {
                series: series.to_string(),
                university: university.to_string(),
            }),
            ["series", slug] => Some(Self::Series {
                slug: slug.to_string(),
            }),
            _ => None,
        }
    }

    /// Site path of this route.
    pub fn url(&self) -> String {
        match self {
            Self::Private { slug } => format!("/universites/privees/{slug}"),
            Self::PublicSeries { series } => format!("/universites/publiques/{series}"),
            Self::Public { series, university } => {
                format!("/universites/publiques/{series}/{university}")
            }
            Self::Series { slug } => format!("/series/{slug}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_private() {
        assert_eq!(
            Route::parse("/universites/privees/esg-42"),
            Some(Route::Private {
                slug: "esg-42".to_string()
            })
        );
    }

    #[test]
    fn test_parse_public_and_absolute_url() {
        let route =
            Route::parse("https://example.ml/universites/publiques/tse/universite-de-segou/?ref=x")
                .unwrap();
        assert_eq!(
            route,
            Route::Public {
                series: "tse".to_string(),
                university: "universite-de-segou".to_string()
            }
        );
        assert_eq!(route.url(), "/universites/publiques/tse/universite-de-segou");
    }

    #[test]
    fn test_parse_series_routes() {
        assert_eq!(
            Route::parse("/series/tsexp#avantages"),
            Some(Route::Series {
                slug: "tsexp".to_string()
            })
        );
        assert_eq!(
            Route::parse("universites/publiques/tse"),
            Some(Route::PublicSeries {
                series: "tse".to_string()
            })
        );
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(Route::parse(""), None);
        assert_eq!(Route::parse("/"), None);
        assert_eq!(Route::parse("/a-propos"), None);
        assert_eq!(Route::parse("/universites/privees"), None);
        assert_eq!(Route::parse("/universites/privees/a/b"), None);
    }

    #[test]
    fn test_display_matches_url() {
        let route = Route::Series {
            slug: "tll".to_string(),
        };
        assert_eq!(route.to_string(), "/series/tll");
        assert_eq!(Route::parse(&route.to_string()), Some(route));
    }
}
