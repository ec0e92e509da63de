// src/directory/lookup.rs

//! Slug resolution over the loaded collections.
//!
//! Every lookup is a linear scan comparing the record's recomputed slug with
//! the requested one; the first match in file order wins. A miss is `None`.

use serde::Serialize;

use crate::models::{PrivateInstitution, SeriesDescriptor, SeriesGroup, University};

/// A public university together with the series it was reached through.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PublicEntry<'a> {
    pub series: &'a SeriesGroup,
    pub university: &'a University,
}

/// Find a private institution by its composite slug (`esg-42`).
pub fn find_private<'a>(
    institutions: &'a [PrivateInstitution],
    slug: &str,
) -> Option<&'a PrivateInstitution> {
    if slug.is_empty() {
        return None;
    }
    institutions
        .iter()
        .filter(|i| i.is_listable())
        .find(|i| i.slug() == slug)
}

/// Find a series descriptor by slug.
pub fn find_series<'a>(series: &'a [SeriesDescriptor], slug: &str) -> Option<&'a SeriesDescriptor> {
    if slug.is_empty() {
        return None;
    }
    series
        .iter()
        .filter(|s| s.is_listable())
        .find(|s| s.slug() == slug)
}

/// Find a public series group by slug.
pub fn find_series_group<'a>(groups: &'a [SeriesGroup], slug: &str) -> Option<&'a SeriesGroup> {
    if slug.is_empty() {
        return None;
    }
    groups
        .iter()
        .filter(|g| g.is_listable())
        .find(|g| g.slug() == slug)
}

/// Find a university inside one series group.
pub fn find_university<'a>(group: &'a SeriesGroup, slug: &str) -> Option<&'a University> {
    if slug.is_empty() {
        return None;
    }
    group.listable_universities().find(|u| u.slug() == slug)
}

/// Resolve the nested public path `{series}/{university}`.
///
/// The university list is only scanned once the series has been found.
pub fn find_public<'a>(
    groups: &'a [SeriesGroup],
    series_slug: &str,
    university_slug: &str,
) -> Option<PublicEntry<'a>> {
    let series = find_series_group(groups, series_slug)?;
    let university = find_university(series, university_slug)?;
    Some(PublicEntry { series, university })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn private() -> Vec<PrivateInstitution> {
        serde_json::from_str(
            r#"[
                {"ID": "42", "Nom": "École Supérieure de Gestion", "Sigle": "ESG"},
                {"ID": "7", "Nom": "Institut Kôrê"},
                {"ID": "9", "Nom": "", "Sigle": "GHOST"}
            ]"#,
        )
        .unwrap()
    }

    fn groups() -> Vec<SeriesGroup> {
        serde_json::from_str(
            r#"[
                {
                    "nom": "Sciences Exactes et Expérimentales",
                    "universites": [
                        {
                            "nom": "Université des Sciences, des Techniques et des Technologies de Bamako",
                            "facultes": [{"nom": "Faculté des Sciences et Techniques", "sigle": "FST"}]
                        },
                        {"nom": "Université de Ségou"}
                    ]
                },
                {
                    "nom": "Lettres et Langues",
                    "universites": [{"nom": "Université de Ségou"}]
                }
            ]"#,
        )
        .unwrap()
    }

    const USTTB: &str = "universite-des-sciences-des-techniques-et-des-technologies-de-bamako";

    #[test]
    fn test_private_detail_scenario() {
        let data = private();
        let found = find_private(&data, "esg-42").unwrap();
        assert_eq!(found.id, "42");
        assert_eq!(found.name, "École Supérieure de Gestion");
        assert!(find_private(&data, "esg-99").is_none());
    }

    #[test]
    fn test_private_name_fallback() {
        let data = private();
        assert_eq!(find_private(&data, "institut-kore-7").unwrap().id, "7");
    }

    #[test]
    fn test_unnamed_records_unreachable() {
        let data = private();
        assert!(find_private(&data, "ghost-9").is_none());
    }

    #[test]
    fn test_lookup_totality() {
        let data = private();
        let groups = groups();
        for input in ["", "-", "ESG-42", "../../etc", "é", "esg 42", "\u{0}"] {
            assert!(find_private(&data, input).is_none());
            assert!(find_series_group(&groups, input).is_none());
            assert!(find_public(&groups, input, input).is_none());
        }
    }

    #[test]
    fn test_nested_public_scenario() {
        let groups = groups();
        let entry = find_public(&groups, "sciences-exactes-et-experimentales", USTTB).unwrap();
        assert_eq!(entry.series.name, "Sciences Exactes et Expérimentales");
        assert_eq!(entry.university.faculties.len(), 1);
        assert_eq!(entry.university.faculties[0].name, "Faculté des Sciences et Techniques");
    }

    #[test]
    fn test_wrong_series_short_circuits() {
        let groups = groups();
        assert!(find_public(&groups, "series-inconnue", USTTB).is_none());
        // The university exists, but not under this series.
        assert!(find_public(&groups, "lettres-et-langues", USTTB).is_none());
    }

    #[test]
    fn test_same_university_under_two_series() {
        let groups = groups();
        let a = find_public(&groups, "lettres-et-langues", "universite-de-segou").unwrap();
        let b = find_public(
            &groups,
            "sciences-exactes-et-experimentales",
            "universite-de-segou",
        )
        .unwrap();
        assert_eq!(a.series.name, "Lettres et Langues");
        assert_eq!(b.series.name, "Sciences Exactes et Expérimentales");
    }

    #[test]
    fn test_first_match_wins() {
        let series: Vec<SeriesDescriptor> = serde_json::from_str(
            r#"[
                {"sigle": "TSE", "nom": "Sciences Exactes"},
                {"sigle": "tse", "nom": "Doublon"},
                {"sigle": "T.S.E", "nom": "Pointée"}
            ]"#,
        )
        .unwrap();
        assert_eq!(find_series(&series, "tse").unwrap().name, "Sciences Exactes");
        assert_eq!(find_series(&series, "t-s-e").unwrap().name, "Pointée");
    }
}
