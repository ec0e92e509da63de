// src/directory/filter.rs

//! Free-text filter for list views.

use crate::models::Searchable;

/// Keep the records whose name or abbreviation contains `query`,
/// case-insensitively, in their original order.
///
/// An empty or whitespace-only query keeps everything.
pub fn filter<'a, T: Searchable>(records: &'a [T], query: &str) -> Vec<&'a T> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return records.iter().collect();
    }

    records
        .iter()
        .filter(|record| matches(*record, &needle))
        .collect()
}

/// `needle` must already be lowercase.
fn matches<T: Searchable>(record: &T, needle: &str) -> bool {
    record.name().to_lowercase().contains(needle)
        || record
            .abbreviation()
            .is_some_and(|abbr| abbr.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Entry {
        name: &'static str,
        abbreviation: Option<&'static str>,
    }

    impl Searchable for Entry {
        fn name(&self) -> &str {
            self.name
        }

        fn abbreviation(&self) -> Option<&str> {
            self.abbreviation
        }
    }

    fn entries() -> Vec<Entry> {
        vec![
            Entry {
                name: "École Supérieure de Gestion",
                abbreviation: Some("ESG"),
            },
            Entry {
                name: "Institut Kôrê",
                abbreviation: None,
            },
            Entry {
                name: "Université de Ségou",
                abbreviation: Some("US"),
            },
        ]
    }

    fn names(found: &[&Entry]) -> Vec<&'static str> {
        found.iter().map(|e| e.name).collect()
    }

    #[test]
    fn test_empty_query_is_identity() {
        let all = entries();
        assert_eq!(filter(&all, "").len(), 3);
        assert_eq!(
            names(&filter(&all, "   ")),
            vec!["École Supérieure de Gestion", "Institut Kôrê", "Université de Ségou"]
        );
    }

    #[test]
    fn test_case_insensitive_abbreviation() {
        let all = entries();
        assert_eq!(names(&filter(&all, "esg")), vec!["École Supérieure de Gestion"]);
    }

    #[test]
    fn test_name_substring_keeps_order() {
        let all = entries();
        assert_eq!(
            names(&filter(&all, "É")),
            vec!["École Supérieure de Gestion", "Université de Ségou"]
        );
    }

    #[test]
    fn test_no_match_is_empty() {
        let all = entries();
        assert!(filter(&all, "zzz").is_empty());
        let none: Vec<Entry> = Vec::new();
        assert!(filter(&none, "esg").is_empty());
    }
}
