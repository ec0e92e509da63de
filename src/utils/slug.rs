// src/utils/slug.rs

//! URL slug codec.
//!
//! Turns display names ("Université de Ségou") into path segments
//! ("universite-de-segou"). The mapping is pure: the same input always yields
//! the same slug, and any input (including the empty string) is accepted.

use std::sync::LazyLock;

use regex::Regex;

/// Any run of characters outside the slug alphabet.
static SEPARATOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("static separator pattern"));

/// Transliterate one lowercase character to its unaccented base form.
///
/// Covers the Latin-1 / French set that appears in the directory data, and
/// drops combining marks so decomposed input folds the same way.
/// Characters outside the table are returned unchanged and later collapsed
/// into a separator if they are not `[a-z0-9]`.
fn transliterate(c: char) -> Option<&'static str> {
    let base = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' => "a",
        'æ' => "ae",
        'ç' | 'ć' | 'č' => "c",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ę' | 'ě' => "e",
        'ì' | 'í' | 'î' | 'ï' | 'ī' => "i",
        'ñ' | 'ń' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' => "o",
        'œ' => "oe",
        'ù' | 'ú' | 'û' | 'ü' | 'ū' => "u",
        'ý' | 'ÿ' => "y",
        'ß' => "ss",
        'ş' | 'š' => "s",
        'ž' | 'ź' | 'ż' => "z",
        '\u{0300}'..='\u{036f}' => "",
        _ => return None,
    };
    Some(base)
}

/// Normalize a display string into a URL-safe slug.
///
/// Output only contains `[a-z0-9-]`, never starts or ends with `-`, and never
/// contains `--`.
pub fn slugify(input: &str) -> String {
    let mut folded = String::with_capacity(input.len());
    for c in input.chars().flat_map(char::to_lowercase) {
        match transliterate(c) {
            Some(base) => folded.push_str(base),
            None => folded.push(c),
        }
    }

    SEPARATOR_RUN
        .replace_all(&folded, "-")
        .trim_matches('-')
        .to_string()
}

/// Slugify each part and join the non-empty results with `-`.
///
/// Parts are kept in the given order: the preferred short code first, then
/// the disambiguating identifier.
pub fn compose_slug(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|part| slugify(part))
        .filter(|slug| !slug.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
