//! Business identifier resolution for `/business/:id` paths.
//!
//! A path segment is either a legacy numeric id or a human-readable slug.
//! Once the business is loaded, the page rewrites the location to the
//! canonical slug so shared links stay readable.

use once_cell::sync::Lazy;
use regex::Regex;

pub const DETAIL_PREFIX: &str = "/business/";

static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9\s-]").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static HYPHENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{2,}").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusinessRef {
    /// All-digit segment, looked up with `GET /api/businesses/{id}`.
    Id(i64),
    /// Anything else, looked up with `GET /api/businesses/name/{slug}`.
    Slug(String),
}

impl BusinessRef {
    pub fn parse(segment: &str) -> Self {
        let all_digits = !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit());
        match all_digits.then(|| segment.parse::<i64>().ok()).flatten() {
            Some(id) => BusinessRef::Id(id),
            None => BusinessRef::Slug(segment.to_string()),
        }
    }
}

/// Lower-cases, drops anything outside `[a-z0-9]`, whitespace and `-`, turns
/// whitespace runs into a single hyphen and trims hyphens at both ends.
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    let kept = DISALLOWED.replace_all(&lowered, "");
    let hyphenated = WHITESPACE.replace_all(kept.trim(), "-");
    let collapsed = HYPHENS.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}

pub fn detail_path(segment: &str) -> String {
    format!("{DETAIL_PREFIX}{segment}")
}

/// Path the location should be replaced with, if the current one is not canonical.
pub fn canonical_correction(current_path: &str, business_name: &str) -> Option<String> {
    let slug = slugify(business_name);
    if slug.is_empty() {
        return None;
    }
    let canonical = detail_path(&slug);
    let current = current_path.trim_end_matches('/');
    (current != canonical).then_some(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_segment_is_id_lookup() {
        assert_eq!(BusinessRef::parse("482"), BusinessRef::Id(482));
        assert_eq!(BusinessRef::parse("007"), BusinessRef::Id(7));
    }

    #[test]
    fn test_other_segments_are_slug_lookup() {
        assert_eq!(BusinessRef::parse("Joes-Diner"), BusinessRef::Slug("Joes-Diner".into()));
        assert_eq!(BusinessRef::parse("48a"), BusinessRef::Slug("48a".into()));
        assert_eq!(BusinessRef::parse("-12"), BusinessRef::Slug("-12".into()));
        assert_eq!(BusinessRef::parse(""), BusinessRef::Slug(String::new()));
        // Too large for an id; still a valid lookup key by name.
        assert_eq!(
            BusinessRef::parse("99999999999999999999"),
            BusinessRef::Slug("99999999999999999999".into())
        );
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Joe's Café & Bar!!"), "joes-caf-bar");
        assert_eq!(slugify("  Joes   Diner "), "joes-diner");
        assert_eq!(slugify("A - B"), "a-b");
        assert_eq!(slugify("--Pizza--Place--"), "pizza-place");
        assert_eq!(slugify("Tab\tand\nNewline"), "tab-and-newline");
        assert_eq!(slugify("7-Eleven 24"), "7-eleven-24");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_canonical_correction() {
        assert_eq!(
            canonical_correction("/business/482", "Joe's Diner"),
            Some("/business/joes-diner".to_string())
        );
        assert_eq!(
            canonical_correction("/business/Joes-Diner", "Joe's Diner"),
            Some("/business/joes-diner".to_string())
        );
        assert_eq!(canonical_correction("/business/joes-diner", "Joe's Diner"), None);
        assert_eq!(canonical_correction("/business/joes-diner/", "Joe's Diner"), None);
        assert_eq!(canonical_correction("/business/9", "!!!"), None);
    }
}
