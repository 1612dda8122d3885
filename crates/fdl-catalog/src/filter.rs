#![forbid(unsafe_code)]

//! Case-insensitive search ranking over font names.
//!
//! Each name is classified by how the query matches it, best first:
//!
//! | Match       | Example (`query` in `name`)     |
//! |-------------|---------------------------------|
//! | `Exact`     | `inter` in `Inter`              |
//! | `Prefix`    | `int` in `Inter Tight`          |
//! | `WordStart` | `sans` in `Noto Sans`           |
//! | `Substring` | `ter` in `Inter`                |
//! | `Fuzzy`     | `nts` in `Noto Sans` (in order) |
//!
//! Names that match none of these are dropped. Equal matches keep their
//! catalogue order, so the ranking is stable and deterministic.

use crate::font::Font;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchType {
    Exact,
    Prefix,
    WordStart,
    Substring,
    Fuzzy,
}

fn is_subsequence(query: &str, name: &str) -> bool {
    let mut hay = name.chars();
    query.chars().all(|q| hay.any(|c| c == q))
}

fn starts_a_word(name: &str, query: &str) -> bool {
    name.match_indices(query).any(|(at, _)| {
        name[..at]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_whitespace() || c == '-' || c == '_')
    })
}

/// How `query` matches `name`, or `None` for no match.
///
/// An empty query matches nothing; callers treat it as "no filter".
#[must_use]
pub fn classify(query: &str, name: &str) -> Option<MatchType> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }
    let name = name.to_lowercase();
    if name == query {
        Some(MatchType::Exact)
    } else if name.starts_with(&query) {
        Some(MatchType::Prefix)
    } else if starts_a_word(&name, &query) {
        Some(MatchType::WordStart)
    } else if name.contains(&query) {
        Some(MatchType::Substring)
    } else if is_subsequence(&query, &name) {
        Some(MatchType::Fuzzy)
    } else {
        None
    }
}

/// Indices of matching `items`, best match first.
///
/// A blank query keeps every item in its original order.
pub fn rank<T>(
    items: &[T],
    query: &str,
    name: impl Fn(&T) -> &str,
) -> Vec<(usize, Option<MatchType>)> {
    if query.trim().is_empty() {
        return (0..items.len()).map(|i| (i, None)).collect();
    }
    let mut hits: Vec<(usize, Option<MatchType>)> = items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| classify(query, name(item)).map(|m| (i, Some(m))))
        .collect();
    hits.sort_by_key(|&(i, m)| (m, i));
    hits
}

/// The fonts matching `query` by name, best match first.
#[must_use]
pub fn filter_fonts(fonts: &[Font], query: &str) -> Vec<Font> {
    rank(fonts, query, |f| f.name.as_str())
        .into_iter()
        .map(|(i, _)| fonts[i].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMES: [&str; 6] = [
        "Noto Sans",
        "Inter Tight",
        "Inter",
        "Winter Script",
        "Noto Serif",
        "Abel",
    ];

    fn ranked(query: &str) -> Vec<&'static str> {
        rank(&NAMES, query, |n| *n)
            .into_iter()
            .map(|(i, _)| NAMES[i])
            .collect()
    }

    #[test]
    fn classifies_match_kinds() {
        assert_eq!(classify("inter", "Inter"), Some(MatchType::Exact));
        assert_eq!(classify("INT", "Inter Tight"), Some(MatchType::Prefix));
        assert_eq!(classify("sans", "Noto Sans"), Some(MatchType::WordStart));
        assert_eq!(classify("ter", "Inter"), Some(MatchType::Substring));
        assert_eq!(classify("nts", "Noto Sans"), Some(MatchType::Fuzzy));
        assert_eq!(classify("xyz", "Noto Sans"), None);
        assert_eq!(classify("  ", "Noto Sans"), None);
    }

    #[test]
    fn best_match_first_then_catalogue_order() {
        assert_eq!(ranked("inter"), vec!["Inter", "Inter Tight", "Winter Script"]);
    }

    #[test]
    fn empty_query_keeps_everything() {
        assert_eq!(ranked(""), NAMES.to_vec());
        assert_eq!(ranked("   "), NAMES.to_vec());
    }

    #[test]
    fn fuzzy_needs_order() {
        assert_eq!(classify("sn", "Noto Sans"), Some(MatchType::Fuzzy));
        assert_eq!(classify("zn", "Noto Sans"), None);
    }

    #[test]
    fn no_match_is_empty() {
        assert!(ranked("qqq").is_empty());
    }

    #[test]
    fn ties_keep_catalogue_order() {
        assert_eq!(ranked("noto"), vec!["Noto Sans", "Noto Serif"]);
    }
}
