#![forbid(unsafe_code)]

//! Deterministic sample catalogue for running without catalogue files.

use fdl_catalog::{Catalog, CatalogError, Font, Subset};

const FAMILIES: [&str; 8] = [
    "Inter", "Lora", "Noto", "Roboto", "Source", "Fira", "Merri", "Work",
];
const KINDS: [&str; 5] = ["Sans", "Serif", "Mono", "Display", "Slab"];
const DESIGNERS: [&str; 4] = ["Open Foundry", "Type Lab", "North Press", "Studio K"];

/// Unicode ranges for the subsets sample fonts use.
#[must_use]
pub fn sample_subsets() -> Vec<Subset> {
    [
        ("latin", "U+0000-00FF, U+0131, U+0152-0153, U+02BB-02BC, U+2000-206F"),
        ("latin-ext", "U+0100-02AF, U+1E00-1EFF, U+2020, U+20A0-20AB"),
        ("cyrillic", "U+0301, U+0400-045F, U+0490-0491, U+04B0-04B1, U+2116"),
        ("greek", "U+0370-0377, U+037A-037F, U+0384-038A, U+038C"),
    ]
    .into_iter()
    .map(|(subset, ranges)| Subset {
        subset: subset.into(),
        ranges: ranges.into(),
    })
    .collect()
}

fn sample_font(i: usize) -> Font {
    let family = FAMILIES[i % FAMILIES.len()];
    let kind = KINDS[(i / FAMILIES.len()) % KINDS.len()];
    let generation = i / (FAMILIES.len() * KINDS.len());
    let name = if generation == 0 {
        format!("{family} {kind}")
    } else {
        format!("{family} {kind} {generation}")
    };

    let weights = if i % 7 == 0 {
        vec!["100-900".to_string()]
    } else {
        ["300", "400", "700"].map(String::from).to_vec()
    };
    let styles = if i % 3 == 0 {
        vec!["normal".to_string()]
    } else {
        vec!["normal".to_string(), "italic".to_string()]
    };
    let mut subsets = vec!["latin".to_string(), "latin-ext".to_string()];
    if i % 4 == 0 {
        subsets.push("cyrillic".into());
    }
    if i % 5 == 0 {
        subsets.push("greek".into());
    }

    Font {
        id: name.to_lowercase().replace(' ', "-"),
        name,
        designer: DESIGNERS[i % DESIGNERS.len()].into(),
        license: "OFL-1.1".into(),
        subsets,
        weights,
        styles,
    }
}

/// `count` generated fonts with unique ids.
pub fn sample_catalog(count: usize) -> Result<Catalog, CatalogError> {
    Catalog::new((0..count).map(sample_font).collect(), sample_subsets())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let catalog = sample_catalog(500).unwrap();
        assert_eq!(catalog.len(), 500);
        assert_eq!(catalog.fonts()[0].id, "inter-sans");
        assert_eq!(catalog.fonts()[40].id, "inter-sans-1");
    }

    #[test]
    fn every_subset_has_ranges() {
        let catalog = sample_catalog(100).unwrap();
        for font in catalog.fonts() {
            for subset in &font.subsets {
                assert!(catalog.unicode_range(subset).is_some(), "{subset}");
            }
        }
    }
}
