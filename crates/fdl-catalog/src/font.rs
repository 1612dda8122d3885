#![forbid(unsafe_code)]

//! Font and subset descriptors, and the catalogue that indexes them.
//!
//! The catalogue is loaded from two JSON documents: `fonts.json`, a list of
//! font descriptors, and `subsets.json`, the unicode range of every subset.

use fdl_select::FontAxes;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::CatalogError;

/// One font family as served by the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Font {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub designer: String,
    #[serde(default)]
    pub license: String,
    #[serde(default)]
    pub subsets: Vec<String>,
    /// `"400"` for a static weight, `"100-900"` for a variable range.
    #[serde(default)]
    pub weights: Vec<String>,
    #[serde(default)]
    pub styles: Vec<String>,
}

impl Font {
    /// Whether any weight is a variable range.
    #[must_use]
    pub fn is_variable(&self) -> bool {
        self.weights
            .iter()
            .any(|w| fdl_select::is_variable_weight(w))
    }
}

impl FontAxes for Font {
    fn font_id(&self) -> &str {
        &self.id
    }

    fn subsets(&self) -> &[String] {
        &self.subsets
    }

    fn weights(&self) -> &[String] {
        &self.weights
    }

    fn styles(&self) -> &[String] {
        &self.styles
    }
}

/// Identity key for font rows.
#[must_use]
pub fn font_key(font: &Font) -> String {
    font.id.clone()
}

/// A named subset and its CSS `unicode-range` value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subset {
    pub subset: String,
    pub ranges: String,
}

pub fn parse_fonts(json: &str) -> Result<Vec<Font>, CatalogError> {
    serde_json::from_str(json).map_err(|source| CatalogError::Parse {
        document: "fonts.json",
        source,
    })
}

pub fn parse_subsets(json: &str) -> Result<Vec<Subset>, CatalogError> {
    serde_json::from_str(json).map_err(|source| CatalogError::Parse {
        document: "subsets.json",
        source,
    })
}

/// All fonts in catalogue order, indexed by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    fonts: Vec<Font>,
    by_id: FxHashMap<String, usize>,
    ranges: FxHashMap<String, String>,
}

impl Catalog {
    /// Index `fonts` and `subsets`. Font ids must be unique.
    pub fn new(fonts: Vec<Font>, subsets: Vec<Subset>) -> Result<Self, CatalogError> {
        let mut by_id = FxHashMap::with_capacity_and_hasher(fonts.len(), Default::default());
        for (index, font) in fonts.iter().enumerate() {
            if by_id.insert(font.id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateFont(font.id.clone()));
            }
        }
        let ranges = subsets
            .into_iter()
            .map(|s| (s.subset, s.ranges))
            .collect::<FxHashMap<_, _>>();

        info!(
            fonts = fonts.len(),
            subsets = ranges.len(),
            "font catalogue loaded"
        );
        Ok(Self {
            fonts,
            by_id,
            ranges,
        })
    }

    /// Parse `fonts.json` and `subsets.json` and index them.
    pub fn from_json(fonts_json: &str, subsets_json: &str) -> Result<Self, CatalogError> {
        Self::new(parse_fonts(fonts_json)?, parse_subsets(subsets_json)?)
    }

    #[must_use]
    pub fn fonts(&self) -> &[Font] {
        &self.fonts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    #[must_use]
    pub fn font(&self, id: &str) -> Option<&Font> {
        self.by_id.get(id).map(|&i| &self.fonts[i])
    }

    /// CSS `unicode-range` for a subset.
    #[must_use]
    pub fn unicode_range(&self, subset: &str) -> Option<&str> {
        self.ranges.get(subset).map(String::as_str)
    }
}
