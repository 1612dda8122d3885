#![forbid(unsafe_code)]

//! Download selection for one font and for a set of fonts.
//!
//! A font offers values on three axes: subset, weight and style. Each axis
//! either follows its default (all weights, all styles, the `latin` subset)
//! or an explicit choice tracked in an [`OrderedSet`]. Resolving the axes
//! against a font yields the file tokens to fetch, as the cross-product in
//! subset, weight, style order.
//!
//! # Invariants
//!
//! 1. An axis the font offers exactly one value for always resolves to that
//!    value, whatever the toggles say.
//! 2. Explicit choices only ever hold values the font offers.
//! 3. The token list depends only on the selected values, not on the order
//!    they were toggled in.
//!
//! # Failure Modes
//!
//! | Condition                            | Behavior                      |
//! |--------------------------------------|-------------------------------|
//! | Toggling a value the font lacks      | `SelectionError::UnknownVariant` |
//! | Resolving a font id with no descriptor | `SelectionError::UnknownFont` |
//! | Axis on default, font offers nothing | Axis resolves empty, no tokens |

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::SelectionError;
use crate::ordered_set::{Comparator, Natural, OrderedSet};

/// Subset picked when the "default subset" toggle is on.
pub const DEFAULT_SUBSET: &str = "latin";

/// The values a font can be downloaded in.
pub trait FontAxes {
    fn font_id(&self) -> &str;
    fn subsets(&self) -> &[String];
    fn weights(&self) -> &[String];
    fn styles(&self) -> &[String];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Axis {
    Subset,
    Weight,
    Style,
}

impl Axis {
    fn offered<F: FontAxes + ?Sized>(self, font: &F) -> &[String] {
        match self {
            Self::Subset => font.subsets(),
            Self::Weight => font.weights(),
            Self::Style => font.styles(),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Subset => "subset",
            Self::Weight => "weight",
            Self::Style => "style",
        })
    }
}

/// Orders weights by their leading number, so `"900"` sorts after `"100"`
/// and a variable range `"100-900"` sorts among them. Ties fall back to
/// plain string order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeightOrder;

fn leading_number(s: &str) -> Option<u32> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().ok()
}

impl Comparator<String> for WeightOrder {
    fn compare(&self, a: &String, b: &String) -> Ordering {
        match (leading_number(a), leading_number(b)) {
            (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.cmp(b),
        }
    }
}

/// Whether a weight value names a variable font (`"100-900"`).
#[must_use]
pub fn is_variable_weight(weight: &str) -> bool {
    weight.contains('-')
}

/// One axis: follow the default, or use the explicit choice.
///
/// The explicit choice is kept while the default is on, so switching the
/// default off again restores it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(serialize = "", deserialize = "C: Comparator<String> + Default"))
)]
pub struct AxisSelection<C = Natural> {
    pub use_default: bool,
    chosen: OrderedSet<String, C>,
}

impl<C: Comparator<String> + Default> Default for AxisSelection<C> {
    fn default() -> Self {
        Self {
            use_default: true,
            chosen: OrderedSet::default(),
        }
    }
}

impl<C: Comparator<String> + Clone> AxisSelection<C> {
    #[must_use]
    pub fn chosen(&self) -> &OrderedSet<String, C> {
        &self.chosen
    }

    fn toggle(&mut self, value: &str, checked: bool) {
        self.chosen = self.chosen.toggled(value.to_owned(), checked);
    }

    fn resolve(&self, axis: Axis, offered: &[String], comparator: C) -> Vec<String> {
        if offered.len() == 1 {
            return offered.to_vec();
        }
        if !self.use_default {
            return self.chosen.to_vec();
        }
        let all = OrderedSet::from_values(offered.iter().cloned(), comparator);
        match axis {
            Axis::Subset => {
                let latin = DEFAULT_SUBSET.to_owned();
                if all.contains(&latin) {
                    vec![latin]
                } else {
                    all.first().cloned().into_iter().collect()
                }
            }
            Axis::Weight | Axis::Style => all.to_vec(),
        }
    }
}

/// Resolved values per axis, each sorted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedAxes {
    pub subsets: Vec<String>,
    pub weights: Vec<String>,
    pub styles: Vec<String>,
}

/// One downloadable file: `{font}_{subset}_{weight}_{style}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileToken {
    pub font_id: String,
    pub subset: String,
    pub weight: String,
    pub style: String,
}

impl FileToken {
    /// Name of the font file to fetch for this token.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{self}.woff2")
    }

    #[must_use]
    pub fn is_variable(&self) -> bool {
        is_variable_weight(&self.weight)
    }
}

impl fmt::Display for FileToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}_{}",
            self.font_id, self.subset, self.weight, self.style
        )
    }
}

/// Download choices for a single font.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DownloadSelection {
    pub subsets: AxisSelection,
    pub weights: AxisSelection<WeightOrder>,
    pub styles: AxisSelection,
}

impl DownloadSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_default_subset(&mut self, on: bool) -> &mut Self {
        self.subsets.use_default = on;
        self
    }

    pub fn set_all_weights(&mut self, on: bool) -> &mut Self {
        self.weights.use_default = on;
        self
    }

    pub fn set_all_styles(&mut self, on: bool) -> &mut Self {
        self.styles.use_default = on;
        self
    }

    /// Whether `axis` is pinned because the font offers a single value.
    #[must_use]
    pub fn is_fixed<F: FontAxes + ?Sized>(font: &F, axis: Axis) -> bool {
        axis.offered(font).len() == 1
    }

    /// Check or uncheck one value on one axis.
    pub fn toggle<F: FontAxes + ?Sized>(
        &mut self,
        font: &F,
        axis: Axis,
        value: &str,
        checked: bool,
    ) -> Result<(), SelectionError> {
        if !axis.offered(font).iter().any(|v| v == value) {
            return Err(SelectionError::UnknownVariant {
                font: font.font_id().to_owned(),
                axis,
                value: value.to_owned(),
            });
        }
        match axis {
            Axis::Subset => self.subsets.toggle(value, checked),
            Axis::Weight => self.weights.toggle(value, checked),
            Axis::Style => self.styles.toggle(value, checked),
        }
        Ok(())
    }

    #[must_use]
    pub fn resolve<F: FontAxes + ?Sized>(&self, font: &F) -> ResolvedAxes {
        ResolvedAxes {
            subsets: self
                .subsets
                .resolve(Axis::Subset, font.subsets(), Natural),
            weights: self
                .weights
                .resolve(Axis::Weight, font.weights(), WeightOrder),
            styles: self.styles.resolve(Axis::Style, font.styles(), Natural),
        }
    }

    /// Cross-product of the resolved axes, subset outermost.
    #[must_use]
    pub fn file_tokens<F: FontAxes + ?Sized>(&self, font: &F) -> Vec<FileToken> {
        let axes = self.resolve(font);
        let mut tokens =
            Vec::with_capacity(axes.subsets.len() * axes.weights.len() * axes.styles.len());
        for subset in &axes.subsets {
            for weight in &axes.weights {
                for style in &axes.styles {
                    tokens.push(FileToken {
                        font_id: font.font_id().to_owned(),
                        subset: subset.clone(),
                        weight: weight.clone(),
                        style: style.clone(),
                    });
                }
            }
        }
        tokens
    }
}

/// Fonts picked for download, each with its own [`DownloadSelection`].
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection {
    fonts: OrderedSet<String>,
    downloads: BTreeMap<String, DownloadSelection>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected font ids in sorted order.
    #[must_use]
    pub fn fonts(&self) -> &OrderedSet<String> {
        &self.fonts
    }

    #[must_use]
    pub fn is_selected(&self, font_id: &str) -> bool {
        self.fonts.contains(&font_id.to_owned())
    }

    /// Returns `false` if the font was already selected.
    pub fn select(&mut self, font_id: &str) -> bool {
        self.fonts.insert(font_id.to_owned())
    }

    /// Drops the font and forgets its download choices.
    pub fn deselect(&mut self, font_id: &str) -> bool {
        self.downloads.remove(font_id);
        self.fonts.remove(&font_id.to_owned())
    }

    pub fn clear(&mut self) {
        self.fonts.clear();
        self.downloads.clear();
    }

    /// Download choices for a font; defaults until edited.
    #[must_use]
    pub fn download(&self, font_id: &str) -> DownloadSelection {
        self.downloads.get(font_id).cloned().unwrap_or_default()
    }

    /// Mutable download choices, created with defaults on first use.
    pub fn download_mut(&mut self, font_id: &str) -> &mut DownloadSelection {
        self.downloads.entry(font_id.to_owned()).or_default()
    }

    /// Tokens for every selected font, concatenated in font-id order.
    pub fn file_tokens<'a, F, L>(&self, lookup: L) -> Result<Vec<FileToken>, SelectionError>
    where
        F: FontAxes + ?Sized + 'a,
        L: Fn(&str) -> Option<&'a F>,
    {
        let mut tokens = Vec::new();
        for id in &self.fonts {
            let font = lookup(id.as_str()).ok_or_else(|| SelectionError::UnknownFont(id.clone()))?;
            let choice = self.downloads.get(id.as_str());
            match choice {
                Some(choice) => tokens.extend(choice.file_tokens(font)),
                None => tokens.extend(DownloadSelection::default().file_tokens(font)),
            }
        }
        Ok(tokens)
    }
}
