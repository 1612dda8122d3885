#![forbid(unsafe_code)]

//! Selection state for the font browser.
//!
//! - [`OrderedSet`] - sorted, duplicate-free set with copy-on-write storage
//! - [`DownloadSelection`] - subset / weight / style choices for one font
//! - [`Selection`] - selected fonts and their download choices
//!
//! With the `serde` feature, all selection state serializes so it can be
//! persisted between sessions.

pub mod download;
pub mod error;
pub mod ordered_set;

pub use download::{
    Axis, AxisSelection, DEFAULT_SUBSET, DownloadSelection, FileToken, FontAxes, ResolvedAxes,
    Selection, WeightOrder, is_variable_weight,
};
pub use error::SelectionError;
pub use ordered_set::{CompareBy, Comparator, Natural, OrderedSet};
