#![forbid(unsafe_code)]

//! Font catalogue and the windowed font browser built on it.
//!
//! - [`Catalog`] - fonts and subset ranges loaded from the catalogue JSON
//! - [`filter`] - search ranking that produces the list's item sequence
//! - [`DownloadManifest`] - files, stylesheet and archive names for a font
//! - [`FontBrowser`] - query, scroll controller and selection together

pub mod browser;
pub mod error;
pub mod filter;
pub mod font;
pub mod manifest;

pub use browser::{FontBrowser, FontKey};
pub use error::CatalogError;
pub use filter::{MatchType, classify, filter_fonts, rank};
pub use font::{Catalog, Font, Subset, font_key, parse_fonts, parse_subsets};
pub use manifest::{DownloadManifest, font_face_css};
