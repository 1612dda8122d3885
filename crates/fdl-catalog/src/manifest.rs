#![forbid(unsafe_code)]

//! What a download contains: file names, the stylesheet and the archive
//! layout. Fetching bytes and zipping them is left to the host.

use std::fmt::Write as _;

use fdl_select::{DownloadSelection, FileToken};
use tracing::debug;

use crate::error::CatalogError;
use crate::font::{Catalog, Font};

/// One `@font-face` rule for `token`, loading from `{url_prefix}{token}.woff2`.
///
/// A variable weight range `100-900` becomes `font-weight: 100 900`.
#[must_use]
pub fn font_face_css(
    font: &Font,
    token: &FileToken,
    unicode_range: &str,
    url_prefix: &str,
) -> String {
    format!(
        "@font-face {{\n  font-family: '{family}';\n  font-style: {style};\n  font-weight: {weight};\n  src: url('{url_prefix}{file}') format('woff2');\n  unicode-range: {unicode_range};\n}}",
        family = font.name,
        style = token.style,
        weight = token.weight.replace('-', " "),
        file = token.file_name(),
    )
}

/// Everything that goes into one font's download archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadManifest {
    pub font_id: String,
    pub files: Vec<FileToken>,
    /// Stylesheet referencing the files by relative path.
    pub stylesheet: String,
}

impl DownloadManifest {
    /// Resolve `selection` against `font_id` in `catalog`.
    ///
    /// Every resolved subset must have a unicode range in the catalogue.
    pub fn build(
        catalog: &Catalog,
        font_id: &str,
        selection: &DownloadSelection,
    ) -> Result<Self, CatalogError> {
        let font = catalog
            .font(font_id)
            .ok_or_else(|| CatalogError::UnknownFont(font_id.to_owned()))?;
        let files = selection.file_tokens(font);

        let mut stylesheet = String::new();
        for token in &files {
            let range = catalog.unicode_range(&token.subset).ok_or_else(|| {
                CatalogError::UnknownSubset {
                    font: font.id.clone(),
                    subset: token.subset.clone(),
                }
            })?;
            let _ = writeln!(stylesheet, "{}", font_face_css(font, token, range, ""));
        }

        debug!(font = font_id, files = files.len(), "download manifest built");
        Ok(Self {
            font_id: font.id.clone(),
            files,
            stylesheet,
        })
    }

    #[must_use]
    pub fn archive_name(&self) -> String {
        format!("{}-fontdelivery.zip", self.font_id)
    }

    #[must_use]
    pub fn stylesheet_name(&self) -> String {
        format!("{}.css", self.font_id)
    }

    #[must_use]
    pub fn license_name(&self) -> String {
        format!("{}-LICENSE.txt", self.font_id)
    }

    /// Font file names, in cross-product order.
    #[must_use]
    pub fn file_names(&self) -> Vec<String> {
        self.files.iter().map(FileToken::file_name).collect()
    }

    /// Every entry the archive holds: font files, stylesheet, license.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        let mut entries = self.file_names();
        entries.push(self.stylesheet_name());
        entries.push(self.license_name());
        entries
    }
}
