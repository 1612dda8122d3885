#![forbid(unsafe_code)]

//! The font browser: catalogue, search query, windowed list and selection.
//!
//! Changing the query re-ranks the catalogue and pushes the new sequence
//! through the [`ScrollController`]. Rows are keyed by font id, so a row
//! that stays windowed across a query change keeps its handle and whatever
//! state the host keeps on it.
//!
//! # Failure Modes
//!
//! | Condition                         | Behavior                         |
//! |-----------------------------------|----------------------------------|
//! | Query change after detach         | `CatalogError::Window(DetachedControllerUse)` |
//! | Selecting an id not in catalogue  | `CatalogError::UnknownFont`      |
//! | Toggling a variant the font lacks | `CatalogError::Selection(UnknownVariant)` |

use fdl_select::{Axis, DownloadSelection, FileToken, Selection};
use fdl_window::{PassOutcome, RowRenderer, ScrollController, ViewportEvents, WindowConfig};
use tracing::{debug, info};

use crate::error::CatalogError;
use crate::filter::filter_fonts;
use crate::font::{Catalog, Font, font_key};
use crate::manifest::DownloadManifest;

/// Row identity used by the browser list.
pub type FontKey = fn(&Font) -> String;

pub struct FontBrowser<R: RowRenderer<Font>> {
    catalog: Catalog,
    query: String,
    list: ScrollController<Font, FontKey, R>,
    selection: Selection,
}

impl<R: RowRenderer<Font> + 'static> FontBrowser<R> {
    /// A detached browser showing the whole catalogue.
    pub fn new(
        catalog: Catalog,
        config: WindowConfig,
        container_extent: f64,
        renderer: R,
    ) -> Result<Self, CatalogError> {
        let list =
            ScrollController::new(config, container_extent, font_key as FontKey, renderer)?;
        list.set_items(catalog.fonts().to_vec())?;
        Ok(Self {
            catalog,
            query: String::new(),
            list,
            selection: Selection::new(),
        })
    }

    pub fn attach(&mut self, events: &ViewportEvents) -> Result<PassOutcome, CatalogError> {
        Ok(self.list.attach(events)?)
    }

    pub fn detach(&mut self) -> Result<usize, CatalogError> {
        Ok(self.list.detach()?)
    }

    /// Re-rank by `query` and reconcile the list against the result.
    pub fn set_query(&mut self, query: &str) -> Result<PassOutcome, CatalogError> {
        let ranked = filter_fonts(self.catalog.fonts(), query);
        debug!(query, matches = ranked.len(), "query changed");
        let outcome = self.list.set_items(ranked)?;
        self.query = query.to_owned();
        Ok(outcome)
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn list(&self) -> &ScrollController<Font, FontKey, R> {
        &self.list
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    fn known(&self, font_id: &str) -> Result<&Font, CatalogError> {
        self.catalog
            .font(font_id)
            .ok_or_else(|| CatalogError::UnknownFont(font_id.to_owned()))
    }

    /// Add or drop a font from the download selection.
    ///
    /// Returns whether the selection changed.
    pub fn select_font(&mut self, font_id: &str, selected: bool) -> Result<bool, CatalogError> {
        self.known(font_id)?;
        let changed = if selected {
            self.selection.select(font_id)
        } else {
            self.selection.deselect(font_id)
        };
        if changed {
            info!(font = font_id, selected, "selection changed");
        }
        Ok(changed)
    }

    /// Check or uncheck one subset, weight or style of a font.
    pub fn toggle_variant(
        &mut self,
        font_id: &str,
        axis: Axis,
        value: &str,
        checked: bool,
    ) -> Result<(), CatalogError> {
        let font = self
            .catalog
            .font(font_id)
            .ok_or_else(|| CatalogError::UnknownFont(font_id.to_owned()))?;
        self.selection
            .download_mut(font_id)
            .toggle(font, axis, value, checked)?;
        Ok(())
    }

    /// Switch an axis between its default and the explicit choice.
    pub fn set_axis_default(
        &mut self,
        font_id: &str,
        axis: Axis,
        on: bool,
    ) -> Result<(), CatalogError> {
        self.known(font_id)?;
        let download = self.selection.download_mut(font_id);
        match axis {
            Axis::Subset => download.set_default_subset(on),
            Axis::Weight => download.set_all_weights(on),
            Axis::Style => download.set_all_styles(on),
        };
        Ok(())
    }

    /// Download choices currently in effect for a font.
    #[must_use]
    pub fn download(&self, font_id: &str) -> DownloadSelection {
        self.selection.download(font_id)
    }

    pub fn manifest(&self, font_id: &str) -> Result<DownloadManifest, CatalogError> {
        DownloadManifest::build(&self.catalog, font_id, &self.selection.download(font_id))
    }

    /// Files for every selected font, in font-id order.
    pub fn selected_files(&self) -> Result<Vec<FileToken>, CatalogError> {
        Ok(self.selection.file_tokens(|id| self.catalog.font(id))?)
    }
}

impl<R: RowRenderer<Font>> std::fmt::Debug for FontBrowser<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBrowser")
            .field("fonts", &self.catalog.len())
            .field("query", &self.query)
            .field("selected", &self.selection.fonts().len())
            .finish_non_exhaustive()
    }
}
