#![forbid(unsafe_code)]

//! Plain-text row renderer: each materialized row is one formatted line.

use std::fmt::Write as _;

use fdl_catalog::{Font, FontBrowser};
use fdl_window::RowRenderer;

/// A rendered font row.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRow {
    pub line: String,
    /// Offset from the top of the list, in pixels.
    pub top: f64,
}

/// Renders rows as text and counts renderer traffic.
#[derive(Debug, Default)]
pub struct TextRows {
    pub created: usize,
    pub repositioned: usize,
    pub destroyed: usize,
}

impl RowRenderer<Font> for TextRows {
    type Handle = TextRow;

    fn create(&mut self, font: &Font, _index: usize, offset: f64) -> TextRow {
        self.created += 1;
        let variable = if font.is_variable() { " (variable)" } else { "" };
        TextRow {
            line: format!(
                "{:<28} {:<20} {}{variable}",
                font.name,
                font.designer,
                font.weights.join(" ")
            ),
            top: offset,
        }
    }

    fn reposition(&mut self, handle: &mut TextRow, _index: usize, offset: f64) {
        self.repositioned += 1;
        handle.top = offset;
    }

    fn destroy(&mut self, _handle: TextRow) {
        self.destroyed += 1;
    }
}

/// Header plus one line per windowed row, top to bottom.
#[must_use]
pub fn frame(browser: &FontBrowser<TextRows>) -> String {
    let list = browser.list();
    let range = list.range();
    let viewport = list.viewport();
    let mut out = format!(
        "rows {}..{} of {} | offset {:.0}px of {:.0}px\n",
        range.start,
        range.end,
        list.item_count(),
        viewport.offset(),
        list.total_extent(),
    );
    list.for_each_row(|_, row| {
        let _ = writeln!(out, "{:>9.0}px  {}", row.handle.top, row.handle.line);
    });
    out
}
