#![forbid(unsafe_code)]

//! The demo session: load, paint, search, scroll, select, report.

use std::fmt;
use std::io::{self, Write};

use fdl_catalog::{Catalog, CatalogError, FontBrowser, parse_fonts, parse_subsets};
use fdl_select::Axis;
use fdl_window::{Overscan, ViewportEvents, WindowConfig};
use tracing::{info, warn};

use crate::cli::Opts;
use crate::render::{TextRows, frame};
use crate::sample::{sample_catalog, sample_subsets};

#[derive(Debug)]
pub enum DemoError {
    Read { path: String, source: io::Error },
    Output(io::Error),
    Catalog(CatalogError),
    Json(serde_json::Error),
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => write!(f, "cannot read {path}: {source}"),
            Self::Output(err) => write!(f, "cannot write output: {err}"),
            Self::Catalog(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "cannot encode selection: {err}"),
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Output(err) => Some(err),
            Self::Catalog(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<CatalogError> for DemoError {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(err)
    }
}

impl From<io::Error> for DemoError {
    fn from(err: io::Error) -> Self {
        Self::Output(err)
    }
}

fn read(path: &str) -> Result<String, DemoError> {
    std::fs::read_to_string(path).map_err(|source| DemoError::Read {
        path: path.to_string(),
        source,
    })
}

/// Catalogue from the given files, or the generated sample.
pub fn load_catalog(opts: &Opts) -> Result<Catalog, DemoError> {
    let Some(fonts_path) = &opts.fonts_path else {
        info!(fonts = opts.sample_size, "using sample catalogue");
        return Ok(sample_catalog(opts.sample_size)?);
    };
    let fonts = parse_fonts(&read(fonts_path)?)?;
    let subsets = match &opts.subsets_path {
        Some(path) => parse_subsets(&read(path)?)?,
        None => sample_subsets(),
    };
    Ok(Catalog::new(fonts, subsets)?)
}

/// Run one scripted session, writing frames and the download report to `out`.
pub fn run(opts: &Opts, catalog: Catalog, out: &mut impl Write) -> Result<(), DemoError> {
    let config = WindowConfig::default()
        .with_item_extent(opts.row_height)
        .with_overscan(Overscan::new(opts.overscan.0, opts.overscan.1));
    let events = ViewportEvents::new();
    let mut browser = FontBrowser::new(catalog, config, opts.height, TextRows::default())?;

    browser.attach(&events)?;
    writeln!(out, "== first paint\n{}", frame(&browser))?;

    if let Some(query) = &opts.query {
        browser.set_query(query)?;
        writeln!(out, "== query {query:?}\n{}", frame(&browser))?;
    }

    for &offset in &opts.scroll {
        events.scrolled(offset);
        if let Some(err) = browser.list().take_error() {
            warn!(offset, error = %err, "scroll rejected");
            continue;
        }
        writeln!(out, "== scroll {offset:.0}px\n{}", frame(&browser))?;
    }

    for pick in &opts.select {
        browser.select_font(&pick.font_id, true)?;
        if let Some(weights) = &pick.weights {
            browser.set_axis_default(&pick.font_id, Axis::Weight, false)?;
            for weight in weights {
                browser.toggle_variant(&pick.font_id, Axis::Weight, weight, true)?;
            }
        }
        let manifest = browser.manifest(&pick.font_id)?;
        writeln!(out, "== download {}", manifest.archive_name())?;
        for entry in manifest.entries() {
            writeln!(out, "  {entry}")?;
        }
    }

    if !opts.select.is_empty() {
        let files = browser.selected_files()?;
        writeln!(out, "== {} files selected", files.len())?;
        let state = serde_json::to_string(browser.selection()).map_err(DemoError::Json)?;
        writeln!(out, "{state}")?;
    }

    let rows = browser.list().with_renderer(|r| (r.created, r.repositioned, r.destroyed));
    info!(
        created = rows.0,
        repositioned = rows.1,
        destroyed = rows.2,
        "session finished"
    );
    browser.detach()?;
    Ok(())
}
