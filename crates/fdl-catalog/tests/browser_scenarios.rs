#![forbid(unsafe_code)]

//! Font browser over a large generated catalogue: scroll, search, select.

use fdl_catalog::{Catalog, Font, FontBrowser, Subset};
use fdl_select::Axis;
use fdl_window::{RowRenderer, ViewportEvents, WindowConfig};
use tracing::Level;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(Level::DEBUG)
        .try_init();
}

/// Counts live rows; handles carry the font id they were created for.
#[derive(Default)]
struct Live {
    rows: usize,
    created: usize,
}

impl RowRenderer<Font> for Live {
    type Handle = String;

    fn create(&mut self, font: &Font, _index: usize, _offset: f64) -> String {
        self.rows += 1;
        self.created += 1;
        font.id.clone()
    }

    fn destroy(&mut self, _handle: String) {
        self.rows -= 1;
    }
}

fn fonts_json(n: usize) -> String {
    let fonts: Vec<serde_json::Value> = (0..n)
        .map(|i| {
            let family = if i % 3 == 0 { "Sans" } else { "Serif" };
            serde_json::json!({
                "id": format!("family-{i}"),
                "name": format!("Family {i} {family}"),
                "designer": "Someone",
                "license": "OFL-1.1",
                "subsets": ["latin", "latin-ext"],
                "weights": ["300", "400", "700"],
                "styles": ["normal", "italic"],
            })
        })
        .collect();
    serde_json::to_string(&fonts).unwrap()
}

fn subsets_json() -> String {
    serde_json::to_string(&[
        Subset {
            subset: "latin".into(),
            ranges: "U+0000-00FF".into(),
        },
        Subset {
            subset: "latin-ext".into(),
            ranges: "U+0100-024F".into(),
        },
    ])
    .unwrap()
}

fn browser(n: usize) -> (FontBrowser<Live>, ViewportEvents) {
    init_tracing();
    let catalog = Catalog::from_json(&fonts_json(n), &subsets_json()).unwrap();
    let events = ViewportEvents::new();
    let mut browser =
        FontBrowser::new(catalog, WindowConfig::default(), 900.0, Live::default()).unwrap();
    browser.attach(&events).unwrap();
    (browser, events)
}

#[test]
fn live_rows_stay_bounded_while_scrolling() {
    let (browser, events) = browser(5_000);
    for step in 0..200 {
        events.scrolled(f64::from(step) * 977.0);
        let live = browser.list().with_renderer(|r| r.rows);
        assert!(live <= 36, "{live} live rows at step {step}");
        assert_eq!(live, browser.list().range().len());
    }
    assert!(browser.list().take_error().is_none());
}

#[test]
fn search_then_scroll_back() {
    let (mut browser, events) = browser(3_000);
    events.scrolled(90_000.0);
    assert_eq!(browser.list().range(), 490..526);

    browser.set_query("sans").unwrap();
    assert_eq!(browser.list().item_count(), 1_000);
    // The offset is the host's; it is not reset by a new sequence.
    assert_eq!(browser.list().range(), 490..526);
    browser.list().for_each_row(|id, row| {
        assert_eq!(&row.handle, id);
        let n: usize = id.trim_start_matches("family-").parse().unwrap();
        assert_eq!(n % 3, 0);
    });

    events.scrolled(0.0);
    assert_eq!(browser.list().range(), 0..26);
}

#[test]
fn selection_builds_manifest() {
    let (mut browser, _events) = browser(10);
    browser.select_font("family-3", true).unwrap();
    browser.set_axis_default("family-3", Axis::Style, false).unwrap();
    browser
        .toggle_variant("family-3", Axis::Style, "italic", true)
        .unwrap();
    browser.set_axis_default("family-3", Axis::Subset, false).unwrap();
    browser
        .toggle_variant("family-3", Axis::Subset, "latin-ext", true)
        .unwrap();

    let manifest = browser.manifest("family-3").unwrap();
    assert_eq!(
        manifest.file_names(),
        vec![
            "family-3_latin-ext_300_italic.woff2",
            "family-3_latin-ext_400_italic.woff2",
            "family-3_latin-ext_700_italic.woff2",
        ]
    );
    assert!(manifest.stylesheet.contains("unicode-range: U+0100-024F;"));
    assert_eq!(manifest.archive_name(), "family-3-fontdelivery.zip");
    assert_eq!(browser.selected_files().unwrap().len(), 3);
}
