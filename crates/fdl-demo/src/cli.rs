#![forbid(unsafe_code)]

//! Command-line argument parsing for the font browser demo.
//!
//! Parses args manually to keep the binary lean. Supports environment
//! variable overrides via the `FDL_DEMO_*` prefix.

use std::env;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
fdl-demo: drive the windowed font browser from the command line

USAGE:
    fdl-demo [OPTIONS]

OPTIONS:
    --fonts=PATH         fonts.json to load (default: built-in sample catalogue)
    --subsets=PATH       subsets.json to load (default: built-in latin ranges)
    --sample=N           Size of the built-in sample catalogue (default: 2000)
    --query=TEXT         Search query applied after the first paint
    --height=PX          Viewport height in pixels (default: 900)
    --row-height=PX      Row height in pixels (default: 180)
    --overscan=L,T       Rows kept above,below the viewport (default: 10,20)
    --scroll=A,B,...     Scroll offsets to replay, in pixels
    --select=ID[:W,W]    Select a font, optionally only the listed weights
                         (repeatable)
    --help, -h           Show this help message
    --version, -V        Show version

ENVIRONMENT VARIABLES:
    FDL_DEMO_FONTS       Override --fonts
    FDL_DEMO_SUBSETS     Override --subsets
    FDL_DEMO_QUERY       Override --query
    FDL_DEMO_HEIGHT      Override --height
    FDL_DEMO_SCROLL      Override --scroll
    RUST_LOG             Log filter (default: info)";

/// A `--select` entry: a font id and, optionally, explicit weights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectArg {
    pub font_id: String,
    /// `None` keeps the "all weights" default.
    pub weights: Option<Vec<String>>,
}

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq)]
pub struct Opts {
    pub fonts_path: Option<String>,
    pub subsets_path: Option<String>,
    /// Fonts in the generated catalogue when no `--fonts` is given.
    pub sample_size: usize,
    pub query: Option<String>,
    /// Viewport height in pixels.
    pub height: f64,
    pub row_height: f64,
    pub overscan: (usize, usize),
    pub scroll: Vec<f64>,
    pub select: Vec<SelectArg>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ParseError {
    Help,
    Version,
    InvalidValue { flag: &'static str, value: String },
    UnknownArg(String),
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            fonts_path: None,
            subsets_path: None,
            sample_size: 2000,
            query: None,
            height: 900.0,
            row_height: 180.0,
            overscan: (10, 20),
            scroll: Vec::new(),
            select: Vec::new(),
        }
    }
}

impl Opts {
    /// Parse command-line arguments and environment variables.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags.
    pub fn parse() -> Self {
        match Self::parse_from_env_and_args(env::args().skip(1), |key| env::var(key).ok()) {
            Ok(opts) => opts,
            Err(ParseError::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Err(ParseError::Version) => {
                println!("fdl-demo {VERSION}");
                process::exit(0);
            }
            Err(ParseError::InvalidValue { flag, value }) => {
                eprintln!("Invalid {flag} value: {value}");
                process::exit(1);
            }
            Err(ParseError::UnknownArg(arg)) => {
                eprintln!("Unknown argument: {arg}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    fn parse_from_env_and_args<I, S, F>(args: I, get_env: F) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        // Apply environment variable defaults first
        if let Some(val) = get_env("FDL_DEMO_FONTS")
            && !val.trim().is_empty()
        {
            opts.fonts_path = Some(val);
        }
        if let Some(val) = get_env("FDL_DEMO_SUBSETS")
            && !val.trim().is_empty()
        {
            opts.subsets_path = Some(val);
        }
        if let Some(val) = get_env("FDL_DEMO_QUERY") {
            opts.query = Some(val);
        }
        if let Some(val) = get_env("FDL_DEMO_HEIGHT")
            && let Some(px) = parse_extent(&val)
        {
            opts.height = px;
        }
        if let Some(val) = get_env("FDL_DEMO_SCROLL")
            && let Some(offsets) = parse_offsets(&val)
        {
            opts.scroll = offsets;
        }

        // Parse command-line args (override env vars)
        for arg in args {
            let arg = arg.as_ref();
            match arg {
                "--help" | "-h" => return Err(ParseError::Help),
                "--version" | "-V" => return Err(ParseError::Version),
                other => {
                    if let Some(val) = other.strip_prefix("--fonts=") {
                        opts.fonts_path = Some(val.to_string());
                    } else if let Some(val) = other.strip_prefix("--subsets=") {
                        opts.subsets_path = Some(val.to_string());
                    } else if let Some(val) = other.strip_prefix("--sample=") {
                        opts.sample_size = val.parse().map_err(|_| invalid("--sample", val))?;
                    } else if let Some(val) = other.strip_prefix("--query=") {
                        opts.query = Some(val.to_string());
                    } else if let Some(val) = other.strip_prefix("--height=") {
                        opts.height = parse_extent(val).ok_or_else(|| invalid("--height", val))?;
                    } else if let Some(val) = other.strip_prefix("--row-height=") {
                        opts.row_height = parse_extent(val)
                            .filter(|px| *px > 0.0)
                            .ok_or_else(|| invalid("--row-height", val))?;
                    } else if let Some(val) = other.strip_prefix("--overscan=") {
                        opts.overscan =
                            parse_overscan(val).ok_or_else(|| invalid("--overscan", val))?;
                    } else if let Some(val) = other.strip_prefix("--scroll=") {
                        opts.scroll = parse_offsets(val).ok_or_else(|| invalid("--scroll", val))?;
                    } else if let Some(val) = other.strip_prefix("--select=") {
                        opts.select
                            .push(parse_select(val).ok_or_else(|| invalid("--select", val))?);
                    } else {
                        return Err(ParseError::UnknownArg(other.to_string()));
                    }
                }
            }
        }

        Ok(opts)
    }
}

fn invalid(flag: &'static str, value: &str) -> ParseError {
    ParseError::InvalidValue {
        flag,
        value: value.to_string(),
    }
}

/// A finite, non-negative pixel extent.
fn parse_extent(raw: &str) -> Option<f64> {
    let px: f64 = raw.trim().parse().ok()?;
    (px.is_finite() && px >= 0.0).then_some(px)
}

fn parse_offsets(raw: &str) -> Option<Vec<f64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(Vec::new());
    }
    raw.split(',').map(parse_extent).collect()
}

fn parse_overscan(raw: &str) -> Option<(usize, usize)> {
    let (leading, trailing) = raw.trim().split_once(',')?;
    Some((leading.trim().parse().ok()?, trailing.trim().parse().ok()?))
}

fn parse_select(raw: &str) -> Option<SelectArg> {
    let (id, weights) = match raw.split_once(':') {
        Some((id, list)) => {
            let weights: Vec<String> = list
                .split(',')
                .map(str::trim)
                .filter(|w| !w.is_empty())
                .map(str::to_string)
                .collect();
            (id, Some(weights))
        }
        None => (raw, None),
    };
    let id = id.trim();
    if id.is_empty() {
        return None;
    }
    Some(SelectArg {
        font_id: id.to_string(),
        weights,
    })
}
