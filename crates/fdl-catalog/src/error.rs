#![forbid(unsafe_code)]

use fdl_select::SelectionError;
use fdl_window::WindowError;

/// Errors from loading the catalogue or building downloads from it.
#[derive(Debug)]
pub enum CatalogError {
    /// A catalogue document was not valid JSON of the expected shape.
    Parse {
        document: &'static str,
        source: serde_json::Error,
    },
    /// Two fonts share an id.
    DuplicateFont(String),
    /// A font references a subset with no unicode range entry.
    UnknownSubset { font: String, subset: String },
    /// No font with this id.
    UnknownFont(String),
    Selection(SelectionError),
    Window(WindowError),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse { document, source } => write!(f, "invalid {document}: {source}"),
            Self::DuplicateFont(id) => write!(f, "duplicate font id '{id}'"),
            Self::UnknownSubset { font, subset } => {
                write!(f, "font '{font}' references unknown subset '{subset}'")
            }
            Self::UnknownFont(id) => write!(f, "unknown font '{id}'"),
            Self::Selection(err) => write!(f, "selection: {err}"),
            Self::Window(err) => write!(f, "window: {err}"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse { source, .. } => Some(source),
            Self::Selection(err) => Some(err),
            Self::Window(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SelectionError> for CatalogError {
    fn from(err: SelectionError) -> Self {
        Self::Selection(err)
    }
}

impl From<WindowError> for CatalogError {
    fn from(err: WindowError) -> Self {
        Self::Window(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn parse_error_keeps_source() {
        let source = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err = CatalogError::Parse {
            document: "fonts.json",
            source,
        };
        assert!(err.to_string().starts_with("invalid fonts.json: "));
        assert!(err.source().is_some());
    }

    #[test]
    fn wraps_selection_errors() {
        let err: CatalogError = SelectionError::UnknownFont("x".into()).into();
        assert_eq!(err.to_string(), "selection: unknown font 'x'");
    }

    #[test]
    fn unknown_subset_message() {
        let err = CatalogError::UnknownSubset {
            font: "inter".into(),
            subset: "klingon".into(),
        };
        assert_eq!(
            err.to_string(),
            "font 'inter' references unknown subset 'klingon'"
        );
        assert!(err.source().is_none());
    }
}
