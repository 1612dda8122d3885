#![forbid(unsafe_code)]

use std::fmt;

use crate::download::Axis;

/// Errors raised while editing or resolving a download selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The value is not one the font offers on that axis.
    UnknownVariant {
        font: String,
        axis: Axis,
        value: String,
    },
    /// A selected font id has no descriptor in the catalogue.
    UnknownFont(String),
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownVariant { font, axis, value } => {
                write!(f, "font '{font}' has no {axis} '{value}'")
            }
            Self::UnknownFont(id) => write!(f, "unknown font '{id}'"),
        }
    }
}

impl std::error::Error for SelectionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_axis_and_value() {
        let err = SelectionError::UnknownVariant {
            font: "inter".into(),
            axis: Axis::Weight,
            value: "950".into(),
        };
        assert_eq!(err.to_string(), "font 'inter' has no weight '950'");
        assert_eq!(
            SelectionError::UnknownFont("nope".into()).to_string(),
            "unknown font 'nope'"
        );
    }
}
