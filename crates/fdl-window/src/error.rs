//! Error taxonomy for the windowing engine.
//!
//! | Error | Cause | Recovery |
//! |-------|-------|----------|
//! | [`WindowError::PreconditionViolation`] | Caller passed impossible geometry | Fix the caller |
//! | [`WindowError::DuplicateIdentity`] | Two windowed items share a key | Fix the host data |
//! | [`WindowError::DetachedControllerUse`] | Controller used while detached | Re-attach first |
//!
//! Empty sequences, empty ranges and filters with no matches are not
//! errors; they produce an empty window.

use std::fmt;

/// Which precondition a caller broke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Precondition {
    /// Item extent must be finite and strictly positive.
    ItemExtent(f64),
    /// Scroll offset must be finite and non-negative.
    Offset(f64),
    /// Container extent must be finite and non-negative.
    ContainerExtent(f64),
    /// A range handed to the reconciler reaches past the sequence.
    RangeOutOfBounds { end: usize, len: usize },
}

impl fmt::Display for Precondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ItemExtent(v) => write!(f, "item extent must be > 0, got {v}"),
            Self::Offset(v) => write!(f, "scroll offset must be >= 0, got {v}"),
            Self::ContainerExtent(v) => write!(f, "container extent must be >= 0, got {v}"),
            Self::RangeOutOfBounds { end, len } => {
                write!(f, "range end {end} exceeds sequence length {len}")
            }
        }
    }
}

/// Errors from viewport math, reconciliation and controller lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowError {
    /// The call was made with inputs outside the engine's contract.
    PreconditionViolation(Precondition),
    /// Two items inside one computed range produced the same identity key.
    DuplicateIdentity {
        /// Debug rendering of the colliding key.
        key: String,
        /// Sequence index of the first item with this key.
        first_index: usize,
        /// Sequence index of the colliding item.
        second_index: usize,
    },
    /// The controller was driven while not attached.
    DetachedControllerUse,
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PreconditionViolation(p) => write!(f, "precondition violated: {p}"),
            Self::DuplicateIdentity {
                key,
                first_index,
                second_index,
            } => write!(
                f,
                "duplicate identity {key} at indices {first_index} and {second_index}"
            ),
            Self::DetachedControllerUse => write!(f, "scroll controller used while detached"),
        }
    }
}

impl std::error::Error for WindowError {}

impl From<Precondition> for WindowError {
    fn from(p: Precondition) -> Self {
        Self::PreconditionViolation(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = WindowError::from(Precondition::ItemExtent(0.0));
        assert_eq!(
            err.to_string(),
            "precondition violated: item extent must be > 0, got 0"
        );

        let dup = WindowError::DuplicateIdentity {
            key: "\"inter\"".into(),
            first_index: 3,
            second_index: 7,
        };
        assert_eq!(
            dup.to_string(),
            "duplicate identity \"inter\" at indices 3 and 7"
        );

        assert_eq!(
            WindowError::DetachedControllerUse.to_string(),
            "scroll controller used while detached"
        );
    }

    #[test]
    fn range_precondition_message() {
        let p = Precondition::RangeOutOfBounds { end: 12, len: 10 };
        assert_eq!(p.to_string(), "range end 12 exceeds sequence length 10");
    }
}
