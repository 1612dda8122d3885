#![forbid(unsafe_code)]

//! Scroll offset to index range math for fixed-extent rows.
//!
//! Everything here is pure: the same inputs always produce the same
//! range, so callers can compare successive results by value and skip
//! work when nothing moved.
//!
//! # Invariants
//!
//! 1. `0 <= start <= end <= total_count` for every accepted input.
//! 2. `end - start <= ceil(container / item) + 1 + leading + trailing`,
//!    independent of `total_count`.
//! 3. Row offsets are `index * item_extent`, never accumulated.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Bad item extent | `<= 0`, NaN or infinite | `PreconditionViolation` |
//! | Bad offset | negative or non-finite | `PreconditionViolation` |
//! | Bad container extent | negative or non-finite | `PreconditionViolation` |
//! | Offset past the end | Scrolled beyond content | Range clamps to `total..total` |

use std::ops::Range;

use crate::error::{Precondition, WindowError};

/// Extra rows materialized outside the visible area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Overscan {
    /// Rows kept above the first visible row.
    pub leading: usize,
    /// Rows kept below the last visible row.
    pub trailing: usize,
}

impl Overscan {
    /// Asymmetric overscan.
    #[must_use]
    pub const fn new(leading: usize, trailing: usize) -> Self {
        Self { leading, trailing }
    }

    /// Same overscan on both sides.
    #[must_use]
    pub const fn uniform(rows: usize) -> Self {
        Self::new(rows, rows)
    }
}

/// Engine configuration fixed for the lifetime of a list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowConfig {
    /// Height of every row in pixels. Constant; variable rows are unsupported.
    pub item_extent: f64,
    /// Overscan applied around the visible rows.
    pub overscan: Overscan,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            item_extent: 180.0,
            overscan: Overscan::new(10, 20),
        }
    }
}

impl WindowConfig {
    /// Set the fixed row extent.
    #[must_use]
    pub fn with_item_extent(mut self, extent: f64) -> Self {
        self.item_extent = extent;
        self
    }

    /// Set the overscan margins.
    #[must_use]
    pub fn with_overscan(mut self, overscan: Overscan) -> Self {
        self.overscan = overscan;
        self
    }

    /// Reject configurations the math cannot work with.
    pub fn validate(&self) -> Result<(), WindowError> {
        check_item_extent(self.item_extent)
    }
}

/// Compute the half-open range of rows to materialize.
///
/// ```
/// use fdl_window::{Overscan, compute_visible_range};
///
/// let range = compute_visible_range(1000, 180.0, 900.0, 3600.0, Overscan::new(10, 20)).unwrap();
/// assert_eq!(range, 10..46);
/// ```
pub fn compute_visible_range(
    total_count: usize,
    item_extent: f64,
    container_extent: f64,
    offset: f64,
    overscan: Overscan,
) -> Result<Range<usize>, WindowError> {
    check_item_extent(item_extent)?;
    check_container_extent(container_extent)?;
    check_offset(offset)?;
    Ok(range_unchecked(
        total_count,
        item_extent,
        container_extent,
        offset,
        overscan,
    ))
}

/// Rows that fit in the container plus one for the partially exposed
/// trailing row.
#[must_use]
pub fn visible_count(item_extent: f64, container_extent: f64) -> usize {
    ((container_extent / item_extent).ceil() as usize).saturating_add(1)
}

fn range_unchecked(
    total_count: usize,
    item_extent: f64,
    container_extent: f64,
    offset: f64,
    overscan: Overscan,
) -> Range<usize> {
    if total_count == 0 {
        return 0..0;
    }
    // `as` saturates, so absurd offsets land on usize::MAX and clamp below.
    let top = (offset / item_extent).floor() as usize;
    let end = top
        .saturating_add(visible_count(item_extent, container_extent))
        .saturating_add(overscan.trailing)
        .min(total_count);
    let start = top.saturating_sub(overscan.leading).min(end);
    start..end
}

pub(crate) fn check_item_extent(extent: f64) -> Result<(), WindowError> {
    if extent.is_finite() && extent > 0.0 {
        Ok(())
    } else {
        Err(Precondition::ItemExtent(extent).into())
    }
}

pub(crate) fn check_offset(offset: f64) -> Result<(), WindowError> {
    if offset.is_finite() && offset >= 0.0 {
        Ok(())
    } else {
        Err(Precondition::Offset(offset).into())
    }
}

pub(crate) fn check_container_extent(extent: f64) -> Result<(), WindowError> {
    if extent.is_finite() && extent >= 0.0 {
        Ok(())
    } else {
        Err(Precondition::ContainerExtent(extent).into())
    }
}

/// Validated viewport geometry: configuration plus the live container
/// extent and scroll offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportModel {
    config: WindowConfig,
    container_extent: f64,
    offset: f64,
}

impl ViewportModel {
    /// Create a model scrolled to the top.
    pub fn new(config: WindowConfig, container_extent: f64) -> Result<Self, WindowError> {
        config.validate()?;
        check_container_extent(container_extent)?;
        Ok(Self {
            config,
            container_extent,
            offset: 0.0,
        })
    }

    #[must_use]
    pub fn config(&self) -> WindowConfig {
        self.config
    }

    #[must_use]
    pub fn item_extent(&self) -> f64 {
        self.config.item_extent
    }

    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    #[must_use]
    pub fn container_extent(&self) -> f64 {
        self.container_extent
    }

    /// Update the scroll offset.
    pub fn set_offset(&mut self, offset: f64) -> Result<(), WindowError> {
        check_offset(offset)?;
        self.offset = offset;
        Ok(())
    }

    /// Update the container extent after a resize.
    pub fn set_container_extent(&mut self, extent: f64) -> Result<(), WindowError> {
        check_container_extent(extent)?;
        self.container_extent = extent;
        Ok(())
    }

    /// Range of rows to materialize for a sequence of `total_count` items.
    #[must_use]
    pub fn visible_range(&self, total_count: usize) -> Range<usize> {
        range_unchecked(
            total_count,
            self.config.item_extent,
            self.container_extent,
            self.offset,
            self.config.overscan,
        )
    }

    /// Upper bound on the window size, whatever the sequence length.
    #[must_use]
    pub fn window_bound(&self) -> usize {
        visible_count(self.config.item_extent, self.container_extent)
            .saturating_add(self.config.overscan.leading)
            .saturating_add(self.config.overscan.trailing)
    }

    /// Pixel offset of a row's leading edge.
    #[must_use]
    pub fn item_offset(&self, index: usize) -> f64 {
        index as f64 * self.config.item_extent
    }

    /// Height of the scroll spacer for `count` rows.
    #[must_use]
    pub fn total_extent(&self, count: usize) -> f64 {
        count as f64 * self.config.item_extent
    }

    /// Largest offset that still fills the container, 0 when content is short.
    #[must_use]
    pub fn max_offset(&self, count: usize) -> f64 {
        (self.total_extent(count) - self.container_extent).max(0.0)
    }
}
