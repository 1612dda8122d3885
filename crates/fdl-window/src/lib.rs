#![forbid(unsafe_code)]

//! Windowed rendering of long, reorderable lists with fixed-extent rows.
//!
//! Only the rows under the viewport (plus overscan) are ever materialized.
//! Rows are keyed by item identity rather than position, so re-filtering
//! or re-sorting the sequence keeps surviving rows, and whatever state the
//! host attached to them, intact.
//!
//! # Core Types
//!
//! - [`ViewportModel`] / [`compute_visible_range`] - pure offset to range math
//! - [`ItemIdentity`] - position-independent item keys
//! - [`WindowReconciler`] - create / reposition / destroy against a [`RowRenderer`]
//! - [`ScrollController`] - subscription lifecycle and the recompute pipeline
//! - [`Signal`] / [`ViewportEvents`] - host-side scroll and resize notifications
//!
//! # Example
//!
//! ```
//! use fdl_window::{RowRenderer, ScrollController, ViewportEvents, WindowConfig};
//!
//! struct Labels;
//!
//! impl RowRenderer<String> for Labels {
//!     type Handle = String;
//!
//!     fn create(&mut self, item: &String, index: usize, _offset: f64) -> String {
//!         format!("{index}: {item}")
//!     }
//! }
//!
//! let events = ViewportEvents::new();
//! let mut list = ScrollController::new(
//!     WindowConfig::default(),
//!     900.0,
//!     |name: &String| name.clone(),
//!     Labels,
//! )
//! .unwrap();
//! list.set_items((0..1000).map(|i| format!("font-{i}")).collect()).unwrap();
//! list.attach(&events).unwrap();
//! assert_eq!(list.range(), 0..26);
//!
//! events.scrolled(3600.0);
//! assert_eq!(list.range(), 10..46);
//! ```

pub mod controller;
pub mod error;
pub mod identity;
pub mod reconcile;
pub mod signal;
pub mod viewport;

pub use controller::{PassOutcome, ScrollController};
pub use error::{Precondition, WindowError};
pub use identity::{ItemIdentity, SelfKeyed};
pub use reconcile::{EditSummary, MaterializedRow, RowRenderer, WindowReconciler};
pub use signal::{Signal, Subscription, ViewportEvents};
pub use viewport::{Overscan, ViewportModel, WindowConfig, compute_visible_range, visible_count};
