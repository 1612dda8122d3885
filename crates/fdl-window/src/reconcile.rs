#![forbid(unsafe_code)]

//! Identity-keyed reconciliation of the materialized window.
//!
//! [`WindowReconciler`] owns the rows currently on screen. Each pass takes
//! the full item sequence plus a range over it, works out which keys left,
//! which arrived and which moved, and applies that script through a
//! [`RowRenderer`]:
//!
//! 1. destroys, in ascending previous index,
//! 2. repositions of retained rows whose index changed,
//! 3. creates, in ascending new index.
//!
//! # Invariants
//!
//! 1. After a successful pass the window's keys are exactly the keys of
//!    `items[range]`, each once.
//! 2. A retained key keeps its handle; `create` is never called for it.
//! 3. `offset == index * item_extent` for every row.
//! 4. Work is O(previous window + new window), never O(items).
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Duplicate key in range | Host identity not unique | `DuplicateIdentity`, window untouched |
//! | Range past sequence end | Stale range | `PreconditionViolation`, window untouched |
//! | Renderer panics | Host bug | Propagates; window may be partially applied |

use std::ops::Range;

use rustc_hash::FxHashMap;

use crate::error::{Precondition, WindowError};
use crate::identity::ItemIdentity;
use crate::viewport::check_item_extent;

/// Host side of the render boundary.
///
/// `create` runs exactly once per key entering the window. The other hooks
/// default to no-ops for hosts that position rows themselves from
/// [`MaterializedRow::offset`].
pub trait RowRenderer<T: ?Sized> {
    /// Whatever the host produces for a row.
    type Handle;

    fn create(&mut self, item: &T, index: usize, offset: f64) -> Self::Handle;

    /// A retained row moved to a new index.
    fn reposition(&mut self, _handle: &mut Self::Handle, _index: usize, _offset: f64) {}

    /// A row left the window. The handle is consumed.
    fn destroy(&mut self, _handle: Self::Handle) {}
}

/// One row of the materialized window.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterializedRow<H> {
    /// Host handle, reused for as long as the key stays windowed.
    pub handle: H,
    /// Current index in the item sequence.
    pub index: usize,
    /// Pixel offset, always `index * item_extent`.
    pub offset: f64,
}

/// Counts from one reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditSummary {
    pub created: usize,
    pub repositioned: usize,
    pub destroyed: usize,
    /// Rows kept, whether or not they moved.
    pub retained: usize,
}

impl EditSummary {
    /// True when the pass changed nothing on screen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.created == 0 && self.repositioned == 0 && self.destroyed == 0
    }
}

/// Owner of the materialized window.
#[derive(Debug)]
pub struct WindowReconciler<K, H> {
    rows: FxHashMap<K, MaterializedRow<H>>,
    /// Window keys in index order, rebuilt each pass.
    order: Vec<K>,
    range: Range<usize>,
    item_extent: f64,
}

impl<K, H> WindowReconciler<K, H>
where
    K: Clone + Eq + std::hash::Hash + std::fmt::Debug,
{
    /// Create an empty window for rows of `item_extent` pixels.
    pub fn new(item_extent: f64) -> Result<Self, WindowError> {
        check_item_extent(item_extent)?;
        Ok(Self {
            rows: FxHashMap::default(),
            order: Vec::new(),
            range: 0..0,
            item_extent,
        })
    }

    #[must_use]
    pub fn item_extent(&self) -> f64 {
        self.item_extent
    }

    /// Range applied by the last successful pass.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.rows.contains_key(key)
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<&MaterializedRow<H>> {
        self.rows.get(key)
    }

    /// Mutable access to a row's handle, for in-row transient state.
    pub fn handle_mut(&mut self, key: &K) -> Option<&mut H> {
        self.rows.get_mut(key).map(|row| &mut row.handle)
    }

    /// Window keys in ascending index order.
    #[must_use]
    pub fn keys(&self) -> &[K] {
        &self.order
    }

    /// Rows in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &MaterializedRow<H>)> + '_ {
        self.order
            .iter()
            .filter_map(move |key| self.rows.get_key_value(key))
    }

    /// Bring the window in line with `items[range]`.
    pub fn reconcile<T, I, R>(
        &mut self,
        items: &[T],
        range: Range<usize>,
        identity: &I,
        renderer: &mut R,
    ) -> Result<EditSummary, WindowError>
    where
        I: ItemIdentity<T, Key = K> + ?Sized,
        R: RowRenderer<T, Handle = H> + ?Sized,
    {
        if range.end > items.len() {
            return Err(Precondition::RangeOutOfBounds {
                end: range.end,
                len: items.len(),
            }
            .into());
        }
        let range = range.start.min(range.end)..range.end;

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "window_reconcile",
            start = range.start,
            end = range.end,
            items = items.len(),
            previous = self.rows.len()
        )
        .entered();

        // Keys first, so a collision leaves the previous window intact.
        let mut wanted: FxHashMap<K, usize> = FxHashMap::default();
        wanted.reserve(range.len());
        let mut order = Vec::with_capacity(range.len());
        for index in range.clone() {
            let key = identity.identity_of(&items[index]);
            if let Some(&first_index) = wanted.get(&key) {
                return Err(WindowError::DuplicateIdentity {
                    key: format!("{key:?}"),
                    first_index,
                    second_index: index,
                });
            }
            wanted.insert(key.clone(), index);
            order.push(key);
        }

        let mut summary = EditSummary::default();

        let mut leaving: Vec<(usize, K)> = self
            .rows
            .iter()
            .filter(|(key, _)| !wanted.contains_key(*key))
            .map(|(key, row)| (row.index, key.clone()))
            .collect();
        leaving.sort_unstable_by_key(|(index, _)| *index);
        for (_, key) in leaving {
            if let Some(row) = self.rows.remove(&key) {
                renderer.destroy(row.handle);
                summary.destroyed += 1;
            }
        }

        for key in &order {
            let index = wanted[key];
            if let Some(row) = self.rows.get_mut(key) {
                summary.retained += 1;
                if row.index != index {
                    row.index = index;
                    row.offset = index as f64 * self.item_extent;
                    renderer.reposition(&mut row.handle, index, row.offset);
                    summary.repositioned += 1;
                }
            }
        }

        for key in &order {
            if self.rows.contains_key(key) {
                continue;
            }
            let index = wanted[key];
            let offset = index as f64 * self.item_extent;
            let handle = renderer.create(&items[index], index, offset);
            self.rows.insert(
                key.clone(),
                MaterializedRow {
                    handle,
                    index,
                    offset,
                },
            );
            summary.created += 1;
        }

        self.order = order;
        self.range = range;

        #[cfg(feature = "tracing")]
        tracing::trace!(
            created = summary.created,
            repositioned = summary.repositioned,
            destroyed = summary.destroyed,
            "window reconciled"
        );

        Ok(summary)
    }

    /// Destroy every row, in index order.
    pub fn clear<T, R>(&mut self, renderer: &mut R) -> usize
    where
        R: RowRenderer<T, Handle = H> + ?Sized,
        T: ?Sized,
    {
        let mut destroyed = 0;
        for key in std::mem::take(&mut self.order) {
            if let Some(row) = self.rows.remove(&key) {
                renderer.destroy(row.handle);
                destroyed += 1;
            }
        }
        self.rows.clear();
        self.range = 0..0;
        destroyed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Handle carrying a serial so tests can tell instances apart.
    #[derive(Debug, Clone, PartialEq)]
    struct Handle {
        serial: usize,
        label: &'static str,
        moves: usize,
    }

    #[derive(Default)]
    struct Recorder {
        next: usize,
        log: Vec<String>,
    }

    impl RowRenderer<&'static str> for Recorder {
        type Handle = Handle;

        fn create(&mut self, item: &&'static str, index: usize, _offset: f64) -> Handle {
            self.next += 1;
            self.log.push(format!("create {item}@{index}"));
            Handle {
                serial: self.next,
                label: item,
                moves: 0,
            }
        }

        fn reposition(&mut self, handle: &mut Handle, index: usize, _offset: f64) {
            handle.moves += 1;
            self.log.push(format!("move {}@{index}", handle.label));
        }

        fn destroy(&mut self, handle: Handle) {
            self.log.push(format!("destroy {}", handle.label));
        }
    }

    fn ident(item: &&'static str) -> &'static str {
        item
    }

    fn window() -> WindowReconciler<&'static str, Handle> {
        WindowReconciler::new(10.0).unwrap()
    }

    #[test]
    fn first_pass_creates_range() {
        let items = ["a", "b", "c", "d"];
        let mut win = window();
        let mut r = Recorder::default();
        let summary = win.reconcile(&items, 1..3, &ident, &mut r).unwrap();
        assert_eq!(summary.created, 2);
        assert_eq!(win.keys(), &["b", "c"]);
        assert_eq!(win.get(&"c").unwrap().offset, 20.0);
        assert_eq!(r.log, vec!["create b@1", "create c@2"]);
    }

    #[test]
    fn scrolling_keeps_overlap() {
        let items = ["a", "b", "c", "d", "e"];
        let mut win = window();
        let mut r = Recorder::default();
        win.reconcile(&items, 0..3, &ident, &mut r).unwrap();
        let serial_c = win.get(&"c").unwrap().handle.serial;
        r.log.clear();

        let summary = win.reconcile(&items, 2..5, &ident, &mut r).unwrap();
        assert_eq!(
            summary,
            EditSummary {
                created: 2,
                repositioned: 0,
                destroyed: 2,
                retained: 1,
            }
        );
        assert_eq!(win.get(&"c").unwrap().handle.serial, serial_c);
        assert_eq!(
            r.log,
            vec!["destroy a", "destroy b", "create d@3", "create e@4"]
        );
    }

    #[test]
    fn reorder_repositions_without_recreating() {
        let mut win = window();
        let mut r = Recorder::default();
        win.reconcile(&["a", "b", "c"], 0..3, &ident, &mut r).unwrap();
        let before: Vec<usize> = ["a", "b", "c"]
            .iter()
            .map(|k| win.get(k).unwrap().handle.serial)
            .collect();
        r.log.clear();

        let summary = win.reconcile(&["c", "a", "b"], 0..3, &ident, &mut r).unwrap();
        assert_eq!(summary.created, 0);
        assert_eq!(summary.destroyed, 0);
        assert_eq!(summary.repositioned, 3);
        let after: Vec<usize> = ["a", "b", "c"]
            .iter()
            .map(|k| win.get(k).unwrap().handle.serial)
            .collect();
        assert_eq!(before, after);
        assert_eq!(win.keys(), &["c", "a", "b"]);
        assert_eq!(win.get(&"c").unwrap().offset, 0.0);
        assert_eq!(win.get(&"b").unwrap().offset, 20.0);
        assert_eq!(win.get(&"a").unwrap().handle.moves, 1);
    }

    #[test]
    fn unchanged_pass_is_empty() {
        let items = ["a", "b"];
        let mut win = window();
        let mut r = Recorder::default();
        win.reconcile(&items, 0..2, &ident, &mut r).unwrap();
        let summary = win.reconcile(&items, 0..2, &ident, &mut r).unwrap();
        assert!(summary.is_empty());
        assert_eq!(summary.retained, 2);
    }

    #[test]
    fn destroy_runs_before_create() {
        let mut win = window();
        let mut r = Recorder::default();
        win.reconcile(&["a", "b"], 0..2, &ident, &mut r).unwrap();
        r.log.clear();
        win.reconcile(&["x", "b"], 0..2, &ident, &mut r).unwrap();
        assert_eq!(r.log, vec!["destroy a", "create x@0"]);
    }

    #[test]
    fn duplicate_key_leaves_window_intact() {
        let mut win = window();
        let mut r = Recorder::default();
        win.reconcile(&["a", "b"], 0..2, &ident, &mut r).unwrap();
        r.log.clear();

        let err = win
            .reconcile(&["c", "d", "c"], 0..3, &ident, &mut r)
            .unwrap_err();
        assert_eq!(
            err,
            WindowError::DuplicateIdentity {
                key: "\"c\"".into(),
                first_index: 0,
                second_index: 2,
            }
        );
        assert!(r.log.is_empty());
        assert_eq!(win.keys(), &["a", "b"]);
    }

    #[test]
    fn duplicates_outside_range_are_ignored() {
        let mut win = window();
        let mut r = Recorder::default();
        let summary = win
            .reconcile(&["a", "b", "a"], 0..2, &ident, &mut r)
            .unwrap();
        assert_eq!(summary.created, 2);
    }

    #[test]
    fn range_past_end_is_rejected() {
        let mut win = window();
        let mut r = Recorder::default();
        let err = win.reconcile(&["a"], 0..2, &ident, &mut r).unwrap_err();
        assert_eq!(
            err,
            WindowError::PreconditionViolation(Precondition::RangeOutOfBounds { end: 2, len: 1 })
        );
    }

    #[test]
    fn empty_range_clears_window() {
        let mut win = window();
        let mut r = Recorder::default();
        win.reconcile(&["a", "b"], 0..2, &ident, &mut r).unwrap();
        let summary = win.reconcile::<&str, _, _>(&[], 0..0, &ident, &mut r).unwrap();
        assert_eq!(summary.destroyed, 2);
        assert!(win.is_empty());
    }

    #[test]
    fn clear_destroys_in_index_order() {
        let mut win = window();
        let mut r = Recorder::default();
        win.reconcile(&["a", "b", "c"], 0..3, &ident, &mut r).unwrap();
        r.log.clear();
        assert_eq!(win.clear::<&str, _>(&mut r), 3);
        assert_eq!(r.log, vec!["destroy a", "destroy b", "destroy c"]);
        assert_eq!(win.range(), 0..0);
    }

    #[test]
    fn iter_follows_index_order() {
        let mut win = window();
        let mut r = Recorder::default();
        win.reconcile(&["z", "y", "x"], 0..3, &ident, &mut r).unwrap();
        let indices: Vec<usize> = win.iter().map(|(_, row)| row.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn handle_mut_state_survives_scroll() {
        let items = ["a", "b", "c", "d"];
        let mut win = window();
        let mut r = Recorder::default();
        win.reconcile(&items, 0..3, &ident, &mut r).unwrap();
        win.handle_mut(&"b").unwrap().label = "b (open)";
        win.reconcile(&items, 1..4, &ident, &mut r).unwrap();
        assert_eq!(win.get(&"b").unwrap().handle.label, "b (open)");
    }

    #[test]
    fn rejects_bad_extent() {
        assert!(WindowReconciler::<u32, ()>::new(0.0).is_err());
    }
}
