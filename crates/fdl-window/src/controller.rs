#![forbid(unsafe_code)]

//! Scroll observation loop tying geometry, data and the window together.
//!
//! [`ScrollController`] is the only piece of the engine that holds
//! subscriptions. Every trigger (a scroll tick, a resize, a new item
//! sequence) goes through the same pass:
//!
//! 1. update the viewport or the sequence,
//! 2. compute the range with [`ViewportModel::visible_range`],
//! 3. if the range or the sequence changed since the last applied pass,
//!    reconcile; otherwise skip.
//!
//! # Lifecycle
//!
//! ```text
//! Idle --attach--> Attached --detach--> Detached --attach--> Attached
//! ```
//!
//! While idle the host may stage items and geometry; nothing is rendered.
//! Attaching subscribes to the [`ViewportEvents`] and renders at offset 0.
//! Detaching drops the subscriptions and destroys every row. Driving the
//! controller while not attached returns
//! [`WindowError::DetachedControllerUse`].
//!
//! # Failure Modes
//!
//! - **Errors inside notifications**: a callback has nowhere to return an
//!   error, so it is kept for [`ScrollController::take_error`].
//! - **Rejected passes**: a failed `set_items` or `attach` leaves the
//!   sequence, the lifecycle and the subscriptions as they were.
//! - **Re-entrancy**: calling back into the controller from a
//!   [`RowRenderer`] hook panics on the interior `RefCell` borrow.

use std::cell::RefCell;
use std::ops::Range;
use std::rc::{Rc, Weak};

use crate::error::WindowError;
use crate::identity::ItemIdentity;
use crate::reconcile::{EditSummary, MaterializedRow, RowRenderer, WindowReconciler};
use crate::signal::{Subscription, ViewportEvents};
use crate::viewport::{ViewportModel, WindowConfig};

/// What a pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    /// Same range over the same sequence; nothing to do.
    Skipped,
    /// The window was reconciled.
    Applied(EditSummary),
}

impl PassOutcome {
    #[must_use]
    pub fn summary(&self) -> Option<EditSummary> {
        match self {
            Self::Skipped => None,
            Self::Applied(summary) => Some(*summary),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Idle,
    Attached,
    Detached,
}

/// Stamp of the last applied pass, compared by value.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Applied {
    range: Range<usize>,
    generation: u64,
}

struct ControllerState<T, I, R>
where
    I: ItemIdentity<T>,
    R: RowRenderer<T>,
{
    viewport: ViewportModel,
    items: Vec<T>,
    /// Bumped on every new sequence.
    generation: u64,
    identity: I,
    renderer: R,
    window: WindowReconciler<I::Key, R::Handle>,
    applied: Option<Applied>,
    lifecycle: Lifecycle,
    last_error: Option<WindowError>,
}

impl<T, I, R> ControllerState<T, I, R>
where
    I: ItemIdentity<T>,
    R: RowRenderer<T>,
{
    fn ensure_attached(&self) -> Result<(), WindowError> {
        match self.lifecycle {
            Lifecycle::Attached => Ok(()),
            Lifecycle::Idle | Lifecycle::Detached => Err(WindowError::DetachedControllerUse),
        }
    }

    fn pass(&mut self) -> Result<PassOutcome, WindowError> {
        let range = self.viewport.visible_range(self.items.len());
        let stamp = Applied {
            range: range.clone(),
            generation: self.generation,
        };
        if self.applied.as_ref() == Some(&stamp) {
            return Ok(PassOutcome::Skipped);
        }
        let summary =
            self.window
                .reconcile(&self.items, range, &self.identity, &mut self.renderer)?;
        self.applied = Some(stamp);
        Ok(PassOutcome::Applied(summary))
    }

    fn scroll_to(&mut self, offset: f64) -> Result<PassOutcome, WindowError> {
        self.ensure_attached()?;
        self.viewport.set_offset(offset)?;
        self.pass()
    }

    fn resize(&mut self, container_extent: f64) -> Result<PassOutcome, WindowError> {
        match self.lifecycle {
            Lifecycle::Idle => {
                self.viewport.set_container_extent(container_extent)?;
                Ok(PassOutcome::Skipped)
            }
            Lifecycle::Attached => {
                self.viewport.set_container_extent(container_extent)?;
                self.pass()
            }
            Lifecycle::Detached => Err(WindowError::DetachedControllerUse),
        }
    }

    fn set_items(&mut self, items: Vec<T>) -> Result<PassOutcome, WindowError> {
        if self.lifecycle == Lifecycle::Detached {
            return Err(WindowError::DetachedControllerUse);
        }
        let previous = std::mem::replace(&mut self.items, items);
        let generation = self.generation;
        self.generation = generation.wrapping_add(1);
        if self.lifecycle == Lifecycle::Idle {
            return Ok(PassOutcome::Skipped);
        }
        // On rejection the accepted sequence stays current.
        self.pass().inspect_err(|_| {
            self.items = previous;
            self.generation = generation;
        })
    }

    /// Entry point for notification callbacks.
    fn absorb(&mut self, result: Result<PassOutcome, WindowError>) {
        if let Err(err) = result {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %err, "window pass failed during notification");
            self.last_error = Some(err);
        }
    }
}

/// Drives a [`WindowReconciler`] from scroll, resize and data changes.
pub struct ScrollController<T, I, R>
where
    I: ItemIdentity<T>,
    R: RowRenderer<T>,
{
    state: Rc<RefCell<ControllerState<T, I, R>>>,
    subscriptions: Vec<Subscription>,
}

impl<T, I, R> std::fmt::Debug for ScrollController<T, I, R>
where
    I: ItemIdentity<T>,
    R: RowRenderer<T>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ScrollController")
            .field("lifecycle", &state.lifecycle)
            .field("viewport", &state.viewport)
            .field("items", &state.items.len())
            .field("window", &state.window.range())
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

impl<T, I, R> ScrollController<T, I, R>
where
    T: 'static,
    I: ItemIdentity<T> + 'static,
    R: RowRenderer<T> + 'static,
{
    /// Create an idle controller with an empty sequence.
    pub fn new(
        config: WindowConfig,
        container_extent: f64,
        identity: I,
        renderer: R,
    ) -> Result<Self, WindowError> {
        let viewport = ViewportModel::new(config, container_extent)?;
        let window = WindowReconciler::new(config.item_extent)?;
        Ok(Self {
            state: Rc::new(RefCell::new(ControllerState {
                viewport,
                items: Vec::new(),
                generation: 0,
                identity,
                renderer,
                window,
                applied: None,
                lifecycle: Lifecycle::Idle,
                last_error: None,
            })),
            subscriptions: Vec::new(),
        })
    }

    /// Subscribe to `events` and render the top of the list.
    ///
    /// Attaching while attached moves the subscriptions to `events` and
    /// scrolls back to the top.
    pub fn attach(&mut self, events: &ViewportEvents) -> Result<PassOutcome, WindowError> {
        let outcome = {
            let mut state = self.state.borrow_mut();
            let (lifecycle, viewport, applied) =
                (state.lifecycle, state.viewport, state.applied.take());
            state.lifecycle = Lifecycle::Attached;
            let outcome = state.viewport.set_offset(0.0).and_then(|()| state.pass());
            if outcome.is_err() {
                state.lifecycle = lifecycle;
                state.viewport = viewport;
                state.applied = applied;
            }
            #[cfg(feature = "tracing")]
            tracing::debug!(
                items = state.items.len(),
                container = state.viewport.container_extent(),
                ok = outcome.is_ok(),
                "scroll controller attach"
            );
            outcome?
        };

        let weak = Rc::downgrade(&self.state);
        self.subscriptions = vec![
            events
                .scroll
                .subscribe(on_event(weak.clone(), ControllerState::scroll_to)),
            events.resize.subscribe(on_event(weak, ControllerState::resize)),
        ];
        Ok(outcome)
    }

    /// Release subscriptions and destroy every materialized row.
    ///
    /// Returns how many rows were destroyed.
    pub fn detach(&mut self) -> Result<usize, WindowError> {
        let mut state = self.state.borrow_mut();
        state.ensure_attached()?;
        self.subscriptions.clear();

        let ControllerState {
            window, renderer, ..
        } = &mut *state;
        let destroyed = window.clear::<T, R>(renderer);
        state.applied = None;
        state.lifecycle = Lifecycle::Detached;

        #[cfg(feature = "tracing")]
        tracing::debug!(destroyed, "scroll controller detached");

        Ok(destroyed)
    }

    /// Apply a scroll offset directly, as a scroll notification would.
    pub fn scroll_to(&self, offset: f64) -> Result<PassOutcome, WindowError> {
        self.state.borrow_mut().scroll_to(offset)
    }

    /// Apply a container resize directly, as a resize notification would.
    pub fn resize(&self, container_extent: f64) -> Result<PassOutcome, WindowError> {
        self.state.borrow_mut().resize(container_extent)
    }

    /// Replace the item sequence (new data, new filter, new sort).
    ///
    /// Always reconciles when attached, even if the range is unchanged.
    pub fn set_items(&self, items: Vec<T>) -> Result<PassOutcome, WindowError> {
        self.state.borrow_mut().set_items(items)
    }

    /// Error raised during the last failing notification, if any.
    pub fn take_error(&self) -> Option<WindowError> {
        self.state.borrow_mut().last_error.take()
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.state.borrow().lifecycle == Lifecycle::Attached
    }

    /// Live subscriptions held by this controller.
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    #[must_use]
    pub fn viewport(&self) -> ViewportModel {
        self.state.borrow().viewport
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.state.borrow().items.len()
    }

    /// Height of the scroll spacer for the current sequence.
    #[must_use]
    pub fn total_extent(&self) -> f64 {
        let state = self.state.borrow();
        state.viewport.total_extent(state.items.len())
    }

    /// Range currently materialized.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.state.borrow().window.range()
    }

    /// Windowed keys in index order.
    #[must_use]
    pub fn keys(&self) -> Vec<I::Key> {
        self.state.borrow().window.keys().to_vec()
    }

    /// Index and offset of a windowed row.
    #[must_use]
    pub fn position_of(&self, key: &I::Key) -> Option<(usize, f64)> {
        self.state
            .borrow()
            .window
            .get(key)
            .map(|row| (row.index, row.offset))
    }

    /// Read a windowed row.
    pub fn with_row<Out>(
        &self,
        key: &I::Key,
        f: impl FnOnce(&MaterializedRow<R::Handle>) -> Out,
    ) -> Option<Out> {
        self.state.borrow().window.get(key).map(f)
    }

    /// Mutate a windowed row's handle, e.g. to open an in-row popover.
    pub fn with_handle_mut<Out>(
        &self,
        key: &I::Key,
        f: impl FnOnce(&mut R::Handle) -> Out,
    ) -> Option<Out> {
        self.state.borrow_mut().window.handle_mut(key).map(f)
    }

    /// Visit rows in index order.
    pub fn for_each_row(&self, mut f: impl FnMut(&I::Key, &MaterializedRow<R::Handle>)) {
        let state = self.state.borrow();
        for (key, row) in state.window.iter() {
            f(key, row);
        }
    }

    /// Access the renderer, e.g. to flush or inspect host output.
    pub fn with_renderer<Out>(&self, f: impl FnOnce(&mut R) -> Out) -> Out {
        f(&mut self.state.borrow_mut().renderer)
    }

    /// Read the current sequence.
    pub fn with_items<Out>(&self, f: impl FnOnce(&[T]) -> Out) -> Out {
        f(&self.state.borrow().items)
    }
}

fn on_event<T, I, R>(
    state: Weak<RefCell<ControllerState<T, I, R>>>,
    apply: fn(&mut ControllerState<T, I, R>, f64) -> Result<PassOutcome, WindowError>,
) -> impl Fn(&f64) + 'static
where
    T: 'static,
    I: ItemIdentity<T> + 'static,
    R: RowRenderer<T> + 'static,
{
    move |value: &f64| {
        if let Some(state) = state.upgrade() {
            let mut state = state.borrow_mut();
            let result = apply(&mut state, *value);
            state.absorb(result);
        }
    }
}
