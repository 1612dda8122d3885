#![forbid(unsafe_code)]

//! Host-driven notification channels for scroll and resize ticks.
//!
//! A [`Signal<E>`] is the host's side of an event source: the host calls
//! [`Signal::emit`] from its scroll or resize handler and every live
//! subscriber runs synchronously, in registration order. Subscribing
//! returns a [`Subscription`] guard; dropping the guard is the only way to
//! unsubscribe, which ties listener lifetime to whoever holds the guard.
//!
//! # Invariants
//!
//! 1. Subscribers run in registration order.
//! 2. A dropped [`Subscription`] is never called again.
//! 3. Dead entries are pruned on the next emit.
//!
//! # Failure Modes
//!
//! - **Re-entrant subscribe**: subscribing from inside a callback is fine;
//!   the new subscriber first runs on the following emit.
//! - **Re-entrant emit**: emitting from inside a callback recurses; the
//!   callback must tolerate that or avoid it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Listener<E> = Rc<dyn Fn(&E)>;
type WeakListener<E> = Weak<dyn Fn(&E)>;

/// A single-threaded broadcast channel.
///
/// Cloning yields another handle onto the same subscriber list.
pub struct Signal<E> {
    listeners: Rc<RefCell<Vec<WeakListener<E>>>>,
}

impl<E> Clone for Signal<E> {
    fn clone(&self) -> Self {
        Self {
            listeners: Rc::clone(&self.listeners),
        }
    }
}

impl<E> Default for Signal<E> {
    fn default() -> Self {
        Self {
            listeners: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl<E> std::fmt::Debug for Signal<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}

impl<E: 'static> Signal<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback. It stays registered while the returned guard lives.
    pub fn subscribe(&self, callback: impl Fn(&E) + 'static) -> Subscription {
        let strong: Listener<E> = Rc::new(callback);
        self.listeners.borrow_mut().push(Rc::downgrade(&strong));
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Deliver `event` to every live subscriber.
    pub fn emit(&self, event: &E) {
        // Upgrade outside the callbacks so they may subscribe freely.
        let live: Vec<Listener<E>> = {
            let mut listeners = self.listeners.borrow_mut();
            listeners.retain(|w| w.strong_count() > 0);
            listeners.iter().filter_map(Weak::upgrade).collect()
        };
        for listener in &live {
            listener(event);
        }
    }

    /// Live subscribers right now.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }
}

/// RAII guard for a [`Signal`] subscription.
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

/// The two notification streams a scroll container produces.
#[derive(Debug, Clone, Default)]
pub struct ViewportEvents {
    /// New scroll offset in pixels.
    pub scroll: Signal<f64>,
    /// New container extent in pixels.
    pub resize: Signal<f64>,
}

impl ViewportEvents {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scrolled(&self, offset: f64) {
        self.scroll.emit(&offset);
    }

    pub fn resized(&self, container_extent: f64) {
        self.resize.emit(&container_extent);
    }

    /// Live listeners across both streams.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.scroll.live_count() + self.resize.live_count()
    }
}
