//! Event registry.
//!
//! The registry owns one dispatch point for every (timing, kind) pair.
//! Every pair is populated at construction, so lookups never fail and no
//! pairs are inserted afterwards.

use strum::{EnumCount, IntoEnumIterator};
use tracing::{debug, trace};

use crate::stack::{ListenerContext, ResolutionStack};

use super::event::{EventKind, Notification, Timing};
use super::listener::{DispatchPoint, Listener, ListenerId};

/// Slot index for a (timing, kind) pair.
const fn slot(timing: Timing, kind: EventKind) -> usize {
    timing as usize * EventKind::COUNT + kind as usize
}

/// Registry of listeners keyed by (timing, kind).
///
/// Listeners on one slot are notified in registration order. There is no
/// priority system.
pub struct EventRegistry<W> {
    /// One dispatch point per (timing, kind), indexed by [`slot`].
    slots: Vec<DispatchPoint<W>>,

    /// Next listener ID to allocate.
    next_id: u32,
}

impl<W> Default for EventRegistry<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> EventRegistry<W> {
    /// Create a registry with an empty dispatch point for every pair.
    pub fn new() -> Self {
        let mut slots = Vec::with_capacity(Timing::COUNT * EventKind::COUNT);
        for timing in Timing::iter() {
            for kind in EventKind::iter() {
                debug_assert_eq!(slots.len(), slot(timing, kind));
                slots.push(DispatchPoint::default());
            }
        }

        Self { slots, next_id: 0 }
    }

    /// Attach a callback to the (timing, kind) slot, returns its ID.
    ///
    /// Several callbacks may share a slot; they run in the order they were
    /// registered.
    pub fn register<F>(
        &mut self,
        timing: Timing,
        kind: EventKind,
        name: impl Into<String>,
        callback: F,
    ) -> ListenerId
    where
        F: FnMut(&Notification, &mut ListenerContext<'_, W>) + 'static,
    {
        let id = ListenerId::new(self.next_id);
        self.next_id += 1;

        let listener = Listener::new(id, name, callback);
        debug!(listener = %id, name = listener.name(), %timing, %kind, "registering listener");
        self.slots[slot(timing, kind)].attach(listener);
        id
    }

    /// Remove a listener from whichever slot holds it.
    ///
    /// Returns `true` if the listener was registered.
    pub fn unregister(&mut self, id: ListenerId) -> bool {
        let removed = self.slots.iter_mut().any(|point| point.detach(id));
        if removed {
            debug!(listener = %id, "unregistered listener");
        }
        removed
    }

    /// The dispatch point for a (timing, kind) pair.
    #[must_use]
    pub fn dispatch_point(&self, timing: Timing, kind: EventKind) -> &DispatchPoint<W> {
        &self.slots[slot(timing, kind)]
    }

    /// Number of listeners attached to a (timing, kind) pair.
    #[must_use]
    pub fn listener_count(&self, timing: Timing, kind: EventKind) -> usize {
        self.dispatch_point(timing, kind).len()
    }

    /// Broadcast a notification to every listener on its slot.
    ///
    /// Listeners run synchronously in registration order and receive a
    /// context over `stack` and `world`, so they can block the pending
    /// frame, push reactions, or mutate game state before this returns.
    pub fn broadcast(
        &mut self,
        notification: &Notification,
        stack: &mut ResolutionStack<W>,
        world: &mut W,
    ) {
        let point = &mut self.slots[slot(notification.timing, notification.kind)];
        trace!(event = %notification, listeners = point.len(), "broadcasting");

        let mut ctx = ListenerContext::new(stack, world);
        point.dispatch(notification, &mut ctx);
    }

    /// Total number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().map(DispatchPoint::len).sum()
    }

    /// Are there no listeners at all?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(DispatchPoint::is_empty)
    }

    /// Drop every listener and restart listener IDs.
    ///
    /// Afterwards the registry is indistinguishable from a new one.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl<W> std::fmt::Debug for EventRegistry<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRegistry")
            .field("listeners", &self.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
