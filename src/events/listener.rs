//! Listeners: callbacks attached to one (timing, kind) slot.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::stack::ListenerContext;

use super::event::Notification;

/// Unique identifier for a registered listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ListenerId(pub u32);

impl ListenerId {
    /// Create a new listener ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Listener({})", self.0)
    }
}

/// Boxed listener callback.
///
/// Runs synchronously inside `ResolutionStack::step`. Through the context
/// it may block frames, push new frames, or mutate the world.
pub type Callback<W> = Box<dyn FnMut(&Notification, &mut ListenerContext<'_, W>)>;

/// A registered callback.
pub struct Listener<W> {
    id: ListenerId,
    name: String,
    callback: Callback<W>,
}

impl<W> Listener<W> {
    pub(crate) fn new<F>(id: ListenerId, name: impl Into<String>, callback: F) -> Self
    where
        F: FnMut(&Notification, &mut ListenerContext<'_, W>) + 'static,
    {
        Self {
            id,
            name: name.into(),
            callback: Box::new(callback),
        }
    }

    /// The listener's ID.
    #[must_use]
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Human-readable name (for debugging).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Deliver a notification to this listener.
    pub fn notify(&mut self, notification: &Notification, ctx: &mut ListenerContext<'_, W>) {
        trace!(
            listener = %self.id,
            name = %self.name,
            event = %notification,
            "listener heard event"
        );
        (self.callback)(notification, ctx);
    }
}

impl<W> std::fmt::Debug for Listener<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listener")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// The dispatch point for one (timing, kind) pair.
///
/// Fans a notification out to every attached listener in registration
/// order.
pub struct DispatchPoint<W> {
    listeners: Vec<Listener<W>>,
}

impl<W> Default for DispatchPoint<W> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }
}

impl<W> DispatchPoint<W> {
    /// Attach a listener at the end of the dispatch order.
    pub fn attach(&mut self, listener: Listener<W>) {
        self.listeners.push(listener);
    }

    /// Detach a listener. Returns `true` if it was attached here.
    pub fn detach(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    /// Notify every listener in registration order.
    pub fn dispatch(&mut self, notification: &Notification, ctx: &mut ListenerContext<'_, W>) {
        for listener in &mut self.listeners {
            listener.notify(notification, ctx);
        }
    }

    /// Number of attached listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Does this dispatch point have no listeners?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Iterate attached listeners in dispatch order.
    pub fn iter(&self) -> impl Iterator<Item = &Listener<W>> {
        self.listeners.iter()
    }
}

impl<W> std::fmt::Debug for DispatchPoint<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.listeners.iter()).finish()
    }
}
