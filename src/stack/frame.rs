//! Frames: deferred units of combat action.

use serde::{Deserialize, Serialize};

use crate::events::{EventKind, Notification, Timing};

use super::context::EffectContext;

/// Stack-assigned frame identifier.
///
/// Assigned once at push time, monotonically increasing, never reused
/// within the lifetime of one stack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FrameId(pub u32);

impl FrameId {
    /// Create a new frame ID.
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

impl std::fmt::Display for FrameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Frame({})", self.0)
    }
}

/// Lifecycle state of a frame.
///
/// `Unprocessed -> Preprocessed -> Resolved`, or `Discarded` from either
/// of the first two when the frame was blocked. There is no way back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameState {
    Unprocessed,
    Preprocessed,
    Resolved,
    Discarded,
}

/// Effect procedure run once when a frame resolves.
///
/// Effects mutate the world and may queue further frames; they cannot
/// block frames or broadcast.
pub type Effect<W> = Box<dyn FnOnce(&mut EffectContext<'_, W>)>;

/// One pending or in-flight action.
pub struct Frame<W> {
    id: Option<FrameId>,
    label: String,
    value: i64,
    kind: EventKind,
    effect: Option<Effect<W>>,
    state: FrameState,
}

impl<W> Frame<W> {
    /// Create an unprocessed frame with an effect.
    pub fn new<F>(kind: EventKind, label: impl Into<String>, value: i64, effect: F) -> Self
    where
        F: FnOnce(&mut EffectContext<'_, W>) + 'static,
    {
        Self {
            id: None,
            label: label.into(),
            value,
            kind,
            effect: Some(Box::new(effect)),
            state: FrameState::Unprocessed,
        }
    }

    /// Create a frame with no effect.
    ///
    /// Still broadcasts Before and After notifications, so listeners can
    /// react to it.
    pub fn marker(kind: EventKind, label: impl Into<String>, value: i64) -> Self {
        Self {
            id: None,
            label: label.into(),
            value,
            kind,
            effect: None,
            state: FrameState::Unprocessed,
        }
    }

    /// The stack-assigned ID, `None` until pushed.
    #[must_use]
    pub fn id(&self) -> Option<FrameId> {
        self.id
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Numeric payload.
    #[must_use]
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Action category.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> FrameState {
        self.state
    }

    /// Has the Before notification been sent?
    #[must_use]
    pub fn is_preprocessed(&self) -> bool {
        self.state == FrameState::Preprocessed
    }

    /// Build a notification describing this frame.
    ///
    /// Unpushed frames report `Frame(0)`; the stack only broadcasts for
    /// pushed frames.
    #[must_use]
    pub fn notification(&self, timing: Timing) -> Notification {
        Notification::new(
            timing,
            self.kind,
            self.id.unwrap_or_default(),
            self.label.clone(),
            self.value,
        )
    }

    pub(crate) fn assign_id(&mut self, id: FrameId) {
        debug_assert!(self.id.is_none(), "frame {} pushed twice", id);
        self.id = Some(id);
    }

    pub(crate) fn mark_preprocessed(&mut self) {
        debug_assert_eq!(self.state, FrameState::Unprocessed);
        self.state = FrameState::Preprocessed;
    }

    /// Run the effect, consuming the frame.
    pub(crate) fn run(self, ctx: &mut EffectContext<'_, W>) {
        debug_assert_eq!(self.state, FrameState::Preprocessed);
        if let Some(effect) = self.effect {
            effect(ctx);
        }
    }
}

impl<W> std::fmt::Debug for Frame<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("value", &self.value)
            .field("kind", &self.kind)
            .field("state", &self.state)
            .field("has_effect", &self.effect.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::ResolutionStack;

    #[test]
    fn test_frame_id() {
        let id = FrameId::new(5);
        assert_eq!(id.raw(), 5);
        assert_eq!(format!("{}", id), "Frame(5)");
    }

    #[test]
    fn test_new_frame_is_unprocessed() {
        let frame: Frame<()> = Frame::new(EventKind::Attack, "Basic Attack", 3, |_| {});

        assert_eq!(frame.id(), None);
        assert_eq!(frame.kind(), EventKind::Attack);
        assert_eq!(frame.label(), "Basic Attack");
        assert_eq!(frame.value(), 3);
        assert_eq!(frame.state(), FrameState::Unprocessed);
        assert!(!frame.is_preprocessed());
    }

    #[test]
    fn test_notification_carries_frame_data() {
        let mut frame: Frame<()> = Frame::marker(EventKind::DealDamage, "hit", 4);
        frame.assign_id(FrameId::new(9));

        let n = frame.notification(Timing::After);
        assert_eq!(n.timing, Timing::After);
        assert_eq!(n.kind, EventKind::DealDamage);
        assert_eq!(n.frame, FrameId::new(9));
        assert_eq!(n.label, "hit");
        assert_eq!(n.value, 4);
    }

    #[test]
    fn test_run_executes_effect_once() {
        let mut frame = Frame::<i64>::new(EventKind::Test, "drain", 2, |ctx| *ctx.world_mut() -= 2);
        frame.assign_id(FrameId::new(0));
        frame.mark_preprocessed();
        assert!(frame.is_preprocessed());

        let mut stack = ResolutionStack::new();
        let mut hp = 10;
        frame.run(&mut EffectContext::new(&mut stack, &mut hp));
        assert_eq!(hp, 8);
    }
}
