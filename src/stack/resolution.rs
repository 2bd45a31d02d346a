//! Two-phase resolution stack.
//!
//! Frames are pushed onto a stack and resolve in LIFO order. Resolving a
//! frame takes two visits to the top of the stack: the first broadcasts a
//! Before notification, the second runs the effect and broadcasts After.
//! Between the two, any listener may block the frame.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::events::{EventRegistry, Timing};

use super::context::EffectContext;
use super::error::ResolutionError;
use super::frame::{Frame, FrameId, FrameState};

/// The transition performed by one call to [`ResolutionStack::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepOutcome {
    /// The top frame was blocked and removed without running.
    Discarded(FrameId),

    /// The top frame was marked preprocessed and Before was broadcast.
    /// It stays on the stack.
    Preprocessed(FrameId),

    /// The top frame was removed, its effect ran and After was broadcast.
    Resolved(FrameId),
}

impl StepOutcome {
    /// The frame this step acted on.
    #[must_use]
    pub fn frame(self) -> FrameId {
        match self {
            Self::Discarded(id) | Self::Preprocessed(id) | Self::Resolved(id) => id,
        }
    }

    /// The frame's state after this step.
    #[must_use]
    pub fn state(self) -> FrameState {
        match self {
            Self::Discarded(_) => FrameState::Discarded,
            Self::Preprocessed(_) => FrameState::Preprocessed,
            Self::Resolved(_) => FrameState::Resolved,
        }
    }
}

/// Tally of a full resolution run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionReport {
    /// Total calls to `step`.
    pub steps: usize,
    /// Frames that had their Before notification sent.
    pub preprocessed: usize,
    /// Frames whose effect ran.
    pub resolved: usize,
    /// Frames removed because they were blocked.
    pub discarded: usize,
}

impl ResolutionReport {
    /// Count one step.
    pub fn record(&mut self, outcome: StepOutcome) {
        self.steps += 1;
        match outcome {
            StepOutcome::Discarded(_) => self.discarded += 1,
            StepOutcome::Preprocessed(_) => self.preprocessed += 1,
            StepOutcome::Resolved(_) => self.resolved += 1,
        }
    }
}

/// LIFO stack of frames with a block list.
///
/// ## Re-entrancy
///
/// [`step`](Self::step) broadcasts notifications while it runs, and the
/// listeners it calls may push or block frames on this same stack before
/// it returns. Interrupts and chained reactions are built on this. The
/// stack reaches listeners through a [`ListenerContext`](super::ListenerContext)
/// borrow. One stack serves one combat on one thread of control.
pub struct ResolutionStack<W> {
    /// The stack (index 0 = bottom, last = top).
    frames: Vec<Frame<W>>,

    /// IDs blocked while their frame is on the stack. Each entry is
    /// consumed when that frame reaches the top.
    blocked: FxHashSet<FrameId>,

    /// Next frame ID to assign.
    next_id: u32,
}

impl<W> Default for ResolutionStack<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> ResolutionStack<W> {
    /// Create an empty stack. IDs start at 0.
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            blocked: FxHashSet::default(),
            next_id: 0,
        }
    }

    /// Assign the next ID to `frame` and push it on top.
    pub fn push(&mut self, mut frame: Frame<W>) -> FrameId {
        let id = FrameId::new(self.next_id);
        self.next_id += 1;

        frame.assign_id(id);
        debug!(frame = %id, label = frame.label(), kind = %frame.kind(), "pushing frame");
        self.frames.push(frame);
        id
    }

    /// Advance the top frame by one transition.
    ///
    /// Exactly one of the following happens:
    /// 1. The top frame is blocked: it is removed and its block consumed.
    ///    Its effect never runs and no After is broadcast.
    /// 2. The top frame is unprocessed: it is marked preprocessed and a
    ///    Before notification is broadcast. It stays on top, so listeners
    ///    can still block it.
    /// 3. The top frame is preprocessed: it is removed, its effect runs,
    ///    then an After notification is broadcast.
    ///
    /// # Panics
    ///
    /// Panics if the stack is empty. Guard calls with
    /// [`has_frames`](Self::has_frames).
    pub fn step(&mut self, registry: &mut EventRegistry<W>, world: &mut W) -> StepOutcome {
        let Some(top) = self.frames.last_mut() else {
            panic!("ResolutionStack::step called on an empty stack; check has_frames() first");
        };
        let Some(id) = top.id() else {
            unreachable!("frames on the stack always carry an ID");
        };

        if self.blocked.remove(&id) {
            debug!(frame = %id, "removing frame from stack - blocked");
            self.frames.pop();
            return StepOutcome::Discarded(id);
        }

        if !top.is_preprocessed() {
            debug!(frame = %id, "preprocessing frame");
            top.mark_preprocessed();
            let notification = top.notification(Timing::Before);
            registry.broadcast(&notification, self, world);
            return StepOutcome::Preprocessed(id);
        }

        debug!(frame = %id, "running frame");
        let Some(frame) = self.frames.pop() else {
            unreachable!("top frame checked above");
        };
        let notification = frame.notification(Timing::After);
        frame.run(&mut EffectContext::new(self, world));
        registry.broadcast(&notification, self, world);
        StepOutcome::Resolved(id)
    }

    /// Step until the stack is empty.
    ///
    /// With `step_limit`, gives up once that many steps have been taken
    /// and frames remain. Frames already resolved stay resolved.
    pub fn resolve_all(
        &mut self,
        registry: &mut EventRegistry<W>,
        world: &mut W,
        step_limit: Option<usize>,
    ) -> Result<ResolutionReport, ResolutionError> {
        let mut report = ResolutionReport::default();

        while self.has_frames() {
            if let Some(limit) = step_limit {
                if report.steps >= limit {
                    return Err(ResolutionError::StepLimitExceeded {
                        limit,
                        remaining: self.frames.len(),
                    });
                }
            }
            report.record(self.step(registry, world));
        }

        Ok(report)
    }

    /// Block a frame by ID.
    ///
    /// The block is recorded only while a frame with this ID is on the
    /// stack; it is consumed when that frame reaches the top. Blocking an
    /// ID that is not on the stack does nothing, now or later.
    ///
    /// Returns `true` if the frame is on the stack and now blocked.
    pub fn block(&mut self, id: FrameId) -> bool {
        if !self.contains(id) {
            trace!(frame = %id, "ignoring block for frame not on the stack");
            return false;
        }

        if self.blocked.insert(id) {
            debug!(frame = %id, "blocking frame");
        }
        true
    }

    /// Is a block pending for this frame?
    #[must_use]
    pub fn is_blocked(&self, id: FrameId) -> bool {
        self.blocked.contains(&id)
    }

    /// Is a frame with this ID on the stack?
    #[must_use]
    pub fn contains(&self, id: FrameId) -> bool {
        self.frames.iter().any(|f| f.id() == Some(id))
    }

    /// Are there frames left to resolve?
    #[must_use]
    pub fn has_frames(&self) -> bool {
        !self.frames.is_empty()
    }

    /// Number of frames on the stack.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Is the stack empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Peek at the top frame without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&Frame<W>> {
        self.frames.last()
    }

    /// All frames on the stack (bottom to top).
    #[must_use]
    pub fn frames(&self) -> &[Frame<W>] {
        &self.frames
    }

    /// The ID the next pushed frame will receive.
    #[must_use]
    pub fn next_id(&self) -> FrameId {
        FrameId::new(self.next_id)
    }

    /// Drop all frames and blocks and restart IDs at 0.
    ///
    /// Afterwards the stack is indistinguishable from a new one.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl<W> std::fmt::Debug for ResolutionStack<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionStack")
            .field("frames", &self.frames)
            .field("blocked", &self.blocked)
            .field("next_id", &self.next_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    type Log = Vec<String>;

    fn logging_frame(label: &'static str) -> Frame<Log> {
        Frame::<Log>::new(EventKind::Test, label, 0, move |ctx| {
            ctx.world_mut().push(label.to_string())
        })
    }

    #[test]
    fn test_new_stack() {
        let stack: ResolutionStack<()> = ResolutionStack::new();
        assert!(!stack.has_frames());
        assert!(stack.is_empty());
        assert_eq!(stack.next_id(), FrameId::new(0));
        assert!(stack.peek().is_none());
    }

    #[test]
    fn test_push_assigns_sequential_ids() {
        let mut stack: ResolutionStack<()> = ResolutionStack::new();

        let a = stack.push(Frame::marker(EventKind::Test, "a", 0));
        let b = stack.push(Frame::marker(EventKind::Test, "b", 0));

        assert_eq!(a, FrameId::new(0));
        assert_eq!(b, FrameId::new(1));
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.peek().and_then(Frame::id), Some(b));
    }

    #[test]
    fn test_two_phase_step() {
        let mut stack = ResolutionStack::new();
        let mut registry = EventRegistry::new();
        let mut log = Log::new();

        let id = stack.push(logging_frame("effect"));

        let first = stack.step(&mut registry, &mut log);
        assert_eq!(first, StepOutcome::Preprocessed(id));
        assert_eq!(first.state(), FrameState::Preprocessed);
        assert_eq!(stack.len(), 1);
        assert!(stack.peek().is_some_and(Frame::is_preprocessed));
        assert!(log.is_empty());

        let second = stack.step(&mut registry, &mut log);
        assert_eq!(second, StepOutcome::Resolved(id));
        assert!(!stack.has_frames());
        assert_eq!(log, vec!["effect"]);
    }

    #[test]
    fn test_lifo_order() {
        let mut stack = ResolutionStack::new();
        let mut registry = EventRegistry::new();
        let mut log = Log::new();

        stack.push(logging_frame("first"));
        stack.push(logging_frame("second"));
        stack.push(logging_frame("third"));

        let report = stack.resolve_all(&mut registry, &mut log, None).unwrap();

        assert_eq!(log, vec!["third", "second", "first"]);
        assert_eq!(report.steps, 6);
        assert_eq!(report.resolved, 3);
        assert_eq!(report.discarded, 0);
    }

    #[test]
    fn test_block_before_preprocess_discards() {
        let mut stack = ResolutionStack::new();
        let mut registry = EventRegistry::new();
        let mut log = Log::new();

        let id = stack.push(logging_frame("blocked"));
        assert!(stack.block(id));
        assert!(stack.is_blocked(id));

        assert_eq!(stack.step(&mut registry, &mut log), StepOutcome::Discarded(id));
        assert!(!stack.has_frames());
        assert!(!stack.is_blocked(id));
        assert!(log.is_empty());
    }

    #[test]
    fn test_block_after_preprocess_discards() {
        let mut stack = ResolutionStack::new();
        let mut registry = EventRegistry::new();
        let mut log = Log::new();

        let id = stack.push(logging_frame("blocked"));
        stack.step(&mut registry, &mut log);
        stack.block(id);

        assert_eq!(stack.step(&mut registry, &mut log), StepOutcome::Discarded(id));
        assert!(log.is_empty());
    }

    #[test]
    fn test_block_unknown_id_is_ignored() {
        let mut stack: ResolutionStack<Log> = ResolutionStack::new();

        assert!(!stack.block(FrameId::new(0)));
        assert!(!stack.is_blocked(FrameId::new(0)));

        // The future frame 0 is unaffected.
        let id = stack.push(logging_frame("later"));
        assert_eq!(id, FrameId::new(0));
        assert!(!stack.is_blocked(id));
    }

    #[test]
    fn test_block_below_top_waits_for_top() {
        let mut stack = ResolutionStack::new();
        let mut registry = EventRegistry::new();
        let mut log = Log::new();

        let bottom = stack.push(logging_frame("bottom"));
        stack.push(logging_frame("top"));
        stack.block(bottom);

        stack.resolve_all(&mut registry, &mut log, None).unwrap();

        assert_eq!(log, vec!["top"]);
    }

    #[test]
    fn test_block_is_idempotent() {
        let mut stack: ResolutionStack<Log> = ResolutionStack::new();
        let id = stack.push(logging_frame("x"));

        assert!(stack.block(id));
        assert!(stack.block(id));

        let mut registry = EventRegistry::new();
        let mut log = Log::new();
        let report = stack.resolve_all(&mut registry, &mut log, None).unwrap();
        assert_eq!(report.discarded, 1);
        assert_eq!(report.steps, 1);
    }

    #[test]
    fn test_effect_pushes_nested_frame() {
        let mut stack: ResolutionStack<Log> = ResolutionStack::new();
        let mut registry = EventRegistry::new();
        let mut log = Log::new();

        stack.push(Frame::<Log>::new(EventKind::Attack, "attack", 0, |ctx| {
            ctx.world_mut().push("attack".to_string());
            ctx.push(Frame::<Log>::new(EventKind::DealDamage, "damage", 3, |ctx| {
                ctx.world_mut().push("damage".to_string());
            }));
        }));

        let report = stack.resolve_all(&mut registry, &mut log, None).unwrap();

        assert_eq!(log, vec!["attack", "damage"]);
        assert_eq!(report.resolved, 2);
        assert_eq!(stack.next_id(), FrameId::new(2));
    }

    #[test]
    fn test_step_limit() {
        let mut stack = ResolutionStack::new();
        let mut registry = EventRegistry::new();
        let mut log = Log::new();

        stack.push(logging_frame("a"));
        stack.push(logging_frame("b"));

        let err = stack.resolve_all(&mut registry, &mut log, Some(3)).unwrap_err();
        assert_eq!(err, ResolutionError::StepLimitExceeded { limit: 3, remaining: 1 });
        assert_eq!(log, vec!["b"]);
    }

    #[test]
    #[should_panic(expected = "empty stack")]
    fn test_step_on_empty_stack_panics() {
        let mut stack: ResolutionStack<()> = ResolutionStack::new();
        let mut registry = EventRegistry::new();
        stack.step(&mut registry, &mut ());
    }

    #[test]
    fn test_reset() {
        let mut stack: ResolutionStack<Log> = ResolutionStack::new();
        stack.push(logging_frame("a"));
        let b = stack.push(logging_frame("b"));
        stack.block(b);

        stack.reset();

        assert!(!stack.has_frames());
        assert!(!stack.is_blocked(b));
        assert_eq!(stack.push(logging_frame("c")), FrameId::new(0));
    }

    #[test]
    fn test_step_outcome_frame() {
        assert_eq!(StepOutcome::Resolved(FrameId::new(4)).frame(), FrameId::new(4));
        assert_eq!(StepOutcome::Discarded(FrameId::new(1)).state(), FrameState::Discarded);
    }
}
