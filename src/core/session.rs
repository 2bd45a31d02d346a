//! Combat sessions.
//!
//! A session owns one resolution stack, one event registry and the world
//! state they act on. Every independent combat (or test) gets its own
//! session; nothing is global.

use tracing::warn;

use crate::events::{EventKind, EventRegistry, ListenerId, Notification, Timing};
use crate::stack::{
    Frame, FrameId, ListenerContext, ResolutionError, ResolutionReport, ResolutionStack,
    StepOutcome,
};

use super::config::SessionConfig;

/// One combat's stack, registry and world.
///
/// ```
/// use combat_stack::core::CombatSession;
/// use combat_stack::events::{EventKind, Timing};
/// use combat_stack::stack::Frame;
///
/// let mut session = CombatSession::new(20_i64);
/// session.register(Timing::After, EventKind::DealDamage, "lifesteal", |n, ctx| {
///     *ctx.world_mut() += n.value / 2;
/// });
/// session.push(Frame::<i64>::new(EventKind::DealDamage, "hit", 6, |ctx| *ctx.world_mut() -= 6));
///
/// session.resolve_all().unwrap();
/// assert_eq!(*session.world(), 17);
/// ```
pub struct CombatSession<W> {
    stack: ResolutionStack<W>,
    registry: EventRegistry<W>,
    world: W,
    config: SessionConfig,
}

impl<W> CombatSession<W> {
    /// Start a session with the default configuration.
    pub fn new(world: W) -> Self {
        Self::with_config(world, SessionConfig::default())
    }

    /// Start a session with an explicit configuration.
    pub fn with_config(world: W, config: SessionConfig) -> Self {
        Self {
            stack: ResolutionStack::new(),
            registry: EventRegistry::new(),
            world,
            config,
        }
    }

    /// Push a frame onto the stack.
    pub fn push(&mut self, frame: Frame<W>) -> FrameId {
        self.stack.push(frame)
    }

    /// Register a listener.
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
        self.registry.register(timing, kind, name, callback)
    }

    /// Remove a listener.
    pub fn unregister(&mut self, id: ListenerId) -> bool {
        self.registry.unregister(id)
    }

    /// Block a frame that is on the stack.
    pub fn block(&mut self, id: FrameId) -> bool {
        self.stack.block(id)
    }

    /// Are there frames left to resolve?
    #[must_use]
    pub fn has_frames(&self) -> bool {
        self.stack.has_frames()
    }

    /// Advance the stack by one transition.
    ///
    /// # Panics
    ///
    /// Panics if the stack is empty.
    pub fn step(&mut self) -> StepOutcome {
        self.stack.step(&mut self.registry, &mut self.world)
    }

    /// Step until the stack is empty or the configured step limit is hit.
    pub fn resolve_all(&mut self) -> Result<ResolutionReport, ResolutionError> {
        let result = self
            .stack
            .resolve_all(&mut self.registry, &mut self.world, self.config.step_limit);

        if let Err(ref err) = result {
            warn!(%err, "resolution stopped early");
        }
        result
    }

    /// The world state.
    #[must_use]
    pub fn world(&self) -> &W {
        &self.world
    }

    /// Mutable world state.
    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    /// The resolution stack.
    #[must_use]
    pub fn stack(&self) -> &ResolutionStack<W> {
        &self.stack
    }

    /// Mutable resolution stack.
    pub fn stack_mut(&mut self) -> &mut ResolutionStack<W> {
        &mut self.stack
    }

    /// Borrow the world and the stack together, e.g. to activate a skill.
    pub fn split_mut(&mut self) -> (&mut W, &mut ResolutionStack<W>) {
        (&mut self.world, &mut self.stack)
    }

    /// The event registry.
    #[must_use]
    pub fn registry(&self) -> &EventRegistry<W> {
        &self.registry
    }

    /// The session configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Discard the stack and every listener. The world is kept.
    pub fn reset(&mut self) {
        self.stack.reset();
        self.registry.reset();
    }

    /// End the session, returning the world.
    pub fn into_world(self) -> W {
        self.world
    }
}

impl<W: std::fmt::Debug> std::fmt::Debug for CombatSession<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombatSession")
            .field("stack", &self.stack)
            .field("registry", &self.registry)
            .field("world", &self.world)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_empty() {
        let session = CombatSession::new(0_i64);
        assert!(!session.has_frames());
        assert!(session.registry().is_empty());
        assert_eq!(session.config(), &SessionConfig::default());
    }

    #[test]
    fn test_step_by_step() {
        let mut session = CombatSession::new(10_i64);
        let id = session.push(Frame::<i64>::new(EventKind::Test, "drain", 2, |ctx| {
            *ctx.world_mut() -= 2
        }));

        assert_eq!(session.step(), StepOutcome::Preprocessed(id));
        assert_eq!(*session.world(), 10);
        assert_eq!(session.step(), StepOutcome::Resolved(id));
        assert_eq!(*session.world(), 8);
        assert!(!session.has_frames());
    }

    #[test]
    fn test_step_limit_from_config() {
        let config = SessionConfig::new().with_step_limit(10);
        let mut session = CombatSession::with_config(0_u32, config);

        // Every After pushes another frame: never terminates on its own.
        fn tick() -> Frame<u32> {
            Frame::new(EventKind::TurnTick, "tick", 0, |ctx| *ctx.world_mut() += 1)
        }
        session.register(Timing::After, EventKind::TurnTick, "echo", |_, ctx| {
            ctx.push(tick());
        });
        session.push(tick());

        let err = session.resolve_all().unwrap_err();
        assert_eq!(err, ResolutionError::StepLimitExceeded { limit: 10, remaining: 1 });
        assert_eq!(*session.world(), 5);
    }

    #[test]
    fn test_split_mut() {
        let mut session = CombatSession::new(3_i64);
        let (world, stack) = session.split_mut();
        let value = *world;
        stack.push(Frame::marker(EventKind::Test, "split", value));

        assert_eq!(session.stack().peek().map(Frame::value), Some(3));
    }

    #[test]
    fn test_reset_keeps_world() {
        let mut session = CombatSession::new(vec![1, 2, 3]);
        session.register(Timing::Before, EventKind::Test, "noop", |_, _| {});
        session.push(Frame::marker(EventKind::Test, "pending", 0));

        session.reset();

        assert!(!session.has_frames());
        assert!(session.registry().is_empty());
        assert_eq!(session.stack().next_id(), FrameId::new(0));
        assert_eq!(session.into_world(), vec![1, 2, 3]);
    }
}
