//! Capability handles passed into effects and listeners.
//!
//! Both borrow the stack and the world for the duration of one call.
//! [`EffectContext`] can only queue frames; [`ListenerContext`] can also
//! block them. Neither can broadcast, so an effect never re-enters the
//! notification path.

use super::frame::{Frame, FrameId};
use super::resolution::ResolutionStack;

/// Handle given to a frame's effect while it runs.
pub struct EffectContext<'a, W> {
    stack: &'a mut ResolutionStack<W>,
    world: &'a mut W,
}

impl<'a, W> EffectContext<'a, W> {
    pub(crate) fn new(stack: &'a mut ResolutionStack<W>, world: &'a mut W) -> Self {
        Self { stack, world }
    }

    /// Read the world.
    #[must_use]
    pub fn world(&self) -> &W {
        &*self.world
    }

    /// Mutate the world.
    pub fn world_mut(&mut self) -> &mut W {
        &mut *self.world
    }

    /// Queue a follow-up frame. It resolves before anything below it.
    pub fn push(&mut self, frame: Frame<W>) -> FrameId {
        self.stack.push(frame)
    }
}

/// Handle given to a listener while a notification is dispatched.
pub struct ListenerContext<'a, W> {
    stack: &'a mut ResolutionStack<W>,
    world: &'a mut W,
}

impl<'a, W> ListenerContext<'a, W> {
    pub(crate) fn new(stack: &'a mut ResolutionStack<W>, world: &'a mut W) -> Self {
        Self { stack, world }
    }

    /// Read the world.
    #[must_use]
    pub fn world(&self) -> &W {
        &*self.world
    }

    /// Mutate the world.
    pub fn world_mut(&mut self) -> &mut W {
        &mut *self.world
    }

    /// Read-only view of the stack.
    #[must_use]
    pub fn stack(&self) -> &ResolutionStack<W> {
        &*self.stack
    }

    /// Queue a reaction frame.
    pub fn push(&mut self, frame: Frame<W>) -> FrameId {
        self.stack.push(frame)
    }

    /// Block a frame that is still on the stack.
    ///
    /// Returns `true` if the block was recorded.
    pub fn block(&mut self, id: FrameId) -> bool {
        self.stack.block(id)
    }
}
