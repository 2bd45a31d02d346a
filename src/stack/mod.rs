//! Resolution stack.
//!
//! Actions are pushed as deferred [`Frame`]s and resolved in LIFO order
//! by repeatedly calling [`ResolutionStack::step`]. Each frame takes two
//! steps to resolve:
//!
//! 1. **Preprocess**: broadcast a Before notification. The frame stays on
//!    top, so a listener can block it.
//! 2. **Run**: pop the frame, run its effect, broadcast After.
//!
//! A blocked frame is discarded the next time it reaches the top, without
//! running and without an After notification. Effects may push frames of
//! their own ("Attack" pushing "DealDamage"); those resolve completely
//! before the frame below them.
//!
//! ## Example Usage
//!
//! ```
//! use combat_stack::events::{EventKind, EventRegistry, Timing};
//! use combat_stack::stack::{Frame, ResolutionStack};
//!
//! let mut registry: EventRegistry<i64> = EventRegistry::new();
//! let mut stack: ResolutionStack<i64> = ResolutionStack::new();
//!
//! // A counter: cancel any Test action before it happens.
//! registry.register(Timing::Before, EventKind::Test, "counter", |n, ctx| {
//!     ctx.block(n.frame);
//! });
//!
//! stack.push(Frame::<i64>::new(EventKind::Test, "drain", 2, |ctx| *ctx.world_mut() -= 2));
//!
//! let mut hp = 10;
//! let report = stack.resolve_all(&mut registry, &mut hp, None).unwrap();
//! assert_eq!(hp, 10);
//! assert_eq!(report.discarded, 1);
//! ```

mod context;
mod error;
mod frame;
mod resolution;

pub use context::{EffectContext, ListenerContext};
pub use error::ResolutionError;
pub use frame::{Effect, Frame, FrameId, FrameState};
pub use resolution::{ResolutionReport, ResolutionStack, StepOutcome};
