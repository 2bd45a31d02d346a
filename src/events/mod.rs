//! Event broadcast system.
//!
//! Listeners attach to a (timing, kind) slot of the [`EventRegistry`].
//! When the resolution stack preprocesses or runs a frame it broadcasts a
//! [`Notification`] to the matching slot.
//!
//! ## Key Components
//!
//! - [`EventKind`]: Closed set of combat action categories
//! - [`Timing`]: Before or After a frame's effect
//! - [`Notification`]: What a listener receives
//! - [`Listener`]: A named callback attached to one slot
//! - [`EventRegistry`]: Pre-populated table of dispatch points
//!
//! ## Example Usage
//!
//! ```
//! use combat_stack::events::{EventKind, EventRegistry, Timing};
//! use combat_stack::stack::{Frame, ResolutionStack};
//!
//! // World state here is just a counter.
//! let mut registry: EventRegistry<i64> = EventRegistry::new();
//!
//! // "After taking damage, regain 1"
//! registry.register(Timing::After, EventKind::Test, "regen", |_, ctx| {
//!     *ctx.world_mut() += 1;
//! });
//!
//! let mut stack: ResolutionStack<i64> = ResolutionStack::new();
//! stack.push(Frame::<i64>::new(EventKind::Test, "hit", 2, |ctx| *ctx.world_mut() -= 2));
//!
//! let mut hp = 10;
//! while stack.has_frames() {
//!     stack.step(&mut registry, &mut hp);
//! }
//! assert_eq!(hp, 9);
//! ```

mod event;
mod listener;
mod registry;

pub use event::{EventKind, Notification, Timing};
pub use listener::{Callback, DispatchPoint, Listener, ListenerId};
pub use registry::EventRegistry;
