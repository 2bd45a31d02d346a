//! # combat-stack
//!
//! A two-phase event-resolution stack for turn-based combat.
//!
//! ## Design Principles
//!
//! 1. **Deferred Actions**: Skills never act directly. They push frames;
//!    the stack decides when (and whether) the frame's effect runs.
//!
//! 2. **Two Phases**: Every frame is announced (Before) while still on the
//!    stack, then run and announced again (After). Reactions to the Before
//!    notification can cancel the action.
//!
//! 3. **No Globals**: A [`CombatSession`] owns its stack, its registry and
//!    the world they act on. Independent sessions never share state.
//!
//! ## Architecture
//!
//! - **Split Ownership**: The stack and the registry are separate values.
//!   While listeners run, they reach the stack through a context borrow,
//!   so pushing and blocking from inside a callback needs no locking.
//!
//! - **Generic World**: Frames and listeners are generic over the world
//!   state `W`. The `combat` module provides one such world ([`Arena`]).
//!
//! ## Modules
//!
//! - `core`: Sessions, configuration, dice
//! - `events`: Event kinds, notifications, listeners, registry
//! - `stack`: Frames and the resolution stack
//! - `combat`: Combatants, resources, attributes, effects, skills

pub mod combat;
pub mod core;
pub mod events;
pub mod stack;

// Re-export commonly used types
pub use crate::core::{CombatSession, DiceRoller, SessionConfig, DEFAULT_STEP_LIMIT};

pub use crate::events::{EventKind, EventRegistry, Listener, ListenerId, Notification, Timing};

pub use crate::stack::{
    EffectContext, Frame, FrameId, FrameState, ListenerContext, ResolutionError,
    ResolutionReport, ResolutionStack, StepOutcome,
};

pub use crate::combat::{
    Arena, Attribute, AttributeKind, BasicAttack, Buff, CombatEffect, Combatant,
    CombatantConfig, CombatantId, Resource, ResourceError, ResourceKind, Skill, SkillError,
};
