//! Combat collaborators: the state frames act on.
//!
//! - [`Resource`]: bounded pools (HP, GS, armor, shield)
//! - [`Attribute`] / [`Buff`]: stats with sequential buff chains
//! - [`Combatant`] / [`Arena`]: characters built from [`CombatantConfig`]
//! - [`CombatEffect`]: data-described changes, wrapped into frames
//! - [`Skill`] / [`BasicAttack`]: definitions that push frames
//!
//! ## Example Usage
//!
//! ```
//! use combat_stack::combat::{
//!     Arena, AttributeKind, BasicAttack, CombatantConfig, ResourceKind, Skill,
//! };
//! use combat_stack::core::CombatSession;
//! use combat_stack::events::{EventKind, Timing};
//!
//! let mut arena = Arena::new();
//! let orc = arena.spawn(&CombatantConfig::orc().with_attribute(AttributeKind::WeaponDamage, 5));
//! let dummy = arena.spawn(&CombatantConfig::orc());
//!
//! let mut session = CombatSession::new(arena);
//!
//! // Parry: cancel the damage part of the first attack only.
//! let mut parries = 1;
//! session.register(Timing::Before, EventKind::DealDamage, "parry", move |n, ctx| {
//!     if parries > 0 {
//!         parries -= 1;
//!         ctx.block(n.frame);
//!     }
//! });
//!
//! for _ in 0..2 {
//!     let (arena, stack) = session.split_mut();
//!     BasicAttack::new().activate(arena, orc, dummy, stack).unwrap();
//!     session.resolve_all().unwrap();
//! }
//!
//! // One hit parried, one landed; both attacks were paid for.
//! assert_eq!(session.world().get(dummy).unwrap().current(ResourceKind::Hp), 27);
//! assert_eq!(session.world().get(orc).unwrap().current(ResourceKind::Gs), 10);
//! ```

mod attribute;
mod combatant;
mod effect;
mod error;
mod resource;
mod skill;

pub use attribute::{Attribute, AttributeKind, Buff, BuffId};
pub use combatant::{Arena, Combatant, CombatantConfig, CombatantId};
pub use effect::CombatEffect;
pub use error::{ResourceError, SkillError};
pub use resource::{PoolConfig, Resource, ResourceKind};
pub use skill::{BasicAttack, Skill};
