//! Combat effects as data.
//!
//! A frame built from a [`CombatEffect`] carries a description of what it
//! does and touches only the combatant it names.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::events::EventKind;
use crate::stack::Frame;

use super::combatant::{Arena, CombatantId};
use super::resource::ResourceKind;

/// An atomic change to one combatant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEffect {
    /// Take HP, bottoming out at zero.
    Damage { target: CombatantId, amount: i64 },

    /// Take from a pool only if it covers the amount.
    Spend {
        target: CombatantId,
        resource: ResourceKind,
        amount: i64,
    },

    /// Refill a pool up to its maximum.
    Restore {
        target: CombatantId,
        resource: ResourceKind,
        amount: i64,
    },
}

impl CombatEffect {
    /// Shorthand for [`CombatEffect::Damage`].
    pub fn damage(target: CombatantId, amount: i64) -> Self {
        Self::Damage { target, amount }
    }

    /// Shorthand for [`CombatEffect::Spend`].
    pub fn spend(target: CombatantId, resource: ResourceKind, amount: i64) -> Self {
        Self::Spend { target, resource, amount }
    }

    /// Shorthand for [`CombatEffect::Restore`].
    pub fn restore(target: CombatantId, resource: ResourceKind, amount: i64) -> Self {
        Self::Restore { target, resource, amount }
    }

    /// The combatant this effect touches.
    #[must_use]
    pub fn target(&self) -> CombatantId {
        match self {
            Self::Damage { target, .. }
            | Self::Spend { target, .. }
            | Self::Restore { target, .. } => *target,
        }
    }

    /// The magnitude of this effect.
    #[must_use]
    pub fn amount(&self) -> i64 {
        match self {
            Self::Damage { amount, .. }
            | Self::Spend { amount, .. }
            | Self::Restore { amount, .. } => *amount,
        }
    }

    /// Apply to the arena.
    ///
    /// Missing combatants or pools make this a no-op, as does a `Spend`
    /// the pool cannot cover.
    pub fn apply(&self, arena: &mut Arena) {
        let Some(combatant) = arena.get_mut(self.target()) else {
            debug!(combatant = %self.target(), "effect target left the arena");
            return;
        };

        match *self {
            Self::Damage { amount, .. } => {
                if let Some(hp) = combatant.resource_mut(ResourceKind::Hp) {
                    hp.force_reduce(amount);
                }
            }
            Self::Spend { resource, amount, .. } => {
                if let Some(pool) = combatant.resource_mut(resource) {
                    if let Err(err) = pool.try_reduce(amount) {
                        debug!(%err, "spend had no effect");
                    }
                }
            }
            Self::Restore { resource, amount, .. } => {
                if let Some(pool) = combatant.resource_mut(resource) {
                    pool.restore(amount);
                }
            }
        }
    }

    /// Wrap in a frame whose payload is the effect's amount.
    pub fn into_frame(self, kind: EventKind, label: impl Into<String>) -> Frame<Arena> {
        let amount = self.amount();
        Frame::new(kind, label, amount, move |ctx| self.apply(ctx.world_mut()))
    }
}
