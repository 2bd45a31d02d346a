//! Combat errors.

use serde::{Deserialize, Serialize};

use super::combatant::CombatantId;
use super::resource::ResourceKind;

/// Errors from resource pools.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ResourceError {
    /// Not enough in the pool to pay.
    #[error("not enough {resource}: have {current}, need {requested}")]
    Insufficient {
        /// The pool that came up short.
        resource: ResourceKind,
        /// Amount currently in the pool.
        current: i64,
        /// Amount that was asked for.
        requested: i64,
    },

    /// The combatant has no pool of this kind.
    #[error("no {0} pool")]
    MissingPool(ResourceKind),
}

/// Errors from activating a skill.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum SkillError {
    /// The user or target is not in the arena.
    #[error("unknown combatant {0}")]
    UnknownCombatant(CombatantId),

    /// The user could not pay the skill's cost.
    #[error("cannot pay cost: {0}")]
    Cost(#[from] ResourceError),
}
