//! Character attributes with buff chains.
//!
//! An attribute's current value is its base run through every active buff
//! in the order the buffs were added, then rounded up.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use strum::{Display, EnumIter};
use tracing::trace;

/// Kind of character attribute.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
pub enum AttributeKind {
    Strength,
    Agility,
    Vitality,
    Alertness,
    Intelligence,
    Willpower,
    WeaponDamage,
}

/// Handle for removing a buff.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuffId(pub u32);

/// A transform applied to an attribute, optionally gated by a condition.
pub struct Buff {
    transform: Box<dyn Fn(f32) -> f32>,
    condition: Option<Box<dyn Fn() -> bool>>,
}

impl Buff {
    /// A buff that always applies.
    pub fn new(transform: impl Fn(f32) -> f32 + 'static) -> Self {
        Self {
            transform: Box::new(transform),
            condition: None,
        }
    }

    /// A buff that applies only while `condition` holds.
    ///
    /// The condition is checked every time the attribute is read.
    pub fn conditional(
        transform: impl Fn(f32) -> f32 + 'static,
        condition: impl Fn() -> bool + 'static,
    ) -> Self {
        Self {
            transform: Box::new(transform),
            condition: Some(Box::new(condition)),
        }
    }

    /// Flat bonus.
    pub fn flat(amount: f32) -> Self {
        Self::new(move |v| v + amount)
    }

    /// Multiplier.
    pub fn scale(factor: f32) -> Self {
        Self::new(move |v| v * factor)
    }

    /// Is the buff currently active?
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.condition.as_ref().map_or(true, |cond| cond())
    }

    /// Apply to a value, or pass it through if inactive.
    #[must_use]
    pub fn apply(&self, value: f32) -> f32 {
        if self.is_active() {
            (self.transform)(value)
        } else {
            value
        }
    }
}

impl std::fmt::Debug for Buff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buff")
            .field("conditional", &self.condition.is_some())
            .finish_non_exhaustive()
    }
}

/// A base value plus an ordered buff chain.
#[derive(Debug, Default)]
pub struct Attribute {
    base: i64,
    buffs: SmallVec<[(BuffId, Buff); 2]>,
    next_buff: u32,
}

impl Attribute {
    /// Create an attribute with no buffs.
    #[must_use]
    pub fn new(base: i64) -> Self {
        Self {
            base,
            buffs: SmallVec::new(),
            next_buff: 0,
        }
    }

    /// Unbuffed value.
    #[must_use]
    pub fn base(&self) -> i64 {
        self.base
    }

    /// Change the unbuffed value.
    pub fn set_base(&mut self, base: i64) {
        self.base = base;
    }

    /// Append a buff to the chain.
    pub fn add_buff(&mut self, buff: Buff) -> BuffId {
        let id = BuffId(self.next_buff);
        self.next_buff += 1;
        trace!(buff = id.0, "registering buff");
        self.buffs.push((id, buff));
        id
    }

    /// Remove a buff. Returns `true` if it was present.
    pub fn remove_buff(&mut self, id: BuffId) -> bool {
        let Some(pos) = self.buffs.iter().position(|(bid, _)| *bid == id) else {
            return false;
        };
        trace!(buff = id.0, "removing buff");
        self.buffs.remove(pos);
        true
    }

    /// Number of buffs in the chain (active or not).
    #[must_use]
    pub fn buff_count(&self) -> usize {
        self.buffs.len()
    }

    /// Base value run through every buff in order, rounded up.
    #[must_use]
    pub fn current(&self) -> i64 {
        let value = self
            .buffs
            .iter()
            .fold(self.base as f32, |acc, (_, buff)| buff.apply(acc));
        value.ceil() as i64
    }
}
