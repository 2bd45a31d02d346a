//! Bounded resource pools (HP, GS, armor, shield).
//!
//! A pool holds a value in `0..=max`. Every change that actually moves
//! the value is recorded in a history of signed deltas.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use tracing::debug;

use super::error::ResourceError;

/// Kind of resource pool.
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
pub enum ResourceKind {
    #[strum(to_string = "HP")]
    Hp,
    #[strum(to_string = "GS")]
    Gs,
    Armor,
    Shield,
}

/// Size and starting value of a pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Upper bound.
    pub max: i64,
    /// Starting value, clamped into `0..=max`.
    pub start: i64,
}

impl PoolConfig {
    /// A pool that starts at `start` and caps at `max`.
    #[must_use]
    pub const fn new(max: i64, start: i64) -> Self {
        Self { max, start }
    }

    /// A pool that starts full.
    #[must_use]
    pub const fn full(max: i64) -> Self {
        Self { max, start: max }
    }

    /// A pool with no practical upper bound, starting at `start`.
    #[must_use]
    pub const fn unbounded(start: i64) -> Self {
        Self { max: i64::MAX, start }
    }
}

/// A bounded counter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    kind: ResourceKind,
    max: i64,
    current: i64,
    /// Signed deltas actually applied, newest last.
    history: Vec<i64>,
}

impl Resource {
    /// Create a pool.
    pub fn new(kind: ResourceKind, config: PoolConfig) -> Self {
        let max = config.max.max(0);
        Self {
            kind,
            max,
            current: config.start.clamp(0, max),
            history: Vec::new(),
        }
    }

    /// Which pool this is.
    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Current value.
    #[must_use]
    pub fn current(&self) -> i64 {
        self.current
    }

    /// Upper bound.
    #[must_use]
    pub fn max(&self) -> i64 {
        self.max
    }

    /// Can `amount` be taken without going below zero?
    #[must_use]
    pub fn can_afford(&self, amount: i64) -> bool {
        self.current >= amount
    }

    /// Take `amount` only if the pool covers it.
    ///
    /// Leaves the pool untouched on error.
    pub fn try_reduce(&mut self, amount: i64) -> Result<(), ResourceError> {
        if !self.can_afford(amount) {
            return Err(ResourceError::Insufficient {
                resource: self.kind,
                current: self.current,
                requested: amount,
            });
        }
        self.force_reduce(amount);
        Ok(())
    }

    /// Take `amount`, bottoming out at zero.
    ///
    /// The result always stays in `0..=max`, even for a negative `amount`.
    pub fn force_reduce(&mut self, amount: i64) {
        let old = self.current;
        self.current = old.saturating_sub(amount).clamp(0, self.max);
        self.history.push(self.current - old);
        debug!("reduced {} to {}", self.kind, self.current);
    }

    /// Add `amount`, capping at `max`.
    ///
    /// The result always stays in `0..=max`, even for a negative `amount`.
    pub fn restore(&mut self, amount: i64) {
        let old = self.current;
        self.current = old.saturating_add(amount).clamp(0, self.max);
        self.history.push(self.current - old);
        debug!("restored {} to {}", self.kind, self.current);
    }

    /// Deltas applied so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &[i64] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(ResourceKind::Hp.to_string(), "HP");
        assert_eq!(ResourceKind::Gs.to_string(), "GS");
        assert_eq!(ResourceKind::Armor.to_string(), "Armor");
    }

    #[test]
    fn test_try_reduce_needs_enough() {
        let mut pool = Resource::new(ResourceKind::Gs, PoolConfig::new(10, 0));

        let err = pool.try_reduce(5).unwrap_err();
        assert_eq!(
            err,
            ResourceError::Insufficient {
                resource: ResourceKind::Gs,
                current: 0,
                requested: 5
            }
        );

        pool.restore(5);
        assert!(pool.try_reduce(5).is_ok());
        assert!(pool.try_reduce(1).is_err());
        assert_eq!(pool.current(), 0);
    }

    #[test]
    fn test_clamping() {
        let mut pool = Resource::new(ResourceKind::Armor, PoolConfig::new(10, 0));

        pool.force_reduce(5);
        assert_eq!(pool.current(), 0);

        pool.restore(1);
        assert!(pool.try_reduce(1).is_ok());

        pool.restore(50);
        assert_eq!(pool.current(), 10);
        assert!(pool.try_reduce(20).is_err());
    }

    #[test]
    fn test_history_records_applied_deltas() {
        let mut pool = Resource::new(ResourceKind::Hp, PoolConfig::full(32));

        pool.restore(5);
        pool.force_reduce(40);
        pool.restore(3);

        assert_eq!(pool.history(), &[0, -32, 3]);
    }

    #[test]
    fn test_start_is_clamped() {
        let pool = Resource::new(ResourceKind::Hp, PoolConfig::new(10, 25));
        assert_eq!(pool.current(), 10);

        let pool = Resource::new(ResourceKind::Hp, PoolConfig::new(10, -3));
        assert_eq!(pool.current(), 0);
    }

    #[test]
    fn test_unbounded_restore_saturates() {
        let mut pool = Resource::new(ResourceKind::Shield, PoolConfig::unbounded(0));
        pool.restore(i64::MAX);
        pool.restore(1);
        assert_eq!(pool.current(), i64::MAX);
    }

    #[test]
    fn test_negative_amounts_stay_in_range() {
        let mut hp = Resource::new(ResourceKind::Hp, PoolConfig::full(32));
        hp.force_reduce(-5);
        assert_eq!(hp.current(), 32);

        let mut gs = Resource::new(ResourceKind::Gs, PoolConfig::full(12));
        assert!(gs.try_reduce(-3).is_ok());
        assert_eq!(gs.current(), 12);

        let mut armor = Resource::new(ResourceKind::Armor, PoolConfig::new(10, 2));
        armor.restore(-7);
        assert_eq!(armor.current(), 0);
        armor.restore(i64::MIN);
        assert_eq!(armor.current(), 0);
        armor.force_reduce(i64::MIN);
        assert_eq!(armor.current(), 10);

        assert_eq!(armor.history(), &[-2, 0, 10]);
    }
}
