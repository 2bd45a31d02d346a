//! Deterministic dice rolling.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical rolls
//! - **Forkable**: Independent but reproducible streams (e.g. per combatant)
//!
//! ```
//! use combat_stack::core::DiceRoller;
//!
//! let mut dice = DiceRoller::new(42);
//! let rolls = dice.roll(&[20, 6, 6]);
//! assert_eq!(rolls.len(), 3);
//! assert!((1..=20).contains(&rolls[0]));
//!
//! let mut again = DiceRoller::new(42);
//! assert_eq!(again.roll(&[20, 6, 6]), rolls);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use smallvec::SmallVec;

/// Rolls for one throw. Most throws use a handful of dice.
pub type Rolls = SmallVec<[u32; 4]>;

/// Seeded dice roller.
///
/// Uses ChaCha8 so results are reproducible across platforms.
#[derive(Clone, Debug)]
pub struct DiceRoller {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl DiceRoller {
    /// Create a roller with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// The seed this roller was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork an independent roller.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self::new(fork_seed)
    }

    /// Roll a single die with `sides` faces, uniform in `1..=sides`.
    ///
    /// # Panics
    ///
    /// Panics if `sides` is 0.
    pub fn roll_die(&mut self, sides: u32) -> u32 {
        assert!(sides > 0, "a die needs at least one side");
        self.inner.gen_range(1..=sides)
    }

    /// Roll one die per entry in `dice`, each entry giving its side count.
    pub fn roll(&mut self, dice: &[u32]) -> Rolls {
        dice.iter().map(|&sides| self.roll_die(sides)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let mut a = DiceRoller::new(7);
        let mut b = DiceRoller::new(7);

        for _ in 0..50 {
            assert_eq!(a.roll_die(20), b.roll_die(20));
        }
    }

    #[test]
    fn test_roll_in_range() {
        let mut dice = DiceRoller::new(1);
        for sides in [1, 2, 4, 6, 8, 10, 12, 20, 100] {
            for _ in 0..100 {
                let r = dice.roll_die(sides);
                assert!((1..=sides).contains(&r), "d{} rolled {}", sides, r);
            }
        }
    }

    #[test]
    fn test_single_sided_die() {
        let mut dice = DiceRoller::new(3);
        assert_eq!(dice.roll(&[1, 1, 1]).as_slice(), &[1, 1, 1]);
    }

    #[test]
    fn test_roll_one_per_die() {
        let mut dice = DiceRoller::new(3);
        assert!(dice.roll(&[]).is_empty());
        assert_eq!(dice.roll(&[6, 6, 6, 6, 6]).len(), 5);
    }

    #[test]
    fn test_fork_is_deterministic() {
        let mut a = DiceRoller::new(42);
        let mut b = DiceRoller::new(42);

        let mut fa = a.fork();
        let mut fb = b.fork();
        assert_eq!(fa.seed(), fb.seed());
        assert_ne!(fa.seed(), a.seed());
        assert_eq!(fa.roll(&[20; 10]), fb.roll(&[20; 10]));

        let second = a.fork();
        assert_ne!(second.seed(), fa.seed());
    }

    #[test]
    #[should_panic(expected = "at least one side")]
    fn test_zero_sided_die() {
        DiceRoller::new(0).roll_die(0);
    }
}
