//! Session plumbing: configuration, dice and the session driver.
//!
//! Nothing here is global. Each combat builds its own [`CombatSession`].

pub mod config;
pub mod rng;
pub mod session;

pub use config::{SessionConfig, DEFAULT_STEP_LIMIT};
pub use rng::{DiceRoller, Rolls};
pub use session::CombatSession;
