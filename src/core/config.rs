//! Session configuration.

use serde::{Deserialize, Serialize};

/// Default cap on steps taken by one `resolve_all` call.
pub const DEFAULT_STEP_LIMIT: usize = 10_000;

/// Configuration for one combat session.
///
/// Deserializes with defaults for any missing field, so `{}` is a valid
/// configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum steps per `resolve_all`. `None` = unbounded.
    ///
    /// Guards against reaction chains that never stop pushing frames.
    pub step_limit: Option<usize>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            step_limit: Some(DEFAULT_STEP_LIMIT),
        }
    }
}

impl SessionConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration without a step limit.
    pub fn unbounded() -> Self {
        Self { step_limit: None }
    }

    /// Set the step limit (builder pattern).
    #[must_use]
    pub fn with_step_limit(mut self, limit: usize) -> Self {
        self.step_limit = Some(limit);
        self
    }
}
