//! Resolution errors.

use serde::{Deserialize, Serialize};

/// Errors raised while driving the stack to completion.
///
/// Single steps never fail; calling `step` on an empty stack is a caller
/// bug and panics instead.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ResolutionError {
    /// A reaction chain did not terminate within the step limit.
    #[error("step limit of {limit} reached with {remaining} frame(s) still on the stack")]
    StepLimitExceeded {
        /// Configured step limit.
        limit: usize,
        /// Frames left when the limit was hit.
        remaining: usize,
    },
}
