//! Code generation errors.

use thiserror::Error;

/// Errors that can occur while generating a document code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeError {
    /// Every candidate code was already taken.
    #[error("No free code for prefix {prefix} after {attempts} attempts")]
    Exhausted {
        /// The prefix in use.
        prefix: String,
        /// How many candidates were tried.
        attempts: u32,
    },
}
