//! Human-readable document code generation.
//!
//! Codes look like `PR_20260315_142501`. When that code is taken, a counter
//! suffix is appended (`PR_20260315_142501_01`, `_02`, ...) up to a bounded
//! number of attempts. Nothing sleeps or blocks.

pub mod error;
pub mod generator;

#[cfg(test)]
mod generator_props;

pub use error::CodeError;
pub use generator::{CodeGenerator, DEFAULT_MAX_ATTEMPTS};
