//! Document lifecycle state machine.
//!
//! Documents move draft → confirmed → cancelled. Each transition carries
//! the ledger effect the orchestration layer must run for it.
//!
//! # Modules
//!
//! - `types` - Lifecycle domain types (DocumentStatus, Transition)
//! - `error` - Lifecycle-specific error types
//! - `service` - Transition rules

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::LifecycleError;
pub use service::LifecycleService;
pub use types::{DocumentStatus, EffectAction, Transition};
