//! Lifecycle error types.

use thiserror::Error;

use crate::lifecycle::types::DocumentStatus;

/// Errors raised by the lifecycle state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// The requested transition is not in the transition table.
    #[error("Invalid status transition from {} to {to}", .from.map_or("none", DocumentStatus::as_str))]
    InvalidTransition {
        /// The current status, `None` on create.
        from: Option<DocumentStatus>,
        /// The requested status.
        to: DocumentStatus,
    },

    /// The document is cancelled and rejects every update.
    #[error("Document is cancelled and cannot be modified")]
    DocumentLocked,
}

impl LifecycleError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::DocumentLocked => "DOCUMENT_LOCKED",
        }
    }
}
