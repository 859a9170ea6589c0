//! Document error types.

use ledgerline_shared::types::DocumentId;
use std::fmt;
use thiserror::Error;

use crate::calculation::CalculationError;
use crate::code::CodeError;
use crate::document::ports::StoreError;
use crate::journal::JournalError;
use crate::lifecycle::{DocumentStatus, LifecycleError};

/// The ledger effect a collaborator failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    /// Stock movement.
    Stock,
    /// Debt entry.
    Debt,
    /// Journal lines.
    Journal,
}

impl EffectKind {
    /// Returns the string representation of the effect.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stock => "stock",
            Self::Debt => "debt",
            Self::Journal => "journal",
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors returned by document operations.
///
/// Any error aborts the unit of work it happened in.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Document does not exist.
    #[error("Document {0} not found")]
    NotFound(DocumentId),

    /// Document is cancelled.
    #[error("Document {0} is cancelled and cannot be modified")]
    DocumentLocked(DocumentId),

    /// Transition not allowed from the current status.
    #[error("Invalid status transition from {} to {to}", .from.map_or("none", DocumentStatus::as_str))]
    InvalidTransition {
        /// The current status, `None` on create.
        from: Option<DocumentStatus>,
        /// The requested status.
        to: DocumentStatus,
    },

    /// A stock, debt or journal collaborator failed.
    #[error("Failed to apply {effect} effect: {source}")]
    LedgerEffectFailure {
        /// The failed effect.
        effect: EffectKind,
        /// The collaborator error.
        source: StoreError,
    },

    /// A line item is invalid.
    #[error(transparent)]
    Calculation(#[from] CalculationError),

    /// Submitted journal lines are invalid.
    #[error(transparent)]
    Journal(#[from] JournalError),

    /// Supplied code is already used.
    #[error("Document code {0} already exists")]
    DuplicateCode(String),

    /// Every candidate code was taken.
    #[error("No free document code for prefix {prefix} after {attempts} attempts")]
    CodeGenerationExhausted {
        /// The code prefix.
        prefix: String,
        /// Candidates tried.
        attempts: u32,
    },

    /// Persistence failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DocumentError {
    /// Maps a lifecycle rejection for the given document.
    #[must_use]
    pub fn from_lifecycle(error: LifecycleError, id: DocumentId) -> Self {
        match error {
            LifecycleError::InvalidTransition { from, to } => Self::InvalidTransition { from, to },
            LifecycleError::DocumentLocked => Self::DocumentLocked(id),
        }
    }

    /// Wraps a collaborator failure inside a ledger effect.
    #[must_use]
    pub fn effect(effect: EffectKind, source: StoreError) -> Self {
        Self::LedgerEffectFailure { effect, source }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "DOCUMENT_NOT_FOUND",
            Self::DocumentLocked(_) => "DOCUMENT_LOCKED",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::LedgerEffectFailure { .. } => "LEDGER_EFFECT_FAILURE",
            Self::Calculation(_) => "INVALID_LINE_ITEM",
            Self::Journal(_) => "INVALID_JOURNAL",
            Self::DuplicateCode(_) => "DUPLICATE_CODE",
            Self::CodeGenerationExhausted { .. } => "CODE_GENERATION_EXHAUSTED",
            Self::Store(_) => "STORE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation errors
            Self::InvalidTransition { .. } | Self::Calculation(_) | Self::Journal(_) => 400,

            // 404 Not Found
            Self::NotFound(_) => 404,

            // 409 Conflict
            Self::DocumentLocked(_) | Self::DuplicateCode(_) => 409,

            // 503 Service Unavailable - try again later
            Self::CodeGenerationExhausted { .. } => 503,

            // 500 Internal Server Error
            Self::LedgerEffectFailure { .. } | Self::Store(_) => 500,
        }
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::CodeGenerationExhausted { .. } => true,
            Self::Store(source) | Self::LedgerEffectFailure { source, .. } => source.is_conflict(),
            _ => false,
        }
    }
}

impl From<CodeError> for DocumentError {
    fn from(error: CodeError) -> Self {
        match error {
            CodeError::Exhausted { prefix, attempts } => {
                Self::CodeGenerationExhausted { prefix, attempts }
            }
        }
    }
}
