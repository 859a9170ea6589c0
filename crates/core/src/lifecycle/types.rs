//! Lifecycle domain types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Document status.
///
/// The valid transitions are:
/// - (none) → Draft (create)
/// - (none) → Confirmed (create, applies effects)
/// - Draft → Draft (update)
/// - Draft → Confirmed (update or confirm, applies effects)
/// - Confirmed → Cancelled (update or cancel, reverses effects)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Editable; no ledger effects exist.
    Draft,
    /// Ledger effects applied; only cancellation is accepted.
    Confirmed,
    /// Effects reversed; header kept for audit.
    Cancelled,
}

impl DocumentStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "confirmed" => Some(Self::Confirmed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Returns true if header, items and journal may be replaced.
    #[must_use]
    pub fn is_editable(self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if every update is rejected.
    #[must_use]
    pub fn is_locked(self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ledger effect attached to a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectAction {
    /// Nothing to apply or reverse.
    None,
    /// Apply stock, debt and journal confirmation.
    Apply,
    /// Undo stock, debt and journal.
    Reverse,
}

/// An accepted status transition.
///
/// `from` is `None` on create; `to` is `None` on delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Status before the transition.
    pub from: Option<DocumentStatus>,
    /// Status after the transition.
    pub to: Option<DocumentStatus>,
    /// Effect to run.
    pub effects: EffectAction,
}

impl Transition {
    /// Returns true if the document is removed.
    #[must_use]
    pub fn is_removal(&self) -> bool {
        self.to.is_none()
    }

    /// Returns true if header, items and journal lines are rewritten from the payload.
    #[must_use]
    pub fn replaces_content(&self) -> bool {
        match self.from {
            None => true,
            Some(from) => from.is_editable() && self.to.is_some(),
        }
    }
}
