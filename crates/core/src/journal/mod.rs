//! Journal lines attached to documents.
//!
//! A document may carry zero or more journal lines. They are stored
//! unconfirmed while the document is a draft, locked when it is confirmed,
//! and removed when it is cancelled or deleted.

pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use types::{EntrySide, JournalLine, JournalStatus, JournalTotals};
pub use validation::{JournalError, validate_lines};
