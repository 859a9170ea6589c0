//! Business rule validation for journal lines.

use rust_decimal::Decimal;
use thiserror::Error;

use super::types::{JournalLine, JournalTotals};

/// Validation errors for journal lines.
///
/// `line` is the 1-based position of the offending line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JournalError {
    /// Account code is blank.
    #[error("Journal line {line}: account code is required")]
    MissingAccount {
        /// The offending line.
        line: usize,
    },

    /// Debit or credit is negative.
    #[error("Journal line {line}: amounts cannot be negative")]
    NegativeAmount {
        /// The offending line.
        line: usize,
    },

    /// Line has both sides set, or neither.
    #[error("Journal line {line}: specify either a debit or a credit amount")]
    InvalidEntryType {
        /// The offending line.
        line: usize,
    },

    /// Lines do not balance.
    #[error("Journal is unbalanced: debits ({debit}) != credits ({credit})")]
    Unbalanced {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },
}

impl JournalError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingAccount { .. } => "MISSING_ACCOUNT",
            Self::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            Self::InvalidEntryType { .. } => "INVALID_ENTRY_TYPE",
            Self::Unbalanced { .. } => "UNBALANCED_JOURNAL",
        }
    }
}

/// Validates a set of journal lines.
///
/// An empty set is valid. Otherwise every line needs an account code and
/// exactly one positive side, and total debits must equal total credits.
///
/// # Errors
///
/// Returns the first rule violated.
pub fn validate_lines(lines: &[JournalLine]) -> Result<JournalTotals, JournalError> {
    for (index, line) in lines.iter().enumerate() {
        let position = index + 1;

        if line.account_code.trim().is_empty() {
            return Err(JournalError::MissingAccount { line: position });
        }
        if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO {
            return Err(JournalError::NegativeAmount { line: position });
        }
        if line.debit.is_zero() == line.credit.is_zero() {
            return Err(JournalError::InvalidEntryType { line: position });
        }
    }

    let totals = JournalTotals::of(lines);
    if !totals.is_balanced() {
        return Err(JournalError::Unbalanced {
            debit: totals.debit,
            credit: totals.credit,
        });
    }

    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_balanced_lines() {
        let lines = vec![
            JournalLine::debit("1400", dec!(100.00)),
            JournalLine::credit("2100", dec!(100.00)),
        ];
        let totals = validate_lines(&lines).unwrap();
        assert_eq!(totals.debit, dec!(100.00));
    }

    #[test]
    fn test_empty_is_valid() {
        let totals = validate_lines(&[]).unwrap();
        assert_eq!(totals.debit, Decimal::ZERO);
        assert_eq!(totals.credit, Decimal::ZERO);
    }

    #[test]
    fn test_unbalanced_lines() {
        let lines = vec![
            JournalLine::debit("1400", dec!(100.00)),
            JournalLine::credit("2100", dec!(50.00)),
        ];
        assert_eq!(
            validate_lines(&lines),
            Err(JournalError::Unbalanced {
                debit: dec!(100.00),
                credit: dec!(50.00)
            })
        );
    }

    #[test]
    fn test_missing_account() {
        let lines = vec![
            JournalLine::debit("1400", dec!(10)),
            JournalLine::credit("  ", dec!(10)),
        ];
        assert_eq!(
            validate_lines(&lines),
            Err(JournalError::MissingAccount { line: 2 })
        );
    }

    #[test]
    fn test_both_sides_rejected() {
        let mut line = JournalLine::debit("1400", dec!(10));
        line.credit = dec!(10);
        assert_eq!(
            validate_lines(&[line]),
            Err(JournalError::InvalidEntryType { line: 1 })
        );
    }

    #[test]
    fn test_zero_line_rejected() {
        let line = JournalLine::debit("1400", Decimal::ZERO);
        assert_eq!(
            validate_lines(&[line]),
            Err(JournalError::InvalidEntryType { line: 1 })
        );
    }

    #[test]
    fn test_negative_rejected() {
        let lines = vec![
            JournalLine::debit("1400", dec!(-10)),
            JournalLine::credit("2100", dec!(-10)),
        ];
        assert_eq!(
            validate_lines(&lines),
            Err(JournalError::NegativeAmount { line: 1 })
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(JournalError::MissingAccount { line: 1 }.error_code(), "MISSING_ACCOUNT");
        assert_eq!(
            JournalError::Unbalanced {
                debit: dec!(1),
                credit: dec!(2)
            }
            .error_code(),
            "UNBALANCED_JOURNAL"
        );
    }
}
