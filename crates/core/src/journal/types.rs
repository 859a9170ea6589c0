//! Journal domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Side of a double-entry posting.
///
/// In double-entry bookkeeping:
/// - Debits increase asset/expense accounts, decrease liability/equity/revenue accounts
/// - Credits decrease asset/expense accounts, increase liability/equity/revenue accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrySide {
    /// Debit side.
    Debit,
    /// Credit side.
    Credit,
}

impl EntrySide {
    /// Returns the string representation of the side.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Credit => "credit",
        }
    }

    /// Parses a side from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "debit" => Some(Self::Debit),
            "credit" => Some(Self::Credit),
            _ => None,
        }
    }

    /// The opposite side.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Debit => Self::Credit,
            Self::Credit => Self::Debit,
        }
    }
}

/// Whether journal lines can still be edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalStatus {
    /// Lines belong to a draft and may be replaced.
    Unconfirmed,
    /// Lines are locked.
    Confirmed,
}

impl JournalStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unconfirmed => "unconfirmed",
            Self::Confirmed => "confirmed",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "unconfirmed" => Some(Self::Unconfirmed),
            "confirmed" => Some(Self::Confirmed),
            _ => None,
        }
    }
}

/// One journal line: an account and either a debit or a credit amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLine {
    /// Chart-of-accounts code.
    pub account_code: String,
    /// Debit amount (0 if credit).
    #[serde(default)]
    pub debit: Decimal,
    /// Credit amount (0 if debit).
    #[serde(default)]
    pub credit: Decimal,
    /// Optional memo.
    #[serde(default)]
    pub memo: Option<String>,
}

impl JournalLine {
    /// A debit line.
    #[must_use]
    pub fn debit(account_code: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_code: account_code.into(),
            debit: amount,
            credit: Decimal::ZERO,
            memo: None,
        }
    }

    /// A credit line.
    #[must_use]
    pub fn credit(account_code: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_code: account_code.into(),
            debit: Decimal::ZERO,
            credit: amount,
            memo: None,
        }
    }
}

/// Sum of debits and credits over a set of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JournalTotals {
    /// Total debit.
    pub debit: Decimal,
    /// Total credit.
    pub credit: Decimal,
}

impl JournalTotals {
    /// Sums the given lines.
    #[must_use]
    pub fn of(lines: &[JournalLine]) -> Self {
        Self {
            debit: lines.iter().map(|l| l.debit).sum(),
            credit: lines.iter().map(|l| l.credit).sum(),
        }
    }

    /// Returns true if debits equal credits.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.debit == self.credit
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.debit - self.credit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_side_round_trip() {
        assert_eq!(EntrySide::parse("DEBIT"), Some(EntrySide::Debit));
        assert_eq!(EntrySide::parse(EntrySide::Credit.as_str()), Some(EntrySide::Credit));
        assert_eq!(EntrySide::parse("both"), None);
        assert_eq!(EntrySide::Debit.opposite(), EntrySide::Credit);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(JournalStatus::parse("confirmed"), Some(JournalStatus::Confirmed));
        assert_eq!(JournalStatus::parse("Unconfirmed"), Some(JournalStatus::Unconfirmed));
        assert_eq!(JournalStatus::parse("posted"), None);
    }

    #[test]
    fn test_totals() {
        let lines = vec![
            JournalLine::debit("1400", dec!(10000)),
            JournalLine::debit("1410", dec!(1000)),
            JournalLine::credit("2100", dec!(11000)),
        ];
        let totals = JournalTotals::of(&lines);
        assert!(totals.is_balanced());
        assert_eq!(totals.debit, dec!(11000));
        assert_eq!(totals.difference(), Decimal::ZERO);
    }

    #[test]
    fn test_totals_unbalanced() {
        let lines = vec![
            JournalLine::debit("1400", dec!(100)),
            JournalLine::credit("2100", dec!(50)),
        ];
        let totals = JournalTotals::of(&lines);
        assert!(!totals.is_balanced());
        assert_eq!(totals.difference(), dec!(50));
    }
}
