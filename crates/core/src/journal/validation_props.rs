//! Property-based tests for journal validation.
//!
//! - Balanced line sets are accepted
//! - Any imbalance is rejected with the exact totals

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::types::JournalLine;
use super::validation::{JournalError, validate_lines};

/// Positive amounts from 0.01 to 10,000.00.
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn account_code() -> impl Strategy<Value = String> {
    "[1-5][0-9]{3}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* debits, a single balancing credit makes the set valid.
    #[test]
    fn prop_balanced_lines_accepted(
        debits in prop::collection::vec((account_code(), positive_amount()), 1..10),
        credit_account in account_code(),
    ) {
        let mut lines: Vec<JournalLine> = debits
            .iter()
            .map(|(code, amount)| JournalLine::debit(code.clone(), *amount))
            .collect();
        let total: Decimal = debits.iter().map(|(_, amount)| *amount).sum();
        lines.push(JournalLine::credit(credit_account, total));

        let totals = validate_lines(&lines).unwrap();
        prop_assert!(totals.is_balanced());
        prop_assert_eq!(totals.debit, total);
    }

    /// *For any* unequal debit and credit, validation fails with both totals.
    #[test]
    fn prop_unbalanced_lines_rejected(
        debit in positive_amount(),
        credit in positive_amount(),
    ) {
        prop_assume!(debit != credit);

        let lines = vec![
            JournalLine::debit("1400", debit),
            JournalLine::credit("2100", credit),
        ];

        prop_assert_eq!(
            validate_lines(&lines),
            Err(JournalError::Unbalanced { debit, credit })
        );
    }
}
