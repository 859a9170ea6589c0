//! Property-based tests for LineItemCalculator.
//!
//! - Totals always satisfy `total_amount + tax_amount == grand_total`
//! - Document totals equal the sum of line values
//! - The calculation is deterministic

use ledgerline_shared::types::{ProductVariantId, TaxId};
use proptest::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

use super::service::LineItemCalculator;
use super::types::RawLineItem;

/// Quantities from 0.001 to 1,000.000.
fn positive_quantity() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|milli| Decimal::new(milli, 3))
}

/// Prices from 0.00 to 100,000.00.
fn price() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Rates from 0.00% to 30.00%.
fn rate() -> impl Strategy<Value = Decimal> {
    (0i64..3_000i64).prop_map(|v| Decimal::new(v, 2))
}

/// A valid raw item with a discount between 0% and 100% of the line amount,
/// truncated to four decimal places.
fn raw_item() -> impl Strategy<Value = RawLineItem> {
    (
        positive_quantity(),
        price(),
        0u32..=100u32,
        any::<bool>(),
        any::<u128>(),
    )
        .prop_map(|(quantity, unit_price, discount_pct, taxed, seed)| {
            let gross = quantity * unit_price;
            RawLineItem {
                product_variant_id: ProductVariantId::from_uuid(Uuid::from_u128(seed)),
                quantity,
                unit_price,
                discount_amount: (gross * Decimal::from(discount_pct) / Decimal::ONE_HUNDRED)
                    .round_dp_with_strategy(4, RoundingStrategy::ToZero),
                tax_id: taxed.then(|| TaxId::from_uuid(Uuid::from_u128(seed))),
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* valid items and rate, the total invariant holds exactly.
    #[test]
    fn prop_total_invariant(
        items in prop::collection::vec(raw_item(), 0..20),
        tax_rate in rate(),
        discount_applies in any::<bool>(),
    ) {
        let result = LineItemCalculator::compute(&items, discount_applies, |_| Some(tax_rate))
            .unwrap();

        prop_assert_eq!(result.total_amount + result.tax_amount, result.grand_total);
    }

    /// *For any* valid items, totals are sums of the line values.
    #[test]
    fn prop_totals_sum_lines(
        items in prop::collection::vec(raw_item(), 1..20),
        tax_rate in rate(),
    ) {
        let result = LineItemCalculator::compute(&items, true, |_| Some(tax_rate)).unwrap();

        let subtotals: Decimal = result.items.iter().map(|i| i.subtotal).sum();
        let taxes: Decimal = result.items.iter().map(|i| i.tax_amount).sum();
        let line_totals: Decimal = result.items.iter().map(|i| i.line_total).sum();

        prop_assert_eq!(result.total_amount, subtotals);
        prop_assert_eq!(result.tax_amount, taxes);
        prop_assert_eq!(result.grand_total, line_totals);
        prop_assert_eq!(result.items.len(), items.len());
    }

    /// *For any* valid items, subtotals and tax are never negative.
    #[test]
    fn prop_amounts_not_negative(
        items in prop::collection::vec(raw_item(), 1..20),
        tax_rate in rate(),
    ) {
        let result = LineItemCalculator::compute(&items, true, |_| Some(tax_rate)).unwrap();

        for item in &result.items {
            prop_assert!(item.subtotal >= Decimal::ZERO);
            prop_assert!(item.tax_amount >= Decimal::ZERO);
        }
    }

    /// *For any* input, computing twice gives the same result.
    #[test]
    fn prop_deterministic(
        items in prop::collection::vec(raw_item(), 0..10),
        tax_rate in rate(),
    ) {
        let first = LineItemCalculator::compute(&items, true, |_| Some(tax_rate)).unwrap();
        let second = LineItemCalculator::compute(&items, true, |_| Some(tax_rate)).unwrap();
        prop_assert_eq!(first, second);
    }

    /// *For any* item, a non-positive quantity is rejected.
    #[test]
    fn prop_non_positive_quantity_rejected(
        item in raw_item(),
        quantity in -1_000i64..=0i64,
    ) {
        let item = RawLineItem { quantity: Decimal::from(quantity), ..item };
        prop_assert!(LineItemCalculator::compute(&[item], true, |_| None).is_err());
    }
}
