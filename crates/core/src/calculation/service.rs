//! Line-item calculator.
//!
//! Pure functions, no side effects: the same items and rates always
//! produce the same result.

use ledgerline_shared::types::{TaxId, fits_amount_scale, percent_of, round_amount};
use rust_decimal::Decimal;

use super::error::CalculationError;
use super::types::{CalculationResult, LineItem, RawLineItem};

/// Stateless calculator for document line items.
pub struct LineItemCalculator;

impl LineItemCalculator {
    /// Computes derived amounts and document totals.
    ///
    /// # Arguments
    ///
    /// * `items` - The submitted line items
    /// * `discount_applies` - Whether the document kind honours line discounts
    /// * `tax_lookup` - Rate in percent for a tax ID; `None` means 0%
    ///
    /// # Errors
    ///
    /// Returns `CalculationError` for non-positive quantities, negative prices,
    /// negative or oversized discounts, negative tax rates, values with more
    /// than four decimal places, and amounts too large to represent.
    pub fn compute<F>(
        items: &[RawLineItem],
        discount_applies: bool,
        tax_lookup: F,
    ) -> Result<CalculationResult, CalculationError>
    where
        F: Fn(TaxId) -> Option<Decimal>,
    {
        let mut result = CalculationResult::empty();
        result.items.reserve(items.len());

        for (index, item) in items.iter().enumerate() {
            let line = u32::try_from(index + 1).map_err(|_| CalculationError::TooManyItems)?;
            let computed = Self::compute_line(line, item, discount_applies, &tax_lookup)?;

            let overflow = || CalculationError::AmountOverflow { line };
            result.total_amount = result
                .total_amount
                .checked_add(computed.subtotal)
                .ok_or_else(overflow)?;
            result.tax_amount = result
                .tax_amount
                .checked_add(computed.tax_amount)
                .ok_or_else(overflow)?;
            result.grand_total = result
                .total_amount
                .checked_add(result.tax_amount)
                .ok_or_else(overflow)?;
            result.items.push(computed);
        }

        Ok(result)
    }

    fn compute_line<F>(
        line: u32,
        item: &RawLineItem,
        discount_applies: bool,
        tax_lookup: &F,
    ) -> Result<LineItem, CalculationError>
    where
        F: Fn(TaxId) -> Option<Decimal>,
    {
        if item.quantity <= Decimal::ZERO {
            return Err(CalculationError::NonPositiveQuantity {
                line,
                quantity: item.quantity,
            });
        }
        if item.unit_price < Decimal::ZERO {
            return Err(CalculationError::NegativeUnitPrice {
                line,
                unit_price: item.unit_price,
            });
        }

        for (field, value) in [("quantity", item.quantity), ("unit_price", item.unit_price)] {
            if !fits_amount_scale(value) {
                return Err(CalculationError::ExcessPrecision { line, field, value });
            }
        }

        let overflow = || CalculationError::AmountOverflow { line };
        let gross = item
            .quantity
            .checked_mul(item.unit_price)
            .ok_or_else(overflow)?;

        let discount = if discount_applies {
            if item.discount_amount < Decimal::ZERO {
                return Err(CalculationError::NegativeDiscount {
                    line,
                    discount: item.discount_amount,
                });
            }
            if !fits_amount_scale(item.discount_amount) {
                return Err(CalculationError::ExcessPrecision {
                    line,
                    field: "discount_amount",
                    value: item.discount_amount,
                });
            }
            if item.discount_amount > gross {
                return Err(CalculationError::DiscountExceedsAmount {
                    line,
                    discount: item.discount_amount,
                    amount: gross,
                });
            }
            item.discount_amount
        } else {
            Decimal::ZERO
        };

        let rate = item
            .tax_id
            .and_then(tax_lookup)
            .unwrap_or(Decimal::ZERO);
        if rate < Decimal::ZERO {
            return Err(CalculationError::NegativeTaxRate { line, rate });
        }

        let subtotal = round_amount(gross.checked_sub(discount).ok_or_else(overflow)?);
        let tax_amount = percent_of(subtotal, rate).ok_or_else(overflow)?;
        let line_total = subtotal.checked_add(tax_amount).ok_or_else(overflow)?;

        Ok(LineItem {
            line_no: line,
            product_variant_id: item.product_variant_id,
            quantity: item.quantity,
            unit_price: item.unit_price,
            discount_amount: discount,
            tax_id: item.tax_id,
            tax_rate: rate,
            subtotal,
            tax_amount,
            line_total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerline_shared::types::ProductVariantId;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn item(quantity: Decimal, price: Decimal, discount: Decimal, tax_id: Option<TaxId>) -> RawLineItem {
        RawLineItem {
            product_variant_id: ProductVariantId::new(),
            quantity,
            unit_price: price,
            discount_amount: discount,
            tax_id,
        }
    }

    #[test]
    fn test_purchase_line_with_ten_percent_tax() {
        let tax = TaxId::new();
        let items = vec![item(dec!(10), dec!(1000), dec!(0), Some(tax))];

        let result = LineItemCalculator::compute(&items, false, |id| (id == tax).then_some(dec!(10)))
            .unwrap();

        assert_eq!(result.total_amount, dec!(10000));
        assert_eq!(result.tax_amount, dec!(1000));
        assert_eq!(result.grand_total, dec!(11000));
        assert_eq!(result.items[0].line_total, dec!(11000));
    }

    #[test]
    fn test_sales_line_with_discount() {
        let tax = TaxId::new();
        let items = vec![item(dec!(5), dec!(2000), dec!(1000), Some(tax))];

        let result =
            LineItemCalculator::compute(&items, true, |_| Some(dec!(10))).unwrap();

        assert_eq!(result.items[0].subtotal, dec!(9000));
        assert_eq!(result.items[0].tax_amount, dec!(900));
        assert_eq!(result.items[0].line_total, dec!(9900));
        assert_eq!(result.grand_total, dec!(9900));
    }

    #[test]
    fn test_discount_ignored_when_kind_has_no_discounts() {
        let items = vec![item(dec!(5), dec!(2000), dec!(1000), None)];

        let result = LineItemCalculator::compute(&items, false, |_| None).unwrap();

        assert_eq!(result.items[0].discount_amount, Decimal::ZERO);
        assert_eq!(result.items[0].subtotal, dec!(10000));
    }

    #[test]
    fn test_unresolved_tax_defaults_to_zero() {
        let items = vec![item(dec!(2), dec!(50), dec!(0), Some(TaxId::new()))];

        let result = LineItemCalculator::compute(&items, false, |_| None).unwrap();

        assert_eq!(result.items[0].tax_rate, Decimal::ZERO);
        assert_eq!(result.tax_amount, Decimal::ZERO);
        assert_eq!(result.grand_total, dec!(100));
    }

    #[test]
    fn test_lines_are_numbered_in_order() {
        let items = vec![
            item(dec!(1), dec!(10), dec!(0), None),
            item(dec!(2), dec!(20), dec!(0), None),
            item(dec!(3), dec!(30), dec!(0), None),
        ];

        let result = LineItemCalculator::compute(&items, false, |_| None).unwrap();

        let numbers: Vec<u32> = result.items.iter().map(|i| i.line_no).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(result.total_amount, dec!(140));
    }

    #[test]
    fn test_empty_items() {
        let result = LineItemCalculator::compute(&[], true, |_| None).unwrap();
        assert_eq!(result, CalculationResult::empty());
    }

    #[rstest]
    #[case(item(dec!(0), dec!(10), dec!(0), None), "NonPositiveQuantity")]
    #[case(item(dec!(-1), dec!(10), dec!(0), None), "NonPositiveQuantity")]
    #[case(item(dec!(1), dec!(-10), dec!(0), None), "NegativeUnitPrice")]
    #[case(item(dec!(1), dec!(10), dec!(-1), None), "NegativeDiscount")]
    #[case(item(dec!(1), dec!(10), dec!(11), None), "DiscountExceedsAmount")]
    #[case(item(dec!(1.00005), dec!(10), dec!(0), None), "ExcessPrecision")]
    #[case(item(dec!(1), dec!(10.12345), dec!(0), None), "ExcessPrecision")]
    #[case(item(dec!(1), dec!(10), dec!(0.00001), None), "ExcessPrecision")]
    #[case(
        item(Decimal::from(10_i64.pow(15)), Decimal::from(10_i64.pow(15)), dec!(0), None),
        "AmountOverflow"
    )]
    fn test_invalid_lines_are_rejected(#[case] raw: RawLineItem, #[case] expected: &str) {
        let err = LineItemCalculator::compute(&[raw], true, |_| None).unwrap_err();
        assert!(format!("{err:?}").starts_with(expected), "got {err:?}");
    }

    #[test]
    fn test_error_names_offending_line() {
        let items = vec![
            item(dec!(1), dec!(10), dec!(0), None),
            item(dec!(0), dec!(10), dec!(0), None),
        ];

        let err = LineItemCalculator::compute(&items, false, |_| None).unwrap_err();
        assert_eq!(
            err,
            CalculationError::NonPositiveQuantity {
                line: 2,
                quantity: dec!(0)
            }
        );
    }

    #[test]
    fn test_overflowing_tax_is_an_error() {
        let items = vec![item(Decimal::MAX, dec!(1), dec!(0), Some(TaxId::new()))];
        let err = LineItemCalculator::compute(&items, false, |_| Some(dec!(10))).unwrap_err();
        assert_eq!(err, CalculationError::AmountOverflow { line: 1 });
    }

    #[test]
    fn test_overflowing_totals_name_the_line() {
        let items = vec![
            item(Decimal::MAX, dec!(1), dec!(0), None),
            item(Decimal::MAX, dec!(1), dec!(0), None),
        ];
        let err = LineItemCalculator::compute(&items, false, |_| None).unwrap_err();
        assert_eq!(err, CalculationError::AmountOverflow { line: 2 });
    }

    #[test]
    fn test_trailing_zeros_are_not_excess_precision() {
        let items = vec![item(dec!(2.500000), dec!(4.00000), dec!(0), None)];
        let result = LineItemCalculator::compute(&items, false, |_| None).unwrap();
        assert_eq!(result.grand_total, dec!(10));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let items = vec![item(dec!(1), dec!(10), dec!(0), Some(TaxId::new()))];
        let err = LineItemCalculator::compute(&items, false, |_| Some(dec!(-5))).unwrap_err();
        assert!(matches!(err, CalculationError::NegativeTaxRate { line: 1, .. }));
    }
}
