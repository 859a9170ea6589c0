//! Line-item validation errors.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised for malformed line items.
///
/// `line` is the 1-based position of the offending item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalculationError {
    /// Quantity is zero or negative.
    #[error("Line {line}: quantity must be positive, got {quantity}")]
    NonPositiveQuantity {
        /// The offending line.
        line: u32,
        /// The submitted quantity.
        quantity: Decimal,
    },

    /// Unit price is negative.
    #[error("Line {line}: unit price cannot be negative, got {unit_price}")]
    NegativeUnitPrice {
        /// The offending line.
        line: u32,
        /// The submitted price.
        unit_price: Decimal,
    },

    /// Discount is negative.
    #[error("Line {line}: discount cannot be negative, got {discount}")]
    NegativeDiscount {
        /// The offending line.
        line: u32,
        /// The submitted discount.
        discount: Decimal,
    },

    /// Discount is larger than quantity times price.
    #[error("Line {line}: discount {discount} exceeds line amount {amount}")]
    DiscountExceedsAmount {
        /// The offending line.
        line: u32,
        /// The submitted discount.
        discount: Decimal,
        /// Quantity times unit price.
        amount: Decimal,
    },

    /// The resolved tax rate is negative.
    #[error("Line {line}: tax rate cannot be negative, got {rate}")]
    NegativeTaxRate {
        /// The offending line.
        line: u32,
        /// The resolved rate.
        rate: Decimal,
    },

    /// Quantity, price or discount has more than four decimal places.
    #[error("Line {line}: {field} {value} has more than four decimal places")]
    ExcessPrecision {
        /// The offending line.
        line: u32,
        /// `quantity`, `unit_price` or `discount_amount`.
        field: &'static str,
        /// The submitted value.
        value: Decimal,
    },

    /// An amount on this line, or a running total, is too large to represent.
    #[error("Line {line}: amount out of range")]
    AmountOverflow {
        /// The offending line.
        line: u32,
    },

    /// More line items than can be numbered.
    #[error("Too many line items")]
    TooManyItems,
}
