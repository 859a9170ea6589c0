//! Line-item types.

use ledgerline_shared::types::{ProductVariantId, TaxId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A line item as submitted by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLineItem {
    /// The product variant being received or sold.
    pub product_variant_id: ProductVariantId,
    /// Quantity (must be positive).
    pub quantity: Decimal,
    /// Price per unit (must not be negative).
    pub unit_price: Decimal,
    /// Discount for the whole line. Ignored for kinds without discounts.
    #[serde(default)]
    pub discount_amount: Decimal,
    /// Optional tax rate reference.
    #[serde(default)]
    pub tax_id: Option<TaxId>,
}

/// A line item with its derived amounts.
///
/// `subtotal = quantity * unit_price - discount_amount`,
/// `tax_amount = subtotal * tax_rate / 100`,
/// `line_total = subtotal + tax_amount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// 1-based position within the document.
    pub line_no: u32,
    /// The product variant.
    pub product_variant_id: ProductVariantId,
    /// Quantity.
    pub quantity: Decimal,
    /// Price per unit.
    pub unit_price: Decimal,
    /// Discount actually applied (zero when the kind has no discounts).
    pub discount_amount: Decimal,
    /// Tax reference as submitted.
    pub tax_id: Option<TaxId>,
    /// Rate applied, in percent.
    pub tax_rate: Decimal,
    /// Amount before tax.
    pub subtotal: Decimal,
    /// Tax on the subtotal.
    pub tax_amount: Decimal,
    /// Subtotal plus tax.
    pub line_total: Decimal,
}

impl LineItem {
    /// Converts the computed item back into its submitted form.
    #[must_use]
    pub fn to_raw(&self) -> RawLineItem {
        RawLineItem {
            product_variant_id: self.product_variant_id,
            quantity: self.quantity,
            unit_price: self.unit_price,
            discount_amount: self.discount_amount,
            tax_id: self.tax_id,
        }
    }
}

/// Result of a line-item calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationResult {
    /// The computed items, in submission order.
    pub items: Vec<LineItem>,
    /// Sum of line subtotals.
    pub total_amount: Decimal,
    /// Sum of line tax amounts.
    pub tax_amount: Decimal,
    /// `total_amount + tax_amount`.
    pub grand_total: Decimal,
}

impl CalculationResult {
    /// An empty calculation (no items, all totals zero).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_amount: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            grand_total: Decimal::ZERO,
        }
    }
}
