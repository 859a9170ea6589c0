//! Tax rate lookup.
//!
//! A missing tax id, or an id the resolver cannot find, is treated as a
//! 0% rate rather than an error.

use std::collections::HashMap;

use async_trait::async_trait;
use ledgerline_shared::types::TaxId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::document::ports::StoreError;

/// A tax rate, expressed in percent (10 means 10%).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate {
    /// The tax ID.
    pub id: TaxId,
    /// Display name, e.g. "VAT 10%".
    pub name: String,
    /// Rate in percent.
    pub rate: Decimal,
}

/// Looks up tax rates by identifier.
#[async_trait]
pub trait TaxResolver: Send {
    /// Finds a tax rate, returning `None` when it does not exist.
    async fn find_tax(&mut self, id: TaxId) -> Result<Option<TaxRate>, StoreError>;
}

/// Rates resolved for one calculation, keyed by tax ID.
#[derive(Debug, Clone, Default)]
pub struct ResolvedRates {
    rates: HashMap<TaxId, Decimal>,
    unresolved: Vec<TaxId>,
}

impl ResolvedRates {
    /// Records the lookup result for `id`.
    pub fn record(&mut self, id: TaxId, tax: Option<&TaxRate>) {
        match tax {
            Some(tax) => {
                self.rates.insert(id, tax.rate);
            }
            None => self.unresolved.push(id),
        }
    }

    /// Returns the rate for `id`, or `None` if it could not be resolved.
    #[must_use]
    pub fn rate(&self, id: TaxId) -> Option<Decimal> {
        self.rates.get(&id).copied()
    }

    /// IDs that were requested but not found.
    #[must_use]
    pub fn unresolved(&self) -> &[TaxId] {
        &self.unresolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_resolved_rates() {
        let vat = TaxRate {
            id: TaxId::new(),
            name: "VAT".to_string(),
            rate: dec!(10),
        };
        let missing = TaxId::new();

        let mut rates = ResolvedRates::default();
        rates.record(vat.id, Some(&vat));
        rates.record(missing, None);

        assert_eq!(rates.rate(vat.id), Some(dec!(10)));
        assert_eq!(rates.rate(missing), None);
        assert_eq!(rates.unresolved(), &[missing]);
    }
}
