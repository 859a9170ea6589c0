//! Ledger-effect coordinator.
//!
//! Applies and reverses the stock, debt and journal effects of a document
//! inside the caller's unit of work. Effects always run in the order
//! stock, debt, journal; the first collaborator failure stops the sequence.

use tracing::debug;

use crate::document::error::{DocumentError, EffectKind};
use crate::document::ports::{DebtService, JournalService, NewDebt, StockMovement, StockService};
use crate::document::types::{Document, DocumentRef, StockDirection};

/// Stateless coordinator for ledger effects.
pub struct LedgerEffectCoordinator;

impl LedgerEffectCoordinator {
    /// Stock movements of a document, one per line item.
    #[must_use]
    pub fn stock_movements(document: &Document) -> Vec<StockMovement> {
        document
            .line_items
            .iter()
            .map(|item| StockMovement {
                product_variant_id: item.product_variant_id,
                quantity: item.quantity,
            })
            .collect()
    }

    /// The debt entry a confirmed document records.
    #[must_use]
    pub fn new_debt(document: &Document) -> NewDebt {
        let policy = document.policy();
        NewDebt {
            reference: document.reference(),
            counterparty_id: document.counterparty_id,
            ledger: policy.debt_ledger,
            side: policy.debt_side,
            amount: document.grand_total,
            date: document.document_date,
        }
    }

    /// Applies the effects of confirming `document`.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::LedgerEffectFailure` naming the failed effect.
    pub async fn apply_effects<W>(work: &mut W, document: &Document) -> Result<(), DocumentError>
    where
        W: StockService + DebtService + JournalService,
    {
        let reference = document.reference();

        if let Some(direction) = document.policy().stock {
            Self::move_stock(work, &reference, direction, document).await?;
        }

        let debt = Self::new_debt(document);
        debug!(reference = %reference, amount = %debt.amount, ledger = debt.ledger.as_str(), "creating debt");
        work.create_debt(&debt)
            .await
            .map_err(|e| DocumentError::effect(EffectKind::Debt, e))?;

        debug!(reference = %reference, "confirming journal");
        work.confirm_journal(&reference)
            .await
            .map_err(|e| DocumentError::effect(EffectKind::Journal, e))
    }

    /// Undoes `apply_effects` for a confirmed document.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::LedgerEffectFailure` naming the failed effect.
    pub async fn reverse_effects<W>(work: &mut W, document: &Document) -> Result<(), DocumentError>
    where
        W: StockService + DebtService + JournalService,
    {
        let reference = document.reference();

        if let Some(direction) = document.policy().stock {
            Self::move_stock(work, &reference, direction.inverse(), document).await?;
        }

        debug!(reference = %reference, "deleting debt");
        work.delete_debt(&reference)
            .await
            .map_err(|e| DocumentError::effect(EffectKind::Debt, e))?;

        debug!(reference = %reference, "deleting journal");
        work.delete_journal(&reference)
            .await
            .map_err(|e| DocumentError::effect(EffectKind::Journal, e))
    }

    /// Removes every effect of a document that is being deleted.
    ///
    /// Journal lines are always removed; debt and stock only when the
    /// document was confirmed.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::LedgerEffectFailure` naming the failed effect.
    pub async fn discard_effects<W>(
        work: &mut W,
        document: &Document,
        was_confirmed: bool,
    ) -> Result<(), DocumentError>
    where
        W: StockService + DebtService + JournalService,
    {
        let reference = document.reference();

        debug!(reference = %reference, "deleting journal");
        work.delete_journal(&reference)
            .await
            .map_err(|e| DocumentError::effect(EffectKind::Journal, e))?;

        if !was_confirmed {
            return Ok(());
        }

        debug!(reference = %reference, "deleting debt");
        work.delete_debt(&reference)
            .await
            .map_err(|e| DocumentError::effect(EffectKind::Debt, e))?;

        if let Some(direction) = document.policy().stock {
            Self::move_stock(work, &reference, direction.inverse(), document).await?;
        }

        Ok(())
    }

    async fn move_stock<W>(
        work: &mut W,
        reference: &DocumentRef,
        direction: StockDirection,
        document: &Document,
    ) -> Result<(), DocumentError>
    where
        W: StockService,
    {
        let movements = Self::stock_movements(document);
        if movements.is_empty() {
            return Ok(());
        }

        debug!(reference = %reference, ?direction, lines = movements.len(), "moving stock");
        let result = match direction {
            StockDirection::Increase => work.increase_stock(reference, &movements).await,
            StockDirection::Decrease => work.decrease_stock(reference, &movements).await,
        };
        result.map_err(|e| DocumentError::effect(EffectKind::Stock, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::LineItem;
    use crate::journal::EntrySide;
    use crate::document::types::{DebtLedger, DocumentKind};
    use crate::lifecycle::DocumentStatus;
    use chrono::{NaiveDate, Utc};
    use ledgerline_shared::types::{CounterpartyId, DocumentId, ProductVariantId, UserId};
    use rust_decimal_macros::dec;

    fn document(kind: DocumentKind, items: usize) -> Document {
        let line_items = (1..=items)
            .map(|n| LineItem {
                line_no: u32::try_from(n).unwrap(),
                product_variant_id: ProductVariantId::new(),
                quantity: dec!(2),
                unit_price: dec!(50),
                discount_amount: dec!(0),
                tax_id: None,
                tax_rate: dec!(0),
                subtotal: dec!(100),
                tax_amount: dec!(0),
                line_total: dec!(100),
            })
            .collect::<Vec<_>>();
        let total = dec!(100) * rust_decimal::Decimal::from(items);
        let now = Utc::now();
        Document {
            id: DocumentId::new(),
            code: "PR_20261019_090000".to_string(),
            kind,
            counterparty_id: CounterpartyId::new(),
            document_date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            status: DocumentStatus::Confirmed,
            total_amount: total,
            tax_amount: dec!(0),
            grand_total: total,
            note: None,
            line_items,
            created_by: UserId::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_stock_movements_follow_items() {
        let doc = document(DocumentKind::PurchaseReceipt, 3);
        let movements = LedgerEffectCoordinator::stock_movements(&doc);
        assert_eq!(movements.len(), 3);
        assert_eq!(movements[1].product_variant_id, doc.line_items[1].product_variant_id);
        assert_eq!(movements[1].quantity, dec!(2));
    }

    #[test]
    fn test_new_debt_for_purchase() {
        let doc = document(DocumentKind::PurchaseReceipt, 2);
        let debt = LedgerEffectCoordinator::new_debt(&doc);
        assert_eq!(debt.ledger, DebtLedger::Payable);
        assert_eq!(debt.side, EntrySide::Credit);
        assert_eq!(debt.amount, dec!(200));
        assert_eq!(debt.reference, doc.reference());
    }

    #[test]
    fn test_new_debt_for_receipt_voucher() {
        let doc = document(DocumentKind::ReceiptVoucher, 0);
        let debt = LedgerEffectCoordinator::new_debt(&doc);
        assert_eq!(debt.ledger, DebtLedger::Receivable);
        assert_eq!(debt.side, EntrySide::Credit);
    }
}
