//! Debt-ledger entries, one per confirmed document.

use async_trait::async_trait;
use chrono::Utc;
use ledgerline_core::document::{DebtService, DocumentRef, NewDebt, StoreError};
use ledgerline_core::journal::EntrySide;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use tracing::debug;
use uuid::Uuid;

use crate::entities::debts;
use crate::entities::sea_orm_active_enums::DocumentKind;
use crate::store::{SeaUnitOfWork, store_err};

#[async_trait]
impl DebtService for SeaUnitOfWork {
    async fn create_debt(&mut self, debt: &NewDebt) -> Result<(), StoreError> {
        let (debit, credit) = match debt.side {
            EntrySide::Debit => (debt.amount, Decimal::ZERO),
            EntrySide::Credit => (Decimal::ZERO, debt.amount),
        };

        let model = debts::ActiveModel {
            id: Set(Uuid::now_v7()),
            document_kind: Set(debt.reference.kind.into()),
            document_id: Set(debt.reference.id.into_inner()),
            counterparty_id: Set(debt.counterparty_id.into_inner()),
            ledger: Set(debt.ledger.into()),
            debit: Set(debit),
            credit: Set(credit),
            debt_date: Set(debt.date),
            created_at: Set(Utc::now().into()),
        };
        model.insert(self.transaction()).await.map_err(store_err)?;

        debug!(
            document = %debt.reference,
            ledger = debt.ledger.as_str(),
            amount = %debt.amount,
            "Debt recorded"
        );
        Ok(())
    }

    async fn delete_debt(&mut self, reference: &DocumentRef) -> Result<(), StoreError> {
        let result = debts::Entity::delete_many()
            .filter(debts::Column::DocumentKind.eq(DocumentKind::from(reference.kind)))
            .filter(debts::Column::DocumentId.eq(reference.id.into_inner()))
            .exec(self.transaction())
            .await
            .map_err(store_err)?;

        debug!(document = %reference, removed = result.rows_affected, "Debt removed");
        Ok(())
    }
}
