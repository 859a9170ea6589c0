//! Journal lines attached to documents.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use ledgerline_core::document::{DocumentRef, JournalService, StoreError};
use ledgerline_core::journal::JournalLine;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, Set};
use tracing::debug;
use uuid::Uuid;

use crate::entities::journal_lines;
use crate::entities::sea_orm_active_enums::{DocumentKind, JournalStatus};
use crate::store::{SeaUnitOfWork, line_no_to_db, store_err};

fn for_document(reference: &DocumentRef) -> Condition {
    Condition::all()
        .add(journal_lines::Column::DocumentKind.eq(DocumentKind::from(reference.kind)))
        .add(journal_lines::Column::DocumentId.eq(reference.id.into_inner()))
}

#[async_trait]
impl JournalService for SeaUnitOfWork {
    async fn create_journal(
        &mut self,
        reference: &DocumentRef,
        lines: &[JournalLine],
        date: NaiveDate,
    ) -> Result<(), StoreError> {
        if lines.is_empty() {
            return Ok(());
        }

        let now = Utc::now();
        let mut models = Vec::with_capacity(lines.len());
        for (index, line) in (1u32..).zip(lines) {
            models.push(journal_lines::ActiveModel {
                id: Set(Uuid::now_v7()),
                document_kind: Set(reference.kind.into()),
                document_id: Set(reference.id.into_inner()),
                line_no: Set(line_no_to_db(index)?),
                account_code: Set(line.account_code.clone()),
                debit: Set(line.debit),
                credit: Set(line.credit),
                memo: Set(line.memo.clone()),
                status: Set(JournalStatus::Unconfirmed),
                entry_date: Set(date),
                created_at: Set(now.into()),
            });
        }

        journal_lines::Entity::insert_many(models)
            .exec(self.transaction())
            .await
            .map_err(store_err)?;

        debug!(document = %reference, lines = lines.len(), "Journal stored");
        Ok(())
    }

    async fn confirm_journal(&mut self, reference: &DocumentRef) -> Result<(), StoreError> {
        let result = journal_lines::Entity::update_many()
            .set(journal_lines::ActiveModel {
                status: Set(JournalStatus::Confirmed),
                ..Default::default()
            })
            .filter(for_document(reference))
            .exec(self.transaction())
            .await
            .map_err(store_err)?;

        debug!(document = %reference, lines = result.rows_affected, "Journal confirmed");
        Ok(())
    }

    async fn delete_journal(&mut self, reference: &DocumentRef) -> Result<(), StoreError> {
        let result = journal_lines::Entity::delete_many()
            .filter(for_document(reference))
            .exec(self.transaction())
            .await
            .map_err(store_err)?;

        debug!(document = %reference, lines = result.rows_affected, "Journal removed");
        Ok(())
    }

    async fn update_journal_date(
        &mut self,
        reference: &DocumentRef,
        date: NaiveDate,
    ) -> Result<(), StoreError> {
        journal_lines::Entity::update_many()
            .set(journal_lines::ActiveModel {
                entry_date: Set(date),
                ..Default::default()
            })
            .filter(for_document(reference))
            .exec(self.transaction())
            .await
            .map_err(store_err)?;
        Ok(())
    }
}
