//! Document headers and line items.

use async_trait::async_trait;
use chrono::Utc;
use ledgerline_core::calculation::LineItem;
use ledgerline_core::document::{Document, DocumentRepository, ItemRepository, StoreError};
use ledgerline_shared::types::{CounterpartyId, DocumentId, ProductVariantId, TaxId, UserId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, Unchanged,
};
use tracing::debug;
use uuid::Uuid;

use crate::entities::{document_items, documents};
use crate::store::{SeaUnitOfWork, line_no_from_db, line_no_to_db, store_err};

#[async_trait]
impl DocumentRepository for SeaUnitOfWork {
    async fn find_document(&mut self, id: DocumentId) -> Result<Option<Document>, StoreError> {
        let txn = self.transaction();
        let header = documents::Entity::find_by_id(id.into_inner())
            .one(txn)
            .await
            .map_err(store_err)?;

        match header {
            Some(header) => Ok(Some(with_items(txn, header).await?)),
            None => Ok(None),
        }
    }

    async fn lock_document(&mut self, id: DocumentId) -> Result<Option<Document>, StoreError> {
        let txn = self.transaction();
        let header = documents::Entity::find_by_id(id.into_inner())
            .lock_exclusive()
            .one(txn)
            .await
            .map_err(store_err)?;

        match header {
            Some(header) => Ok(Some(with_items(txn, header).await?)),
            None => Ok(None),
        }
    }

    async fn code_exists(&mut self, code: &str) -> Result<bool, StoreError> {
        let count = documents::Entity::find()
            .filter(documents::Column::Code.eq(code))
            .count(self.transaction())
            .await
            .map_err(store_err)?;
        Ok(count > 0)
    }

    async fn insert_document(&mut self, document: &Document) -> Result<(), StoreError> {
        let model = documents::ActiveModel {
            id: Set(document.id.into_inner()),
            code: Set(document.code.clone()),
            kind: Set(document.kind.into()),
            counterparty_id: Set(document.counterparty_id.into_inner()),
            document_date: Set(document.document_date),
            status: Set(document.status.into()),
            total_amount: Set(document.total_amount),
            tax_amount: Set(document.tax_amount),
            grand_total: Set(document.grand_total),
            note: Set(document.note.clone()),
            created_by: Set(document.created_by.into_inner()),
            created_at: Set(document.created_at.into()),
            updated_at: Set(document.updated_at.into()),
        };
        model.insert(self.transaction()).await.map_err(store_err)?;

        debug!(document_id = %document.id, code = %document.code, "Document inserted");
        Ok(())
    }

    async fn update_document(&mut self, document: &Document) -> Result<(), StoreError> {
        let model = documents::ActiveModel {
            id: Unchanged(document.id.into_inner()),
            counterparty_id: Set(document.counterparty_id.into_inner()),
            document_date: Set(document.document_date),
            status: Set(document.status.into()),
            total_amount: Set(document.total_amount),
            tax_amount: Set(document.tax_amount),
            grand_total: Set(document.grand_total),
            note: Set(document.note.clone()),
            updated_at: Set(document.updated_at.into()),
            ..Default::default()
        };
        model.update(self.transaction()).await.map_err(store_err)?;

        debug!(document_id = %document.id, status = %document.status.as_str(), "Document updated");
        Ok(())
    }

    async fn delete_document(&mut self, id: DocumentId) -> Result<(), StoreError> {
        documents::Entity::delete_by_id(id.into_inner())
            .exec(self.transaction())
            .await
            .map_err(store_err)?;
        Ok(())
    }
}

#[async_trait]
impl ItemRepository for SeaUnitOfWork {
    async fn insert_items(
        &mut self,
        document_id: DocumentId,
        items: &[LineItem],
    ) -> Result<(), StoreError> {
        if items.is_empty() {
            return Ok(());
        }

        let models = items
            .iter()
            .map(|item| {
                Ok(document_items::ActiveModel {
                    id: Set(Uuid::now_v7()),
                    document_id: Set(document_id.into_inner()),
                    line_no: Set(line_no_to_db(item.line_no)?),
                    product_variant_id: Set(item.product_variant_id.into_inner()),
                    quantity: Set(item.quantity),
                    unit_price: Set(item.unit_price),
                    discount_amount: Set(item.discount_amount),
                    tax_id: Set(item.tax_id.map(TaxId::into_inner)),
                    tax_rate: Set(item.tax_rate),
                    subtotal: Set(item.subtotal),
                    tax_amount: Set(item.tax_amount),
                    line_total: Set(item.line_total),
                })
            })
            .collect::<Result<Vec<_>, StoreError>>()?;

        document_items::Entity::insert_many(models)
            .exec(self.transaction())
            .await
            .map_err(store_err)?;
        Ok(())
    }

    async fn delete_items(&mut self, document_id: DocumentId) -> Result<(), StoreError> {
        document_items::Entity::delete_many()
            .filter(document_items::Column::DocumentId.eq(document_id.into_inner()))
            .exec(self.transaction())
            .await
            .map_err(store_err)?;
        Ok(())
    }
}

/// Loads the items of a document in line order.
async fn load_items(
    txn: &DatabaseTransaction,
    document_id: Uuid,
) -> Result<Vec<LineItem>, StoreError> {
    let rows = document_items::Entity::find()
        .filter(document_items::Column::DocumentId.eq(document_id))
        .order_by_asc(document_items::Column::LineNo)
        .all(txn)
        .await
        .map_err(store_err)?;

    rows.into_iter()
        .map(|row| {
            Ok(LineItem {
                line_no: line_no_from_db(row.line_no)?,
                product_variant_id: ProductVariantId::from_uuid(row.product_variant_id),
                quantity: row.quantity,
                unit_price: row.unit_price,
                discount_amount: row.discount_amount,
                tax_id: row.tax_id.map(TaxId::from_uuid),
                tax_rate: row.tax_rate,
                subtotal: row.subtotal,
                tax_amount: row.tax_amount,
                line_total: row.line_total,
            })
        })
        .collect()
}

async fn with_items(
    txn: &DatabaseTransaction,
    header: documents::Model,
) -> Result<Document, StoreError> {
    let line_items = load_items(txn, header.id).await?;
    Ok(to_document(header, line_items))
}

fn to_document(header: documents::Model, line_items: Vec<LineItem>) -> Document {
    Document {
        id: DocumentId::from_uuid(header.id),
        code: header.code,
        kind: header.kind.into(),
        counterparty_id: CounterpartyId::from_uuid(header.counterparty_id),
        document_date: header.document_date,
        status: header.status.into(),
        total_amount: header.total_amount,
        tax_amount: header.tax_amount,
        grand_total: header.grand_total,
        note: header.note,
        line_items,
        created_by: UserId::from_uuid(header.created_by),
        created_at: header.created_at.with_timezone(&Utc),
        updated_at: header.updated_at.with_timezone(&Utc),
    }
}
