//! Read side of the document detail view.

use std::collections::HashMap;

use async_trait::async_trait;
use ledgerline_core::document::{
    CounterpartyInfo, DebtRecord, DetailRepository, DetailSource, DocumentRef,
    DocumentRepository, StoreError, StoredJournalLine, VariantInfo, VariantTranslation,
};
use ledgerline_core::journal::JournalLine;
use ledgerline_shared::types::{CounterpartyId, DocumentId, LanguageId, ProductVariantId};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::{DebtLedgerType, DocumentKind};
use crate::entities::{
    accounts, counterparties, debts, journal_lines, product_variant_translations,
    product_variants,
};
use crate::store::{SeaUnitOfWork, store_err};

#[async_trait]
impl DetailRepository for SeaUnitOfWork {
    async fn load_detail_source(
        &mut self,
        id: DocumentId,
    ) -> Result<Option<DetailSource>, StoreError> {
        let Some(document) = self.find_document(id).await? else {
            return Ok(None);
        };
        let txn = self.transaction();

        let counterparty = counterparties::Entity::find_by_id(document.counterparty_id.into_inner())
            .one(txn)
            .await
            .map_err(store_err)?
            .map(|c| CounterpartyInfo {
                id: CounterpartyId::from_uuid(c.id),
                code: c.code,
                name: c.name,
                phone: c.phone,
                address: c.address,
            });

        let variant_ids: Vec<Uuid> = document
            .line_items
            .iter()
            .map(|item| item.product_variant_id.into_inner())
            .collect();
        let variants = product_variants::Entity::find()
            .filter(product_variants::Column::Id.is_in(variant_ids))
            .find_with_related(product_variant_translations::Entity)
            .all(txn)
            .await
            .map_err(store_err)?
            .into_iter()
            .map(|(variant, translations)| {
                let id = ProductVariantId::from_uuid(variant.id);
                let info = VariantInfo {
                    id,
                    sku: variant.sku,
                    barcode: variant.barcode,
                    translations: translations
                        .into_iter()
                        .map(|t| VariantTranslation {
                            language_id: LanguageId::from_uuid(t.language_id),
                            name: t.name,
                        })
                        .collect(),
                };
                (id, info)
            })
            .collect::<HashMap<_, _>>();

        let journal_rows = journal_lines::Entity::find()
            .filter(journal_lines::Column::DocumentKind.eq(DocumentKind::from(document.kind)))
            .filter(journal_lines::Column::DocumentId.eq(document.id.into_inner()))
            .order_by_asc(journal_lines::Column::LineNo)
            .all(txn)
            .await
            .map_err(store_err)?;

        let account_codes: Vec<String> = journal_rows
            .iter()
            .map(|row| row.account_code.clone())
            .collect();
        let account_names = accounts::Entity::find()
            .filter(accounts::Column::Code.is_in(account_codes))
            .all(txn)
            .await
            .map_err(store_err)?
            .into_iter()
            .map(|account| (account.code, account.name))
            .collect::<HashMap<_, _>>();

        let journal = journal_rows
            .into_iter()
            .map(|row| StoredJournalLine {
                line: JournalLine {
                    account_code: row.account_code,
                    debit: row.debit,
                    credit: row.credit,
                    memo: row.memo,
                },
                status: row.status.into(),
            })
            .collect();

        let ledger = document.policy().debt_ledger;
        let debts = debts::Entity::find()
            .filter(debts::Column::CounterpartyId.eq(document.counterparty_id.into_inner()))
            .filter(debts::Column::Ledger.eq(DebtLedgerType::from(ledger)))
            .order_by_asc(debts::Column::DebtDate)
            .all(txn)
            .await
            .map_err(store_err)?
            .into_iter()
            .map(|debt| DebtRecord {
                reference: DocumentRef {
                    kind: debt.document_kind.into(),
                    id: DocumentId::from_uuid(debt.document_id),
                },
                counterparty_id: CounterpartyId::from_uuid(debt.counterparty_id),
                ledger: debt.ledger.into(),
                debit: debt.debit,
                credit: debt.credit,
                date: debt.debt_date,
            })
            .collect();

        Ok(Some(DetailSource {
            document,
            counterparty,
            variants,
            journal,
            account_names,
            debts,
        }))
    }
}
