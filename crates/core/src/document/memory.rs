//! In-memory store implementing every collaborator contract.
//!
//! Intended for tests and local tooling. A unit of work holds the store
//! mutex for its whole life and writes to a private copy of the state;
//! `commit` swaps the copy in, anything else discards it.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use ledgerline_shared::types::{CounterpartyId, DocumentId, ProductVariantId, TaxId};
use rust_decimal::Decimal;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::calculation::LineItem;
use crate::document::ports::{
    DebtService, DetailRepository, DocumentRepository, ItemRepository, JournalService, NewDebt,
    StockMovement, StockService, StoreError, UnitOfWork, UnitOfWorkFactory,
};
use crate::document::projection::{
    CounterpartyInfo, DebtRecord, DetailSource, StoredJournalLine, VariantInfo,
};
use crate::document::types::{Document, DocumentRef};
use crate::journal::{JournalLine, JournalStatus};
use crate::tax::{TaxRate, TaxResolver};

/// A collaborator call, recorded in the operation log and usable as a failure point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `insert_document`.
    InsertDocument,
    /// `update_document`.
    UpdateDocument,
    /// `delete_document`.
    DeleteDocument,
    /// `insert_items`.
    InsertItems,
    /// `delete_items`.
    DeleteItems,
    /// `increase_stock`.
    IncreaseStock,
    /// `decrease_stock`.
    DecreaseStock,
    /// `create_debt`.
    CreateDebt,
    /// `delete_debt`.
    DeleteDebt,
    /// `create_journal`.
    CreateJournal,
    /// `confirm_journal`.
    ConfirmJournal,
    /// `delete_journal`.
    DeleteJournal,
    /// `update_journal_date`.
    UpdateJournalDate,
}

impl Operation {
    /// Returns true for stock, debt and journal calls.
    #[must_use]
    pub fn is_ledger_effect(self) -> bool {
        !matches!(
            self,
            Self::InsertDocument
                | Self::UpdateDocument
                | Self::DeleteDocument
                | Self::InsertItems
                | Self::DeleteItems
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct JournalRecord {
    date: NaiveDate,
    lines: Vec<StoredJournalLine>,
}

/// Everything the in-memory store holds.
#[derive(Debug, Clone, Default)]
pub struct MemoryState {
    documents: HashMap<DocumentId, Document>,
    items: HashMap<DocumentId, Vec<LineItem>>,
    taxes: HashMap<TaxId, TaxRate>,
    counterparties: HashMap<CounterpartyId, CounterpartyInfo>,
    variants: HashMap<ProductVariantId, VariantInfo>,
    accounts: HashMap<String, String>,
    stock: HashMap<ProductVariantId, Decimal>,
    debts: Vec<DebtRecord>,
    journal: HashMap<DocumentRef, JournalRecord>,
    operations: Vec<(Operation, DocumentId)>,
    fail_point: Option<Operation>,
}

impl MemoryState {
    /// Adds a tax rate.
    #[must_use]
    pub fn with_tax(mut self, tax: TaxRate) -> Self {
        self.taxes.insert(tax.id, tax);
        self
    }

    /// Adds a counterparty.
    #[must_use]
    pub fn with_counterparty(mut self, counterparty: CounterpartyInfo) -> Self {
        self.counterparties.insert(counterparty.id, counterparty);
        self
    }

    /// Adds a product variant.
    #[must_use]
    pub fn with_variant(mut self, variant: VariantInfo) -> Self {
        self.variants.insert(variant.id, variant);
        self
    }

    /// Adds an account name.
    #[must_use]
    pub fn with_account(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.accounts.insert(code.into(), name.into());
        self
    }

    /// Sets the stock level of a variant.
    #[must_use]
    pub fn with_stock(mut self, variant: ProductVariantId, quantity: Decimal) -> Self {
        self.stock.insert(variant, quantity);
        self
    }

    /// Current stock of a variant, zero if never moved.
    #[must_use]
    pub fn stock_of(&self, variant: ProductVariantId) -> Decimal {
        self.stock.get(&variant).copied().unwrap_or_default()
    }

    /// Debt entries of a document.
    #[must_use]
    pub fn debts_for(&self, reference: &DocumentRef) -> Vec<&DebtRecord> {
        self.debts
            .iter()
            .filter(|d| &d.reference == reference)
            .collect()
    }

    /// Every debt entry.
    #[must_use]
    pub fn debts(&self) -> &[DebtRecord] {
        &self.debts
    }

    /// Journal lines of a document.
    #[must_use]
    pub fn journal_for(&self, reference: &DocumentRef) -> &[StoredJournalLine] {
        self.journal
            .get(reference)
            .map_or(&[], |record| record.lines.as_slice())
    }

    /// Journal date of a document.
    #[must_use]
    pub fn journal_date(&self, reference: &DocumentRef) -> Option<NaiveDate> {
        self.journal.get(reference).map(|record| record.date)
    }

    /// A document with its items.
    #[must_use]
    pub fn document(&self, id: DocumentId) -> Option<Document> {
        self.documents.get(&id).map(|header| {
            let mut document = header.clone();
            document.line_items = self.items.get(&id).cloned().unwrap_or_default();
            document
        })
    }

    /// Number of stored documents.
    #[must_use]
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Number of stored item rows across all documents.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.values().map(Vec::len).sum()
    }

    /// Every committed collaborator call, in order.
    #[must_use]
    pub fn operations(&self) -> &[(Operation, DocumentId)] {
        &self.operations
    }

    /// Ledger-effect calls made for one document, in order.
    #[must_use]
    pub fn effects_for(&self, id: DocumentId) -> Vec<Operation> {
        self.operations
            .iter()
            .filter(|(op, doc)| *doc == id && op.is_ledger_effect())
            .map(|(op, _)| *op)
            .collect()
    }

    fn record(&mut self, operation: Operation, id: DocumentId) -> Result<(), StoreError> {
        if self.fail_point == Some(operation) {
            return Err(StoreError::Backend(format!("injected failure in {operation:?}")));
        }
        self.operations.push((operation, id));
        Ok(())
    }

    fn move_stock(&mut self, movements: &[StockMovement], sign: Decimal) {
        for movement in movements {
            *self.stock.entry(movement.product_variant_id).or_default() +=
                movement.quantity * sign;
        }
    }
}

/// Shared in-memory store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `state`.
    #[must_use]
    pub fn with_state(state: MemoryState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// A copy of the committed state.
    pub async fn snapshot(&self) -> MemoryState {
        self.state.lock().await.clone()
    }

    /// Makes the given collaborator call fail from now on; `None` clears it.
    pub async fn fail_on(&self, operation: Option<Operation>) {
        self.state.lock().await.fail_point = operation;
    }
}

#[async_trait]
impl UnitOfWorkFactory for InMemoryStore {
    type Work = MemoryUnitOfWork;

    async fn begin(&self) -> Result<Self::Work, StoreError> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let working = guard.clone();
        Ok(MemoryUnitOfWork { guard, working })
    }
}

/// Unit of work over the in-memory store.
#[derive(Debug)]
pub struct MemoryUnitOfWork {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    async fn commit(self) -> Result<(), StoreError> {
        let Self { mut guard, working } = self;
        *guard = working;
        Ok(())
    }

    async fn rollback(self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
impl DocumentRepository for MemoryUnitOfWork {
    async fn find_document(&mut self, id: DocumentId) -> Result<Option<Document>, StoreError> {
        Ok(self.working.document(id))
    }

    async fn lock_document(&mut self, id: DocumentId) -> Result<Option<Document>, StoreError> {
        Ok(self.working.document(id))
    }

    async fn code_exists(&mut self, code: &str) -> Result<bool, StoreError> {
        Ok(self.working.documents.values().any(|d| d.code == code))
    }

    async fn insert_document(&mut self, document: &Document) -> Result<(), StoreError> {
        self.working.record(Operation::InsertDocument, document.id)?;
        if self.working.documents.contains_key(&document.id) {
            return Err(StoreError::Conflict(format!("document {} exists", document.id)));
        }
        if self.working.documents.values().any(|d| d.code == document.code) {
            return Err(StoreError::Conflict(format!("code {} exists", document.code)));
        }

        let mut header = document.clone();
        header.line_items.clear();
        self.working.documents.insert(document.id, header);
        Ok(())
    }

    async fn update_document(&mut self, document: &Document) -> Result<(), StoreError> {
        self.working.record(Operation::UpdateDocument, document.id)?;
        let Some(stored) = self.working.documents.get_mut(&document.id) else {
            return Err(StoreError::Backend(format!("document {} missing", document.id)));
        };

        let code = std::mem::take(&mut stored.code);
        *stored = Document {
            code,
            line_items: Vec::new(),
            ..document.clone()
        };
        Ok(())
    }

    async fn delete_document(&mut self, id: DocumentId) -> Result<(), StoreError> {
        self.working.record(Operation::DeleteDocument, id)?;
        self.working.documents.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl ItemRepository for MemoryUnitOfWork {
    async fn insert_items(
        &mut self,
        document_id: DocumentId,
        items: &[LineItem],
    ) -> Result<(), StoreError> {
        self.working.record(Operation::InsertItems, document_id)?;
        self.working
            .items
            .entry(document_id)
            .or_default()
            .extend_from_slice(items);
        Ok(())
    }

    async fn delete_items(&mut self, document_id: DocumentId) -> Result<(), StoreError> {
        self.working.record(Operation::DeleteItems, document_id)?;
        self.working.items.remove(&document_id);
        Ok(())
    }
}

#[async_trait]
impl StockService for MemoryUnitOfWork {
    async fn increase_stock(
        &mut self,
        reference: &DocumentRef,
        movements: &[StockMovement],
    ) -> Result<(), StoreError> {
        self.working.record(Operation::IncreaseStock, reference.id)?;
        self.working.move_stock(movements, Decimal::ONE);
        Ok(())
    }

    async fn decrease_stock(
        &mut self,
        reference: &DocumentRef,
        movements: &[StockMovement],
    ) -> Result<(), StoreError> {
        self.working.record(Operation::DecreaseStock, reference.id)?;
        self.working.move_stock(movements, Decimal::NEGATIVE_ONE);
        Ok(())
    }
}

#[async_trait]
impl DebtService for MemoryUnitOfWork {
    async fn create_debt(&mut self, debt: &NewDebt) -> Result<(), StoreError> {
        self.working.record(Operation::CreateDebt, debt.reference.id)?;
        if self.working.debts.iter().any(|d| d.reference == debt.reference) {
            return Err(StoreError::Conflict(format!(
                "debt for {} exists",
                debt.reference
            )));
        }
        self.working.debts.push(DebtRecord::from(debt));
        Ok(())
    }

    async fn delete_debt(&mut self, reference: &DocumentRef) -> Result<(), StoreError> {
        self.working.record(Operation::DeleteDebt, reference.id)?;
        self.working.debts.retain(|d| &d.reference != reference);
        Ok(())
    }
}

#[async_trait]
impl JournalService for MemoryUnitOfWork {
    async fn create_journal(
        &mut self,
        reference: &DocumentRef,
        lines: &[JournalLine],
        date: NaiveDate,
    ) -> Result<(), StoreError> {
        self.working.record(Operation::CreateJournal, reference.id)?;
        let record = self
            .working
            .journal
            .entry(*reference)
            .or_insert_with(|| JournalRecord {
                date,
                lines: Vec::new(),
            });
        record.date = date;
        record
            .lines
            .extend(lines.iter().cloned().map(|line| StoredJournalLine {
                line,
                status: JournalStatus::Unconfirmed,
            }));
        Ok(())
    }

    async fn confirm_journal(&mut self, reference: &DocumentRef) -> Result<(), StoreError> {
        self.working.record(Operation::ConfirmJournal, reference.id)?;
        if let Some(record) = self.working.journal.get_mut(reference) {
            for stored in &mut record.lines {
                stored.status = JournalStatus::Confirmed;
            }
        }
        Ok(())
    }

    async fn delete_journal(&mut self, reference: &DocumentRef) -> Result<(), StoreError> {
        self.working.record(Operation::DeleteJournal, reference.id)?;
        self.working.journal.remove(reference);
        Ok(())
    }

    async fn update_journal_date(
        &mut self,
        reference: &DocumentRef,
        date: NaiveDate,
    ) -> Result<(), StoreError> {
        self.working.record(Operation::UpdateJournalDate, reference.id)?;
        if let Some(record) = self.working.journal.get_mut(reference) {
            record.date = date;
        }
        Ok(())
    }
}

#[async_trait]
impl DetailRepository for MemoryUnitOfWork {
    async fn load_detail_source(
        &mut self,
        id: DocumentId,
    ) -> Result<Option<DetailSource>, StoreError> {
        let Some(document) = self.working.document(id) else {
            return Ok(None);
        };
        let state = &self.working;

        let variants = document
            .line_items
            .iter()
            .filter_map(|item| state.variants.get(&item.product_variant_id))
            .map(|variant| (variant.id, variant.clone()))
            .collect();

        let journal = state.journal_for(&document.reference()).to_vec();
        let account_names = journal
            .iter()
            .filter_map(|stored| {
                state
                    .accounts
                    .get_key_value(&stored.line.account_code)
                    .map(|(code, name)| (code.clone(), name.clone()))
            })
            .collect();

        let debts = state
            .debts
            .iter()
            .filter(|d| d.counterparty_id == document.counterparty_id)
            .cloned()
            .collect();

        Ok(Some(DetailSource {
            counterparty: state.counterparties.get(&document.counterparty_id).cloned(),
            variants,
            journal,
            account_names,
            debts,
            document,
        }))
    }
}

#[async_trait]
impl TaxResolver for MemoryUnitOfWork {
    async fn find_tax(&mut self, id: TaxId) -> Result<Option<TaxRate>, StoreError> {
        Ok(self.working.taxes.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerline_shared::types::ProductVariantId;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_rollback_discards_writes() {
        let store = InMemoryStore::new();
        let variant = ProductVariantId::new();
        let reference = DocumentRef {
            kind: crate::document::types::DocumentKind::PurchaseReceipt,
            id: DocumentId::new(),
        };

        let mut work = store.begin().await.unwrap();
        work.increase_stock(
            &reference,
            &[StockMovement {
                product_variant_id: variant,
                quantity: dec!(4),
            }],
        )
        .await
        .unwrap();
        work.rollback().await.unwrap();

        assert_eq!(store.snapshot().await.stock_of(variant), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_commit_publishes_writes() {
        let variant = ProductVariantId::new();
        let store = InMemoryStore::with_state(MemoryState::default().with_stock(variant, dec!(10)));
        let reference = DocumentRef {
            kind: crate::document::types::DocumentKind::SalesReceipt,
            id: DocumentId::new(),
        };

        let mut work = store.begin().await.unwrap();
        work.decrease_stock(
            &reference,
            &[StockMovement {
                product_variant_id: variant,
                quantity: dec!(3),
            }],
        )
        .await
        .unwrap();
        work.commit().await.unwrap();

        let state = store.snapshot().await;
        assert_eq!(state.stock_of(variant), dec!(7));
        assert_eq!(state.effects_for(reference.id), vec![Operation::DecreaseStock]);
    }

    #[tokio::test]
    async fn test_fail_point() {
        let store = InMemoryStore::new();
        store.fail_on(Some(Operation::DeleteDebt)).await;
        let reference = DocumentRef {
            kind: crate::document::types::DocumentKind::PaymentVoucher,
            id: DocumentId::new(),
        };

        let mut work = store.begin().await.unwrap();
        let err = work.delete_debt(&reference).await.unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
    }
}
