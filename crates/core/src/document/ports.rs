//! Collaborator contracts consumed by the document engine.
//!
//! Every trait takes `&mut self`: one unit-of-work value implements all of
//! them, so every call made during an operation shares one transaction.

use async_trait::async_trait;
use chrono::NaiveDate;
use ledgerline_shared::types::{CounterpartyId, DocumentId, ProductVariantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculation::LineItem;
use crate::document::projection::DetailSource;
use crate::document::types::{DebtLedger, Document, DocumentRef};
use crate::journal::{EntrySide, JournalLine};
use crate::tax::TaxResolver;

/// Errors reported by a collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backend failed.
    #[error("Storage error: {0}")]
    Backend(String),

    /// A write conflicted with existing data, e.g. a unique constraint.
    #[error("Conflicting write: {0}")]
    Conflict(String),
}

impl StoreError {
    /// Returns true if retrying the whole operation may succeed.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

/// One product quantity moved by a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMovement {
    /// Moved product variant.
    pub product_variant_id: ProductVariantId,
    /// Quantity, always positive.
    pub quantity: Decimal,
}

/// A debt entry to record for a confirmed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDebt {
    /// Originating document.
    pub reference: DocumentRef,
    /// Supplier or customer.
    pub counterparty_id: CounterpartyId,
    /// Payable or receivable.
    pub ledger: DebtLedger,
    /// Side the amount is posted on.
    pub side: EntrySide,
    /// Amount, the document grand total.
    pub amount: Decimal,
    /// Posting date.
    pub date: NaiveDate,
}

/// Persistence of document headers.
#[async_trait]
pub trait DocumentRepository: Send {
    /// Loads a document with its items.
    async fn find_document(&mut self, id: DocumentId) -> Result<Option<Document>, StoreError>;

    /// Loads a document with its items, locking its row until the unit of work ends.
    async fn lock_document(&mut self, id: DocumentId) -> Result<Option<Document>, StoreError>;

    /// Returns true if a document already uses `code`.
    async fn code_exists(&mut self, code: &str) -> Result<bool, StoreError>;

    /// Inserts a new header.
    async fn insert_document(&mut self, document: &Document) -> Result<(), StoreError>;

    /// Overwrites an existing header. The code is never changed.
    async fn update_document(&mut self, document: &Document) -> Result<(), StoreError>;

    /// Removes a header.
    async fn delete_document(&mut self, id: DocumentId) -> Result<(), StoreError>;
}

/// Persistence of document line items.
#[async_trait]
pub trait ItemRepository: Send {
    /// Inserts items for a document.
    async fn insert_items(
        &mut self,
        document_id: DocumentId,
        items: &[LineItem],
    ) -> Result<(), StoreError>;

    /// Removes every item of a document.
    async fn delete_items(&mut self, document_id: DocumentId) -> Result<(), StoreError>;
}

/// Inventory mutations.
#[async_trait]
pub trait StockService: Send {
    /// Adds quantities to stock.
    async fn increase_stock(
        &mut self,
        reference: &DocumentRef,
        movements: &[StockMovement],
    ) -> Result<(), StoreError>;

    /// Removes quantities from stock.
    async fn decrease_stock(
        &mut self,
        reference: &DocumentRef,
        movements: &[StockMovement],
    ) -> Result<(), StoreError>;
}

/// Debt-ledger mutations.
#[async_trait]
pub trait DebtService: Send {
    /// Records a debt entry.
    async fn create_debt(&mut self, debt: &NewDebt) -> Result<(), StoreError>;

    /// Removes the debt entry of a document, if any.
    async fn delete_debt(&mut self, reference: &DocumentRef) -> Result<(), StoreError>;
}

/// Journal mutations.
#[async_trait]
pub trait JournalService: Send {
    /// Stores unconfirmed journal lines for a document.
    async fn create_journal(
        &mut self,
        reference: &DocumentRef,
        lines: &[JournalLine],
        date: NaiveDate,
    ) -> Result<(), StoreError>;

    /// Locks the journal lines of a document.
    async fn confirm_journal(&mut self, reference: &DocumentRef) -> Result<(), StoreError>;

    /// Removes the journal lines of a document.
    async fn delete_journal(&mut self, reference: &DocumentRef) -> Result<(), StoreError>;

    /// Moves the journal lines of a document to a new date.
    async fn update_journal_date(
        &mut self,
        reference: &DocumentRef,
        date: NaiveDate,
    ) -> Result<(), StoreError>;
}

/// Read side for the detail projection.
#[async_trait]
pub trait DetailRepository: Send {
    /// Loads everything the projection needs, or `None` if the document does not exist.
    async fn load_detail_source(
        &mut self,
        id: DocumentId,
    ) -> Result<Option<DetailSource>, StoreError>;
}

/// One atomic unit of work.
///
/// Dropping a unit of work without calling `commit` discards its writes.
#[async_trait]
pub trait UnitOfWork:
    DocumentRepository
    + ItemRepository
    + StockService
    + DebtService
    + JournalService
    + DetailRepository
    + TaxResolver
    + Send
{
    /// Makes every write visible.
    async fn commit(self) -> Result<(), StoreError>;

    /// Discards every write.
    async fn rollback(self) -> Result<(), StoreError>;
}

/// Starts units of work.
#[async_trait]
pub trait UnitOfWorkFactory: Send + Sync {
    /// The unit-of-work type.
    type Work: UnitOfWork;

    /// Begins a unit of work.
    async fn begin(&self) -> Result<Self::Work, StoreError>;
}
