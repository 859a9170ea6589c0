//! Receipts and vouchers: lifecycle orchestration and ledger effects.
//!
//! # Modules
//!
//! - `types` - Document, kinds and per-kind ledger policy
//! - `ports` - Collaborator traits and the unit of work
//! - `error` - Document error taxonomy
//! - `effects` - Stock, debt and journal coordination
//! - `service` - Create, update, confirm, cancel and delete
//! - `projection` - Read-only detail view
//! - `memory` - In-memory store for tests and tooling

pub mod effects;
pub mod error;
pub mod memory;
pub mod ports;
pub mod projection;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use effects::LedgerEffectCoordinator;
pub use error::{DocumentError, EffectKind};
pub use memory::{InMemoryStore, MemoryState, MemoryUnitOfWork, Operation};
pub use ports::{
    DebtService, DetailRepository, DocumentRepository, ItemRepository, JournalService, NewDebt,
    StockMovement, StockService, StoreError, UnitOfWork, UnitOfWorkFactory,
};
pub use projection::{
    CounterpartyInfo, DebtRecord, DebtSummary, DetailJournalLine, DetailLine, DetailProjection,
    DetailSource, DocumentDetail, StoredJournalLine, VariantInfo, VariantTranslation,
};
pub use service::DocumentService;
pub use types::{
    CodePrefixes, CreateDocumentInput, DebtLedger, Document, DocumentKind, DocumentRef,
    KindPolicy, StockDirection, UpdateDocumentInput,
};
