//! Core business logic for Ledgerline.
//!
//! This crate contains the document engine with ZERO web or database
//! dependencies. Persistence and the ledger collaborators are reached
//! through the traits in [`document::ports`].
//!
//! # Modules
//!
//! - `calculation` - Line-item subtotal, tax and totals
//! - `code` - Document code generation
//! - `journal` - Journal lines and balance validation
//! - `lifecycle` - Draft / confirmed / cancelled state machine
//! - `document` - Orchestration, ledger effects and detail projection
//! - `tax` - Tax rate lookup
//! - `clock` - Injectable time source

pub mod calculation;
pub mod clock;
pub mod code;
pub mod document;
pub mod journal;
pub mod lifecycle;
pub mod tax;

pub use document::{DocumentError, DocumentService};
