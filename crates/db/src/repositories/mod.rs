//! Collaborator implementations for `SeaUnitOfWork`.
//!
//! Each module implements one engine contract against the tables created by
//! the initial migration. All queries run on the unit of work's transaction.

mod debt;
mod detail;
mod document;
mod journal;
mod stock;
mod tax;
