//! `SeaORM` entity definitions.
//!
//! One module per table created by the initial migration. Columns mirror the
//! SQL schema and are documented there.

#![allow(missing_docs)]

pub mod prelude;

pub mod accounts;
pub mod counterparties;
pub mod debts;
pub mod document_items;
pub mod documents;
pub mod journal_lines;
pub mod product_variant_translations;
pub mod product_variants;
pub mod sea_orm_active_enums;
pub mod stock_levels;
pub mod taxes;
