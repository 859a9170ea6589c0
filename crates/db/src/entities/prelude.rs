//! Re-exports of every entity.

pub use super::accounts::Entity as Accounts;
pub use super::counterparties::Entity as Counterparties;
pub use super::debts::Entity as Debts;
pub use super::document_items::Entity as DocumentItems;
pub use super::documents::Entity as Documents;
pub use super::journal_lines::Entity as JournalLines;
pub use super::product_variant_translations::Entity as ProductVariantTranslations;
pub use super::product_variants::Entity as ProductVariants;
pub use super::stock_levels::Entity as StockLevels;
pub use super::taxes::Entity as Taxes;
