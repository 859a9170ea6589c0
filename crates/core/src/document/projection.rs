//! Read-only document detail projection.
//!
//! Assembles a document with its counterparty, display names for line
//! items, journal lines with account names and a debt summary. Nothing
//! here mutates state, and missing reference data never fails.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use ledgerline_shared::types::{CounterpartyId, DocumentId, LanguageId, ProductVariantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::document::ports::NewDebt;
use crate::document::types::{DebtLedger, Document, DocumentKind, DocumentRef};
use crate::journal::{EntrySide, JournalLine, JournalStatus};
use crate::lifecycle::DocumentStatus;

/// Supplier or customer shown on a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterpartyInfo {
    /// Counterparty ID.
    pub id: CounterpartyId,
    /// Short code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Postal address.
    pub address: Option<String>,
}

/// Name of a product variant in one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantTranslation {
    /// Language of the name.
    pub language_id: LanguageId,
    /// Translated name.
    pub name: String,
}

/// Product variant reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantInfo {
    /// Variant ID.
    pub id: ProductVariantId,
    /// Stock keeping unit.
    pub sku: Option<String>,
    /// Barcode.
    pub barcode: Option<String>,
    /// Names per language.
    pub translations: Vec<VariantTranslation>,
}

/// A journal line as stored, with its confirmation status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredJournalLine {
    /// The line.
    pub line: JournalLine,
    /// Confirmed or not.
    pub status: JournalStatus,
}

/// A recorded debt entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtRecord {
    /// Originating document.
    pub reference: DocumentRef,
    /// Supplier or customer.
    pub counterparty_id: CounterpartyId,
    /// Payable or receivable.
    pub ledger: DebtLedger,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Posting date.
    pub date: NaiveDate,
}

impl From<&NewDebt> for DebtRecord {
    fn from(debt: &NewDebt) -> Self {
        let (debit, credit) = match debt.side {
            EntrySide::Debit => (debt.amount, Decimal::ZERO),
            EntrySide::Credit => (Decimal::ZERO, debt.amount),
        };
        Self {
            reference: debt.reference,
            counterparty_id: debt.counterparty_id,
            ledger: debt.ledger,
            debit,
            credit,
            date: debt.date,
        }
    }
}

/// Everything the projection reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailSource {
    /// The document with its items.
    pub document: Document,
    /// The counterparty, if it still exists.
    pub counterparty: Option<CounterpartyInfo>,
    /// Variants referenced by the items.
    pub variants: HashMap<ProductVariantId, VariantInfo>,
    /// Journal lines of the document.
    pub journal: Vec<StoredJournalLine>,
    /// Account names by account code.
    pub account_names: HashMap<String, String>,
    /// Debt entries of the counterparty.
    pub debts: Vec<DebtRecord>,
}

/// Formatted line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailLine {
    /// 1-based position.
    pub line_no: u32,
    /// Product variant.
    pub product_variant_id: ProductVariantId,
    /// Translated name, SKU, barcode or empty.
    pub display_name: String,
    /// Quantity.
    pub quantity: Decimal,
    /// Unit price.
    pub unit_price: Decimal,
    /// Discount.
    pub discount_amount: Decimal,
    /// Tax rate in percent.
    pub tax_rate: Decimal,
    /// Subtotal.
    pub subtotal: Decimal,
    /// Tax amount.
    pub tax_amount: Decimal,
    /// Line total.
    pub line_total: Decimal,
}

/// Journal line with its account name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailJournalLine {
    /// Account code.
    pub account_code: String,
    /// Account name, empty when unknown.
    pub account_name: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Memo.
    pub memo: Option<String>,
    /// Confirmation status.
    pub status: JournalStatus,
}

/// Debt totals of a counterparty in one ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DebtSummary {
    /// Sum of debits.
    pub total_debit: Decimal,
    /// Sum of credits.
    pub total_credit: Decimal,
    /// `total_debit - total_credit`.
    pub balance: Decimal,
}

/// A document prepared for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentDetail {
    /// Document ID.
    pub id: DocumentId,
    /// Code.
    pub code: String,
    /// Kind.
    pub kind: DocumentKind,
    /// Status.
    pub status: DocumentStatus,
    /// Business date.
    pub document_date: NaiveDate,
    /// Note.
    pub note: Option<String>,
    /// Counterparty, if found.
    pub counterparty: Option<CounterpartyInfo>,
    /// Sum of subtotals.
    pub total_amount: Decimal,
    /// Sum of taxes.
    pub tax_amount: Decimal,
    /// Grand total.
    pub grand_total: Decimal,
    /// Formatted items.
    pub items: Vec<DetailLine>,
    /// Journal lines.
    pub journal: Vec<DetailJournalLine>,
    /// Debt summary for the counterparty.
    pub debt_summary: DebtSummary,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Builds `DocumentDetail` values.
pub struct DetailProjection;

impl DetailProjection {
    /// Projects a detail source for `language_id`.
    #[must_use]
    pub fn project(source: DetailSource, language_id: LanguageId) -> DocumentDetail {
        let DetailSource {
            document,
            counterparty,
            variants,
            journal,
            account_names,
            debts,
        } = source;

        let items = document
            .line_items
            .iter()
            .map(|item| DetailLine {
                line_no: item.line_no,
                product_variant_id: item.product_variant_id,
                display_name: Self::display_name(
                    variants.get(&item.product_variant_id),
                    language_id,
                ),
                quantity: item.quantity,
                unit_price: item.unit_price,
                discount_amount: item.discount_amount,
                tax_rate: item.tax_rate,
                subtotal: item.subtotal,
                tax_amount: item.tax_amount,
                line_total: item.line_total,
            })
            .collect();

        let journal = journal
            .into_iter()
            .map(|stored| DetailJournalLine {
                account_name: account_names
                    .get(&stored.line.account_code)
                    .cloned()
                    .unwrap_or_default(),
                account_code: stored.line.account_code,
                debit: stored.line.debit,
                credit: stored.line.credit,
                memo: stored.line.memo,
                status: stored.status,
            })
            .collect();

        let debt_summary = Self::debt_summary(
            &debts,
            document.counterparty_id,
            document.policy().debt_ledger,
        );

        DocumentDetail {
            id: document.id,
            code: document.code,
            kind: document.kind,
            status: document.status,
            document_date: document.document_date,
            note: document.note,
            counterparty,
            total_amount: document.total_amount,
            tax_amount: document.tax_amount,
            grand_total: document.grand_total,
            items,
            journal,
            debt_summary,
            created_at: document.created_at,
            updated_at: document.updated_at,
        }
    }

    /// Display name of a variant: translation, then SKU, then barcode, then empty.
    #[must_use]
    pub fn display_name(variant: Option<&VariantInfo>, language_id: LanguageId) -> String {
        let Some(variant) = variant else {
            return String::new();
        };

        variant
            .translations
            .iter()
            .find(|t| t.language_id == language_id && !t.name.trim().is_empty())
            .map(|t| t.name.as_str())
            .or_else(|| variant.sku.as_deref().filter(|s| !s.is_empty()))
            .or_else(|| variant.barcode.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or_default()
            .to_string()
    }

    /// Totals every debt of `counterparty_id` in `ledger`.
    #[must_use]
    pub fn debt_summary(
        debts: &[DebtRecord],
        counterparty_id: CounterpartyId,
        ledger: DebtLedger,
    ) -> DebtSummary {
        let (total_debit, total_credit) = debts
            .iter()
            .filter(|d| d.counterparty_id == counterparty_id && d.ledger == ledger)
            .fold((Decimal::ZERO, Decimal::ZERO), |(debit, credit), d| {
                (debit + d.debit, credit + d.credit)
            });

        DebtSummary {
            total_debit,
            total_credit,
            balance: total_debit - total_credit,
        }
    }
}
