//! Document domain types.

use chrono::{DateTime, NaiveDate, Utc};
use ledgerline_shared::config::CodePrefixConfig;
use ledgerline_shared::types::{CounterpartyId, DocumentId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::calculation::{CalculationResult, LineItem, RawLineItem};
use crate::journal::{EntrySide, JournalLine};
use crate::lifecycle::DocumentStatus;

/// The kind of business document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Goods received from a supplier.
    PurchaseReceipt,
    /// Goods delivered to a customer.
    SalesReceipt,
    /// Money paid to a supplier.
    PaymentVoucher,
    /// Money received from a customer.
    ReceiptVoucher,
}

impl DocumentKind {
    /// All document kinds.
    pub const ALL: [Self; 4] = [
        Self::PurchaseReceipt,
        Self::SalesReceipt,
        Self::PaymentVoucher,
        Self::ReceiptVoucher,
    ];

    /// Returns the string representation of the kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PurchaseReceipt => "purchase_receipt",
            Self::SalesReceipt => "sales_receipt",
            Self::PaymentVoucher => "payment_voucher",
            Self::ReceiptVoucher => "receipt_voucher",
        }
    }

    /// Parses a kind from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "purchase_receipt" => Some(Self::PurchaseReceipt),
            "sales_receipt" => Some(Self::SalesReceipt),
            "payment_voucher" => Some(Self::PaymentVoucher),
            "receipt_voucher" => Some(Self::ReceiptVoucher),
            _ => None,
        }
    }

    /// Ledger behaviour of this kind.
    #[must_use]
    pub fn policy(self) -> KindPolicy {
        match self {
            Self::PurchaseReceipt => KindPolicy {
                stock: Some(StockDirection::Increase),
                debt_ledger: DebtLedger::Payable,
                debt_side: EntrySide::Credit,
                discount_applies: false,
            },
            Self::SalesReceipt => KindPolicy {
                stock: Some(StockDirection::Decrease),
                debt_ledger: DebtLedger::Receivable,
                debt_side: EntrySide::Debit,
                discount_applies: true,
            },
            Self::PaymentVoucher => KindPolicy {
                stock: None,
                debt_ledger: DebtLedger::Payable,
                debt_side: EntrySide::Debit,
                discount_applies: false,
            },
            Self::ReceiptVoucher => KindPolicy {
                stock: None,
                debt_ledger: DebtLedger::Receivable,
                debt_side: EntrySide::Credit,
                discount_applies: false,
            },
        }
    }

    /// Code prefix used when none is configured.
    #[must_use]
    pub fn default_prefix(self) -> &'static str {
        match self {
            Self::PurchaseReceipt => "PR",
            Self::SalesReceipt => "SR",
            Self::PaymentVoucher => "PV",
            Self::ReceiptVoucher => "RV",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockDirection {
    /// Stock goes up.
    Increase,
    /// Stock goes down.
    Decrease,
}

impl StockDirection {
    /// The movement that undoes this one.
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Self::Increase => Self::Decrease,
            Self::Decrease => Self::Increase,
        }
    }
}

/// Debt ledger a document posts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebtLedger {
    /// Amounts owed to suppliers.
    Payable,
    /// Amounts owed by customers.
    Receivable,
}

impl DebtLedger {
    /// Returns the string representation of the ledger.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Payable => "payable",
            Self::Receivable => "receivable",
        }
    }

    /// Parses a ledger from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "payable" => Some(Self::Payable),
            "receivable" => Some(Self::Receivable),
            _ => None,
        }
    }
}

/// Per-kind ledger behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindPolicy {
    /// Stock movement on confirm, `None` for vouchers.
    pub stock: Option<StockDirection>,
    /// Ledger the debt entry goes to.
    pub debt_ledger: DebtLedger,
    /// Side the grand total is posted on.
    pub debt_side: EntrySide,
    /// Whether line discounts are honoured.
    pub discount_applies: bool,
}

/// Reference used by collaborators to find the effects of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentRef {
    /// Document kind.
    pub kind: DocumentKind,
    /// Document ID.
    pub id: DocumentId,
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// A receipt or voucher with its line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Document ID.
    pub id: DocumentId,
    /// Unique, immutable code.
    pub code: String,
    /// Document kind.
    pub kind: DocumentKind,
    /// Supplier or customer.
    pub counterparty_id: CounterpartyId,
    /// Business date.
    pub document_date: NaiveDate,
    /// Lifecycle status.
    pub status: DocumentStatus,
    /// Sum of line subtotals.
    pub total_amount: Decimal,
    /// Sum of line taxes.
    pub tax_amount: Decimal,
    /// `total_amount + tax_amount`.
    pub grand_total: Decimal,
    /// Free-text note.
    pub note: Option<String>,
    /// Ordered line items.
    pub line_items: Vec<LineItem>,
    /// Creating user.
    pub created_by: UserId,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Reference for collaborator calls.
    #[must_use]
    pub fn reference(&self) -> DocumentRef {
        DocumentRef {
            kind: self.kind,
            id: self.id,
        }
    }

    /// Ledger behaviour of this document's kind.
    #[must_use]
    pub fn policy(&self) -> KindPolicy {
        self.kind.policy()
    }

    /// Replaces the line items and totals with a calculation result.
    pub fn apply_calculation(&mut self, result: CalculationResult) {
        self.total_amount = result.total_amount;
        self.tax_amount = result.tax_amount;
        self.grand_total = result.grand_total;
        self.line_items = result.items;
    }
}

/// Input for creating a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDocumentInput {
    /// Document kind.
    pub kind: DocumentKind,
    /// Explicit code; generated when absent or blank.
    #[serde(default)]
    pub code: Option<String>,
    /// Supplier or customer.
    pub counterparty_id: CounterpartyId,
    /// Business date.
    pub document_date: NaiveDate,
    /// Requested status, draft or confirmed.
    pub status: DocumentStatus,
    /// Free-text note.
    #[serde(default)]
    pub note: Option<String>,
    /// Line items.
    #[serde(default)]
    pub items: Vec<RawLineItem>,
    /// Journal lines, stored unconfirmed.
    #[serde(default)]
    pub journal_lines: Option<Vec<JournalLine>>,
    /// Creating user.
    pub created_by: UserId,
}

/// Input for updating a document. The code cannot be changed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDocumentInput {
    /// Supplier or customer.
    pub counterparty_id: CounterpartyId,
    /// Business date.
    pub document_date: NaiveDate,
    /// Requested status.
    pub status: DocumentStatus,
    /// Free-text note.
    #[serde(default)]
    pub note: Option<String>,
    /// Replacement line items.
    #[serde(default)]
    pub items: Vec<RawLineItem>,
    /// Replacement journal lines; `None` keeps the current ones.
    #[serde(default)]
    pub journal_lines: Option<Vec<JournalLine>>,
}

/// Code prefixes per kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodePrefixes {
    purchase_receipt: String,
    sales_receipt: String,
    payment_voucher: String,
    receipt_voucher: String,
}

impl CodePrefixes {
    /// Prefix for `kind`.
    #[must_use]
    pub fn for_kind(&self, kind: DocumentKind) -> &str {
        match kind {
            DocumentKind::PurchaseReceipt => &self.purchase_receipt,
            DocumentKind::SalesReceipt => &self.sales_receipt,
            DocumentKind::PaymentVoucher => &self.payment_voucher,
            DocumentKind::ReceiptVoucher => &self.receipt_voucher,
        }
    }
}

impl Default for CodePrefixes {
    fn default() -> Self {
        Self {
            purchase_receipt: DocumentKind::PurchaseReceipt.default_prefix().to_string(),
            sales_receipt: DocumentKind::SalesReceipt.default_prefix().to_string(),
            payment_voucher: DocumentKind::PaymentVoucher.default_prefix().to_string(),
            receipt_voucher: DocumentKind::ReceiptVoucher.default_prefix().to_string(),
        }
    }
}

impl From<&CodePrefixConfig> for CodePrefixes {
    fn from(config: &CodePrefixConfig) -> Self {
        Self {
            purchase_receipt: config.purchase_receipt.clone(),
            sales_receipt: config.sales_receipt.clone(),
            payment_voucher: config.payment_voucher.clone(),
            receipt_voucher: config.receipt_voucher.clone(),
        }
    }
}
