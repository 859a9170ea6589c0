//! Postgres enum types, with conversions to the domain enums.

use ledgerline_core::document::{DebtLedger, DocumentKind as CoreDocumentKind};
use ledgerline_core::journal::JournalStatus as CoreJournalStatus;
use ledgerline_core::lifecycle::DocumentStatus as CoreDocumentStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "document_kind")]
pub enum DocumentKind {
    #[sea_orm(string_value = "purchase_receipt")]
    PurchaseReceipt,
    #[sea_orm(string_value = "sales_receipt")]
    SalesReceipt,
    #[sea_orm(string_value = "payment_voucher")]
    PaymentVoucher,
    #[sea_orm(string_value = "receipt_voucher")]
    ReceiptVoucher,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "document_status")]
pub enum DocumentStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "debt_ledger")]
pub enum DebtLedgerType {
    #[sea_orm(string_value = "payable")]
    Payable,
    #[sea_orm(string_value = "receivable")]
    Receivable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "journal_status")]
pub enum JournalStatus {
    #[sea_orm(string_value = "unconfirmed")]
    Unconfirmed,
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
}

impl From<CoreDocumentKind> for DocumentKind {
    fn from(kind: CoreDocumentKind) -> Self {
        match kind {
            CoreDocumentKind::PurchaseReceipt => Self::PurchaseReceipt,
            CoreDocumentKind::SalesReceipt => Self::SalesReceipt,
            CoreDocumentKind::PaymentVoucher => Self::PaymentVoucher,
            CoreDocumentKind::ReceiptVoucher => Self::ReceiptVoucher,
        }
    }
}

impl From<DocumentKind> for CoreDocumentKind {
    fn from(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::PurchaseReceipt => Self::PurchaseReceipt,
            DocumentKind::SalesReceipt => Self::SalesReceipt,
            DocumentKind::PaymentVoucher => Self::PaymentVoucher,
            DocumentKind::ReceiptVoucher => Self::ReceiptVoucher,
        }
    }
}

impl From<CoreDocumentStatus> for DocumentStatus {
    fn from(status: CoreDocumentStatus) -> Self {
        match status {
            CoreDocumentStatus::Draft => Self::Draft,
            CoreDocumentStatus::Confirmed => Self::Confirmed,
            CoreDocumentStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<DocumentStatus> for CoreDocumentStatus {
    fn from(status: DocumentStatus) -> Self {
        match status {
            DocumentStatus::Draft => Self::Draft,
            DocumentStatus::Confirmed => Self::Confirmed,
            DocumentStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<DebtLedger> for DebtLedgerType {
    fn from(ledger: DebtLedger) -> Self {
        match ledger {
            DebtLedger::Payable => Self::Payable,
            DebtLedger::Receivable => Self::Receivable,
        }
    }
}

impl From<DebtLedgerType> for DebtLedger {
    fn from(ledger: DebtLedgerType) -> Self {
        match ledger {
            DebtLedgerType::Payable => Self::Payable,
            DebtLedgerType::Receivable => Self::Receivable,
        }
    }
}

impl From<CoreJournalStatus> for JournalStatus {
    fn from(status: CoreJournalStatus) -> Self {
        match status {
            CoreJournalStatus::Unconfirmed => Self::Unconfirmed,
            CoreJournalStatus::Confirmed => Self::Confirmed,
        }
    }
}

impl From<JournalStatus> for CoreJournalStatus {
    fn from(status: JournalStatus) -> Self {
        match status {
            JournalStatus::Unconfirmed => Self::Unconfirmed,
            JournalStatus::Confirmed => Self::Confirmed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveEnum;

    #[test]
    fn test_document_kind_values_match_domain() {
        for kind in CoreDocumentKind::ALL {
            let db_kind = DocumentKind::from(kind);
            assert_eq!(db_kind.to_value(), kind.as_str());
            assert_eq!(CoreDocumentKind::from(db_kind), kind);
        }
    }

    #[test]
    fn test_status_values_match_domain() {
        for status in [
            CoreDocumentStatus::Draft,
            CoreDocumentStatus::Confirmed,
            CoreDocumentStatus::Cancelled,
        ] {
            let db_status = DocumentStatus::from(status);
            assert_eq!(db_status.to_value(), status.as_str());
            assert_eq!(CoreDocumentStatus::from(db_status), status);
        }
    }

    #[test]
    fn test_ledger_and_journal_values() {
        assert_eq!(DebtLedgerType::from(DebtLedger::Payable).to_value(), "payable");
        assert_eq!(
            DebtLedger::from(DebtLedgerType::Receivable),
            DebtLedger::Receivable
        );
        assert_eq!(
            JournalStatus::from(CoreJournalStatus::Confirmed).to_value(),
            "confirmed"
        );
        assert_eq!(
            CoreJournalStatus::from(JournalStatus::Unconfirmed),
            CoreJournalStatus::Unconfirmed
        );
    }
}
