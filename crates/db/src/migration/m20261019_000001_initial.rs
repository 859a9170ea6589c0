//! Initial database migration.
//!
//! Creates the enums, reference tables, documents with their items, and the
//! journal, debt and stock tables the document engine writes to.

use sea_orm_migration::prelude::*;

/// Creates the initial schema.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: REFERENCE DATA
        // ============================================================
        db.execute_unprepared(TAXES_SQL).await?;
        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(COUNTERPARTIES_SQL).await?;
        db.execute_unprepared(PRODUCT_VARIANTS_SQL).await?;

        // ============================================================
        // PART 3: DOCUMENTS
        // ============================================================
        db.execute_unprepared(DOCUMENTS_SQL).await?;
        db.execute_unprepared(DOCUMENT_ITEMS_SQL).await?;

        // ============================================================
        // PART 4: LEDGER EFFECTS
        // ============================================================
        db.execute_unprepared(JOURNAL_LINES_SQL).await?;
        db.execute_unprepared(DEBTS_SQL).await?;
        db.execute_unprepared(STOCK_LEVELS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE document_kind AS ENUM (
    'purchase_receipt',
    'sales_receipt',
    'payment_voucher',
    'receipt_voucher'
);

CREATE TYPE document_status AS ENUM ('draft', 'confirmed', 'cancelled');

CREATE TYPE debt_ledger AS ENUM ('payable', 'receivable');

CREATE TYPE journal_status AS ENUM ('unconfirmed', 'confirmed');
";

const TAXES_SQL: &str = r"
CREATE TABLE taxes (
    id UUID PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    rate NUMERIC(9, 4) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_taxes_rate CHECK (rate >= 0)
);
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    code VARCHAR(20) PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const COUNTERPARTIES_SQL: &str = r"
CREATE TABLE counterparties (
    id UUID PRIMARY KEY,
    code VARCHAR(50) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    phone VARCHAR(50),
    address TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const PRODUCT_VARIANTS_SQL: &str = r"
CREATE TABLE product_variants (
    id UUID PRIMARY KEY,
    sku VARCHAR(100),
    barcode VARCHAR(100),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE product_variant_translations (
    product_variant_id UUID NOT NULL REFERENCES product_variants(id) ON DELETE CASCADE,
    language_id UUID NOT NULL,
    name VARCHAR(255) NOT NULL,
    PRIMARY KEY (product_variant_id, language_id)
);
";

const DOCUMENTS_SQL: &str = r"
-- counterparty_id is a weak reference: documents outlive deleted counterparties
CREATE TABLE documents (
    id UUID PRIMARY KEY,
    code VARCHAR(64) NOT NULL,
    kind document_kind NOT NULL,
    counterparty_id UUID NOT NULL,
    document_date DATE NOT NULL,
    status document_status NOT NULL DEFAULT 'draft',
    total_amount NUMERIC(19, 4) NOT NULL DEFAULT 0,
    tax_amount NUMERIC(19, 4) NOT NULL DEFAULT 0,
    grand_total NUMERIC(19, 4) NOT NULL DEFAULT 0,
    note TEXT,
    created_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_documents_code UNIQUE (code),
    CONSTRAINT chk_documents_totals CHECK (total_amount + tax_amount = grand_total)
);

CREATE INDEX idx_documents_kind_date ON documents(kind, document_date DESC);
CREATE INDEX idx_documents_counterparty ON documents(counterparty_id);
";

const DOCUMENT_ITEMS_SQL: &str = r"
CREATE TABLE document_items (
    id UUID PRIMARY KEY,
    document_id UUID NOT NULL REFERENCES documents(id) ON DELETE CASCADE,
    line_no INTEGER NOT NULL,
    product_variant_id UUID NOT NULL,
    quantity NUMERIC(19, 4) NOT NULL,
    unit_price NUMERIC(19, 4) NOT NULL,
    discount_amount NUMERIC(19, 4) NOT NULL DEFAULT 0,
    tax_id UUID,
    tax_rate NUMERIC(9, 4) NOT NULL DEFAULT 0,
    subtotal NUMERIC(19, 4) NOT NULL,
    tax_amount NUMERIC(19, 4) NOT NULL,
    line_total NUMERIC(19, 4) NOT NULL,
    CONSTRAINT uq_document_items_line UNIQUE (document_id, line_no),
    CONSTRAINT chk_document_items_quantity CHECK (quantity > 0),
    CONSTRAINT chk_document_items_price CHECK (unit_price >= 0),
    CONSTRAINT chk_document_items_discount CHECK (discount_amount >= 0)
);
";

const JOURNAL_LINES_SQL: &str = r"
CREATE TABLE journal_lines (
    id UUID PRIMARY KEY,
    document_kind document_kind NOT NULL,
    document_id UUID NOT NULL,
    line_no INTEGER NOT NULL,
    account_code VARCHAR(20) NOT NULL,
    debit NUMERIC(19, 4) NOT NULL DEFAULT 0,
    credit NUMERIC(19, 4) NOT NULL DEFAULT 0,
    memo TEXT,
    status journal_status NOT NULL DEFAULT 'unconfirmed',
    entry_date DATE NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_journal_lines_amounts CHECK (debit >= 0 AND credit >= 0),
    CONSTRAINT chk_journal_lines_one_side CHECK ((debit = 0) <> (credit = 0))
);

CREATE INDEX idx_journal_lines_document ON journal_lines(document_kind, document_id, line_no);
";

const DEBTS_SQL: &str = r"
CREATE TABLE debts (
    id UUID PRIMARY KEY,
    document_kind document_kind NOT NULL,
    document_id UUID NOT NULL,
    counterparty_id UUID NOT NULL,
    ledger debt_ledger NOT NULL,
    debit NUMERIC(19, 4) NOT NULL DEFAULT 0,
    credit NUMERIC(19, 4) NOT NULL DEFAULT 0,
    debt_date DATE NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    -- One debt entry per document
    CONSTRAINT uq_debts_document UNIQUE (document_kind, document_id)
);

CREATE INDEX idx_debts_counterparty ON debts(counterparty_id, ledger);
";

const STOCK_LEVELS_SQL: &str = r"
CREATE TABLE stock_levels (
    product_variant_id UUID PRIMARY KEY,
    quantity NUMERIC(19, 4) NOT NULL DEFAULT 0,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS stock_levels CASCADE;
DROP TABLE IF EXISTS debts CASCADE;
DROP TABLE IF EXISTS journal_lines CASCADE;
DROP TABLE IF EXISTS document_items CASCADE;
DROP TABLE IF EXISTS documents CASCADE;
DROP TABLE IF EXISTS product_variant_translations CASCADE;
DROP TABLE IF EXISTS product_variants CASCADE;
DROP TABLE IF EXISTS counterparties CASCADE;
DROP TABLE IF EXISTS accounts CASCADE;
DROP TABLE IF EXISTS taxes CASCADE;
DROP TYPE IF EXISTS journal_status;
DROP TYPE IF EXISTS debt_ledger;
DROP TYPE IF EXISTS document_status;
DROP TYPE IF EXISTS document_kind;
";
