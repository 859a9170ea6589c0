//! Database seeder for Ledgerline development and testing.
//!
//! Seeds a VAT rate, a small chart of accounts, one supplier, one customer and
//! a product variant, then runs a purchase receipt, a sales receipt and a
//! payment voucher through the document engine.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use ledgerline_core::calculation::RawLineItem;
use ledgerline_core::document::{CreateDocumentInput, DocumentKind};
use ledgerline_core::journal::JournalLine;
use ledgerline_core::lifecycle::DocumentStatus;
use ledgerline_core::DocumentService;
use ledgerline_db::entities::{
    accounts, counterparties, product_variant_translations, product_variants, taxes,
};
use ledgerline_db::SeaDocumentStore;
use ledgerline_shared::config::{AppConfig, LoggingConfig};
use ledgerline_shared::types::{CounterpartyId, LanguageId, ProductVariantId, TaxId, UserId};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// VAT 10% (consistent for all seeds)
const VAT_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_0000_0000_0000_0000_0101);
/// Seed supplier
const SUPPLIER_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_0000_0000_0000_0000_0201);
/// Seed customer
const CUSTOMER_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_0000_0000_0000_0000_0202);
/// Seed product variant
const SHIRT_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_0000_0000_0000_0000_0301);
/// English
const ENGLISH_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_0000_0000_0000_0000_0401);
/// Seed user recorded as document author
const SEED_USER_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_0000_0000_0000_0000_0501);

const ACCOUNTS: [(&str, &str); 5] = [
    ("1100", "Cash"),
    ("1300", "Accounts Receivable"),
    ("1400", "Inventory"),
    ("2100", "Accounts Payable"),
    ("4000", "Sales Revenue"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    let db = ledgerline_db::connect(&config.database)
        .await
        .context("Failed to connect to database")?;

    info!("Seeding reference data...");
    seed_tax(&db).await?;
    seed_accounts(&db).await?;
    seed_counterparties(&db).await?;
    seed_variant(&db).await?;

    info!("Running sample documents...");
    let service = DocumentService::from_config(SeaDocumentStore::new(db), &config.documents);
    run_samples(&service).await?;

    info!("Seeding complete!");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.filter.as_str()));

    tracing_subscriber::registry()
        .with(filter)
        .with(logging.json.then(|| fmt::layer().json()))
        .with((!logging.json).then(fmt::layer))
        .init();
}

/// Seeds the VAT rate.
async fn seed_tax(db: &DatabaseConnection) -> anyhow::Result<()> {
    if taxes::Entity::find_by_id(VAT_ID).one(db).await?.is_some() {
        info!("  VAT already exists, skipping...");
        return Ok(());
    }

    taxes::ActiveModel {
        id: Set(VAT_ID),
        name: Set("VAT 10%".to_string()),
        rate: Set(Decimal::TEN),
        created_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await?;

    info!("  Created VAT 10%");
    Ok(())
}

/// Seeds the chart of accounts used by the sample journals.
async fn seed_accounts(db: &DatabaseConnection) -> anyhow::Result<()> {
    for (code, name) in ACCOUNTS {
        if accounts::Entity::find_by_id(code.to_string())
            .one(db)
            .await?
            .is_some()
        {
            continue;
        }

        accounts::ActiveModel {
            code: Set(code.to_string()),
            name: Set(name.to_string()),
            created_at: Set(Utc::now().into()),
        }
        .insert(db)
        .await?;

        info!("  Created account {code} {name}");
    }
    Ok(())
}

/// Seeds one supplier and one customer.
async fn seed_counterparties(db: &DatabaseConnection) -> anyhow::Result<()> {
    let seeds = [
        (SUPPLIER_ID, "S001", "Textile Supply Co", None),
        (CUSTOMER_ID, "C001", "Acme Retail", Some("555-0100")),
    ];

    for (id, code, name, phone) in seeds {
        if counterparties::Entity::find_by_id(id).one(db).await?.is_some() {
            continue;
        }

        counterparties::ActiveModel {
            id: Set(id),
            code: Set(code.to_string()),
            name: Set(name.to_string()),
            phone: Set(phone.map(str::to_string)),
            address: Set(None),
            created_at: Set(Utc::now().into()),
        }
        .insert(db)
        .await?;

        info!("  Created counterparty {code} {name}");
    }
    Ok(())
}

/// Seeds one product variant with an English name.
async fn seed_variant(db: &DatabaseConnection) -> anyhow::Result<()> {
    if product_variants::Entity::find_by_id(SHIRT_ID)
        .one(db)
        .await?
        .is_some()
    {
        info!("  Product variant already exists, skipping...");
        return Ok(());
    }

    product_variants::ActiveModel {
        id: Set(SHIRT_ID),
        sku: Set(Some("SHIRT-BLUE-M".to_string())),
        barcode: Set(Some("8990001000012".to_string())),
        created_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await?;

    product_variant_translations::ActiveModel {
        product_variant_id: Set(SHIRT_ID),
        language_id: Set(ENGLISH_ID),
        name: Set("Blue Shirt (M)".to_string()),
    }
    .insert(db)
    .await?;

    info!("  Created product variant SHIRT-BLUE-M");
    Ok(())
}

/// Runs confirmed sample documents through the engine.
async fn run_samples(service: &DocumentService<SeaDocumentStore>) -> anyhow::Result<()> {
    let today = Utc::now().date_naive();
    let vat = TaxId::from_uuid(VAT_ID);
    let shirt = ProductVariantId::from_uuid(SHIRT_ID);

    let purchase = service
        .create(sample(
            DocumentKind::PurchaseReceipt,
            CounterpartyId::from_uuid(SUPPLIER_ID),
            today,
            RawLineItem {
                product_variant_id: shirt,
                quantity: Decimal::TEN,
                unit_price: Decimal::from(1000),
                discount_amount: Decimal::ZERO,
                tax_id: Some(vat),
            },
            Some(vec![
                JournalLine::debit("1400", Decimal::from(11000)),
                JournalLine::credit("2100", Decimal::from(11000)),
            ]),
        ))
        .await?;
    info!(code = %purchase.code, grand_total = %purchase.grand_total, "Purchase receipt confirmed");

    let sale = service
        .create(sample(
            DocumentKind::SalesReceipt,
            CounterpartyId::from_uuid(CUSTOMER_ID),
            today,
            RawLineItem {
                product_variant_id: shirt,
                quantity: Decimal::from(5),
                unit_price: Decimal::from(2000),
                discount_amount: Decimal::from(1000),
                tax_id: Some(vat),
            },
            Some(vec![
                JournalLine::debit("1300", Decimal::from(9900)),
                JournalLine::credit("4000", Decimal::from(9900)),
            ]),
        ))
        .await?;
    info!(code = %sale.code, grand_total = %sale.grand_total, "Sales receipt confirmed");

    let payment = service
        .create(sample(
            DocumentKind::PaymentVoucher,
            CounterpartyId::from_uuid(SUPPLIER_ID),
            today,
            RawLineItem {
                product_variant_id: shirt,
                quantity: Decimal::ONE,
                unit_price: purchase.grand_total,
                discount_amount: Decimal::ZERO,
                tax_id: None,
            },
            None,
        ))
        .await?;
    info!(code = %payment.code, grand_total = %payment.grand_total, "Payment voucher confirmed");

    let detail = service
        .detail(purchase.id, LanguageId::from_uuid(ENGLISH_ID))
        .await?;
    info!(
        code = %detail.code,
        payable_balance = %detail.debt_summary.balance,
        "Supplier balance after payment"
    );

    Ok(())
}

fn sample(
    kind: DocumentKind,
    counterparty_id: CounterpartyId,
    document_date: NaiveDate,
    item: RawLineItem,
    journal_lines: Option<Vec<JournalLine>>,
) -> CreateDocumentInput {
    CreateDocumentInput {
        kind,
        code: None,
        counterparty_id,
        document_date,
        status: DocumentStatus::Confirmed,
        note: Some("seeded".to_string()),
        items: vec![item],
        journal_lines,
        created_by: UserId::from_uuid(SEED_USER_ID),
    }
}
