//! Property-based tests for DocumentService over the in-memory store.
//!
//! - Totals satisfy `total_amount + tax_amount == grand_total`
//! - Confirm followed by cancel restores stock and debts
//! - Deleting a confirmed document leaves no effects behind

use chrono::NaiveDate;
use ledgerline_shared::types::{CounterpartyId, ProductVariantId, UserId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::calculation::RawLineItem;
use crate::document::memory::{InMemoryStore, MemoryState};
use crate::document::service::DocumentService;
use crate::document::types::{CreateDocumentInput, DocumentKind};
use crate::lifecycle::DocumentStatus;

fn arb_kind() -> impl Strategy<Value = DocumentKind> {
    prop_oneof![
        Just(DocumentKind::PurchaseReceipt),
        Just(DocumentKind::SalesReceipt),
        Just(DocumentKind::PaymentVoucher),
        Just(DocumentKind::ReceiptVoucher),
    ]
}

/// (quantity, unit price) pairs with up to 3 and 2 decimal places.
fn arb_lines() -> impl Strategy<Value = Vec<(Decimal, Decimal)>> {
    prop::collection::vec(
        (
            (1i64..100_000i64).prop_map(|q| Decimal::new(q, 3)),
            (0i64..1_000_000i64).prop_map(|p| Decimal::new(p, 2)),
        ),
        0..6,
    )
}

fn input(
    kind: DocumentKind,
    variants: &[ProductVariantId],
    lines: &[(Decimal, Decimal)],
) -> CreateDocumentInput {
    CreateDocumentInput {
        kind,
        code: None,
        counterparty_id: CounterpartyId::new(),
        document_date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
        status: DocumentStatus::Draft,
        note: None,
        items: lines
            .iter()
            .zip(variants.iter().cycle())
            .map(|((quantity, unit_price), variant)| RawLineItem {
                product_variant_id: *variant,
                quantity: *quantity,
                unit_price: *unit_price,
                discount_amount: Decimal::ZERO,
                tax_id: None,
            })
            .collect(),
        journal_lines: None,
        created_by: UserId::new(),
    }
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// *For any* document, confirm then cancel restores stock and leaves no debt.
    #[test]
    fn prop_cancel_reverses_confirm(kind in arb_kind(), lines in arb_lines()) {
        let variants = [ProductVariantId::new(), ProductVariantId::new()];
        let store = InMemoryStore::with_state(
            MemoryState::default()
                .with_stock(variants[0], Decimal::from(1000))
                .with_stock(variants[1], Decimal::from(50)),
        );
        let service = DocumentService::new(store.clone());

        runtime().block_on(async {
            let before = store.snapshot().await;
            let draft = service.create(input(kind, &variants, &lines)).await.unwrap();
            assert_eq!(draft.total_amount + draft.tax_amount, draft.grand_total);

            service.confirm(draft.id).await.unwrap();
            let confirmed = store.snapshot().await;
            assert_eq!(confirmed.debts_for(&draft.reference()).len(), 1);

            service.cancel(draft.id).await.unwrap();
            let after = store.snapshot().await;

            for variant in variants {
                assert_eq!(after.stock_of(variant), before.stock_of(variant));
            }
            assert!(after.debts().is_empty());
            assert!(after.journal_for(&draft.reference()).is_empty());
        });
    }

    /// *For any* confirmed document, delete restores the pre-create ledger state.
    #[test]
    fn prop_delete_discards_effects(kind in arb_kind(), lines in arb_lines()) {
        let variants = [ProductVariantId::new()];
        let store = InMemoryStore::with_state(
            MemoryState::default().with_stock(variants[0], Decimal::from(10)),
        );
        let service = DocumentService::new(store.clone());

        runtime().block_on(async {
            let mut create = input(kind, &variants, &lines);
            create.status = DocumentStatus::Confirmed;
            let doc = service.create(create).await.unwrap();

            service.delete(doc.id).await.unwrap();
            let after = store.snapshot().await;

            assert_eq!(after.document_count(), 0);
            assert_eq!(after.item_count(), 0);
            assert_eq!(after.stock_of(variants[0]), Decimal::from(10));
            assert!(after.debts().is_empty());
        });
    }
}
