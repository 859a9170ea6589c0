//! Stock levels.
//!
//! Levels are keyed by product variant and upserted, so a variant without a
//! row starts from zero.

use async_trait::async_trait;
use ledgerline_core::document::{DocumentRef, StockMovement, StockService, StoreError};
use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, DbBackend, Statement};
use tracing::debug;

use crate::store::{SeaUnitOfWork, store_err};

const UPSERT_STOCK_SQL: &str = r"
INSERT INTO stock_levels (product_variant_id, quantity, updated_at)
VALUES ($1, $2, now())
ON CONFLICT (product_variant_id)
DO UPDATE SET quantity = stock_levels.quantity + EXCLUDED.quantity, updated_at = now()
";

impl SeaUnitOfWork {
    async fn adjust_stock(
        &mut self,
        reference: &DocumentRef,
        movements: &[StockMovement],
        sign: Decimal,
    ) -> Result<(), StoreError> {
        for movement in movements {
            let delta = movement.quantity * sign;
            let statement = Statement::from_sql_and_values(
                DbBackend::Postgres,
                UPSERT_STOCK_SQL,
                [
                    movement.product_variant_id.into_inner().into(),
                    delta.into(),
                ],
            );
            self.transaction()
                .execute(statement)
                .await
                .map_err(store_err)?;

            debug!(
                document = %reference,
                product_variant_id = %movement.product_variant_id,
                %delta,
                "Stock adjusted"
            );
        }
        Ok(())
    }
}

#[async_trait]
impl StockService for SeaUnitOfWork {
    async fn increase_stock(
        &mut self,
        reference: &DocumentRef,
        movements: &[StockMovement],
    ) -> Result<(), StoreError> {
        self.adjust_stock(reference, movements, Decimal::ONE).await
    }

    async fn decrease_stock(
        &mut self,
        reference: &DocumentRef,
        movements: &[StockMovement],
    ) -> Result<(), StoreError> {
        self.adjust_stock(reference, movements, Decimal::NEGATIVE_ONE)
            .await
    }
}
