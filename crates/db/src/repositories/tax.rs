//! Tax rate lookup.

use async_trait::async_trait;
use ledgerline_core::document::StoreError;
use ledgerline_core::tax::{TaxRate, TaxResolver};
use ledgerline_shared::types::TaxId;
use sea_orm::EntityTrait;

use crate::entities::taxes;
use crate::store::{SeaUnitOfWork, store_err};

#[async_trait]
impl TaxResolver for SeaUnitOfWork {
    async fn find_tax(&mut self, id: TaxId) -> Result<Option<TaxRate>, StoreError> {
        let tax = taxes::Entity::find_by_id(id.into_inner())
            .one(self.transaction())
            .await
            .map_err(store_err)?;

        Ok(tax.map(|tax| TaxRate {
            id: TaxId::from_uuid(tax.id),
            name: tax.name,
            rate: tax.rate,
        }))
    }
}
