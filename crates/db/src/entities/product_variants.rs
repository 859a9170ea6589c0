//! `SeaORM` Entity for product_variants table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "product_variants")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product_variant_translations::Entity")]
    ProductVariantTranslations,
}

impl Related<super::product_variant_translations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductVariantTranslations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
