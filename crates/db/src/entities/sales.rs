//! `SeaORM` Entity for sales table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "sales")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub invoice_id: Uuid,
    pub product_type_id: Uuid,
    /// Null for service lines, which never consume stock.
    pub production_batch_id: Option<Uuid>,
    pub quantity: i64,
    pub rate: Decimal,
    /// Always quantity × rate.
    pub amount: Decimal,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::invoices::Entity",
        from = "Column::InvoiceId",
        to = "super::invoices::Column::Id"
    )]
    Invoices,
    #[sea_orm(
        belongs_to = "super::product_types::Entity",
        from = "Column::ProductTypeId",
        to = "super::product_types::Column::Id"
    )]
    ProductTypes,
    #[sea_orm(
        belongs_to = "super::production_batches::Entity",
        from = "Column::ProductionBatchId",
        to = "super::production_batches::Column::Id"
    )]
    ProductionBatches,
}

impl Related<super::invoices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invoices.def()
    }
}

impl Related<super::product_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductTypes.def()
    }
}

impl Related<super::production_batches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductionBatches.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
