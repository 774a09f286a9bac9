//! `SeaORM` Entity for production_batches table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "production_batches")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub product_type_id: Uuid,
    pub storage_location_id: Option<Uuid>,
    pub batch_number: String,
    /// Original quantity, immutable after creation.
    pub quantity: i64,
    /// Single source of truth for available stock, always in [0, quantity].
    pub remaining_quantity: i64,
    pub manufactured_on: Option<Date>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product_types::Entity",
        from = "Column::ProductTypeId",
        to = "super::product_types::Column::Id"
    )]
    ProductTypes,
    #[sea_orm(
        belongs_to = "super::storage_locations::Entity",
        from = "Column::StorageLocationId",
        to = "super::storage_locations::Column::Id"
    )]
    StorageLocations,
    #[sea_orm(has_many = "super::sales::Entity")]
    Sales,
}

impl Related<super::product_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductTypes.def()
    }
}

impl Related<super::storage_locations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StorageLocations.def()
    }
}

impl Related<super::sales::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sales.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
