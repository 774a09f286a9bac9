//! `SeaORM` Entity for storage_locations table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "storage_locations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::production_batches::Entity")]
    ProductionBatches,
}

impl Related<super::production_batches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductionBatches.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
