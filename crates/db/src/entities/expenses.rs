//! `SeaORM` Entity for expenses table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub category_id: Uuid,
    pub partner_id: Option<Uuid>,
    pub raw_material_id: Option<Uuid>,
    pub amount: Decimal,
    /// Purchased quantity, set on raw-material intake.
    pub quantity: Option<Decimal>,
    /// Unit rate, amount / quantity (0 when quantity is 0).
    pub rate: Option<Decimal>,
    pub expense_date: Date,
    pub description: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::expense_categories::Entity",
        from = "Column::CategoryId",
        to = "super::expense_categories::Column::Id"
    )]
    ExpenseCategories,
    #[sea_orm(
        belongs_to = "super::partners::Entity",
        from = "Column::PartnerId",
        to = "super::partners::Column::Id"
    )]
    Partners,
    #[sea_orm(
        belongs_to = "super::raw_materials::Entity",
        from = "Column::RawMaterialId",
        to = "super::raw_materials::Column::Id"
    )]
    RawMaterials,
    #[sea_orm(has_many = "super::financial_transactions::Entity")]
    FinancialTransactions,
}

impl Related<super::expense_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExpenseCategories.def()
    }
}

impl Related<super::partners::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Partners.def()
    }
}

impl Related<super::raw_materials::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RawMaterials.def()
    }
}

impl Related<super::financial_transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FinancialTransactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
