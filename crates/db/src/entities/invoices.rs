//! `SeaORM` Entity for invoices table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{PaymentStatus, PaymentType};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Unique, matched case-sensitively.
    #[sea_orm(unique)]
    pub invoice_number: String,
    pub partner_id: Uuid,
    pub invoice_date: Date,
    pub is_gst: bool,
    /// Effective rates for the whole invoice; override product defaults.
    pub cgst_rate: Decimal,
    pub sgst_rate: Decimal,
    pub igst_rate: Decimal,
    pub subtotal: Decimal,
    pub cgst_amount: Decimal,
    pub sgst_amount: Decimal,
    pub igst_amount: Decimal,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    /// Always total_amount - paid_amount.
    pub pending_amount: Decimal,
    pub payment_status: PaymentStatus,
    pub payment_type: PaymentType,
    pub vehicle_number: Option<String>,
    pub transport_name: Option<String>,
    pub remarks: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::partners::Entity",
        from = "Column::PartnerId",
        to = "super::partners::Column::Id"
    )]
    Partners,
    #[sea_orm(has_many = "super::sales::Entity")]
    Sales,
    #[sea_orm(has_many = "super::financial_transactions::Entity")]
    FinancialTransactions,
}

impl Related<super::partners::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Partners.def()
    }
}

impl Related<super::sales::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sales.def()
    }
}

impl Related<super::financial_transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FinancialTransactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
