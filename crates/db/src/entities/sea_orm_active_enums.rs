//! `SeaORM` active enums mirroring the Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of financial transaction mirrored into the ledger.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_type")]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Mirrors an invoice.
    #[sea_orm(string_value = "sale")]
    Sale,
    /// Mirrors a raw-material purchase.
    #[sea_orm(string_value = "purchase")]
    Purchase,
    /// Mirrors an expense.
    #[sea_orm(string_value = "expense")]
    Expense,
}

/// Settlement state of an invoice.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_status")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Fully settled.
    #[sea_orm(string_value = "paid")]
    Paid,
    /// Nothing received yet.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Partially settled.
    #[sea_orm(string_value = "partial")]
    Partial,
}

/// Payment method.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_type")]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    /// Cash.
    #[sea_orm(string_value = "cash")]
    Cash,
    /// On credit.
    #[sea_orm(string_value = "credit")]
    Credit,
    /// UPI transfer.
    #[sea_orm(string_value = "upi")]
    Upi,
    /// Bank transfer.
    #[sea_orm(string_value = "bank_transfer")]
    BankTransfer,
}

/// Role of a partner in the books.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "partner_type")]
#[serde(rename_all = "snake_case")]
pub enum PartnerType {
    /// Buys from us.
    #[sea_orm(string_value = "customer")]
    Customer,
    /// Sells to us.
    #[sea_orm(string_value = "vendor")]
    Vendor,
    /// Both directions.
    #[sea_orm(string_value = "both")]
    Both,
}
