//! `SeaORM` entity definitions for the brickyard schema.

pub mod expense_categories;
pub mod expenses;
pub mod financial_transactions;
pub mod invoices;
pub mod partners;
pub mod product_types;
pub mod production_batches;
pub mod raw_materials;
pub mod sales;
pub mod sea_orm_active_enums;
pub mod storage_locations;
