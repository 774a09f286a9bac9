//! Database layer with `SeaORM` entities and the ledger repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for the brickyard schema
//! - The `InvoiceRepository` and `ExpenseRepository` ledgers
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{ExpenseRepository, InvoiceRepository};

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
