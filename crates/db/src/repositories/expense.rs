//! Expense ledger repository.
//!
//! Every expense carries a mirrored financial transaction that is created,
//! updated, and deleted in the same database transaction as its source, so
//! the mirror can never drift.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{
    expense_categories::{self, RAW_MATERIAL_CATEGORY},
    expenses, financial_transactions, raw_materials,
    sea_orm_active_enums::TransactionType,
};

/// Error types for expense ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum ExpenseError {
    /// Expense not found.
    #[error("expense not found: {0}")]
    NotFound(Uuid),

    /// Expense category not found.
    #[error("expense category not found: {0}")]
    CategoryNotFound(Uuid),

    /// Raw material not found.
    #[error("raw material not found: {0}")]
    RawMaterialNotFound(Uuid),

    /// The distinguished raw-material category is not configured.
    #[error("expense category '{RAW_MATERIAL_CATEGORY}' does not exist")]
    RawMaterialCategoryMissing,

    /// Raw-material expenses must reference a partner and a material.
    #[error("raw material expenses require both a partner and a raw material")]
    RawMaterialDetailsRequired,

    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    /// Expense category.
    pub category_id: Uuid,
    /// Paid-to partner, required for raw-material expenses.
    pub partner_id: Option<Uuid>,
    /// Purchased material, required for raw-material expenses.
    pub raw_material_id: Option<Uuid>,
    /// Expense amount.
    pub amount: Decimal,
    /// Expense date.
    pub expense_date: NaiveDate,
    /// Free-form description.
    pub description: Option<String>,
}

/// Input for editing an expense.
#[derive(Debug, Clone)]
pub struct EditExpenseInput {
    /// New amount.
    pub amount: Decimal,
    /// New date.
    pub expense_date: NaiveDate,
    /// New description.
    pub description: Option<String>,
}

/// Input for a raw-material purchase intake.
#[derive(Debug, Clone)]
pub struct PurchaseRawMaterialInput {
    /// Existing material to restock; `None` creates a new one.
    pub raw_material_id: Option<Uuid>,
    /// Name for a newly created material.
    pub name: Option<String>,
    /// Unit for a newly created material.
    pub unit: Option<String>,
    /// Purchased quantity.
    pub quantity: Decimal,
    /// Total purchase amount.
    pub amount: Decimal,
    /// Vendor.
    pub partner_id: Uuid,
    /// Purchase date.
    pub expense_date: NaiveDate,
    /// Free-form description.
    pub description: Option<String>,
}

/// An expense with its mirrored financial transaction.
#[derive(Debug, Clone)]
pub struct ExpenseWithMirror {
    /// Expense row.
    pub expense: expenses::Model,
    /// Mirrored financial transaction.
    pub transaction: financial_transactions::Model,
}

/// Expense repository owning expenses, their mirrors, and raw-material
/// purchase intake.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: DatabaseConnection,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an expense with its mirrored financial transaction.
    ///
    /// Expenses in the raw-material category must name both a partner and
    /// a raw material.
    ///
    /// # Errors
    ///
    /// `CategoryNotFound`, `RawMaterialDetailsRequired`, or `Database`.
    pub async fn create_expense(
        &self,
        input: CreateExpenseInput,
    ) -> Result<ExpenseWithMirror, ExpenseError> {
        let category = expense_categories::Entity::find_by_id(input.category_id)
            .one(&self.db)
            .await?
            .ok_or(ExpenseError::CategoryNotFound(input.category_id))?;

        if category.name == RAW_MATERIAL_CATEGORY
            && (input.partner_id.is_none() || input.raw_material_id.is_none())
        {
            return Err(ExpenseError::RawMaterialDetailsRequired);
        }

        let txn = self.db.begin().await?;
        let expense = insert_expense(
            &txn,
            input.category_id,
            input.partner_id,
            input.raw_material_id,
            input.amount,
            None,
            None,
            input.expense_date,
            input.description.clone(),
        )
        .await?;
        let transaction = insert_mirror(
            &txn,
            TransactionType::Expense,
            expense.id,
            input.partner_id,
            input.amount,
            input.expense_date,
            input.description,
        )
        .await?;
        txn.commit().await?;

        tracing::info!(expense_id = %expense.id, amount = %expense.amount, "expense created");
        Ok(ExpenseWithMirror {
            expense,
            transaction,
        })
    }

    /// Edits an expense, then moves every financial transaction that
    /// references it to the new amount, date, and description.
    ///
    /// # Errors
    ///
    /// `NotFound` or `Database`.
    pub async fn edit_expense(
        &self,
        expense_id: Uuid,
        input: EditExpenseInput,
    ) -> Result<expenses::Model, ExpenseError> {
        let expense = expenses::Entity::find_by_id(expense_id)
            .one(&self.db)
            .await?
            .ok_or(ExpenseError::NotFound(expense_id))?;

        let txn = self.db.begin().await?;

        let mut active: expenses::ActiveModel = expense.into();
        active.amount = Set(input.amount);
        active.expense_date = Set(input.expense_date);
        active.description = Set(input.description.clone());
        active.updated_at = Set(Utc::now().into());
        let updated = active.update(&txn).await?;

        financial_transactions::Entity::update_many()
            .col_expr(
                financial_transactions::Column::Amount,
                Expr::value(input.amount),
            )
            .col_expr(
                financial_transactions::Column::TransactionDate,
                Expr::value(input.expense_date),
            )
            .col_expr(
                financial_transactions::Column::Description,
                Expr::value(input.description),
            )
            .col_expr(
                financial_transactions::Column::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .filter(financial_transactions::Column::ExpenseId.eq(expense_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// Records a raw-material purchase: restocks an existing material or
    /// creates a new one, then writes the expense and its mirror of type
    /// purchase.
    ///
    /// The stored unit rate is `amount / quantity`, or 0 when the
    /// quantity is 0.
    ///
    /// # Errors
    ///
    /// `RawMaterialNotFound`, `RawMaterialCategoryMissing`, or `Database`.
    pub async fn purchase_raw_material(
        &self,
        input: PurchaseRawMaterialInput,
    ) -> Result<ExpenseWithMirror, ExpenseError> {
        let category = expense_categories::Entity::find()
            .filter(expense_categories::Column::Name.eq(RAW_MATERIAL_CATEGORY))
            .one(&self.db)
            .await?
            .ok_or(ExpenseError::RawMaterialCategoryMissing)?;

        let rate = if input.quantity.is_zero() {
            Decimal::ZERO
        } else {
            input.amount / input.quantity
        };

        let txn = self.db.begin().await?;
        let now = Utc::now().into();

        let material_id = match input.raw_material_id {
            Some(id) => {
                let material = raw_materials::Entity::find_by_id(id)
                    .one(&txn)
                    .await?
                    .ok_or(ExpenseError::RawMaterialNotFound(id))?;
                let new_stock = material.current_stock + input.quantity;
                let mut active: raw_materials::ActiveModel = material.into();
                active.current_stock = Set(new_stock);
                active.updated_at = Set(now);
                active.update(&txn).await?;
                id
            }
            None => {
                let material = raw_materials::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    name: Set(input.name.unwrap_or_default()),
                    unit: Set(input.unit.unwrap_or_default()),
                    current_stock: Set(input.quantity),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(&txn)
                .await?;
                material.id
            }
        };

        let expense = insert_expense(
            &txn,
            category.id,
            Some(input.partner_id),
            Some(material_id),
            input.amount,
            Some(input.quantity),
            Some(rate),
            input.expense_date,
            input.description.clone(),
        )
        .await?;
        let transaction = insert_mirror(
            &txn,
            TransactionType::Purchase,
            expense.id,
            Some(input.partner_id),
            input.amount,
            input.expense_date,
            input.description,
        )
        .await?;

        txn.commit().await?;
        tracing::info!(
            expense_id = %expense.id,
            raw_material_id = %material_id,
            quantity = %input.quantity,
            "raw material purchase recorded"
        );
        Ok(ExpenseWithMirror {
            expense,
            transaction,
        })
    }

    /// Deletes an expense, financial transactions first.
    ///
    /// # Errors
    ///
    /// `NotFound` or `Database`.
    pub async fn delete_expense(&self, expense_id: Uuid) -> Result<(), ExpenseError> {
        expenses::Entity::find_by_id(expense_id)
            .one(&self.db)
            .await?
            .ok_or(ExpenseError::NotFound(expense_id))?;

        let txn = self.db.begin().await?;
        financial_transactions::Entity::delete_many()
            .filter(financial_transactions::Column::ExpenseId.eq(expense_id))
            .exec(&txn)
            .await?;
        expenses::Entity::delete_by_id(expense_id)
            .exec(&txn)
            .await?;
        txn.commit().await?;

        tracing::info!(%expense_id, "expense deleted");
        Ok(())
    }
}

/// Inserts one expense row.
#[allow(clippy::too_many_arguments)]
async fn insert_expense(
    txn: &DatabaseTransaction,
    category_id: Uuid,
    partner_id: Option<Uuid>,
    raw_material_id: Option<Uuid>,
    amount: Decimal,
    quantity: Option<Decimal>,
    rate: Option<Decimal>,
    expense_date: NaiveDate,
    description: Option<String>,
) -> Result<expenses::Model, ExpenseError> {
    let now = Utc::now().into();
    let expense = expenses::ActiveModel {
        id: Set(Uuid::new_v4()),
        category_id: Set(category_id),
        partner_id: Set(partner_id),
        raw_material_id: Set(raw_material_id),
        amount: Set(amount),
        quantity: Set(quantity),
        rate: Set(rate),
        expense_date: Set(expense_date),
        description: Set(description),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(txn)
    .await?;
    Ok(expense)
}

/// Inserts the mirrored financial transaction for an expense.
async fn insert_mirror(
    txn: &DatabaseTransaction,
    transaction_type: TransactionType,
    expense_id: Uuid,
    partner_id: Option<Uuid>,
    amount: Decimal,
    transaction_date: NaiveDate,
    description: Option<String>,
) -> Result<financial_transactions::Model, ExpenseError> {
    let now = Utc::now().into();
    let row = financial_transactions::ActiveModel {
        id: Set(Uuid::new_v4()),
        transaction_type: Set(transaction_type),
        invoice_id: Set(None),
        expense_id: Set(Some(expense_id)),
        partner_id: Set(partner_id),
        amount: Set(amount),
        transaction_date: Set(transaction_date),
        description: Set(description),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(txn)
    .await?;
    Ok(row)
}
