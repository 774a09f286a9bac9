//! Expense ledger routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use brickyard_db::ExpenseRepository;
use brickyard_db::repositories::expense::{CreateExpenseInput, EditExpenseInput, ExpenseError};

use crate::{AppState, middleware::AuthUser};

/// Request body for creating an expense.
#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    /// Expense category.
    pub category_id: Uuid,
    /// Paid-to partner, required for raw-material expenses.
    #[serde(default)]
    pub partner_id: Option<Uuid>,
    /// Purchased material, required for raw-material expenses.
    #[serde(default)]
    pub raw_material_id: Option<Uuid>,
    /// Expense amount.
    pub amount: Decimal,
    /// Expense date.
    pub expense_date: NaiveDate,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for editing an expense.
#[derive(Debug, Deserialize)]
pub struct EditExpenseRequest {
    /// New amount.
    pub amount: Decimal,
    /// New date.
    pub expense_date: NaiveDate,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Creates expense routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", post(create_expense))
        .route(
            "/expenses/{id}",
            axum::routing::patch(edit_expense).delete(delete_expense),
        )
}

/// POST /expenses
async fn create_expense(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(payload): Json<CreateExpenseRequest>,
) -> impl IntoResponse {
    let repo = ExpenseRepository::new((*state.db).clone());
    let input = CreateExpenseInput {
        category_id: payload.category_id,
        partner_id: payload.partner_id,
        raw_material_id: payload.raw_material_id,
        amount: payload.amount,
        expense_date: payload.expense_date,
        description: payload.description,
    };

    match repo.create_expense(input).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(json!({
                "expense": result.expense,
                "transaction": result.transaction,
            })),
        ),
        Err(e) => expense_error_response(&e),
    }
}

/// PATCH /expenses/{id}
async fn edit_expense(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<EditExpenseRequest>,
) -> impl IntoResponse {
    let repo = ExpenseRepository::new((*state.db).clone());
    let input = EditExpenseInput {
        amount: payload.amount,
        expense_date: payload.expense_date,
        description: payload.description,
    };

    match repo.edit_expense(id, input).await {
        Ok(expense) => (StatusCode::OK, Json(json!({ "expense": expense }))),
        Err(e) => expense_error_response(&e),
    }
}

/// DELETE /expenses/{id}
async fn delete_expense(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = ExpenseRepository::new((*state.db).clone());

    match repo.delete_expense(id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Expense deleted" })),
        ),
        Err(e) => expense_error_response(&e),
    }
}

/// Maps an expense ledger error to its HTTP response.
pub(crate) fn expense_error_response(err: &ExpenseError) -> (StatusCode, Json<serde_json::Value>) {
    match err {
        ExpenseError::RawMaterialDetailsRequired => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "validation_error",
                "message": err.to_string()
            })),
        ),
        ExpenseError::NotFound(_)
        | ExpenseError::CategoryNotFound(_)
        | ExpenseError::RawMaterialNotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": err.to_string()
            })),
        ),
        ExpenseError::RawMaterialCategoryMissing => {
            error!(error = %err, "raw material category is not seeded");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "raw_material_category_missing",
                    "message": err.to_string()
                })),
            )
        }
        ExpenseError::Database(_) => {
            error!(error = %err, "expense operation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred"
                })),
            )
        }
    }
}
