//! Raw material purchase intake routes.

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use brickyard_db::ExpenseRepository;
use brickyard_db::repositories::expense::PurchaseRawMaterialInput;

use crate::routes::expenses::expense_error_response;
use crate::{AppState, middleware::AuthUser};

/// Request body for recording a raw-material purchase.
///
/// Either `raw_material_id` restocks an existing material, or `name`
/// and `unit` create a new one.
#[derive(Debug, Deserialize)]
pub struct PurchaseRequest {
    /// Existing material to restock.
    #[serde(default)]
    pub raw_material_id: Option<Uuid>,
    /// Name for a newly created material.
    #[serde(default)]
    pub name: Option<String>,
    /// Unit for a newly created material.
    #[serde(default)]
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
    #[serde(default)]
    pub description: Option<String>,
}

/// Creates raw material routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/raw-materials/purchases", post(purchase))
}

/// POST /raw-materials/purchases
async fn purchase(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(payload): Json<PurchaseRequest>,
) -> impl IntoResponse {
    let repo = ExpenseRepository::new((*state.db).clone());
    let input = PurchaseRawMaterialInput {
        raw_material_id: payload.raw_material_id,
        name: payload.name,
        unit: payload.unit,
        quantity: payload.quantity,
        amount: payload.amount,
        partner_id: payload.partner_id,
        expense_date: payload.expense_date,
        description: payload.description,
    };

    match repo.purchase_raw_material(input).await {
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
