//! Sale row routes.
//!
//! Sales are edited and deleted individually by id; new lines are
//! appended to an existing invoice through `/sales/products`.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, patch, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use brickyard_core::allocation::LineRequest;
use brickyard_db::InvoiceRepository;
use brickyard_db::repositories::invoice::{EditSaleInput, SuppliedFinancials};

use crate::routes::invoices::invoice_error_response;
use crate::{AppState, middleware::AuthUser};

/// Request body for editing a sale.
///
/// The invoice financial fields travel with the edit and are stored
/// as supplied; only `pending_amount` is derived server-side.
#[derive(Debug, Deserialize)]
pub struct EditSaleRequest {
    /// New batch; `None` for service lines.
    #[serde(default)]
    pub production_batch_id: Option<Uuid>,
    /// New quantity.
    pub quantity: i64,
    /// New unit rate.
    pub rate: Decimal,
    /// Sum of sale amounts after the edit.
    pub subtotal: Decimal,
    /// CGST amount after the edit.
    pub cgst_amount: Decimal,
    /// SGST amount after the edit.
    pub sgst_amount: Decimal,
    /// IGST amount after the edit.
    pub igst_amount: Decimal,
    /// Invoice total after the edit.
    pub total_amount: Decimal,
    /// Amount received.
    pub paid_amount: Decimal,
}

/// Request body for appending sale lines to an invoice.
#[derive(Debug, Deserialize)]
pub struct AddProductsRequest {
    /// Target invoice.
    pub invoice_id: Uuid,
    /// Sale line request in any of its three shapes.
    #[serde(flatten)]
    pub line: LineRequest,
}

/// Creates sale routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sales/{id}", patch(edit_sale).delete(delete_sale))
        .route("/sales/products", post(add_products))
}

/// PATCH /sales/{id}
async fn edit_sale(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<EditSaleRequest>,
) -> impl IntoResponse {
    let repo = InvoiceRepository::new((*state.db).clone(), &state.ledger);
    let input = EditSaleInput {
        production_batch_id: payload.production_batch_id,
        quantity: payload.quantity,
        rate: payload.rate,
        financials: SuppliedFinancials {
            subtotal: payload.subtotal,
            cgst_amount: payload.cgst_amount,
            sgst_amount: payload.sgst_amount,
            igst_amount: payload.igst_amount,
            total_amount: payload.total_amount,
            paid_amount: payload.paid_amount,
        },
    };

    match repo.edit_sale(id, input).await {
        Ok(result) => (
            StatusCode::OK,
            Json(json!({
                "invoice": result.invoice,
                "sales": result.sales,
            })),
        ),
        Err(e) => invoice_error_response(&e),
    }
}

/// DELETE /sales/{id}
///
/// Removes one sale and restores its quantity. An invoice emptied by
/// this call is removed as well.
async fn delete_sale(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = InvoiceRepository::new((*state.db).clone(), &state.ledger);

    match repo.delete_sale(id).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "message": "Sale deleted" }))),
        Err(e) => invoice_error_response(&e),
    }
}

/// POST /sales/products
async fn add_products(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(payload): Json<AddProductsRequest>,
) -> impl IntoResponse {
    let repo = InvoiceRepository::new((*state.db).clone(), &state.ledger);

    match repo.add_products(payload.invoice_id, payload.line).await {
        Ok(result) => (
            StatusCode::OK,
            Json(json!({
                "invoice": result.invoice,
                "sales": result.sales,
            })),
        ),
        Err(e) => invoice_error_response(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn edit_request_carries_supplied_financials() {
        let body = json!({
            "production_batch_id": "3e7c0b9a-6f1d-4a6e-9a2a-333333333333",
            "quantity": 1000,
            "rate": "5",
            "subtotal": "5000",
            "cgst_amount": "0",
            "sgst_amount": "0",
            "igst_amount": "0",
            "total_amount": "5000",
            "paid_amount": "0"
        });

        let request: EditSaleRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.quantity, 1000);
        assert_eq!(request.total_amount, dec!(5000));
    }

    #[test]
    fn add_products_request_flattens_line_shape() {
        let body = json!({
            "invoice_id": "3e7c0b9a-6f1d-4a6e-9a2a-111111111111",
            "items": [
                {
                    "product_type_id": "3e7c0b9a-6f1d-4a6e-9a2a-222222222222",
                    "rate": "6",
                    "batch_selections": [
                        { "batch_id": "3e7c0b9a-6f1d-4a6e-9a2a-333333333333", "quantity": 100 }
                    ]
                }
            ]
        });

        let request: AddProductsRequest = serde_json::from_value(body).unwrap();
        assert!(matches!(request.line, LineRequest::MultiProduct { .. }));
    }
}
