//! Invoice ledger routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use brickyard_core::allocation::LineRequest;
use brickyard_core::gst::GstRates;
use brickyard_db::InvoiceRepository;
use brickyard_db::entities::sea_orm_active_enums::{PaymentStatus, PaymentType};
use brickyard_db::repositories::invoice::{CreateInvoiceInput, InvoiceError, InvoiceFilter};

use crate::{AppState, middleware::AuthUser};

/// Request body for creating an invoice.
///
/// The sale line fields are flattened: the same endpoint accepts a
/// single-batch line, a multi-batch line, or a multi-product `items`
/// array, disambiguated by shape.
#[derive(Debug, Deserialize)]
pub struct CreateInvoiceRequest {
    /// Unique invoice number.
    pub invoice_number: String,
    /// Billed partner.
    pub partner_id: Uuid,
    /// Invoice date.
    pub invoice_date: NaiveDate,
    /// Whether GST applies.
    #[serde(default)]
    pub is_gst: bool,
    /// Invoice-level rate override.
    #[serde(default)]
    pub rates: Option<GstRates>,
    /// Amount already received.
    #[serde(default)]
    pub paid_amount: Decimal,
    /// Settlement state.
    pub payment_status: PaymentStatus,
    /// Payment method.
    pub payment_type: PaymentType,
    /// Optional transport vehicle.
    #[serde(default)]
    pub vehicle_number: Option<String>,
    /// Optional transporter name.
    #[serde(default)]
    pub transport_name: Option<String>,
    /// Free-form remarks.
    #[serde(default)]
    pub remarks: Option<String>,
    /// Sale line request in any of its three shapes.
    #[serde(flatten)]
    pub line: LineRequest,
}

/// Query parameters for listing invoices.
#[derive(Debug, Default, Deserialize)]
pub struct ListInvoicesQuery {
    /// Earliest invoice date, inclusive.
    pub date_from: Option<NaiveDate>,
    /// Latest invoice date, inclusive.
    pub date_to: Option<NaiveDate>,
    /// Filter by partner.
    pub partner_id: Option<Uuid>,
    /// Filter by settlement state.
    pub payment_status: Option<PaymentStatus>,
}

/// Creates invoice routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/invoices", get(list_invoices).post(create_invoice))
        .route(
            "/invoices/{id}",
            get(get_invoice).delete(delete_invoice),
        )
        .route("/invoices/{id}/sales", axum::routing::delete(delete_all_sales))
}

/// POST /invoices
async fn create_invoice(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(payload): Json<CreateInvoiceRequest>,
) -> impl IntoResponse {
    let repo = InvoiceRepository::new((*state.db).clone(), &state.ledger);
    let input = CreateInvoiceInput {
        invoice_number: payload.invoice_number,
        partner_id: payload.partner_id,
        invoice_date: payload.invoice_date,
        is_gst: payload.is_gst,
        rates: payload.rates,
        paid_amount: payload.paid_amount,
        payment_status: payload.payment_status,
        payment_type: payload.payment_type,
        vehicle_number: payload.vehicle_number,
        transport_name: payload.transport_name,
        remarks: payload.remarks,
        line: payload.line,
    };

    match repo.create_invoice(input).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(json!({
                "invoice": result.invoice,
                "sales": result.sales,
            })),
        ),
        Err(e) => invoice_error_response(&e),
    }
}

/// GET /invoices
async fn list_invoices(
    State(state): State<AppState>,
    Query(query): Query<ListInvoicesQuery>,
) -> impl IntoResponse {
    let repo = InvoiceRepository::new((*state.db).clone(), &state.ledger);
    let filter = InvoiceFilter {
        date_from: query.date_from,
        date_to: query.date_to,
        partner_id: query.partner_id,
        payment_status: query.payment_status,
    };

    match repo.list_invoices(filter).await {
        Ok(invoices) => (StatusCode::OK, Json(json!({ "invoices": invoices }))),
        Err(e) => invoice_error_response(&e),
    }
}

/// GET /invoices/{id}
async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = InvoiceRepository::new((*state.db).clone(), &state.ledger);

    match repo.get_invoice(id).await {
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

/// DELETE /invoices/{id}
async fn delete_invoice(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = InvoiceRepository::new((*state.db).clone(), &state.ledger);

    match repo.delete_invoice(id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Invoice deleted" })),
        ),
        Err(e) => invoice_error_response(&e),
    }
}

/// DELETE /invoices/{id}/sales
///
/// Clears every sale but keeps the invoice row with zeroed totals,
/// unlike deleting the invoice itself.
async fn delete_all_sales(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = InvoiceRepository::new((*state.db).clone(), &state.ledger);

    match repo.delete_all_sales(id).await {
        Ok(invoice) => (StatusCode::OK, Json(json!({ "invoice": invoice }))),
        Err(e) => invoice_error_response(&e),
    }
}

/// Maps an invoice ledger error to its HTTP response.
pub(crate) fn invoice_error_response(err: &InvoiceError) -> (StatusCode, Json<serde_json::Value>) {
    match err {
        InvoiceError::DuplicateInvoiceNumber(_) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "duplicate_invoice_number",
                "message": err.to_string()
            })),
        ),
        InvoiceError::Stock(_) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "insufficient_stock",
                "message": err.to_string()
            })),
        ),
        InvoiceError::EmptyInvoice => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "empty_invoice",
                "message": err.to_string()
            })),
        ),
        InvoiceError::NonPositiveQuantity(_) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "validation_error",
                "message": err.to_string()
            })),
        ),
        InvoiceError::NotFound(_)
        | InvoiceError::SaleNotFound(_)
        | InvoiceError::ProductNotFound(_)
        | InvoiceError::BatchNotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": err.to_string()
            })),
        ),
        InvoiceError::Timeout(_) => {
            error!(error = %err, "invoice operation timed out");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "timeout",
                    "message": "The operation took too long to complete"
                })),
            )
        }
        InvoiceError::Database(_) => {
            error!(error = %err, "invoice operation failed");
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
