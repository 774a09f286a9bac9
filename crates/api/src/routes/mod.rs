//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth::auth_middleware};

pub mod expenses;
pub mod health;
pub mod invoices;
pub mod raw_materials;
pub mod sales;

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // All ledger mutations sit behind the token gate
    let protected_routes = Router::new()
        .merge(invoices::routes())
        .merge(sales::routes())
        .merge(expenses::routes())
        .merge(raw_materials::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(protected_routes)
}
