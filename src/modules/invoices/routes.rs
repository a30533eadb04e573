use axum::{
    routing::{get, post},
    Router,
};

use crate::app_state::AppState;

use super::handlers::{list_invoices, mark_invoice_paid};

pub fn invoice_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_invoices))
        .route("/:invoice_id/pay", post(mark_invoice_paid))
}
