use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use time::OffsetDateTime;

use crate::app_state::AppState;
use crate::db::{Invoice, InvoiceRepository, Party, UserRole};
use crate::error::{AppError, AppResult};
use crate::modules::auth::CurrentUser;

#[derive(Serialize)]
pub struct InvoiceListing {
    pub paid_invoices: Vec<Invoice>,
    pub unpaid_invoices: Vec<Invoice>,
    pub unpaid_invoices_count: usize,
}

/// Invoices visible to the caller: their own for students and tutors,
/// all of them for admins. Both lists are ordered by due date.
pub async fn list_invoices(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<InvoiceListing>> {
    let (paid_invoices, unpaid_invoices) = match current_user.role() {
        UserRole::Student => (
            InvoiceRepository::list_for(&state.db, Party::Student, current_user.id(), true).await?,
            InvoiceRepository::list_for(&state.db, Party::Student, current_user.id(), false)
                .await?,
        ),
        UserRole::Tutor => (
            InvoiceRepository::list_for(&state.db, Party::Tutor, current_user.id(), true).await?,
            InvoiceRepository::list_for(&state.db, Party::Tutor, current_user.id(), false).await?,
        ),
        UserRole::Admin => (
            InvoiceRepository::list_all(&state.db, true).await?,
            InvoiceRepository::list_all(&state.db, false).await?,
        ),
    };

    let unpaid_invoices_count = unpaid_invoices.len();
    Ok(Json(InvoiceListing {
        paid_invoices,
        unpaid_invoices,
        unpaid_invoices_count,
    }))
}

/// Admin marks an invoice as settled, stamping today as the payment
/// date.
pub async fn mark_invoice_paid(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(invoice_id): Path<i64>,
) -> AppResult<Json<Invoice>> {
    current_user.require_role(UserRole::Admin)?;

    InvoiceRepository::get(&state.db, invoice_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Invoice {}", invoice_id)))?;

    let today = OffsetDateTime::now_utc().date();
    let mut tx = state.db.begin().await?;
    let invoice = InvoiceRepository::mark_paid(&mut tx, invoice_id, today).await?;
    tx.commit().await?;

    Ok(Json(invoice))
}
