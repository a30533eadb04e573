use axum::{extract::State, Json};
use serde::Serialize;

use crate::app_state::AppState;
use crate::db::{
    CourseRepository, InvoiceRepository, RequestStatus, SessionRequestRepository, UserRepository,
    UserRole,
};
use crate::error::AppResult;
use crate::modules::auth::CurrentUser;

#[derive(Serialize)]
pub struct AdminDashboard {
    pub students_count: i64,
    pub tutors_count: i64,
    pub admin_count: i64,
    pub request_count: i64,
    pub courses_count: i64,
    pub unpaid_invoices_count: i64,
}

/// Headline counts for the admin landing page.
pub async fn admin_dashboard(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<AdminDashboard>> {
    current_user.require_role(UserRole::Admin)?;

    let students_count = UserRepository::count_by_role(&state.db, UserRole::Student).await?;
    let tutors_count = UserRepository::count_by_role(&state.db, UserRole::Tutor).await?;
    let admin_count = UserRepository::count_by_role(&state.db, UserRole::Admin).await?;
    let request_count =
        SessionRequestRepository::count_by_status(&state.db, RequestStatus::Pending).await?;
    let courses_count = CourseRepository::count(&state.db).await?;
    let unpaid_invoices_count = InvoiceRepository::count_unpaid(&state.db).await?;

    Ok(Json(AdminDashboard {
        students_count,
        tutors_count,
        admin_count,
        request_count,
        courses_count,
        unpaid_invoices_count,
    }))
}

#[derive(Serialize)]
pub struct UsernameListing {
    pub usernames: Vec<String>,
}

pub async fn list_usernames(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<UsernameListing>> {
    current_user.require_role(UserRole::Admin)?;

    let usernames = UserRepository::list_usernames(&state.db).await?;
    Ok(Json(UsernameListing { usernames }))
}
