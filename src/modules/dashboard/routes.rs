use axum::{routing::get, Router};

use crate::app_state::AppState;

use super::handlers::{admin_dashboard, list_usernames};

pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin_dashboard))
        .route("/usernames", get(list_usernames))
}
