use axum::{
    routing::{get, post},
    Router,
};

use crate::app_state::AppState;

use super::handlers::{
    create_session_request, decide_request, get_request_details, list_all_requests,
    list_my_requests, list_my_sessions,
};

pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/courses/:course_id/requests", post(create_session_request))
        .route("/requests", get(list_all_requests))
        .route("/requests/mine", get(list_my_requests))
        .route("/requests/:request_id", get(get_request_details))
        .route("/requests/:request_id/decision", post(decide_request))
        .route("/mine", get(list_my_sessions))
}
