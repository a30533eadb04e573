use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::app_state::AppState;

use super::handlers::{
    create_course, delete_course, get_course, list_course_tutors, list_courses, update_course,
};

pub fn course_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses))
        .route("/", post(create_course))
        .route("/:course_id", get(get_course))
        .route("/:course_id", put(update_course))
        .route("/:course_id", delete(delete_course))
        .route("/:course_id/tutors", get(list_course_tutors))
}
