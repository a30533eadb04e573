use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use serde_json::json;
use time::OffsetDateTime;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::{
    CourseRepository, Invoice, NewSessionRequest, Party, SessionRequest, SessionRequestDecision,
    SessionRequestRepository, SessionWindow, User, UserRole,
};
use crate::error::{AppError, AppResult};
use crate::modules::auth::CurrentUser;

use super::workflow::{self, DecisionOutcome};

/// Student submits a request to be tutored in a course.
pub async fn create_session_request(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(course_id): Path<i64>,
    Json(payload): Json<NewSessionRequest>,
) -> AppResult<impl IntoResponse> {
    current_user.require_role(UserRole::Student)?;
    payload.validate()?;

    let course = CourseRepository::get(&state.db, course_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Course {}", course_id)))?;

    let mut tx = state.db.begin().await?;
    let request =
        SessionRequestRepository::create(&mut tx, current_user.id(), course.id, &payload).await?;
    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(request)))
}

/// Student's own requests, newest first.
pub async fn list_my_requests(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<SessionRequest>>> {
    current_user.require_role(UserRole::Student)?;

    let requests = SessionRequestRepository::list_for_student(&state.db, current_user.id()).await?;
    Ok(Json(requests))
}

/// Admin review queue: every request, newest first.
pub async fn list_all_requests(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<SessionRequest>>> {
    current_user.require_role(UserRole::Admin)?;

    let requests = SessionRequestRepository::list_all(&state.db).await?;
    Ok(Json(requests))
}

#[derive(Serialize)]
pub struct RequestDetails {
    pub request: SessionRequest,
    pub tutors: Vec<User>,
}

/// Admin detail view: the request plus the tutors qualified to take it.
pub async fn get_request_details(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(request_id): Path<i64>,
) -> AppResult<Json<RequestDetails>> {
    current_user.require_role(UserRole::Admin)?;

    let request = SessionRequestRepository::get(&state.db, request_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Session request {}", request_id)))?;
    let tutors = CourseRepository::qualified_tutors(&state.db, request.course_id).await?;

    Ok(Json(RequestDetails { request, tutors }))
}

#[derive(Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DecisionResponse {
    Accepted {
        request: SessionRequest,
        invoice: Invoice,
    },
    StatusUpdated {
        request: SessionRequest,
    },
    Ignored {
        request: SessionRequest,
    },
}

/// Admin decides a request: accept with a tutor, reject, or put back
/// to pending. An unrecognized status leaves the request untouched.
pub async fn decide_request(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(request_id): Path<i64>,
    Json(decision): Json<SessionRequestDecision>,
) -> AppResult<Json<DecisionResponse>> {
    current_user.require_role(UserRole::Admin)?;

    let outcome = workflow::decide(&state.db, request_id, &decision).await?;
    let response = match outcome {
        DecisionOutcome::Accepted { request, invoice } => {
            DecisionResponse::Accepted { request, invoice }
        }
        DecisionOutcome::StatusUpdated { request } => DecisionResponse::StatusUpdated { request },
        DecisionOutcome::Ignored { request } => DecisionResponse::Ignored { request },
    };

    Ok(Json(response))
}

/// A student's or tutor's accepted sessions, split around today.
pub async fn list_my_sessions(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<impl IntoResponse> {
    let party = match current_user.role() {
        UserRole::Student => Party::Student,
        UserRole::Tutor => Party::Tutor,
        UserRole::Admin => {
            return Err(AppError::Authorization(
                "Session listings are per student or tutor".to_string(),
            ))
        }
    };

    let today = OffsetDateTime::now_utc().date();
    let user_id = current_user.id();
    let previous_sessions = SessionRequestRepository::list_accepted(
        &state.db,
        party,
        user_id,
        SessionWindow::Previous,
        today,
    )
    .await?;
    let current_sessions = SessionRequestRepository::list_accepted(
        &state.db,
        party,
        user_id,
        SessionWindow::Current,
        today,
    )
    .await?;
    let upcoming_sessions = SessionRequestRepository::list_accepted(
        &state.db,
        party,
        user_id,
        SessionWindow::Upcoming,
        today,
    )
    .await?;

    Ok(Json(json!({
        "user": current_user.0,
        "previous_sessions": previous_sessions,
        "current_sessions": current_sessions,
        "upcoming_sessions": upcoming_sessions,
    })))
}
