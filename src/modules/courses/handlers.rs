use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::app_state::AppState;
use crate::db::{Course, CourseRepository, NewCourse, UpdateCourse, User, UserRole};
use crate::error::{AppError, AppResult};
use crate::modules::auth::CurrentUser;

pub async fn list_courses(State(state): State<AppState>) -> AppResult<Json<Vec<Course>>> {
    let courses = CourseRepository::list(&state.db).await?;
    Ok(Json(courses))
}

pub async fn get_course(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> AppResult<Json<Course>> {
    let course = CourseRepository::get(&state.db, course_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Course {}", course_id)))?;
    Ok(Json(course))
}

pub async fn create_course(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(payload): Json<NewCourse>,
) -> AppResult<impl IntoResponse> {
    current_user.require_role(UserRole::Admin)?;
    payload.validate()?;

    let mut tx = state.db.begin().await?;
    let course = CourseRepository::create(&mut tx, &payload).await?;
    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(course)))
}

pub async fn update_course(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(course_id): Path<i64>,
    Json(payload): Json<UpdateCourse>,
) -> AppResult<Json<Course>> {
    current_user.require_role(UserRole::Admin)?;
    payload.validate()?;

    CourseRepository::get(&state.db, course_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Course {}", course_id)))?;

    let mut tx = state.db.begin().await?;
    let course = CourseRepository::update(&mut tx, course_id, &payload).await?;
    tx.commit().await?;

    Ok(Json(course))
}

pub async fn delete_course(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(course_id): Path<i64>,
) -> AppResult<StatusCode> {
    current_user.require_role(UserRole::Admin)?;

    let mut tx = state.db.begin().await?;
    CourseRepository::delete(&mut tx, course_id).await?;
    tx.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Tutors qualified to teach the course.
pub async fn list_course_tutors(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> AppResult<Json<Vec<User>>> {
    CourseRepository::get(&state.db, course_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Course {}", course_id)))?;

    let tutors = CourseRepository::qualified_tutors(&state.db, course_id).await?;
    Ok(Json(tutors))
}
