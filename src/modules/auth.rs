//! Identity extraction. Authentication itself happens upstream; the
//! gateway forwards the acting user's id in the `x-user-id` header and
//! this layer trusts it, only resolving the user and enforcing role
//! checks.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::app_state::AppState;
use crate::db::{User, UserRepository, UserRole};
use crate::error::{AppError, AppResult};

const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated user behind the current request.
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn role(&self) -> UserRole {
        self.0.role
    }

    pub fn id(&self) -> i64 {
        self.0.id
    }

    pub fn require_role(&self, role: UserRole) -> AppResult<()> {
        if self.0.role != role {
            return Err(AppError::Authorization(format!(
                "{} access required",
                match role {
                    UserRole::Student => "Student",
                    UserRole::Tutor => "Tutor",
                    UserRole::Admin => "Admin",
                }
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<i64>().ok())
            .ok_or_else(|| {
                AppError::Authentication(format!("Missing or malformed {} header", USER_ID_HEADER))
            })?;

        let user = UserRepository::get_user_by_id(&state.db, user_id)
            .await?
            .ok_or_else(|| AppError::Authentication(format!("Unknown user {}", user_id)))?;

        Ok(CurrentUser(user))
    }
}
