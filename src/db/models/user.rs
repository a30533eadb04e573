use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use time::OffsetDateTime;
use validator::{Validate, ValidationError};

use crate::scheduling::Availability;

static USERNAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^@\w{3,}$").expect("username regex is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Tutor,
    Admin,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub created_at: OffsetDateTime,
}

impl User {
    /// The user's display name, last seen on invoices and rosters.
    #[allow(unused)]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewUser {
    // "@" followed by at least three alphanumericals
    #[validate(regex(path = *USERNAME_RE, message = "Username must consist of @ followed by at least three alphanumericals"))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
    pub role: UserRole,
}

/// A student's standing weekly availability and enrolments live in a
/// profile row next to the user.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct StudentProfile {
    pub user_id: i64,
    pub availability: Json<Availability>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct TutorProfile {
    pub user_id: i64,
    pub availability: Json<Availability>,
    pub years_exp: i32,
    pub rate: Decimal,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewTutorProfile {
    pub user_id: i64,
    pub availability: Availability,
    #[validate(range(min = 0, max = 60))]
    pub years_exp: i32,
    #[validate(custom(function = validate_rate))]
    pub rate: Decimal,
}

fn validate_rate(rate: &Decimal) -> Result<(), ValidationError> {
    if *rate < Decimal::new(50, 2) || *rate > Decimal::new(300, 2) {
        return Err(ValidationError::new("rate_out_of_range"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: "jane.doe@example.org".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            role: UserRole::Student,
        }
    }

    #[test]
    fn username_must_be_at_sign_plus_three_word_chars() {
        assert!(new_user("@janedoe").validate().is_ok());
        assert!(new_user("@ab").validate().is_err());
        assert!(new_user("janedoe").validate().is_err());
    }

    #[test]
    fn tutor_rate_is_bounded() {
        let mut profile = NewTutorProfile {
            user_id: 1,
            availability: Availability::new(),
            years_exp: 5,
            rate: Decimal::new(150, 2),
        };
        assert!(profile.validate().is_ok());

        profile.rate = Decimal::new(301, 2);
        assert!(profile.validate().is_err());
    }
}
