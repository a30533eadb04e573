use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use std::str::FromStr;
use time::{Date, OffsetDateTime};
use validator::{Validate, ValidationError};

use crate::scheduling::Availability;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RequestStatus::Pending),
            "accepted" => Ok(RequestStatus::Accepted),
            "rejected" => Ok(RequestStatus::Rejected),
            other => Err(format!("Unknown request status: {}", other)),
        }
    }
}

/// A student's ask to be tutored in a course over a date range.
///
/// The tutor stays unset until an admin accepts the request.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct SessionRequest {
    pub id: i64,
    pub student_id: i64,
    pub tutor_id: Option<i64>,
    pub course_id: i64,
    pub availability: Json<Availability>,
    pub start_date: Date,
    pub end_date: Date,
    pub status: RequestStatus,
    pub fortnightly: bool,
    pub venue: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewSessionRequest {
    pub start_date: Date,
    pub end_date: Date,
    #[validate(custom(
        function = validate_availability_selected,
        message = "You must select at least one day with an available time"
    ))]
    pub availability: Availability,
    #[serde(default)]
    pub fortnightly: bool,
    #[serde(default = "default_venue")]
    #[validate(length(min = 1, max = 25))]
    pub venue: String,
}

fn default_venue() -> String {
    "online".to_string()
}

fn validate_availability_selected(availability: &Availability) -> Result<(), ValidationError> {
    if availability.is_empty() {
        return Err(ValidationError::new("no_availability_selected"));
    }
    Ok(())
}

/// An admin's verdict on a pending request. The status arrives as a
/// raw string; anything unrecognized is deliberately left to fall
/// through as a no-op rather than an error.
#[derive(Debug, Deserialize)]
pub struct SessionRequestDecision {
    pub status: String,
    pub tutor_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::scheduling::Weekday;

    use super::*;

    #[test]
    fn request_without_availability_fails_validation() {
        let request = NewSessionRequest {
            start_date: date!(2024 - 01 - 01),
            end_date: date!(2024 - 01 - 31),
            availability: Availability::new(),
            fortnightly: false,
            venue: "online".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn request_with_one_selected_day_passes_validation() {
        let mut availability = Availability::new();
        availability.add_slot(Weekday::Monday, "09:00");

        let request = NewSessionRequest {
            start_date: date!(2024 - 01 - 01),
            end_date: date!(2024 - 01 - 31),
            availability,
            fortnightly: false,
            venue: "online".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn payload_missing_dates_is_rejected_on_deserialization() {
        let result = serde_json::from_str::<NewSessionRequest>(
            r#"{"availability": {"monday": "09:00"}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn payload_accepts_single_time_availability_shape() {
        let request: NewSessionRequest = serde_json::from_str(
            r#"{
                "start_date": "2024-01-01",
                "end_date": "2024-01-31",
                "availability": {"monday": "09:00", "wednesday": ["14:00"]}
            }"#,
        )
        .unwrap();

        assert_eq!(request.availability.day_count(), 2);
        assert_eq!(request.venue, "online");
        assert!(!request.fortnightly);
    }
}
