use sqlx::{PgPool, Postgres, Transaction};
use time::Date;

use crate::db::error::DatabaseError;
use crate::db::models::{NewSessionRequest, RequestStatus, SessionRequest};
use crate::scheduling::Availability;

const REQUEST_COLUMNS: &str = "id, student_id, tutor_id, course_id, availability, start_date, \
                               end_date, status, fortnightly, venue, created_at";

/// Which side of a session a user is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Party {
    Student,
    Tutor,
}

impl Party {
    fn column(&self) -> &'static str {
        match self {
            Party::Student => "student_id",
            Party::Tutor => "tutor_id",
        }
    }
}

/// Position of an accepted session's date range relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionWindow {
    Previous,
    Current,
    Upcoming,
}

pub struct SessionRequestRepository;

impl SessionRequestRepository {
    pub async fn create(
        tx: &mut Transaction<'_, Postgres>,
        student_id: i64,
        course_id: i64,
        request: &NewSessionRequest,
    ) -> Result<SessionRequest, DatabaseError> {
        let query = format!(
            r#"
            INSERT INTO session_requests
                (student_id, course_id, availability, start_date, end_date, fortnightly, venue)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {REQUEST_COLUMNS}
            "#
        );
        let created = sqlx::query_as::<_, SessionRequest>(&query)
            .bind(student_id)
            .bind(course_id)
            .bind(sqlx::types::Json(&request.availability))
            .bind(request.start_date)
            .bind(request.end_date)
            .bind(request.fortnightly)
            .bind(&request.venue)
            .fetch_one(&mut **tx)
            .await?;

        Ok(created)
    }

    /// Full-row insert used by the seeding command, which creates
    /// requests already decided and already matched to a tutor.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_seeded(
        tx: &mut Transaction<'_, Postgres>,
        student_id: i64,
        tutor_id: i64,
        course_id: i64,
        availability: &Availability,
        start_date: Date,
        end_date: Date,
        status: RequestStatus,
    ) -> Result<SessionRequest, DatabaseError> {
        let query = format!(
            r#"
            INSERT INTO session_requests
                (student_id, tutor_id, course_id, availability, start_date, end_date, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {REQUEST_COLUMNS}
            "#
        );
        let created = sqlx::query_as::<_, SessionRequest>(&query)
            .bind(student_id)
            .bind(tutor_id)
            .bind(course_id)
            .bind(sqlx::types::Json(availability))
            .bind(start_date)
            .bind(end_date)
            .bind(status)
            .fetch_one(&mut **tx)
            .await?;

        Ok(created)
    }

    pub async fn get(
        pool: &PgPool,
        request_id: i64,
    ) -> Result<Option<SessionRequest>, DatabaseError> {
        let query = format!("SELECT {REQUEST_COLUMNS} FROM session_requests WHERE id = $1");
        let request = sqlx::query_as::<_, SessionRequest>(&query)
            .bind(request_id)
            .fetch_optional(pool)
            .await?;

        Ok(request)
    }

    /// All requests, newest first, for the admin review queue.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<SessionRequest>, DatabaseError> {
        let query = format!("SELECT {REQUEST_COLUMNS} FROM session_requests ORDER BY id DESC");
        let requests = sqlx::query_as::<_, SessionRequest>(&query)
            .fetch_all(pool)
            .await?;

        Ok(requests)
    }

    pub async fn list_for_student(
        pool: &PgPool,
        student_id: i64,
    ) -> Result<Vec<SessionRequest>, DatabaseError> {
        let query = format!(
            "SELECT {REQUEST_COLUMNS} FROM session_requests WHERE student_id = $1 ORDER BY id DESC"
        );
        let requests = sqlx::query_as::<_, SessionRequest>(&query)
            .bind(student_id)
            .fetch_all(pool)
            .await?;

        Ok(requests)
    }

    pub async fn count_by_status(
        pool: &PgPool,
        status: RequestStatus,
    ) -> Result<i64, DatabaseError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM session_requests WHERE status = $1")
                .bind(status)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }

    /// Plain status update, used for rejection and for resetting a
    /// request back to pending.
    pub async fn set_status(
        tx: &mut Transaction<'_, Postgres>,
        request_id: i64,
        status: RequestStatus,
    ) -> Result<SessionRequest, DatabaseError> {
        let query = format!(
            "UPDATE session_requests SET status = $1 WHERE id = $2 RETURNING {REQUEST_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, SessionRequest>(&query)
            .bind(status)
            .bind(request_id)
            .fetch_one(&mut **tx)
            .await?;

        Ok(updated)
    }

    /// Transition a request to accepted and assign its tutor, but only
    /// if it is still pending. Returns `None` when the guard fails,
    /// which is how a concurrent or repeated acceptance surfaces
    /// instead of minting a second invoice.
    pub async fn accept_pending(
        tx: &mut Transaction<'_, Postgres>,
        request_id: i64,
        tutor_id: i64,
    ) -> Result<Option<SessionRequest>, DatabaseError> {
        let query = format!(
            r#"
            UPDATE session_requests
            SET status = 'accepted', tutor_id = $1
            WHERE id = $2 AND status = 'pending'
            RETURNING {REQUEST_COLUMNS}
            "#
        );
        let updated = sqlx::query_as::<_, SessionRequest>(&query)
            .bind(tutor_id)
            .bind(request_id)
            .fetch_optional(&mut **tx)
            .await?;

        Ok(updated)
    }

    /// A user's accepted sessions whose date range is before, around,
    /// or after the given day.
    pub async fn list_accepted(
        pool: &PgPool,
        party: Party,
        user_id: i64,
        window: SessionWindow,
        today: Date,
    ) -> Result<Vec<SessionRequest>, DatabaseError> {
        let range_filter = match window {
            SessionWindow::Previous => "end_date < $2",
            SessionWindow::Current => "start_date <= $2 AND end_date >= $2",
            SessionWindow::Upcoming => "start_date >= $2",
        };
        let query = format!(
            "SELECT {REQUEST_COLUMNS} FROM session_requests \
             WHERE {party} = $1 AND status = 'accepted' AND {range_filter} \
             ORDER BY start_date",
            party = party.column(),
        );
        let requests = sqlx::query_as::<_, SessionRequest>(&query)
            .bind(user_id)
            .bind(today)
            .fetch_all(pool)
            .await?;

        Ok(requests)
    }
}
