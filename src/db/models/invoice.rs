use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// Billing record generated once per accepted session request.
/// Mutated afterwards only to flip the paid flag and stamp the
/// payment date.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Invoice {
    pub id: i64,
    pub student_id: i64,
    pub tutor_id: i64,
    pub course_id: i64,
    pub due_date: Date,
    pub payment_date: Option<Date>,
    pub paid: bool,
    pub total: Decimal,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewInvoice {
    pub student_id: i64,
    pub tutor_id: i64,
    pub course_id: i64,
    pub due_date: Date,
    pub total: Decimal,
}
