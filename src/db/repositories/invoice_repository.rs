use sqlx::{PgPool, Postgres, Transaction};
use time::Date;

use crate::db::error::DatabaseError;
use crate::db::models::{Invoice, NewInvoice};
use super::session_request_repository::Party;

const INVOICE_COLUMNS: &str =
    "id, student_id, tutor_id, course_id, due_date, payment_date, paid, total, created_at";

pub struct InvoiceRepository;

impl InvoiceRepository {
    pub async fn create(
        tx: &mut Transaction<'_, Postgres>,
        new_invoice: &NewInvoice,
    ) -> Result<Invoice, DatabaseError> {
        let query = format!(
            r#"
            INSERT INTO invoices (student_id, tutor_id, course_id, due_date, total)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {INVOICE_COLUMNS}
            "#
        );
        let invoice = sqlx::query_as::<_, Invoice>(&query)
            .bind(new_invoice.student_id)
            .bind(new_invoice.tutor_id)
            .bind(new_invoice.course_id)
            .bind(new_invoice.due_date)
            .bind(new_invoice.total)
            .fetch_one(&mut **tx)
            .await?;

        Ok(invoice)
    }

    pub async fn get(pool: &PgPool, invoice_id: i64) -> Result<Option<Invoice>, DatabaseError> {
        let query = format!("SELECT {INVOICE_COLUMNS} FROM invoices WHERE id = $1");
        let invoice = sqlx::query_as::<_, Invoice>(&query)
            .bind(invoice_id)
            .fetch_optional(pool)
            .await?;

        Ok(invoice)
    }

    /// A student's or tutor's own invoices with the given paid state,
    /// ordered by due date.
    pub async fn list_for(
        pool: &PgPool,
        party: Party,
        user_id: i64,
        paid: bool,
    ) -> Result<Vec<Invoice>, DatabaseError> {
        let column = match party {
            Party::Student => "student_id",
            Party::Tutor => "tutor_id",
        };
        let query = format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices \
             WHERE {column} = $1 AND paid = $2 ORDER BY due_date"
        );
        let invoices = sqlx::query_as::<_, Invoice>(&query)
            .bind(user_id)
            .bind(paid)
            .fetch_all(pool)
            .await?;

        Ok(invoices)
    }

    /// Every invoice with the given paid state, for the admin view.
    pub async fn list_all(pool: &PgPool, paid: bool) -> Result<Vec<Invoice>, DatabaseError> {
        let query =
            format!("SELECT {INVOICE_COLUMNS} FROM invoices WHERE paid = $1 ORDER BY due_date");
        let invoices = sqlx::query_as::<_, Invoice>(&query)
            .bind(paid)
            .fetch_all(pool)
            .await?;

        Ok(invoices)
    }

    pub async fn count_unpaid(pool: &PgPool) -> Result<i64, DatabaseError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM invoices WHERE paid = FALSE")
                .fetch_one(pool)
                .await?;

        Ok(count)
    }

    pub async fn mark_paid(
        tx: &mut Transaction<'_, Postgres>,
        invoice_id: i64,
        payment_date: Date,
    ) -> Result<Invoice, DatabaseError> {
        let query = format!(
            r#"
            UPDATE invoices
            SET paid = TRUE, payment_date = $1
            WHERE id = $2
            RETURNING {INVOICE_COLUMNS}
            "#
        );
        let invoice = sqlx::query_as::<_, Invoice>(&query)
            .bind(payment_date)
            .bind(invoice_id)
            .fetch_one(&mut **tx)
            .await?;

        Ok(invoice)
    }
}
