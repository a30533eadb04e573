use rust_decimal::Decimal;
use serde::Serialize;
use time::{Date, Duration};

/// Days between a session's start date and the invoice due date.
pub const PAYMENT_GRACE_DAYS: i64 = 3;

/// The billable outcome of accepting a session request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceTerms {
    pub total: Decimal,
    pub due_date: Date,
}

/// Derive the invoice total and due date for an accepted request.
///
/// The total is exact decimal arithmetic at the currency's native
/// 2-decimal precision. The price's sign and range are trusted as-is;
/// validating them is the course-creation boundary's job.
pub fn invoice_terms(price: Decimal, occurrences: u32, start_date: Date) -> InvoiceTerms {
    InvoiceTerms {
        total: price * Decimal::from(occurrences),
        due_date: start_date + Duration::days(PAYMENT_GRACE_DAYS),
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use time::macros::date;

    use super::*;

    #[test]
    fn total_is_price_times_occurrences_exactly() {
        let terms = invoice_terms(Decimal::new(9999, 2), 3, date!(2024 - 01 - 01));
        assert_eq!(terms.total, Decimal::new(29997, 2)); // 99.99 * 3
    }

    #[test]
    fn due_date_is_three_days_after_start() {
        let terms = invoice_terms(Decimal::new(10000, 2), 10, date!(2024 - 01 - 01));
        assert_eq!(terms.due_date, date!(2024 - 01 - 04));
    }

    #[test]
    fn month_of_mondays_and_wednesdays_at_one_hundred() {
        // 10 matching days in January 2024 at 100.00 per session.
        let terms = invoice_terms(Decimal::new(10000, 2), 10, date!(2024 - 01 - 01));
        assert_eq!(terms.total, Decimal::new(100000, 2));
        assert_eq!(terms.due_date, date!(2024 - 01 - 04));
    }

    #[test]
    fn zero_occurrences_bill_nothing() {
        let terms = invoice_terms(Decimal::new(14999, 2), 0, date!(2024 - 06 - 15));
        assert_eq!(terms.total, Decimal::ZERO);
    }

    #[test]
    fn negative_price_passes_through_unvalidated() {
        let terms = invoice_terms(Decimal::new(-5000, 2), 2, date!(2024 - 06 - 15));
        assert_eq!(terms.total, Decimal::new(-10000, 2));
    }
}
