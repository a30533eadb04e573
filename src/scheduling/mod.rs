//! Weekly-recurrence scheduling: availability patterns, occurrence
//! counting over a date range, and invoice terms derived from them.

mod availability;
mod billing;
mod occurrence;

pub use availability::{Availability, Weekday};
pub use billing::{invoice_terms, InvoiceTerms, PAYMENT_GRACE_DAYS};
pub use occurrence::{count_from_request_only, count_with_intersection};
