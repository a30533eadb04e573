pub mod auth;
pub mod courses;
pub mod dashboard;
pub mod invoices;
pub mod sessions;
