mod course_repository;
mod invoice_repository;
mod session_request_repository;
mod user_repository;

pub use course_repository::CourseRepository;
pub use invoice_repository::InvoiceRepository;
pub use session_request_repository::{Party, SessionRequestRepository, SessionWindow};
pub use user_repository::UserRepository;
