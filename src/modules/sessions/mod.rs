pub mod handlers;
pub mod routes;
pub mod workflow;

pub use routes::session_routes;
