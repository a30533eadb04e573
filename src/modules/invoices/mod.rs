pub mod handlers;
pub mod routes;

pub use routes::invoice_routes;
