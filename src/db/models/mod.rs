mod course;
mod invoice;
mod session_request;
mod user;

#[allow(unused)]
pub use course::*;
#[allow(unused)]
pub use invoice::*;
#[allow(unused)]
pub use session_request::*;
#[allow(unused)]
pub use user::*;
