pub mod errors;
pub mod handlers;
pub mod routes;

pub use errors::{ApiError, ErrorResponse};
pub use routes::configure_invoice_routes;
