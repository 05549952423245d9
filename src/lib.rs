//! Pricebook: REST backend for a grocery pricebook (PostgreSQL).

pub mod error;
pub mod handlers;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
pub mod validate;

pub use error::AppError;
pub use routes::{api_routes, common_routes, common_routes_with_ready};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_tables};
