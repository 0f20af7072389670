//! HTTP API for the MEP calculator
//!
//! The endpoint is consumed by a static front end served from another
//! origin, so every response carries permissive CORS headers.

pub mod handlers;
pub mod routes;

pub use handlers::{calculate_mep, preflight, MepApiState, CORS_HEADERS};
pub use routes::{create_router, DEFAULT_CALCULATE_PATH};
