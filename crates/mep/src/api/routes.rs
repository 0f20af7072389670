//! HTTP routes for the MEP API

use axum::{routing::get, Router};

use super::handlers::*;

/// Default path of the calculation endpoint
pub const DEFAULT_CALCULATE_PATH: &str = "/api/calculate-mep";

/// Create the MEP router
///
/// Routes:
/// - GET     {path} - Authenticate, calculate every configured pair
/// - POST    {path} - Same as GET
/// - OPTIONS {path} - CORS preflight, empty body
/// - any other method on {path} - 405, still carrying the CORS headers
pub fn create_router(state: MepApiState, path: &str) -> Router {
    Router::new()
        .route(
            path,
            get(calculate_mep)
                .post(calculate_mep)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .with_state(state)
}
