//! HTTP API handlers for the MEP calculator

use axum::{
    extract::State,
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use observability::{RequestMetricsGuard, ServerMetrics};
use std::sync::Arc;
use tracing::{error, info};

use crate::service::MepService;
use crate::types::{ErrorResponse, MepResponse};

/// Headers attached to every response of the endpoint, preflight included
pub const CORS_HEADERS: [(HeaderName, &str); 3] = [
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
    (header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS"),
];

/// State for the MEP API - cheap to clone
#[derive(Clone)]
pub struct MepApiState {
    pub service: Arc<MepService>,
    pub metrics: ServerMetrics,
}

impl MepApiState {
    pub fn new(service: MepService) -> Self {
        Self {
            service: Arc::new(service),
            metrics: ServerMetrics::new("calculate-mep"),
        }
    }
}

/// CORS preflight
pub async fn preflight() -> Response {
    info!("OPTIONS request handled");
    (StatusCode::OK, CORS_HEADERS).into_response()
}

/// Any method the endpoint does not serve
pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "GET, POST, OPTIONS")],
        CORS_HEADERS,
    )
        .into_response()
}

/// Authenticate, calculate every configured pair and render the result.
///
/// Any failure along the way becomes a 500 with `{"error": "..."}`; no
/// partial result is ever returned.
pub async fn calculate_mep(State(state): State<MepApiState>) -> Response {
    info!("MEP calculation request received");
    let mut guard = RequestMetricsGuard::new(&state.metrics);

    match state.service.calculate().await {
        Ok(results) => {
            let body = MepResponse::from(results.as_slice());
            (StatusCode::OK, CORS_HEADERS, Json(body)).into_response()
        }
        Err(e) => {
            error!(%e, "MEP calculation error");
            guard.set_status(StatusCode::INTERNAL_SERVER_ERROR.as_u16());
            let body = ErrorResponse {
                error: e.to_string(),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, CORS_HEADERS, Json(body)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::routes::{create_router, DEFAULT_CALCULATE_PATH};
    use crate::types::BondPair;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use broker::{Credentials, MockBrokerClient, QuoteSnapshot};
    use http_body_util::BodyExt;
    use rust_decimal_macros::dec;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app(client: MockBrokerClient) -> axum::Router {
        let service = MepService::new(
            Arc::new(client),
            Credentials::new("trader", "secret"),
            vec![BondPair::new("AL30D", "AL30")],
        );
        create_router(MepApiState::new(service), DEFAULT_CALCULATE_PATH)
    }

    fn request(method: Method) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(DEFAULT_CALCULATE_PATH)
            .body(Body::empty())
            .unwrap()
    }

    fn assert_cors(response: &Response) {
        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(headers["access-control-allow-headers"], "Content-Type");
        assert_eq!(headers["access-control-allow-methods"], "GET, POST, OPTIONS");
    }

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_preflight() {
        let client = MockBrokerClient::new();
        let response = app(client).oneshot(request(Method::OPTIONS)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(&response);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_calculate_success() {
        let client = MockBrokerClient::new()
            .with_quote("al30d", QuoteSnapshot::with_puntas(dec!(1000), dec!(1003)))
            .with_quote("al30", QuoteSnapshot::with_puntas(dec!(947), dec!(950)));

        let response = app(client).oneshot(request(Method::GET)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(&response);

        let json = body_json(response).await;
        let bond = &json["bonds"][0];
        assert_eq!(json["bonds"].as_array().unwrap().len(), 1);
        assert_eq!(bond["pair"], "AL30D/AL30");
        assert_eq!(bond["dollarBuyPrice"], "1000.0000");
        assert_eq!(bond["dollarCommissionFee"], "4.9000");
        assert_eq!(bond["dollarMarketFee"], "0.1000");
        assert_eq!(bond["pesoSellPrice"], "950.0000");
        assert_eq!(bond["pesoMarketFee"], "0.0950");
        assert_eq!(bond["mepRate"], "0.9452");
    }

    #[tokio::test]
    async fn test_post_behaves_like_get() {
        let client = MockBrokerClient::new()
            .with_quote("al30d", QuoteSnapshot::with_puntas(dec!(1000), dec!(1003)))
            .with_quote("al30", QuoteSnapshot::with_puntas(dec!(947), dec!(950)));

        let response = app(client).oneshot(request(Method::POST)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unsupported_method_keeps_cors() {
        let client = MockBrokerClient::new();

        let response = app(client).oneshot(request(Method::PUT)).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()["allow"], "GET, POST, OPTIONS");
        assert_cors(&response);
    }

    #[tokio::test]
    async fn test_auth_failure_is_500() {
        let client = MockBrokerClient::new().with_auth_failure("Bad Request");

        let response = app(client).oneshot(request(Method::GET)).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_cors(&response);

        let json = body_json(response).await;
        assert_eq!(json["error"], "Failed to authenticate: Bad Request");
        assert!(json.get("bonds").is_none());
    }

    #[tokio::test]
    async fn test_missing_leg_is_500() {
        let client = MockBrokerClient::new()
            .with_quote("al30d", QuoteSnapshot::with_puntas(dec!(1000), dec!(1003)));

        let response = app(client).oneshot(request(Method::GET)).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Failed to fetch al30: Not Found");
    }

    #[tokio::test]
    async fn test_zero_dollar_price_is_500() {
        let client = MockBrokerClient::new()
            .with_quote("al30d", QuoteSnapshot::with_last_price(dec!(0)))
            .with_quote("al30", QuoteSnapshot::with_puntas(dec!(947), dec!(950)));

        let response = app(client).oneshot(request(Method::GET)).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("Division by zero"));
    }
}
