//! HTTP implementation of [`BrokerClient`] using reqwest

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::client::BrokerClient;
use crate::error::BrokerError;
use crate::quote::{Quote, QuoteSnapshot};
use crate::types::{AccessToken, Credentials};
use crate::Result;

/// Default token endpoint
pub const DEFAULT_AUTH_URL: &str = "https://api.invertironline.com/token";
/// Default API base URL
pub const DEFAULT_API_URL: &str = "https://api.invertironline.com";
/// Default market segment (BYMA bonds and equities)
pub const DEFAULT_MARKET: &str = "bCBA";

/// Remote endpoints used by [`HttpBrokerClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerEndpoints {
    /// Full URL of the password-grant token endpoint
    pub auth_url: String,
    /// Base URL of the REST API (no trailing slash needed)
    pub api_url: String,
    /// Market segment in the quote path
    pub market: String,
}

impl Default for BrokerEndpoints {
    fn default() -> Self {
        Self {
            auth_url: DEFAULT_AUTH_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            market: DEFAULT_MARKET.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
}

/// HTTP-based broker client
///
/// A single reqwest client is reused across requests; every call is
/// bounded by the configured timeout.
#[derive(Clone)]
pub struct HttpBrokerClient {
    client: Client,
    endpoints: BrokerEndpoints,
}

impl HttpBrokerClient {
    /// Create a new HTTP broker client
    pub fn new(
        endpoints: BrokerEndpoints,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| BrokerError::Client(e.to_string()))?;

        Ok(Self {
            client,
            endpoints: BrokerEndpoints {
                api_url: endpoints.api_url.trim_end_matches('/').to_string(),
                ..endpoints
            },
        })
    }

    pub fn endpoints(&self) -> &BrokerEndpoints {
        &self.endpoints
    }

    /// Quote-detail URL for a ticker (lower-cased; the API is case-insensitive)
    pub fn quote_url(&self, ticker: &str) -> String {
        format!(
            "{}/api/v2/{}/Titulos/{}/CotizacionDetalle",
            self.endpoints.api_url,
            self.endpoints.market,
            ticker.to_lowercase()
        )
    }
}

fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}

fn record_call(call: &'static str, outcome: &'static str) {
    metrics::counter!("broker_requests_total", "call" => call, "outcome" => outcome).increment(1);
}

#[async_trait]
impl BrokerClient for HttpBrokerClient {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AccessToken> {
        info!("Requesting authentication token");

        let response = self
            .client
            .post(&self.endpoints.auth_url)
            .form(&credentials.grant_form())
            .send()
            .await
            .map_err(|e| {
                record_call("authenticate", "error");
                error!(%e, "Authentication request failed");
                BrokerError::Authentication(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            record_call("authenticate", "error");
            error!(status = status.as_u16(), "Authentication failed");
            return Err(BrokerError::Authentication(status_text(status)));
        }

        let body: TokenResponse = response.json().await.map_err(|e| {
            record_call("authenticate", "error");
            BrokerError::Authentication(format!("invalid token response: {}", e))
        })?;

        let token = body.access_token.ok_or_else(|| {
            record_call("authenticate", "error");
            BrokerError::Authentication("token response missing access_token".to_string())
        })?;

        record_call("authenticate", "ok");
        info!("Authentication successful");
        Ok(AccessToken::new(token))
    }

    async fn fetch_quote(&self, token: &AccessToken, ticker: &str) -> Result<Quote> {
        let url = self.quote_url(ticker);
        debug!(ticker, "Fetching quote");

        let response = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, token.bearer())
            .send()
            .await
            .map_err(|e| {
                record_call("quote", "error");
                error!(ticker, %e, "Quote request failed");
                BrokerError::quote_fetch(ticker, e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            record_call("quote", "error");
            error!(ticker, status = status.as_u16(), "Failed to fetch quote");
            return Err(BrokerError::quote_fetch(ticker, status_text(status)));
        }

        let snapshot: QuoteSnapshot = response.json().await.map_err(|e| {
            record_call("quote", "error");
            BrokerError::quote_fetch(ticker, format!("invalid quote body: {}", e))
        })?;

        let quote = snapshot.resolve(ticker).map_err(|e| {
            record_call("quote", "invalid");
            error!(ticker, "Quote carries no usable price data");
            e
        })?;

        record_call("quote", "ok");
        debug!(ticker, "Quote fetched successfully");
        Ok(quote)
    }
}
