//! Broker error types

use thiserror::Error;

/// Errors that can occur while talking to the broker
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BrokerError {
    /// Credential exchange failed or returned an unusable payload
    #[error("Failed to authenticate: {0}")]
    Authentication(String),

    /// Transport or HTTP failure retrieving one ticker
    #[error("Failed to fetch {ticker}: {status}")]
    QuoteFetch { ticker: String, status: String },

    /// Response parsed but carries no usable price data at all
    #[error("Invalid quote data for {ticker}: no puntas and no ultimoPrecio")]
    InvalidQuoteData { ticker: String },

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl BrokerError {
    /// Create a quote fetch error
    pub fn quote_fetch(ticker: impl Into<String>, status: impl Into<String>) -> Self {
        Self::QuoteFetch {
            ticker: ticker.into(),
            status: status.into(),
        }
    }

    /// Create an invalid quote data error
    pub fn invalid_quote(ticker: impl Into<String>) -> Self {
        Self::InvalidQuoteData {
            ticker: ticker.into(),
        }
    }
}
