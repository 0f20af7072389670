//! Broker client - trait and mock implementation

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::error::BrokerError;
use crate::quote::{Quote, QuoteSnapshot};
use crate::types::{AccessToken, Credentials};
use crate::Result;

/// Client trait for the brokerage API - transport agnostic
#[async_trait]
pub trait BrokerClient: Send + Sync {
    /// Exchange credentials for a bearer token (password grant).
    ///
    /// The token is not cached; callers request one per calculation.
    async fn authenticate(&self, credentials: &Credentials) -> Result<AccessToken>;

    /// Fetch and validate the current quote for one ticker.
    ///
    /// Fails with [`BrokerError::QuoteFetch`] on transport/HTTP errors and
    /// with [`BrokerError::InvalidQuoteData`] when the body carries neither
    /// top-of-book data nor a last traded price.
    async fn fetch_quote(&self, token: &AccessToken, ticker: &str) -> Result<Quote>;
}

// ==================== Mock Implementation ====================

struct MockQuote {
    response: Result<QuoteSnapshot>,
    delay: Duration,
}

/// Mock broker client for testing
///
/// Quotes are keyed by lower-cased ticker. Unknown tickers fail the way the
/// real API does for an unlisted instrument (404).
pub struct MockBrokerClient {
    token: std::result::Result<String, String>,
    quotes: HashMap<String, MockQuote>,
    auth_calls: AtomicUsize,
    fetched: Mutex<Vec<String>>,
}

impl MockBrokerClient {
    /// Create a mock that authenticates successfully and knows no tickers
    pub fn new() -> Self {
        Self {
            token: Ok("mock-token".to_string()),
            quotes: HashMap::new(),
            auth_calls: AtomicUsize::new(0),
            fetched: Mutex::new(Vec::new()),
        }
    }

    /// Make authentication fail with the given status text
    pub fn with_auth_failure(mut self, status: impl Into<String>) -> Self {
        self.token = Err(status.into());
        self
    }

    /// Register a quote returned immediately
    pub fn with_quote(self, ticker: &str, snapshot: QuoteSnapshot) -> Self {
        self.with_delayed_quote(ticker, snapshot, Duration::ZERO)
    }

    /// Register a quote returned after `delay`
    pub fn with_delayed_quote(
        mut self,
        ticker: &str,
        snapshot: QuoteSnapshot,
        delay: Duration,
    ) -> Self {
        self.quotes.insert(
            ticker.to_lowercase(),
            MockQuote {
                response: Ok(snapshot),
                delay,
            },
        );
        self
    }

    /// Register a ticker whose fetch fails
    pub fn with_failure(mut self, ticker: &str, error: BrokerError) -> Self {
        self.quotes.insert(
            ticker.to_lowercase(),
            MockQuote {
                response: Err(error),
                delay: Duration::ZERO,
            },
        );
        self
    }

    /// Number of authentication calls made
    pub fn auth_calls(&self) -> usize {
        self.auth_calls.load(Ordering::SeqCst)
    }

    /// Tickers fetched so far, in completion order
    pub fn fetched_tickers(&self) -> Vec<String> {
        self.fetched.lock().clone()
    }
}

impl Default for MockBrokerClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BrokerClient for MockBrokerClient {
    async fn authenticate(&self, _credentials: &Credentials) -> Result<AccessToken> {
        self.auth_calls.fetch_add(1, Ordering::SeqCst);

        match &self.token {
            Ok(token) => Ok(AccessToken::new(token.clone())),
            Err(status) => Err(BrokerError::Authentication(status.clone())),
        }
    }

    async fn fetch_quote(&self, _token: &AccessToken, ticker: &str) -> Result<Quote> {
        let key = ticker.to_lowercase();

        let Some(mock) = self.quotes.get(&key) else {
            return Err(BrokerError::quote_fetch(ticker, "Not Found"));
        };

        if !mock.delay.is_zero() {
            tokio::time::sleep(mock.delay).await;
        }

        self.fetched.lock().push(key);
        tracing::debug!("Mock broker: fetched quote for {}", ticker);

        mock.response.clone()?.resolve(ticker)
    }
}
