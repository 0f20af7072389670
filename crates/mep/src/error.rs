//! MEP calculation error types

use broker::{BrokerError, PriceSide};
use thiserror::Error;

/// Errors that can occur while computing MEP rates
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MepError {
    /// Authentication or quote retrieval failed
    #[error(transparent)]
    Broker(#[from] BrokerError),

    /// Quote has data, but none for the requested side
    #[error("No {side} price available for {ticker}")]
    NoPriceAvailable { ticker: String, side: PriceSide },

    /// Dollar leg final price resolved to zero
    #[error("Division by zero computing MEP for {pair}: dollar leg price is zero")]
    DivisionByZero { pair: String },

    /// Decimal arithmetic overflowed
    #[error("Arithmetic overflow computing MEP for {pair}")]
    Overflow { pair: String },

    /// Service could not be built from configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
