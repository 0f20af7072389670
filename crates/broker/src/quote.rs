//! Quote payloads
//!
//! [`QuoteSnapshot`] mirrors the broker's `CotizacionDetalle` JSON, where
//! both `puntas` and `ultimoPrecio` may be absent or null. It is resolved
//! once per fetch into a [`Quote`] whose [`Pricing`] variant says which
//! kind of data is actually there.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::BrokerError;

/// Side of the book a price is taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceSide {
    /// Bid (`precioCompra`)
    Buy,
    /// Ask (`precioVenta`)
    Sell,
}

impl std::fmt::Display for PriceSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceSide::Buy => write!(f, "buy"),
            PriceSide::Sell => write!(f, "sell"),
        }
    }
}

/// One level of the top-of-book (`puntas`) array
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceLevel {
    #[serde(default)]
    pub precio_compra: Option<Decimal>,
    #[serde(default)]
    pub precio_venta: Option<Decimal>,
}

/// Raw quote body as returned by the broker
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSnapshot {
    #[serde(default)]
    pub puntas: Option<Vec<PriceLevel>>,
    #[serde(default)]
    pub ultimo_precio: Option<Decimal>,
}

impl QuoteSnapshot {
    /// Snapshot with a single top-of-book level
    pub fn with_puntas(buy: Decimal, sell: Decimal) -> Self {
        Self {
            puntas: Some(vec![PriceLevel {
                precio_compra: Some(buy),
                precio_venta: Some(sell),
            }]),
            ultimo_precio: None,
        }
    }

    /// Snapshot carrying only a last traded price
    pub fn with_last_price(price: Decimal) -> Self {
        Self {
            puntas: None,
            ultimo_precio: Some(price),
        }
    }

    /// Classify the payload, rejecting it when it has no pricing data at all
    pub fn resolve(self, ticker: &str) -> Result<Quote, BrokerError> {
        let best = self.puntas.and_then(|levels| levels.into_iter().next());

        let pricing = match (best, self.ultimo_precio) {
            (Some(level), last_traded) => Pricing::BestBidAsk {
                buy: level.precio_compra,
                sell: level.precio_venta,
                last_traded,
            },
            (None, Some(price)) => Pricing::LastTraded { price },
            (None, None) => return Err(BrokerError::invalid_quote(ticker)),
        };

        Ok(Quote {
            ticker: ticker.to_string(),
            pricing,
        })
    }
}

/// Pricing data available in a validated quote
#[derive(Debug, Clone, PartialEq)]
pub enum Pricing {
    /// Top-of-book present; either side may still be missing
    BestBidAsk {
        buy: Option<Decimal>,
        sell: Option<Decimal>,
        last_traded: Option<Decimal>,
    },
    /// No top-of-book, only the last traded price
    LastTraded { price: Decimal },
}

/// A validated quote for one ticker
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub ticker: String,
    pub pricing: Pricing,
}

impl Quote {
    /// Top-of-book price for one side, if reported
    pub fn best(&self, side: PriceSide) -> Option<Decimal> {
        match &self.pricing {
            Pricing::BestBidAsk { buy, sell, .. } => match side {
                PriceSide::Buy => *buy,
                PriceSide::Sell => *sell,
            },
            Pricing::LastTraded { .. } => None,
        }
    }

    /// Last traded price, if reported
    pub fn last_traded(&self) -> Option<Decimal> {
        match &self.pricing {
            Pricing::BestBidAsk { last_traded, .. } => *last_traded,
            Pricing::LastTraded { price } => Some(*price),
        }
    }
}
