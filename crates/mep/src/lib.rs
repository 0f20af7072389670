//! MEP exchange rate computation
//!
//! This crate turns broker quotes for dollar/peso bond pairs into an
//! implicit exchange rate ("dólar MEP"), net of trading fees.
//!
//! # Core Components
//!
//! - [`selector`] - Picks a buy or sell price out of a quote
//! - [`calculator`] - Fee-adjusted MEP rate for one bond pair
//! - [`aggregator`] - Runs every configured pair concurrently
//! - [`service`] - Authenticates once and aggregates, per request
//! - [`api`] - HTTP endpoint (feature `api`)
//!
//! # Key Invariants
//!
//! - `mep_rate = peso_final / dollar_final`, fees only raise the dollar
//!   leg's cost and lower the peso leg's proceeds
//! - A failure in any leg of any pair fails the whole calculation
//! - Results keep the configured pair order

pub mod aggregator;
pub mod calculator;
pub mod error;
pub mod selector;
pub mod service;
pub mod types;

#[cfg(feature = "api")]
pub mod api;

pub use aggregator::aggregate;
pub use calculator::{calculate_pair, price_pair};
pub use error::MepError;
pub use selector::select_price;
pub use service::MepService;
pub use types::{BondPair, BondQuote, ErrorResponse, MepResponse, PairResult};

pub type Result<T> = std::result::Result<T, MepError>;
