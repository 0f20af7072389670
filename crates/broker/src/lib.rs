//! Brokerage REST client for the MEP calculator
//!
//! This crate talks to the broker's public API: it exchanges credentials
//! for a bearer token (password grant) and retrieves per-ticker quote
//! snapshots.
//!
//! # Core Components
//!
//! - [`client`] - The [`BrokerClient`] trait and an in-memory mock
//! - [`http`] - reqwest-backed implementation of [`BrokerClient`]
//! - [`quote`] - Wire payloads and the resolved [`Quote`] variant
//! - [`types`] - Credentials and access tokens
//!
//! # Key Invariants
//!
//! - A token is requested per calculation and never cached
//! - Credentials and tokens never appear in logs
//! - A quote without usable pricing data is rejected at fetch time

pub mod client;
pub mod error;
pub mod http;
pub mod quote;
pub mod types;

pub use client::{BrokerClient, MockBrokerClient};
pub use error::BrokerError;
pub use http::{BrokerEndpoints, HttpBrokerClient};
pub use quote::{PriceLevel, PriceSide, Pricing, Quote, QuoteSnapshot};
pub use types::{AccessToken, Credentials};

pub type Result<T> = std::result::Result<T, BrokerError>;
