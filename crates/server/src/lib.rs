//! HTTP server lifecycle for the MEP calculator
//!
//! The server implements the [`Server`] trait; [`ServerExt`] adds
//! `spawn()` and `run_with_ctrl_c()`. Shutdown is coordinated with a
//! `CancellationToken` from `tokio_util`.
//!
//! ```ignore
//! use server::{HttpServer, ServerConfig, ServerExt};
//!
//! let config = ServerConfig::new("0.0.0.0", 8080);
//! HttpServer::new(config, router).run_with_ctrl_c().await?;
//! ```
//!
//! # Modules
//!
//! - [`config`] - Bind address configuration
//! - [`traits`] - `Server` and `ServerExt` traits
//! - [`http`] - Axum server with graceful shutdown
//! - [`health`] - `/health` endpoint
//! - [`shutdown`] - Signal handling
//! - [`port_validator`] - Early bind checks

pub mod config;
pub mod error;
pub mod health;
pub mod http;
pub mod port_validator;
pub mod shutdown;
pub mod traits;

pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use health::{health_routes, HealthState, HealthStatus};
pub use http::HttpServer;
pub use port_validator::validate_ports_available;
pub use shutdown::ShutdownController;
pub use traits::{Server, ServerExt};
