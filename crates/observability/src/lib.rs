//! Observability for the MEP calculator
//!
//! - Structured logging via tracing
//! - Prometheus metrics for the HTTP endpoints
//!
//! ```ignore
//! use observability::{init_logging, LogFormat};
//!
//! init_logging("mep-calculator", LogFormat::Json)?;
//! observability::init_metrics(9090)?;
//! ```

pub mod logging;
pub mod metrics;

pub use logging::{init_logging, LogFormat};
pub use metrics::{init_metrics, RequestMetricsGuard, ServerMetrics};
