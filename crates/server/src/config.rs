//! Bind address configuration

use crate::error::{Result, ServerError};
use std::net::SocketAddr;

/// Default HTTP port
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Where the HTTP server (and the optional metrics exporter) listen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind to (e.g., "0.0.0.0" or "127.0.0.1")
    pub host: String,
    pub http_port: u16,
    /// Prometheus exporter port; always bound on all interfaces
    pub metrics_port: Option<u16>,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, http_port: u16) -> Self {
        Self {
            host: host.into(),
            http_port,
            metrics_port: None,
        }
    }

    pub fn with_metrics_port(mut self, port: Option<u16>) -> Self {
        self.metrics_port = port;
        self
    }

    /// HTTP socket address
    pub fn http_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.http_port)
            .parse()
            .map_err(|_| ServerError::InvalidAddress(format!("{}:{}", self.host, self.http_port)))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new("0.0.0.0", DEFAULT_HTTP_PORT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_addr() {
        let config = ServerConfig::new("127.0.0.1", 8080);
        assert_eq!(config.http_addr().unwrap(), "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.metrics_port, None);
    }

    #[test]
    fn test_invalid_host() {
        let config = ServerConfig::new("not a host", 8080);
        assert!(matches!(config.http_addr(), Err(ServerError::InvalidAddress(_))));
    }

    #[test]
    fn test_default() {
        let config = ServerConfig::default().with_metrics_port(Some(9090));
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.metrics_port, Some(9090));
    }
}
