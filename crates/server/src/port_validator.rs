//! Port validation
//!
//! Checking before binding is racy: another process can take the port in
//! between. The real bind remains the source of truth; this only gives
//! early, readable feedback at startup.

use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::config::ServerConfig;
use crate::error::{Result, ServerError};

/// Check that the HTTP port and, if set, the metrics port can be bound
pub async fn validate_ports_available(config: &ServerConfig) -> Result<()> {
    validate_port_range(config.http_port)?;
    validate_single_port(&config.host, config.http_port, "HTTP").await?;

    if let Some(port) = config.metrics_port {
        if port == config.http_port {
            return Err(ServerError::ConfigError(format!(
                "Metrics port {} is the same as the HTTP port",
                port
            )));
        }
        validate_port_range(port)?;
        validate_single_port("0.0.0.0", port, "Metrics").await?;
    }

    info!("All server ports validated successfully");
    Ok(())
}

async fn validate_single_port(host: &str, port: u16, protocol: &str) -> Result<()> {
    let addr = format!("{}:{}", host, port);
    debug!("Checking {} port {}", protocol, port);

    match TcpListener::bind(&addr).await {
        Ok(listener) => {
            drop(listener);
            debug!("{} port {} is available", protocol, port);
            Ok(())
        }
        Err(e) => {
            error!("{} port {} is NOT available: {}", protocol, port, e);
            Err(ServerError::port_in_use(protocol, port, e.to_string()))
        }
    }
}

/// Reject port 0 and warn on privileged ports
pub fn validate_port_range(port: u16) -> Result<()> {
    if port == 0 {
        return Err(ServerError::ConfigError("Port cannot be 0".to_string()));
    }
    if port < 1024 {
        warn!("Port {} is a privileged port (requires root/admin privileges)", port);
    }
    Ok(())
}
