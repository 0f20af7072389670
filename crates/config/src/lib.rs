use serde::{Deserialize, Serialize};

pub mod defaults;
pub mod parser;
pub mod substitution;
pub mod validator;

pub use defaults::*;
pub use parser::*;
pub use substitution::*;
pub use validator::*;

// ==================================================================================
// SERVICE CONFIG
// ==================================================================================

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ServiceConfig {
    #[serde(default = "default_service_name")]
    pub name: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
        }
    }
}

// ==================================================================================
// SERVER CONFIG
// ==================================================================================

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    /// Directory served for any path not matched by the API
    #[serde(default)]
    pub static_dir: Option<String>,
    #[serde(default = "default_calculate_path")]
    pub calculate_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
            static_dir: None,
            calculate_path: default_calculate_path(),
        }
    }
}

// ==================================================================================
// BROKER CONFIG
// ==================================================================================

#[derive(Clone, Deserialize, Serialize, PartialEq)]
pub struct BrokerConfig {
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_market")]
    pub market: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            auth_url: default_auth_url(),
            api_url: default_api_url(),
            market: default_market(),
            username: "${IOL_USERNAME}".to_string(),
            password: "${IOL_PASSWORD}".to_string(),
            timeout_seconds: default_timeout_seconds(),
            connect_timeout_seconds: default_connect_timeout_seconds(),
        }
    }
}

impl std::fmt::Debug for BrokerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrokerConfig")
            .field("auth_url", &self.auth_url)
            .field("api_url", &self.api_url)
            .field("market", &self.market)
            .field("username", &self.username)
            .field("password", &"***")
            .field("timeout_seconds", &self.timeout_seconds)
            .field("connect_timeout_seconds", &self.connect_timeout_seconds)
            .finish()
    }
}

// ==================================================================================
// BOND PAIRS
// ==================================================================================

/// A dollar-denominated bond and its peso-denominated twin
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct BondPairConfig {
    pub dollar: String,
    pub peso: String,
}

impl BondPairConfig {
    pub fn new(dollar: impl Into<String>, peso: impl Into<String>) -> Self {
        Self {
            dollar: dollar.into(),
            peso: peso.into(),
        }
    }
}

// ==================================================================================
// LOGGING / MONITORING
// ==================================================================================

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LoggingConfig {
    /// pretty, json or compact
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct MonitoringConfig {
    /// Prometheus exporter port, disabled when absent
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

// ==================================================================================
// ROOT
// ==================================================================================

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct MepConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub broker: BrokerConfig,
    #[serde(default = "default_bond_pairs")]
    pub bonds: Vec<BondPairConfig>,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub monitoring: MonitoringConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sample_config() {
        let yaml = include_str!("../../../mep_config/mep_config.yaml");

        let cfg: MepConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(cfg.service.name, "mep-calculator");
        assert_eq!(cfg.server.http_port, 8080);
        assert_eq!(cfg.server.calculate_path, "/api/calculate-mep");
        assert_eq!(cfg.broker.market, "bCBA");
        assert_eq!(cfg.broker.username, "${IOL_USERNAME}");
        assert_eq!(cfg.bonds.len(), 9);
        assert_eq!(cfg.bonds[0], BondPairConfig::new("AL30D", "AL30"));
        assert_eq!(cfg.bonds[8], BondPairConfig::new("GD46D", "GD46"));
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let yaml = r#"
broker:
  username: trader
  password: secret
"#;
        let cfg: MepConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(cfg.server, ServerConfig::default());
        assert_eq!(cfg.broker.auth_url, "https://api.invertironline.com/token");
        assert_eq!(cfg.broker.api_url, "https://api.invertironline.com");
        assert_eq!(cfg.broker.timeout_seconds, 10);
        assert_eq!(cfg.broker.connect_timeout_seconds, 5);
        assert_eq!(cfg.bonds, default_bond_pairs());
        assert_eq!(cfg.logging.format, "pretty");
        assert_eq!(cfg.monitoring.metrics_port, None);
    }

    #[test]
    fn test_custom_bond_list_replaces_defaults() {
        let yaml = r#"
bonds:
  - dollar: GD30D
    peso: GD30
"#;
        let cfg: MepConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(cfg.bonds, vec![BondPairConfig::new("GD30D", "GD30")]);
    }

    #[test]
    fn test_broker_debug_hides_password() {
        let broker = BrokerConfig {
            password: "hunter2".to_string(),
            ..BrokerConfig::default()
        };

        assert!(!format!("{:?}", broker).contains("hunter2"));
    }
}
