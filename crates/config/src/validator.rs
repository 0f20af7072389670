use crate::*;
use std::collections::HashSet;
use thiserror::Error;
use url::Url;

const LOG_FORMATS: [&str; 3] = ["pretty", "json", "compact"];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Service name is required")]
    MissingServiceName,

    #[error("Broker {field} is required")]
    MissingCredential { field: String },

    #[error("Environment variable '{var}' is missing or invalid: {message}")]
    InvalidEnvVar { var: String, message: String },

    #[error("{field}: invalid URL '{value}': {message}")]
    InvalidUrl {
        field: String,
        value: String,
        message: String,
    },

    #[error("Broker market is required")]
    MissingMarket,

    #[error("{field} must be a positive integer")]
    InvalidPositiveInteger { field: String },

    #[error("server.calculate_path must start with '/', got: {0}")]
    InvalidCalculatePath(String),

    #[error("No bond pairs defined")]
    NoBondPairs,

    #[error("Bond pair #{index}: {message}")]
    InvalidBondPair { index: usize, message: String },

    #[error("Duplicate bond pair {dollar}/{peso}")]
    DuplicateBondPair { dollar: String, peso: String },

    #[error("Invalid log format: {0}. Must be one of: pretty, json, compact")]
    InvalidLogFormat(String),

    #[error("monitoring.metrics_port {0} collides with server.http_port")]
    MetricsPortConflict(u16),
}

#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct DefaultApplied {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
    pub defaults_applied: Vec<DefaultApplied>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
            defaults_applied: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationWarning {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn add_default(&mut self, field: &str, value: &str) {
        self.defaults_applied.push(DefaultApplied {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

pub fn validate_config(config: &MepConfig) -> ValidationReport {
    let mut report = ValidationReport::new();

    if config.service.name.trim().is_empty() {
        report.add_error(ValidationError::MissingServiceName);
    }

    validate_server(&config.server, &mut report);
    validate_broker(&config.broker, &mut report);
    validate_bonds(&config.bonds, &mut report);
    validate_observability(config, &mut report);

    report
}

fn validate_server(server: &ServerConfig, report: &mut ValidationReport) {
    if server.http_port == 0 {
        report.add_error(ValidationError::InvalidPositiveInteger {
            field: "server.http_port".to_string(),
        });
    }

    if !server.calculate_path.starts_with('/') {
        report.add_error(ValidationError::InvalidCalculatePath(
            server.calculate_path.clone(),
        ));
    } else if server.calculate_path != default_calculate_path() {
        report.add_warning(
            "server.calculate_path",
            "Browser clients expect /api/calculate-mep",
        );
    }

    if let Some(dir) = &server.static_dir {
        if !std::path::Path::new(dir).is_dir() {
            report.add_warning(
                "server.static_dir",
                &format!("Directory '{}' does not exist; static files will 404", dir),
            );
        }
    }
}

fn validate_broker(broker: &BrokerConfig, report: &mut ValidationReport) {
    for (field, value) in [("username", &broker.username), ("password", &broker.password)] {
        if value.trim().is_empty() {
            report.add_error(ValidationError::MissingCredential {
                field: field.to_string(),
            });
        } else if has_unresolved_env_vars(value) {
            report.add_error(ValidationError::InvalidEnvVar {
                var: value.trim_start_matches("${").trim_end_matches('}').to_string(),
                message: format!("broker.{} references an unset variable", field),
            });
        }
    }

    validate_url("broker.auth_url", &broker.auth_url, report);
    validate_url("broker.api_url", &broker.api_url, report);

    if broker.market.trim().is_empty() {
        report.add_error(ValidationError::MissingMarket);
    }

    if broker.timeout_seconds == 0 {
        report.add_error(ValidationError::InvalidPositiveInteger {
            field: "broker.timeout_seconds".to_string(),
        });
    }

    if broker.connect_timeout_seconds == 0 {
        report.add_error(ValidationError::InvalidPositiveInteger {
            field: "broker.connect_timeout_seconds".to_string(),
        });
    }

    if broker.connect_timeout_seconds > broker.timeout_seconds {
        report.add_warning(
            "broker.connect_timeout_seconds",
            "Connect timeout exceeds the overall request timeout",
        );
    }
}

fn validate_url(field: &str, value: &str, report: &mut ValidationReport) {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            if url.scheme() == "http" {
                report.add_warning(field, "Credentials and tokens will travel unencrypted");
            }
        }
        Ok(url) => report.add_error(ValidationError::InvalidUrl {
            field: field.to_string(),
            value: value.to_string(),
            message: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(e) => report.add_error(ValidationError::InvalidUrl {
            field: field.to_string(),
            value: value.to_string(),
            message: e.to_string(),
        }),
    }
}

fn validate_bonds(bonds: &[BondPairConfig], report: &mut ValidationReport) {
    if bonds.is_empty() {
        report.add_error(ValidationError::NoBondPairs);
        return;
    }

    let mut seen = HashSet::new();
    for (index, pair) in bonds.iter().enumerate() {
        let dollar = pair.dollar.trim().to_uppercase();
        let peso = pair.peso.trim().to_uppercase();

        if dollar.is_empty() || peso.is_empty() {
            report.add_error(ValidationError::InvalidBondPair {
                index,
                message: "Both dollar and peso tickers are required".to_string(),
            });
            continue;
        }

        if dollar == peso {
            report.add_error(ValidationError::InvalidBondPair {
                index,
                message: format!("Dollar and peso tickers are both '{}'", dollar),
            });
        }

        if !dollar.ends_with('D') {
            report.add_warning(
                &format!("bonds[{}].dollar", index),
                &format!("'{}' does not look like a dollar-settled ticker", dollar),
            );
        }

        if !seen.insert((dollar.clone(), peso.clone())) {
            report.add_error(ValidationError::DuplicateBondPair { dollar, peso });
        }
    }
}

fn validate_observability(config: &MepConfig, report: &mut ValidationReport) {
    if !LOG_FORMATS.contains(&config.logging.format.as_str()) {
        report.add_error(ValidationError::InvalidLogFormat(
            config.logging.format.clone(),
        ));
    }

    match config.monitoring.metrics_port {
        Some(0) => report.add_error(ValidationError::InvalidPositiveInteger {
            field: "monitoring.metrics_port".to_string(),
        }),
        Some(port) if port == config.server.http_port => {
            report.add_error(ValidationError::MetricsPortConflict(port))
        }
        Some(_) => {}
        None => report.add_default("monitoring.metrics_port", "disabled"),
    }
}
