use crate::*;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Read a YAML config file, expanding `${VAR}` placeholders first
#[instrument(skip(path))]
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<MepConfig> {
    let path = path.as_ref();
    info!("Loading configuration from: {:?}", path);

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    debug!("Config file content length: {} bytes", content.len());

    parse_config(&content)
}

/// Parse configuration from a YAML string
pub fn parse_config(content: &str) -> Result<MepConfig> {
    let substituted = substitution::substitute_env_vars(content)?;
    debug!("Environment variable substitution completed");

    let config: MepConfig = serde_yaml::from_str(&substituted)
        .with_context(|| "Failed to parse YAML configuration")?;

    info!(pairs = config.bonds.len(), "Configuration loaded successfully");
    Ok(config)
}

#[instrument]
pub fn generate_default_config() -> MepConfig {
    MepConfig {
        service: ServiceConfig::default(),
        server: ServerConfig::default(),
        broker: BrokerConfig::default(),
        bonds: default_bond_pairs(),
        logging: LoggingConfig::default(),
        monitoring: MonitoringConfig::default(),
    }
}

#[instrument(skip(config))]
pub fn save_config<P: AsRef<Path> + std::fmt::Debug>(config: &MepConfig, path: P) -> Result<()> {
    let path = path.as_ref();
    info!("Saving configuration to: {:?}", path);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }

    let yaml = serde_yaml::to_string(config)
        .with_context(|| "Failed to serialize configuration to YAML")?;

    fs::write(path, yaml)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    info!("Configuration saved successfully");
    Ok(())
}
