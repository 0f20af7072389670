//! MEP calculator CLI and server binary
//!
//! `start` serves the calculator over HTTP, `calculate` runs it once and
//! prints the JSON result, `validate` and `init` manage the config file.

use anyhow::{Context, Result};
use axum::Router;
use cli::{Cli, Commands};
use config::{generate_default_config, load_config, save_config, validate_config, MepConfig};
use mep::api::{create_router, MepApiState};
use mep::{ErrorResponse, MepResponse, MepService};
use observability::{init_logging, init_metrics, LogFormat};
use server::{
    health_routes, validate_ports_available, HealthState, HttpServer, ServerConfig, ServerExt,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing::{debug, error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Loaded before logging so `logging.format` can pick the formatter
    let loaded = cli.command.config_path().map(load_config);
    let format = resolve_log_format(
        cli.log_format.map(|f| f.as_str()),
        loaded.as_ref().and_then(|r| r.as_ref().ok()),
    );
    init_logging("mepx", format)?;
    debug!(?cli, "CLI arguments parsed");

    match cli.command {
        Commands::Start { http, .. } => {
            info!("Executing 'start' command");
            start_command(required(loaded)?, http).await
        }
        Commands::Validate { .. } => {
            info!("Executing 'validate' command");
            validate_command(required(loaded)?)
        }
        Commands::Init { output } => {
            info!("Executing 'init' command");
            init_command(&output)
        }
        Commands::Calculate { .. } => {
            info!("Executing 'calculate' command");
            calculate_command(required(loaded)?).await
        }
    }
}

fn required(loaded: Option<Result<MepConfig>>) -> Result<MepConfig> {
    loaded
        .context("Command requires a configuration file")?
        .map_err(|e| {
            error!(%e, "Failed to load configuration");
            e
        })
}

/// CLI flag wins, then the config file, then pretty
fn resolve_log_format(flag: Option<&str>, config: Option<&MepConfig>) -> LogFormat {
    flag.or(config.map(|c| c.logging.format.as_str()))
        .and_then(LogFormat::parse)
        .unwrap_or_default()
}

/// Abort with every validation error logged; warnings are only logged
fn ensure_valid(config: &MepConfig) -> Result<()> {
    let report = validate_config(config);

    for warning in &report.warnings {
        warn!(field = %warning.field, message = %warning.message, "Configuration warning");
    }

    if !report.is_valid() {
        error!(
            error_count = report.errors.len(),
            "Configuration validation failed"
        );
        for err in &report.errors {
            error!("{}", err);
        }
        anyhow::bail!("Cannot start due to configuration errors");
    }

    Ok(())
}

/// MEP endpoint, `/health`, and static files for everything else
fn build_router(config: &MepConfig, state: MepApiState) -> Router {
    let health = HealthState::new(config.service.name.clone(), env!("CARGO_PKG_VERSION"));
    let router = create_router(state, &config.server.calculate_path)
        .merge(health_routes(Arc::new(health)));

    match &config.server.static_dir {
        Some(dir) => {
            info!(%dir, "Serving static files");
            router.fallback_service(ServeDir::new(dir))
        }
        None => router,
    }
}

async fn start_command(config: MepConfig, http_override: Option<u16>) -> Result<()> {
    ensure_valid(&config)?;

    let http_port = http_override.unwrap_or(config.server.http_port);
    let server_config = ServerConfig::new(config.server.host.clone(), http_port)
        .with_metrics_port(config.monitoring.metrics_port);

    validate_ports_available(&server_config).await?;

    if let Some(port) = config.monitoring.metrics_port {
        init_metrics(port)?;
    }

    let service = MepService::from_config(&config)?;
    info!(
        service = %config.service.name,
        host = %server_config.host,
        http_port,
        path = %config.server.calculate_path,
        pairs = service.pairs().len(),
        "Starting MEP calculator"
    );

    let router = build_router(&config, MepApiState::new(service));
    HttpServer::new(server_config, router).run_with_ctrl_c().await?;

    info!("MEP calculator stopped");
    Ok(())
}

async fn calculate_command(config: MepConfig) -> Result<()> {
    ensure_valid(&config)?;

    let service = MepService::from_config(&config)?;

    match service.calculate().await {
        Ok(results) => {
            let body = MepResponse::from(results.as_slice());
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(())
        }
        Err(e) => {
            let body = ErrorResponse {
                error: e.to_string(),
            };
            println!("{}", serde_json::to_string_pretty(&body)?);
            Err(e.into())
        }
    }
}

fn validate_command(config: MepConfig) -> Result<()> {
    let report = validate_config(&config);

    println!("\n=== Configuration Validation Report ===\n");

    if !report.defaults_applied.is_empty() {
        println!("Defaults Applied ({}):", report.defaults_applied.len());
        for default in &report.defaults_applied {
            println!("  [info] {} = {}", default.field, default.value);
        }
        println!();
    }

    if !report.warnings.is_empty() {
        println!("Warnings ({}):", report.warnings.len());
        for warning in &report.warnings {
            println!("  [warn] [{}] {}", warning.field, warning.message);
        }
        println!();
    }

    if !report.errors.is_empty() {
        println!("Errors ({}):", report.errors.len());
        for err in &report.errors {
            println!("  [error] {}", err);
        }
        println!();
        anyhow::bail!("Configuration validation failed");
    }

    println!("[ok] Configuration is valid!");
    println!();
    println!("Service: {}", config.service.name);
    println!(
        "Listen: {}:{}{}",
        config.server.host, config.server.http_port, config.server.calculate_path
    );
    println!("Broker: {} (market {})", config.broker.api_url, config.broker.market);
    println!("Bond pairs ({}):", config.bonds.len());
    for pair in &config.bonds {
        println!("  {}/{}", pair.dollar, pair.peso);
    }

    Ok(())
}

fn init_command(output_path: &Path) -> Result<()> {
    info!(?output_path, "Initializing new configuration file");

    save_config(&generate_default_config(), output_path)?;

    println!("[ok] Configuration file created successfully!");
    println!();
    println!("Location: {:?}", output_path);
    println!();
    println!("Next steps:");
    println!("  1. Export IOL_USERNAME and IOL_PASSWORD");
    println!(
        "  2. Run 'mepx validate --config {:?}' to check configuration",
        output_path
    );
    println!(
        "  3. Run 'mepx start --config {:?}' to serve the calculator",
        output_path
    );

    Ok(())
}
