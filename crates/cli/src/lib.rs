use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Default configuration file location
pub const DEFAULT_CONFIG_PATH: &str = "mep_config/mep_config.yaml";

#[derive(Parser, Debug)]
#[command(name = "mepx")]
#[command(about = "Dólar MEP calculator backed by InvertirOnline bond quotes")]
#[command(version)]
pub struct Cli {
    /// Log output format; overrides `logging.format` from the config file
    #[arg(long, value_enum, global = true, env = "MEP_LOG_FORMAT")]
    pub log_format: Option<LogFormatArg>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the calculator over HTTP
    Start {
        /// Path to the configuration file
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// Override HTTP port
        #[arg(long)]
        http: Option<u16>,
    },

    /// Validate configuration without starting the server
    Validate {
        /// Path to the configuration file
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },

    /// Write a configuration file with all defaults
    Init {
        /// Output path for the new configuration file
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        output: PathBuf,
    },

    /// Compute MEP rates once and print them as JSON
    Calculate {
        /// Path to the configuration file
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormatArg {
    Pretty,
    Json,
    Compact,
}

impl LogFormatArg {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormatArg::Pretty => "pretty",
            LogFormatArg::Json => "json",
            LogFormatArg::Compact => "compact",
        }
    }
}

impl Commands {
    /// Configuration file the command reads, if any
    pub fn config_path(&self) -> Option<&PathBuf> {
        match self {
            Commands::Start { config, .. }
            | Commands::Validate { config }
            | Commands::Calculate { config } => Some(config),
            Commands::Init { .. } => None,
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
