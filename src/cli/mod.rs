//! Command-line interface for pingview.
//!
//! Reads a JSON array of pings from a file or stdin and runs one of the
//! metric-ID or error operations over it.

use crate::core::config::{Config, ConfigBuilder};
use crate::core::{Ping, PingViewError, Result};
use crate::errors::{describe_error, ErrorCatalog};
use crate::metrics::{
    aggregate_metric_id_counts, aggregate_metric_ids, aggregate_metric_ids_parallel,
    filter_on_metric_id,
};
use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

/// Inspect telemetry pings and the metric IDs they carry
#[derive(Parser, Debug)]
#[command(name = "pingview")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// JSON file holding an array of pings (`-` reads stdin)
    #[arg(short, long, env = "PINGVIEW_PINGS", default_value = "-", global = true)]
    pub pings: PathBuf,

    /// Configuration file path (default: ~/.config/pingview/config.yaml)
    #[arg(short, long, env = "PINGVIEW_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, env = "PINGVIEW_DEBUG", global = true)]
    pub debug: bool,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Operations over the loaded pings
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List metric IDs, most frequent first
    MetricIds {
        /// Print occurrence counts next to each ID
        #[arg(long)]
        counts: bool,
    },
    /// Print the pings containing a metric ID as JSON
    Filter {
        /// Metric ID to filter on; all pings are printed when omitted
        #[arg(short, long)]
        metric_id: Option<String>,
    },
    /// Describe the ingestion errors of failed pings
    Errors,
    /// Validate configuration and exit
    CheckConfig,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Load configuration with proper precedence:
    /// 1. CLI arguments (highest priority)
    /// 2. Environment variables
    /// 3. Config file
    /// 4. Defaults (lowest priority)
    pub async fn load_config(&self) -> Result<Config> {
        let mut builder = ConfigBuilder::new();

        let config_path = if let Some(path) = &self.config {
            path.clone()
        } else {
            match dirs::config_dir().map(|d| d.join("pingview").join("config.yaml")) {
                Some(default_path) if default_path.exists() => default_path,
                // No config file, use defaults
                _ => return builder.debug(self.debug).build(),
            }
        };

        match tokio::fs::read_to_string(&config_path).await {
            Ok(content) => {
                builder = builder.from_yaml(&content)?;
                tracing::info!("Loaded configuration from: {:?}", config_path);
            },
            Err(e) if self.config.is_some() => {
                return Err(PingViewError::config(format!(
                    "Failed to read config file {:?}: {}",
                    config_path, e
                )));
            },
            Err(_) => {
                tracing::debug!("No config file found at {:?}, using defaults", config_path);
            },
        }

        builder.debug(self.debug).build()
    }

    /// Initialize logging. Logs go to stderr so stdout stays parseable.
    ///
    /// `--debug` wins over `RUST_LOG`, which wins over `PINGVIEW_LOG_LEVEL`,
    /// which wins over the configured level.
    pub fn init_logging(&self, config: &Config) -> Result<()> {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

        let env_log_level = std::env::var("PINGVIEW_LOG_LEVEL")
            .unwrap_or_else(|_| config.logging.level.as_str().to_string());

        let filter = if self.debug {
            EnvFilter::new("debug")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&env_log_level))
        };

        let verbose = self.debug || config.logging.verbose;
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(verbose)
            .with_line_number(verbose)
            .compact();

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| PingViewError::config(format!("Failed to initialize logging: {}", e)))?;

        Ok(())
    }
}

/// Read a JSON array of pings from `path`, or stdin for `-`.
pub async fn load_pings(path: &Path) -> Result<Vec<Ping>> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        tokio::io::stdin().read_to_string(&mut buf).await?;
        buf
    } else {
        tokio::fs::read_to_string(path).await.map_err(|e| {
            PingViewError::input(format!("Failed to read pings from {:?}: {}", path, e))
        })?
    };

    parse_pings(&content)
}

/// Parse a JSON array of pings.
pub fn parse_pings(content: &str) -> Result<Vec<Ping>> {
    serde_json::from_str(content)
        .map_err(|e| PingViewError::input(format!("Expected a JSON array of pings: {}", e)))
}

/// Execute the pingview application.
pub async fn execute(cli: Cli) -> Result<()> {
    // Config first so its log level applies
    let config = cli.load_config().await?;
    cli.init_logging(&config)?;

    if cli.command == Command::CheckConfig {
        print!("{}", render_config_summary(&config));
        return Ok(());
    }

    let pings = load_pings(&cli.pings).await?;
    tracing::info!(count = pings.len(), "Loaded pings");

    let output = run_command(&cli.command, &pings, &config)?;
    print!("{}", output);
    Ok(())
}

/// Run `command` over `pings` and return what should be printed.
pub fn run_command(command: &Command, pings: &[Ping], config: &Config) -> Result<String> {
    match command {
        Command::MetricIds { counts } => {
            let show_counts = *counts || config.output.show_counts;
            Ok(render_metric_ids(pings, config, show_counts))
        },
        Command::Filter { metric_id } => {
            let matched = filter_on_metric_id(pings, metric_id.as_deref());
            let mut json = if config.output.pretty_json {
                serde_json::to_string_pretty(&matched)?
            } else {
                serde_json::to_string(&matched)?
            };
            json.push('\n');
            Ok(json)
        },
        Command::Errors => Ok(render_errors(pings, &config.errors)),
        Command::CheckConfig => Ok(render_config_summary(config)),
    }
}

fn render_metric_ids(pings: &[Ping], config: &Config, show_counts: bool) -> String {
    let mut out = String::new();

    if show_counts {
        for (metric_id, count) in aggregate_metric_id_counts(pings) {
            let _ = writeln!(out, "{:>6}  {}", count, metric_id);
        }
        return out;
    }

    let metric_ids = if config.use_parallel_aggregation(pings.len()) {
        aggregate_metric_ids_parallel(pings)
    } else {
        aggregate_metric_ids(pings)
    };
    for metric_id in metric_ids {
        let _ = writeln!(out, "{}", metric_id);
    }
    out
}

fn render_errors(pings: &[Ping], catalog: &ErrorCatalog) -> String {
    let mut out = String::new();
    for ping in pings {
        let Some(description) = describe_error(ping, catalog) else {
            continue;
        };

        let doc_id = ping.doc_id.as_deref().unwrap_or("-");
        let _ = writeln!(out, "{}\t{}", doc_id, description.text);
        if let Some(tooltip) = description.tooltip {
            for line in tooltip.lines() {
                let _ = writeln!(out, "    {}", line);
            }
        }
    }
    out
}

fn render_config_summary(config: &Config) -> String {
    format!(
        "Configuration is valid!\n  Log level: {}\n  Parallel threshold: {}\n  Known errors: {}\n  Known error types: {}\n",
        config.logging.level.as_str(),
        config.aggregation.parallel_threshold,
        config.errors.common_errors.len(),
        config.errors.common_error_types.len(),
    )
}
