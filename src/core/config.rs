//! Configuration management for pingview.
//!
//! This module provides configuration handling with:
//! - YAML file support
//! - Environment variable and CLI overrides (applied by the CLI)
//! - Validation and defaults

use crate::core::{PingViewError, Result};
use crate::errors::ErrorCatalog;
use serde::{Deserialize, Serialize};

/// Complete configuration for pingview
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Aggregation configuration
    pub aggregation: AggregationConfig,
    /// Output configuration
    pub output: OutputConfig,
    /// Known errors used to annotate failed pings
    pub errors: ErrorCatalog,
    /// Debug mode
    #[serde(skip)]
    pub debug: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: LogLevel,
    /// Include module targets and line numbers in log lines
    pub verbose: bool,
}

/// Aggregation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Ping count at which metric-ID aggregation switches to rayon
    pub parallel_threshold: usize,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON written by `filter`
    pub pretty_json: bool,
    /// Print occurrence counts next to metric IDs
    pub show_counts: bool,
}

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: LogLevel::Warn,
            verbose: false,
        }
    }
}

impl Default for AggregationConfig {
    fn default() -> Self {
        AggregationConfig {
            parallel_threshold: 10_000,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            pretty_json: true,
            show_counts: false,
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Result<Self> {
        let config = Config::default();
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.aggregation.parallel_threshold == 0 {
            return Err(PingViewError::config("parallel_threshold must be greater than 0"));
        }

        for entry in &self.errors.common_errors {
            if entry.prefix.is_empty() {
                return Err(PingViewError::config(format!(
                    "Common error '{}' has an empty prefix",
                    entry.label
                )));
            }
        }

        for entry in &self.errors.common_error_types {
            if entry.error_type.is_empty() {
                return Err(PingViewError::config("Common error type must not be empty"));
            }
        }

        Ok(())
    }

    /// Whether aggregation over `ping_count` pings should run in parallel
    pub fn use_parallel_aggregation(&self, ping_count: usize) -> bool {
        ping_count >= self.aggregation.parallel_threshold
    }
}

impl LogLevel {
    /// Convert to tracing filter string
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Configuration builder for programmatic construction
pub struct ConfigBuilder {
    config: Config,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigBuilder {
    /// Create a new builder with defaults
    pub fn new() -> Self {
        ConfigBuilder {
            config: Config::default(),
        }
    }

    /// Load configuration from YAML string
    pub fn from_yaml(mut self, yaml: &str) -> Result<Self> {
        let debug = self.config.debug;
        self.config = serde_yaml::from_str(yaml)
            .map_err(|e| PingViewError::config(format!("Failed to parse YAML config: {}", e)))?;
        self.config.debug = debug;
        Ok(self)
    }

    /// Set log level
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Set the parallel aggregation threshold
    pub fn parallel_threshold(mut self, threshold: usize) -> Self {
        self.config.aggregation.parallel_threshold = threshold;
        self
    }

    /// Set pretty JSON output
    pub fn pretty_json(mut self, pretty: bool) -> Self {
        self.config.output.pretty_json = pretty;
        self
    }

    /// Set whether counts are printed with metric IDs
    pub fn show_counts(mut self, show: bool) -> Self {
        self.config.output.show_counts = show;
        self
    }

    /// Replace the error catalog
    pub fn error_catalog(mut self, catalog: ErrorCatalog) -> Self {
        self.config.errors = catalog;
        self
    }

    /// Set debug mode
    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}
