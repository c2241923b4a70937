//! Configuration management for tripclock
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{APP_DIR_NAME, CONFIG_FILE_NAME, CONFIG_GENERATED, DEFAULT_LOG_LEVEL, DEFAULT_ZONE, LOCAL_CONFIG_FILE};
use crate::utils::datetime;
use crate::zone::parse_zone;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub calculator: CalculatorConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// Duration calculator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// IANA zone the trip timestamps were recorded in
    pub zone: String,
    /// strftime-style format of trip timestamps
    pub timestamp_format: String,
    /// Stop at the first trip that cannot be resolved
    pub strict: bool,
}

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One human-readable line per trip
    #[default]
    Text,
    /// A JSON document with records and summary
    Json,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write log lines to the log file
    pub enabled: bool,
    /// Minimum level: off, error, warn, info, debug, trace
    pub level: String,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            zone: DEFAULT_ZONE.to_string(),
            timestamp_format: datetime::CIVIL_TIMESTAMP_FORMAT.to_string(),
            strict: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl LoggingConfig {
    /// Parsed log level
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        log::LevelFilter::from_str(self.level.trim())
            .map_err(|_| anyhow::anyhow!("Invalid logging level '{}'", self.level))
    }
}

impl Config {
    /// Load `./tripclock.toml`, else the XDG config file, else defaults
    pub fn load() -> Result<Self> {
        match Self::candidate_paths().into_iter().find(|p| p.exists()) {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Parse and validate one config file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config =
            toml::from_str(&content).with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        paths.extend(Self::default_config_path().ok());
        paths
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        parse_zone(&self.calculator.zone).context("Invalid calculator.zone")?;

        if !datetime::is_valid_format(&self.calculator.timestamp_format) {
            anyhow::bail!(
                "Invalid timestamp_format '{}': must be a strftime pattern with a full date that keeps every field it shows",
                self.calculator.timestamp_format
            );
        }

        self.logging.level_filter()?;

        Ok(())
    }

    /// Write the default settings to `path`, creating parent directories
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        let body = toml::to_string_pretty(&Self::default()).context("Failed to serialize default config")?;
        let content = format!(
            "# tripclock Configuration File\n# Generated on {}\n\n{}",
            chrono::Local::now().format("%Y-%m-%d"),
            body
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }
        std::fs::write(path, content).with_context(|| format!("Failed to write config file: {}", path.display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.display());
        Ok(())
    }

    /// `<XDG config>/tripclock/config.toml`
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }
}
