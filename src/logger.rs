//! Logging setup.
//!
//! Library code only uses the `log` macros. The binary installs a `fern`
//! dispatch once at startup: log lines always go to stderr, and additionally
//! to a log file when `logging.enabled` is set.

use anyhow::{Context, Result};
use log::LevelFilter;
use std::path::{Path, PathBuf};

use crate::config::LoggingConfig;
use crate::constants::{APP_DIR_NAME, LOG_FILE_NAME};

/// Shared logger configuration resolved from config and command-line flags
#[derive(Debug, Clone)]
pub struct Logger {
    level: LevelFilter,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Resolve level and log file from config; each `-v` raises the level one step.
    pub fn from_config(config: &LoggingConfig, verbosity: u8) -> Result<Self> {
        let level = match verbosity {
            0 => config.level_filter()?,
            1 => config.level_filter()?.max(LevelFilter::Info),
            2 => config.level_filter()?.max(LevelFilter::Debug),
            _ => LevelFilter::Trace,
        };
        let log_file = if config.enabled {
            Some(Self::get_log_file_path()?)
        } else {
            None
        };
        Ok(Self { level, log_file })
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    pub fn has_file_writer(&self) -> bool {
        self.log_file.is_some()
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    /// Write to `path` instead of the default log file location
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Build the fern dispatch without installing it
    pub fn dispatch(&self) -> Result<fern::Dispatch> {
        let mut dispatch = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{} {:<5} {}] {}",
                    chrono::Local::now().format("%H:%M:%S%.3f"),
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .level(self.level)
            .chain(std::io::stderr());

        if let Some(path) = &self.log_file {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
            }
            let file =
                fern::log_file(path).with_context(|| format!("Failed to open log file: {}", path.display()))?;
            dispatch = dispatch.chain(file);
        }

        Ok(dispatch)
    }

    /// Install as the global logger. Fails if a logger is already installed.
    pub fn init(&self) -> Result<()> {
        self.dispatch()?.apply().context("Failed to install logger")?;
        log::debug!("Logging at level {} (file: {:?})", self.level, self.log_file);
        Ok(())
    }

    /// Get the log file path
    pub fn get_log_file_path() -> Result<PathBuf> {
        dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine cache directory"))
            .map(|dir| dir.join(APP_DIR_NAME).join(LOG_FILE_NAME))
    }
}
