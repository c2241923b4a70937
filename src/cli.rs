//! CLI argument parsing for tripclock

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Config, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "tripclock")]
#[command(version)]
#[command(about = "Elapsed time for trips stamped in local clock time, DST fall-back aware", long_about = None)]
pub struct Cli {
    /// Configuration file (default: ./tripclock.toml, then the XDG config dir)
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Overrides for the `[calculator]` config section
#[derive(Args, Debug, Clone, Default)]
pub struct CalculatorArgs {
    /// IANA zone the timestamps were recorded in (e.g. America/New_York)
    #[arg(short, long, value_name = "ZONE")]
    pub zone: Option<String>,

    /// strftime-style timestamp format (e.g. "%Y-%m-%d %H:%M:%S")
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the elapsed seconds of every trip
    Durations {
        /// JSON trip document; reads stdin when omitted or "-"
        input: Option<PathBuf>,

        #[command(flatten)]
        calculator: CalculatorArgs,

        /// Output format
        #[arg(short, long, value_enum)]
        output: Option<OutputFormat>,

        /// Stop at the first trip that cannot be resolved
        #[arg(long)]
        strict: bool,
    },

    /// Compute the time between each trip's end and the next trip's start
    Gaps {
        /// JSON trip document; reads stdin when omitted or "-"
        input: Option<PathBuf>,

        #[command(flatten)]
        calculator: CalculatorArgs,

        /// Output format
        #[arg(short, long, value_enum)]
        output: Option<OutputFormat>,

        /// Stop at the first gap that cannot be resolved
        #[arg(long)]
        strict: bool,
    },

    /// List trip endpoints that fall in a repeated (fall-back) hour
    Ambiguous {
        /// JSON trip document; reads stdin when omitted or "-"
        input: Option<PathBuf>,

        #[command(flatten)]
        calculator: CalculatorArgs,
    },

    /// Resolve one civil timestamp to UTC and other zones
    Resolve {
        /// Timestamp in the configured format
        timestamp: String,

        #[command(flatten)]
        calculator: CalculatorArgs,

        /// Read an ambiguous time as the second pass through the repeated hour
        #[arg(long)]
        second: bool,

        /// Also show the instant in this zone (repeatable)
        #[arg(long = "to", value_name = "ZONE")]
        to: Vec<String>,
    },

    /// Write a default configuration file
    InitConfig {
        /// Destination (default: XDG config dir)
        path: Option<PathBuf>,
    },
}

impl CalculatorArgs {
    /// Apply the flags that were given on top of `config`
    pub fn apply(&self, config: &mut Config) {
        if let Some(zone) = &self.zone {
            config.calculator.zone = zone.clone();
        }
        if let Some(format) = &self.format {
            config.calculator.timestamp_format = format.clone();
        }
    }
}
