//! tripclock - true elapsed time for trips recorded in local clock time
//!
//! Bike-share docks, loggers and many exports record when something started
//! and ended as wall-clock readings in a local zone. Subtracting two such
//! readings is wrong whenever a daylight-saving transition falls between
//! them, and during a fall-back night the same reading happens twice. This
//! library resolves each reading against the IANA zone rules for its own date
//! before subtracting.
//!
//! # Modules
//!
//! * [`civil`] - Wall-clock timestamps with an explicit occurrence marker
//! * [`elapsed`] - The elapsed-time calculator
//! * [`zone`] - IANA zone lookup
//! * [`input`] - JSON trip documents
//! * [`report`] - Per-trip records and run summary
//! * [`config`] - Application configuration management
//! * [`logger`] - Logging setup
//!
//! # Example
//!
//! ```
//! use tripclock::elapsed::compute_durations_from_strings;
//!
//! let trips = [
//!     ("2017-10-01 15:23:25", "2017-10-01 15:26:26"),
//!     ("2017-11-05 01:56:50", "2017-11-05 01:01:04"),
//! ];
//! let durations = compute_durations_from_strings(&trips, "%Y-%m-%d %H:%M:%S", "America/New_York").unwrap();
//! assert_eq!(durations[0], Ok(181));
//! assert_eq!(durations[1], Ok(254));
//! ```

/// Wall-clock timestamps tied to a zone
pub mod civil;

/// CLI argument definitions
pub mod cli;

/// Command runners used by the binary
pub mod commands;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Elapsed-time calculator
pub mod elapsed;

/// Library error type
pub mod error;

/// Trip input documents
pub mod input;

/// Logging setup for the binary
pub mod logger;

/// Per-trip duration records
pub mod report;

/// Utility functions for date/time parsing and formatting
pub mod utils;

/// IANA time zone lookup
pub mod zone;

pub use civil::{CivilTimestamp, Occurrence};
pub use elapsed::{compute_durations, compute_durations_from_strings, compute_gaps, ElapsedCalculator, Event};
pub use error::{ElapsedError, Result};
