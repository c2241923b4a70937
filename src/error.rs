//! Error types for elapsed-time computation.

use chrono::NaiveDateTime;

/// Errors raised while resolving civil timestamps and computing durations.
///
/// `InvalidZone` is fatal to a whole computation. Every other variant is
/// reported against the single record that produced it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ElapsedError {
    #[error("Unknown time zone '{0}'")]
    InvalidZone(String),

    #[error("Failed to parse '{input}' with format '{format}': {source}")]
    ParseFailure {
        input: String,
        format: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Trip ends {seconds}s before it starts ({start} -> {end}) even after disambiguation")]
    NegativeDuration { start: String, end: String, seconds: i64 },

    #[error("Trip starts before the previous one ends ({previous_end} -> {next_start}, {seconds}s)")]
    OverlappingTrips {
        previous_end: String,
        next_start: String,
        seconds: i64,
    },

    #[error("Timestamp is in zone {found}, expected {expected}")]
    ZoneMismatch { expected: String, found: String },

    #[error("Local time {local} does not exist in {zone}")]
    NonexistentTime { local: NaiveDateTime, zone: String },
}

/// Result alias used across the library.
pub type Result<T> = std::result::Result<T, ElapsedError>;
