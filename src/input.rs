//! Trip input documents.
//!
//! Trips arrive as a JSON array. Each element is either a `["start", "end"]`
//! pair or an object with `start` and `end` fields (other fields are ignored):
//!
//! ```json
//! [
//!   ["2017-10-01 15:23:25", "2017-10-01 15:26:26"],
//!   {"start": "2017-11-05 01:56:50", "end": "2017-11-05 01:01:04", "bike": "W20529"}
//! ]
//! ```
//!
//! Timestamps stay strings here; they are parsed per record by the calculator
//! so that one malformed trip does not reject the whole document.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// One trip as raw timestamp strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRecord {
    pub start: String,
    pub end: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTrip {
    Pair(String, String),
    Object { start: String, end: String },
}

impl From<RawTrip> for TripRecord {
    fn from(raw: RawTrip) -> Self {
        match raw {
            RawTrip::Pair(start, end) | RawTrip::Object { start, end } => Self { start, end },
        }
    }
}

impl TripRecord {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn as_pair(&self) -> (&str, &str) {
        (&self.start, &self.end)
    }
}

/// Parse a trip document. Blank input is an empty trip list.
pub fn parse_trips(json: &str) -> Result<Vec<TripRecord>> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    let raw: Vec<RawTrip> = serde_json::from_str(json).context("Trip document must be a JSON array of trips")?;
    Ok(raw.into_iter().map(TripRecord::from).collect())
}

/// Read and parse a trip document from any reader (e.g. stdin).
pub fn read_trips<R: Read>(mut reader: R) -> Result<Vec<TripRecord>> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .context("Failed to read trip input")?;
    parse_trips(&content)
}

/// Load a trip document from a file.
pub fn load_trip_file<P: AsRef<Path>>(path: P) -> Result<Vec<TripRecord>> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read trip file: {}", path.as_ref().display()))?;
    parse_trips(&content).with_context(|| format!("Failed to parse trip file: {}", path.as_ref().display()))
}
