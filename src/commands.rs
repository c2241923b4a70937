//! Command implementations behind the CLI.
//!
//! Each runner writes to a caller-supplied writer so it can be exercised
//! without a terminal.

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::civil::{CivilTimestamp, Occurrence};
use crate::config::{CalculatorConfig, OutputFormat};
use crate::constants::{ERROR_GAP_FAILED, ERROR_RECORD_FAILED, ERROR_STRICT_ABORT, NO_AMBIGUOUS_ENDPOINTS};
use crate::elapsed::{ElapsedCalculator, Endpoint, Event};
use crate::input::{self, TripRecord};
use crate::report::{build_gap_records, build_records, DurationRecord, DurationSummary, GapRecord, GapSummary};
use crate::zone::parse_zone;

/// Load trips from a file, or from stdin when `path` is `None` or `-`.
pub fn read_input(path: Option<&Path>) -> Result<Vec<TripRecord>> {
    match path {
        Some(p) if p != Path::new("-") => input::load_trip_file(p),
        _ => input::read_trips(std::io::stdin().lock()),
    }
}

#[derive(Serialize)]
struct DurationsDocument<'a> {
    zone: &'a str,
    records: &'a [DurationRecord],
    summary: &'a DurationSummary,
}

/// Compute and print durations for `trips`.
///
/// In strict mode the first failed trip aborts the run with an error and
/// nothing is printed.
pub fn run_durations<W: Write>(
    trips: &[TripRecord],
    settings: &CalculatorConfig,
    output: OutputFormat,
    out: &mut W,
) -> Result<DurationSummary> {
    let calculator = ElapsedCalculator::new(&settings.zone)?;
    let pairs: Vec<(&str, &str)> = trips.iter().map(TripRecord::as_pair).collect();
    let outcomes = calculator.durations_from_strings(&pairs, &settings.timestamp_format);
    let records = build_records(trips, &outcomes);

    if settings.strict {
        if let Some(failed) = records.iter().find(|r| !r.is_ok()) {
            anyhow::bail!(
                "{}: trip #{} ({} -> {}): {}",
                ERROR_STRICT_ABORT,
                failed.index,
                failed.start,
                failed.end,
                failed.error.as_deref().unwrap_or_default()
            );
        }
    }

    let summary = DurationSummary::from_records(&records);
    info!(
        "Resolved {} of {} trips in {}",
        summary.trips - summary.failed,
        summary.trips,
        settings.zone
    );

    match output {
        OutputFormat::Text => write_text(&records, &summary, out)?,
        OutputFormat::Json => {
            let document = DurationsDocument {
                zone: &settings.zone,
                records: &records,
                summary: &summary,
            };
            serde_json::to_writer_pretty(&mut *out, &document).context("Failed to write JSON output")?;
            writeln!(out)?;
        }
    }

    Ok(summary)
}

fn write_text<W: Write>(records: &[DurationRecord], summary: &DurationSummary, out: &mut W) -> Result<()> {
    for record in records {
        match (record.seconds, &record.error) {
            (Some(seconds), _) => writeln!(
                out,
                "{:>5}  {} -> {}  {}s",
                record.index, record.start, record.end, seconds
            )?,
            (None, error) => writeln!(
                out,
                "{:>5}  {} -> {}  {}: {}",
                record.index,
                record.start,
                record.end,
                ERROR_RECORD_FAILED,
                error.as_deref().unwrap_or_default()
            )?,
        }
    }

    writeln!(
        out,
        "trips: {}  failed: {}  total: {}s  shortest: {}  longest: {}  mean: {}",
        summary.trips,
        summary.failed,
        summary.total_seconds,
        show_seconds(summary.shortest),
        show_seconds(summary.longest),
        show_mean(summary.mean_seconds)
    )?;
    Ok(())
}

fn show_seconds(value: Option<u64>) -> String {
    value.map(|s| format!("{}s", s)).unwrap_or_else(|| "-".to_string())
}

fn show_mean(value: Option<f64>) -> String {
    value.map(|s| format!("{:.1}s", s)).unwrap_or_else(|| "-".to_string())
}

#[derive(Serialize)]
struct GapsDocument<'a> {
    zone: &'a str,
    gaps: &'a [GapRecord],
    summary: &'a GapSummary,
}

/// Compute and print the time between consecutive trips.
///
/// Each line is the gap before trip `index`. In strict mode the first failed
/// gap aborts the run and nothing is printed.
pub fn run_gaps<W: Write>(
    trips: &[TripRecord],
    settings: &CalculatorConfig,
    output: OutputFormat,
    out: &mut W,
) -> Result<GapSummary> {
    let calculator = ElapsedCalculator::new(&settings.zone)?;
    let pairs: Vec<(&str, &str)> = trips.iter().map(TripRecord::as_pair).collect();
    let outcomes = calculator.gaps_from_strings(&pairs, &settings.timestamp_format);
    let records = build_gap_records(trips, &outcomes);

    if settings.strict {
        if let Some(failed) = records.iter().find(|r| r.error.is_some()) {
            anyhow::bail!(
                "{}: gap before trip #{} ({} -> {}): {}",
                ERROR_STRICT_ABORT,
                failed.index,
                failed.previous_end,
                failed.next_start,
                failed.error.as_deref().unwrap_or_default()
            );
        }
    }

    let summary = GapSummary::from_records(&records);
    info!("Resolved {} of {} gaps in {}", summary.gaps - summary.failed, summary.gaps, settings.zone);

    match output {
        OutputFormat::Text => {
            for record in &records {
                let outcome = match (record.seconds, &record.error) {
                    (Some(seconds), _) => format!("{}s", seconds),
                    (None, error) => format!("{}: {}", ERROR_GAP_FAILED, error.as_deref().unwrap_or_default()),
                };
                writeln!(
                    out,
                    "{:>5}  {} -> {}  {}",
                    record.index, record.previous_end, record.next_start, outcome
                )?;
            }
            writeln!(
                out,
                "gaps: {}  failed: {}  shortest: {}  longest: {}  mean: {}",
                summary.gaps,
                summary.failed,
                show_seconds(summary.shortest),
                show_seconds(summary.longest),
                show_mean(summary.mean_seconds)
            )?;
        }
        OutputFormat::Json => {
            let document = GapsDocument {
                zone: &settings.zone,
                gaps: &records,
                summary: &summary,
            };
            serde_json::to_writer_pretty(&mut *out, &document).context("Failed to write JSON output")?;
            writeln!(out)?;
        }
    }

    Ok(summary)
}

/// Print every trip endpoint that falls in a repeated hour, with both readings.
///
/// Trips that fail to parse are skipped with a warning. Returns the number of
/// ambiguous endpoints found.
pub fn run_ambiguous<W: Write>(trips: &[TripRecord], settings: &CalculatorConfig, out: &mut W) -> Result<usize> {
    let calculator = ElapsedCalculator::new(&settings.zone)?;

    // Keep original indices so output lines up with the input document.
    let mut indices = Vec::new();
    let mut events: Vec<Event> = Vec::new();
    for (index, trip) in trips.iter().enumerate() {
        match calculator.parse_event(&trip.start, &trip.end, &settings.timestamp_format) {
            Ok(event) => {
                indices.push(index);
                events.push(event);
            }
            Err(e) => log::warn!("Skipping trip #{}: {}", index, e),
        }
    }

    let found = calculator.find_ambiguous(&events);
    if found.is_empty() {
        writeln!(out, "{}", NO_AMBIGUOUS_ENDPOINTS)?;
        return Ok(0);
    }

    for hit in &found {
        let side = match hit.endpoint {
            Endpoint::Start => "start",
            Endpoint::End => "end",
        };
        let first = hit.timestamp.with_occurrence(Occurrence::First).resolve()?;
        let second = hit.timestamp.enfold().resolve()?;
        writeln!(
            out,
            "{:>5}  ambiguous {:<5} {}  first: {}  second: {}",
            indices[hit.index],
            side,
            hit.timestamp,
            first.to_rfc3339(),
            second.to_rfc3339()
        )?;
    }
    Ok(found.len())
}

/// Print the UTC instant of one civil timestamp and its reading in `targets`.
pub fn run_resolve<W: Write>(
    timestamp: &str,
    settings: &CalculatorConfig,
    second: bool,
    targets: &[String],
    out: &mut W,
) -> Result<()> {
    let zone = parse_zone(&settings.zone)?;
    let mut civil = CivilTimestamp::parse(timestamp, &settings.timestamp_format, zone)?;
    if second {
        civil = civil.enfold();
    }

    let utc = civil.resolve()?;
    writeln!(out, "local:     {}", civil)?;
    writeln!(out, "ambiguous: {}", if civil.is_ambiguous() { "yes" } else { "no" })?;
    writeln!(out, "unix:      {}", utc.timestamp())?;
    writeln!(out, "UTC:       {}", utc.to_rfc3339())?;

    for target in targets {
        let tz = parse_zone(target)?;
        writeln!(out, "{}: {}", tz.name(), civil.resolve_in(tz)?.to_rfc3339())?;
    }
    Ok(())
}
