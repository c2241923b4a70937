//! Elapsed-time calculator.
//!
//! Turns (start, end) civil timestamps into true elapsed seconds. Both
//! endpoints are resolved to absolute instants before subtracting, so a trip
//! that crosses a DST transition gets its real length rather than the
//! difference between two clock readings.
//!
//! # Fall-back handling
//!
//! When the end instant comes out earlier than the start instant and the end's
//! local time lies in a repeated hour, the end is re-read as the second pass
//! through that hour (see [`CivilTimestamp::enfold`]). A span that is still
//! negative afterwards is a data error and is reported, never clamped.
//!
//! # Known limitation
//!
//! Local times alone cannot tell which pass through a repeated hour they were
//! recorded on. A trip with exactly one endpoint inside the repeated hour that
//! does not come out negative is computed on the first pass and may be off by
//! up to one hour. Callers who know the correct pass can set it on the
//! endpoint with [`CivilTimestamp::with_occurrence`]; the calculator honors
//! explicit markers.
//!
//! # Gaps between trips
//!
//! [`ElapsedCalculator::gaps`] measures how long the vehicle sat docked: the
//! start of each trip minus the end of the trip before it. Ends are read the
//! same way [`ElapsedCalculator::duration`] reads them, and a next start in a
//! repeated hour that would come out before the previous end is re-read as the
//! second pass.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use log::{debug, warn};

use crate::civil::{CivilTimestamp, Occurrence};
use crate::error::{ElapsedError, Result};
use crate::zone::parse_zone;

/// A real-world interval recorded as two civil timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub start: CivilTimestamp,
    pub end: CivilTimestamp,
}

impl Event {
    pub fn new(start: CivilTimestamp, end: CivilTimestamp) -> Self {
        Self { start, end }
    }
}

/// Which side of an event an endpoint is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

/// An event endpoint whose local time happens twice in its zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousEndpoint {
    /// Position of the event in the input.
    pub index: usize,
    pub endpoint: Endpoint,
    pub timestamp: CivilTimestamp,
}

/// Computes elapsed durations for events recorded in one zone.
#[derive(Debug, Clone, Copy)]
pub struct ElapsedCalculator {
    zone: Tz,
}

impl ElapsedCalculator {
    /// Create a calculator for an IANA zone identifier.
    pub fn new(zone: &str) -> Result<Self> {
        Ok(Self::with_zone(parse_zone(zone)?))
    }

    pub fn with_zone(zone: Tz) -> Self {
        Self { zone }
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    /// Elapsed whole seconds between an event's start and end.
    pub fn duration(&self, event: &Event) -> Result<u64> {
        let (start, end, end_reading) = self.resolve_event(event)?;

        let seconds = (end - start).num_seconds();
        if seconds < 0 {
            warn!("Negative duration {}s for {} -> {}", seconds, event.start, end_reading);
            return Err(ElapsedError::NegativeDuration {
                start: event.start.to_string(),
                end: end_reading.to_string(),
                seconds,
            });
        }
        Ok(seconds as u64)
    }

    /// Start and end instants of an event, plus the end reading that produced
    /// the end instant (refolded when the first pass came out too early).
    fn resolve_event(&self, event: &Event) -> Result<(DateTime<Utc>, DateTime<Utc>, CivilTimestamp)> {
        self.check_zone(&event.start)?;
        self.check_zone(&event.end)?;

        let start = event.start.resolve()?;
        let (end, reading) = refold_if_before(start, event.end)?;
        Ok((start, end, reading))
    }

    /// Seconds between the end of `previous` and the start of `next`.
    pub fn gap(&self, previous: &Event, next: &Event) -> Result<u64> {
        let (_, previous_end, end_reading) = self.resolve_event(previous)?;
        self.check_zone(&next.start)?;
        let (next_start, start_reading) = refold_if_before(previous_end, next.start)?;

        let seconds = (next_start - previous_end).num_seconds();
        if seconds < 0 {
            warn!("Trips overlap by {}s: {} -> {}", -seconds, end_reading, start_reading);
            return Err(ElapsedError::OverlappingTrips {
                previous_end: end_reading.to_string(),
                next_start: start_reading.to_string(),
                seconds,
            });
        }
        Ok(seconds as u64)
    }

    /// Gaps between consecutive events, one per adjacent pair.
    ///
    /// Fewer than two events yield no gaps.
    pub fn gaps(&self, events: &[Event]) -> Vec<Result<u64>> {
        events.windows(2).map(|pair| self.gap(&pair[0], &pair[1])).collect()
    }

    /// Parse `(start, end)` string pairs with `format`, then compute gaps.
    ///
    /// A trip that fails to parse makes both gaps next to it fail.
    pub fn gaps_from_strings<S: AsRef<str>>(&self, pairs: &[(S, S)], format: &str) -> Vec<Result<u64>> {
        let events: Vec<Result<Event>> = pairs
            .iter()
            .map(|(start, end)| self.parse_event(start.as_ref(), end.as_ref(), format))
            .collect();

        events
            .windows(2)
            .map(|pair| match (&pair[0], &pair[1]) {
                (Ok(previous), Ok(next)) => self.gap(previous, next),
                (Err(e), _) | (_, Err(e)) => Err(e.clone()),
            })
            .collect()
    }

    /// Durations for every event, in input order, one result per event.
    pub fn durations(&self, events: &[Event]) -> Vec<Result<u64>> {
        events.iter().map(|event| self.duration(event)).collect()
    }

    /// Parse `(start, end)` string pairs with `format`, then compute durations.
    ///
    /// A pair that fails to parse yields a `ParseFailure` in its own slot.
    pub fn durations_from_strings<S: AsRef<str>>(&self, pairs: &[(S, S)], format: &str) -> Vec<Result<u64>> {
        pairs
            .iter()
            .map(|(start, end)| {
                let event = self.parse_event(start.as_ref(), end.as_ref(), format)?;
                self.duration(&event)
            })
            .collect()
    }

    /// Parse a `(start, end)` string pair into an event in this zone.
    pub fn parse_event(&self, start: &str, end: &str, format: &str) -> Result<Event> {
        Ok(Event::new(
            CivilTimestamp::parse(start, format, self.zone)?,
            CivilTimestamp::parse(end, format, self.zone)?,
        ))
    }

    /// Every endpoint whose local time falls in a repeated hour.
    pub fn find_ambiguous(&self, events: &[Event]) -> Vec<AmbiguousEndpoint> {
        let mut found = Vec::new();
        for (index, event) in events.iter().enumerate() {
            for (endpoint, timestamp) in [(Endpoint::Start, event.start), (Endpoint::End, event.end)] {
                if timestamp.is_ambiguous() {
                    found.push(AmbiguousEndpoint {
                        index,
                        endpoint,
                        timestamp,
                    });
                }
            }
        }
        found
    }

    fn check_zone(&self, timestamp: &CivilTimestamp) -> Result<()> {
        if timestamp.zone() != self.zone {
            return Err(ElapsedError::ZoneMismatch {
                expected: self.zone.name().to_string(),
                found: timestamp.zone().name().to_string(),
            });
        }
        Ok(())
    }
}

/// Resolve `later`, re-reading it as the second pass through a repeated hour
/// when its first pass lands before `earlier`.
fn refold_if_before(earlier: DateTime<Utc>, later: CivilTimestamp) -> Result<(DateTime<Utc>, CivilTimestamp)> {
    let instant = later.resolve()?;
    if instant < earlier && later.is_ambiguous() && later.occurrence() == Occurrence::First {
        let refolded = later.enfold();
        debug!("{} precedes {}, retrying as {}", later, earlier, refolded);
        return Ok((refolded.resolve()?, refolded));
    }
    Ok((instant, later))
}

/// Compute elapsed seconds for `events` recorded in `zone`.
///
/// An unknown zone fails the whole call. Otherwise the output has one entry
/// per event, in input order, each either a duration or that event's error.
pub fn compute_durations(events: &[Event], zone: &str) -> Result<Vec<Result<u64>>> {
    Ok(ElapsedCalculator::new(zone)?.durations(events))
}

/// Like [`compute_durations`], for `(start, end)` strings in `format`.
pub fn compute_durations_from_strings<S: AsRef<str>>(
    pairs: &[(S, S)],
    format: &str,
    zone: &str,
) -> Result<Vec<Result<u64>>> {
    Ok(ElapsedCalculator::new(zone)?.durations_from_strings(pairs, format))
}

/// Gaps between consecutive `events` recorded in `zone`.
pub fn compute_gaps(events: &[Event], zone: &str) -> Result<Vec<Result<u64>>> {
    Ok(ElapsedCalculator::new(zone)?.gaps(events))
}
