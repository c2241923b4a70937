//! Civil (wall-clock) timestamps tied to an IANA zone.
//!
//! A civil timestamp is what a dock's clock displayed: a calendar date and a
//! time of day, meaningful only together with the zone's offset rule for that
//! date. During a fall-back transition one local hour happens twice, so the
//! same reading maps to two instants. [`Occurrence`] selects between them
//! explicitly.

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::fmt;

use crate::error::{ElapsedError, Result};
use crate::utils::datetime::{self, ISO_FORMAT};

/// Which of the two instants an ambiguous local time refers to.
///
/// Ignored for local times that are not ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Occurrence {
    /// The first pass through the repeated hour (still on daylight time).
    #[default]
    First,
    /// The second pass, after clocks were set back.
    Second,
}

/// A wall-clock reading in a specific zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CivilTimestamp {
    local: NaiveDateTime,
    zone: Tz,
    occurrence: Occurrence,
}

impl CivilTimestamp {
    /// Create a timestamp on the first occurrence of `local`.
    pub fn new(local: NaiveDateTime, zone: Tz) -> Self {
        Self {
            local,
            zone,
            occurrence: Occurrence::First,
        }
    }

    /// Parse `input` with a strftime-style `format`.
    pub fn parse(input: &str, format: &str, zone: Tz) -> Result<Self> {
        let local = datetime::parse_naive(input, format).map_err(|source| ElapsedError::ParseFailure {
            input: input.to_string(),
            format: format.to_string(),
            source,
        })?;
        Ok(Self::new(local, zone))
    }

    /// Civil reading of an absolute instant in `zone`.
    ///
    /// The occurrence marker records which pass through a repeated hour the
    /// instant belongs to, so `resolve()` returns `instant` again.
    pub fn from_instant(instant: DateTime<Utc>, zone: Tz) -> Self {
        let local = instant.with_timezone(&zone).naive_local();
        let occurrence = match Self::ordered_candidates(zone, local) {
            LocalResult::Ambiguous(_, second) if second == instant => Occurrence::Second,
            _ => Occurrence::First,
        };
        Self { local, zone, occurrence }
    }

    /// Civil reading of a Unix timestamp (seconds since 1970-01-01 UTC).
    ///
    /// Returns `None` when the value is outside the representable range.
    pub fn from_unix(seconds: i64, zone: Tz) -> Option<Self> {
        DateTime::from_timestamp(seconds, 0).map(|instant| Self::from_instant(instant, zone))
    }

    pub fn local(&self) -> NaiveDateTime {
        self.local
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    pub fn occurrence(&self) -> Occurrence {
        self.occurrence
    }

    /// Same reading with an explicit occurrence marker.
    pub fn with_occurrence(self, occurrence: Occurrence) -> Self {
        Self { occurrence, ..self }
    }

    /// Same reading, pinned to the second pass through a repeated hour.
    pub fn enfold(self) -> Self {
        self.with_occurrence(Occurrence::Second)
    }

    /// True when the local time happens twice in this zone.
    pub fn is_ambiguous(&self) -> bool {
        matches!(
            Self::ordered_candidates(self.zone, self.local),
            LocalResult::Ambiguous(_, _)
        )
    }

    /// True when the local time is skipped by a spring-forward transition.
    pub fn is_nonexistent(&self) -> bool {
        matches!(Self::ordered_candidates(self.zone, self.local), LocalResult::None)
    }

    /// The instant this reading denotes, in its own zone.
    pub fn resolve_local(&self) -> Result<DateTime<Tz>> {
        match Self::ordered_candidates(self.zone, self.local) {
            LocalResult::Single(dt) => Ok(dt),
            LocalResult::Ambiguous(first, second) => Ok(match self.occurrence {
                Occurrence::First => first,
                Occurrence::Second => second,
            }),
            LocalResult::None => Err(ElapsedError::NonexistentTime {
                local: self.local,
                zone: self.zone.name().to_string(),
            }),
        }
    }

    /// The instant this reading denotes, in UTC.
    pub fn resolve(&self) -> Result<DateTime<Utc>> {
        self.resolve_local().map(|dt| dt.with_timezone(&Utc))
    }

    /// The instant this reading denotes, as shown by clocks in `target`.
    pub fn resolve_in(&self, target: Tz) -> Result<DateTime<Tz>> {
        self.resolve_local().map(|dt| dt.with_timezone(&target))
    }

    /// Candidate instants for `local`, earliest first.
    fn ordered_candidates(zone: Tz, local: NaiveDateTime) -> LocalResult<DateTime<Tz>> {
        match zone.from_local_datetime(&local) {
            LocalResult::Ambiguous(a, b) if b < a => LocalResult::Ambiguous(b, a),
            other => other,
        }
    }
}

impl fmt::Display for CivilTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.local.format(ISO_FORMAT), self.zone.name())?;
        if self.occurrence == Occurrence::Second {
            write!(f, " (second)")?;
        }
        Ok(())
    }
}
