//! Date and time utility functions
//!
//! Parsing and formatting helpers for naive (zone-less) civil timestamps.

use chrono::format::{Fixed, Item, Numeric, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt::Write;

/// Default format for trip timestamps, e.g. `2017-10-01 15:23:25`
pub const CIVIL_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// ISO 8601 without offset, e.g. `2017-10-01T15:23:25`
pub const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse a civil timestamp with a strftime-style format.
///
/// A date-only format (`%Y-%m-%d`, `%m/%d/%Y`, ...) is accepted and yields
/// midnight of that day. A format with any time field must parse as a full
/// date-time; its time is never dropped.
///
/// # Arguments
/// * `input` - Timestamp string, e.g. `2017-02-03 00:00:01`
/// * `format` - strftime-style format, e.g. `%Y-%m-%d %H:%M:%S`
pub fn parse_naive(input: &str, format: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    let input = input.trim();
    match NaiveDateTime::parse_from_str(input, format) {
        Ok(dt) => Ok(dt),
        Err(err) if has_time_fields(format) => Err(err),
        Err(err) => NaiveDate::parse_from_str(input, format)
            .map(|d| d.and_time(NaiveTime::MIN))
            .map_err(|_| err),
    }
}

/// True when `format` carries any time-of-day field (`%H`, `%I`, `%p`, `%T`, ...).
pub fn has_time_fields(format: &str) -> bool {
    StrftimeItems::new(format).any(|item| {
        matches!(
            item,
            Item::Numeric(
                Numeric::Hour
                    | Numeric::Hour12
                    | Numeric::Minute
                    | Numeric::Second
                    | Numeric::Nanosecond
                    | Numeric::Timestamp,
                _
            ) | Item::Fixed(
                Fixed::UpperAmPm
                    | Fixed::LowerAmPm
                    | Fixed::Nanosecond
                    | Fixed::Nanosecond3
                    | Fixed::Nanosecond6
                    | Fixed::Nanosecond9
                    | Fixed::RFC2822
                    | Fixed::RFC3339
            )
        )
    })
}

/// Format a naive timestamp as `YYYY-MM-DDTHH:MM:SS`
pub fn format_iso(dt: NaiveDateTime) -> String {
    dt.format(ISO_FORMAT).to_string()
}

/// Check that `format` is a usable timestamp format.
///
/// The format must only contain known specifiers, and a reference timestamp
/// rendered with it must parse back to a value that renders identically, so
/// no field the format shows is lost.
pub fn is_valid_format(format: &str) -> bool {
    if format.trim().is_empty() {
        return false;
    }
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return false;
    }

    let reference = NaiveDate::from_ymd_opt(2017, 10, 1).and_then(|d| d.and_hms_opt(15, 23, 25));
    let Some(reference) = reference else {
        return false;
    };

    let mut rendered = String::new();
    if write!(rendered, "{}", reference.format(format)).is_err() {
        return false;
    }
    match parse_naive(&rendered, format) {
        Ok(parsed) => parsed.format(format).to_string() == rendered,
        Err(_) => false,
    }
}
