//! IANA time zone lookup.

use chrono_tz::Tz;

use crate::error::{ElapsedError, Result};

/// Parse an IANA zone identifier such as `America/New_York`.
///
/// Rules come from the compiled zone database, so offsets and DST transitions
/// are looked up for each timestamp's own date rather than today's rule.
pub fn parse_zone(id: &str) -> Result<Tz> {
    id.trim()
        .parse::<Tz>()
        .map_err(|_| ElapsedError::InvalidZone(id.to_string()))
}
