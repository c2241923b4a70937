//! Per-trip duration records, gaps between trips, and small run summaries.

use serde::Serialize;

use crate::error::Result;
use crate::input::TripRecord;

/// Outcome for one input trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DurationRecord {
    pub index: usize,
    pub start: String,
    pub end: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DurationRecord {
    pub fn new(index: usize, trip: &TripRecord, outcome: &Result<u64>) -> Self {
        let (seconds, error) = split(outcome);
        Self {
            index,
            start: trip.start.clone(),
            end: trip.end.clone(),
            seconds,
            error,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Totals over the trips that resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DurationSummary {
    pub trips: usize,
    pub failed: usize,
    pub total_seconds: u64,
    pub shortest: Option<u64>,
    pub longest: Option<u64>,
    /// Average trip length; `None` when no trip resolved
    pub mean_seconds: Option<f64>,
}

impl DurationSummary {
    pub fn from_records(records: &[DurationRecord]) -> Self {
        let durations: Vec<u64> = records.iter().filter_map(|r| r.seconds).collect();
        Self {
            trips: records.len(),
            failed: records.len() - durations.len(),
            total_seconds: durations.iter().sum(),
            shortest: durations.iter().copied().min(),
            longest: durations.iter().copied().max(),
            mean_seconds: mean(&durations),
        }
    }
}

/// Time docked between trip `index - 1` ending and trip `index` starting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GapRecord {
    /// Index of the later trip
    pub index: usize,
    pub previous_end: String,
    pub next_start: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Totals over the gaps that resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GapSummary {
    pub gaps: usize,
    pub failed: usize,
    pub shortest: Option<u64>,
    pub longest: Option<u64>,
    pub mean_seconds: Option<f64>,
}

impl GapSummary {
    pub fn from_records(records: &[GapRecord]) -> Self {
        let gaps: Vec<u64> = records.iter().filter_map(|r| r.seconds).collect();
        Self {
            gaps: records.len(),
            failed: records.len() - gaps.len(),
            shortest: gaps.iter().copied().min(),
            longest: gaps.iter().copied().max(),
            mean_seconds: mean(&gaps),
        }
    }
}

/// Pair every trip with its outcome, preserving input order.
pub fn build_records(trips: &[TripRecord], outcomes: &[Result<u64>]) -> Vec<DurationRecord> {
    trips
        .iter()
        .zip(outcomes)
        .enumerate()
        .map(|(index, (trip, outcome))| DurationRecord::new(index, trip, outcome))
        .collect()
}

/// Pair every adjacent pair of trips with its gap outcome.
pub fn build_gap_records(trips: &[TripRecord], outcomes: &[Result<u64>]) -> Vec<GapRecord> {
    trips
        .windows(2)
        .zip(outcomes)
        .enumerate()
        .map(|(i, (pair, outcome))| {
            let (seconds, error) = split(outcome);
            GapRecord {
                index: i + 1,
                previous_end: pair[0].end.clone(),
                next_start: pair[1].start.clone(),
                seconds,
                error,
            }
        })
        .collect()
}

fn split(outcome: &Result<u64>) -> (Option<u64>, Option<String>) {
    match outcome {
        Ok(seconds) => (Some(*seconds), None),
        Err(e) => (None, Some(e.to_string())),
    }
}

fn mean(values: &[u64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<u64>() as f64 / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ElapsedError;

    #[test]
    fn summary_skips_failed_records() {
        let trips = vec![
            TripRecord::new("a", "b"),
            TripRecord::new("c", "d"),
            TripRecord::new("e", "f"),
        ];
        let outcomes: Vec<Result<u64>> = vec![Ok(181), Err(ElapsedError::InvalidZone("x".into())), Ok(7622)];
        let records = build_records(&trips, &outcomes);
        let summary = DurationSummary::from_records(&records);

        assert_eq!(records[1].error.as_deref(), Some("Unknown time zone 'x'"));
        assert_eq!(summary.trips, 3);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total_seconds, 7803);
        assert_eq!(summary.shortest, Some(181));
        assert_eq!(summary.longest, Some(7622));
        assert_eq!(summary.mean_seconds, Some(3901.5));
    }

    #[test]
    fn empty_summary_has_no_mean() {
        let summary = DurationSummary::from_records(&[]);
        assert_eq!(summary.trips, 0);
        assert_eq!(summary.mean_seconds, None);
    }

    #[test]
    fn gap_records_point_at_the_later_trip() {
        let trips = vec![
            TripRecord::new("a", "b"),
            TripRecord::new("c", "d"),
            TripRecord::new("e", "f"),
        ];
        let outcomes: Vec<Result<u64>> = vec![Ok(991), Ok(9)];
        let records = build_gap_records(&trips, &outcomes);

        assert_eq!(records.len(), 2);
        assert_eq!((records[0].index, records[0].previous_end.as_str(), records[0].next_start.as_str()), (1, "b", "c"));
        assert_eq!(records[1].index, 2);

        let summary = GapSummary::from_records(&records);
        assert_eq!(summary.gaps, 2);
        assert_eq!(summary.mean_seconds, Some(500.0));
    }
}
