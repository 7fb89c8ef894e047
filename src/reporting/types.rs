//! Result types produced by the aggregation engine.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::types::{Pollutant, Station};

/// Which partition a bucket report was computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketKind {
    DailyAverage,
    DailyMedian,
    HourlyAverage,
    MonthlyAverage,
}

impl BucketKind {
    pub fn title(self) -> &'static str {
        match self {
            BucketKind::DailyAverage => "daily average",
            BucketKind::DailyMedian => "daily median",
            BucketKind::HourlyAverage => "hourly average",
            BucketKind::MonthlyAverage => "monthly average",
        }
    }
}

/// One statistic per bucket, labelled with the series it came from.
#[derive(Debug, Clone, Serialize)]
pub struct BucketReport {
    pub station: Station,
    pub pollutant: Pollutant,
    pub kind: BucketKind,
    pub values: Vec<f64>,
}

/// The highest reading of a single day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeakHour {
    pub date: NaiveDate,
    /// Hour-ending label, e.g. `14:00:00`.
    pub time: String,
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

/// Outcome of a peak lookup. A date without usable readings is a reportable
/// result rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PeakOutcome {
    Peak(PeakHour),
    NoDataForDate(NaiveDate),
}
