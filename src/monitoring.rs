//! Live monitoring: reduce readings fetched over a recent time window.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt;
use tracing::{info, warn};

use crate::fetch::{HttpClient, fetch_readings};
use crate::reporting::utility::{mean, median};
use crate::types::{Pollutant, Reading, Station};

/// How far back a live query reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimeWindow {
    LastHour,
    LastDay,
    LastWeek,
    /// Fallback for unrecognized codes: today only.
    Today,
}

impl TimeWindow {
    pub const CHOICES: [TimeWindow; 3] =
        [TimeWindow::LastHour, TimeWindow::LastDay, TimeWindow::LastWeek];

    pub fn code(self) -> &'static str {
        match self {
            TimeWindow::LastHour => "1",
            TimeWindow::LastDay => "2",
            TimeWindow::LastWeek => "3",
            TimeWindow::Today => "0",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeWindow::LastHour => "Latest hour",
            TimeWindow::LastDay => "Latest day",
            TimeWindow::LastWeek => "Latest week",
            TimeWindow::Today => "Today",
        }
    }

    /// Maps a menu code to a window. Unknown codes warn and fall back to
    /// [`TimeWindow::Today`].
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "1" => TimeWindow::LastHour,
            "2" => TimeWindow::LastDay,
            "3" => TimeWindow::LastWeek,
            other => {
                warn!(code = other, "Invalid time frame selected, using the current date");
                TimeWindow::Today
            }
        }
    }

    /// Half-open `[start, end)` date range covering the window up to `now`.
    pub fn date_range(self, now: NaiveDateTime) -> (NaiveDate, NaiveDate) {
        let lookback = match self {
            TimeWindow::LastHour => Duration::hours(1),
            TimeWindow::LastDay => Duration::days(1),
            TimeWindow::LastWeek => Duration::weeks(1),
            TimeWindow::Today => Duration::zero(),
        };
        let start = (now - lookback).date();
        let end = now.date() + Duration::days(1);
        (start, end)
    }
}

/// Reducer applied to live readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Calculation {
    Average,
    Median,
    Min,
    Max,
}

impl Calculation {
    pub const ALL: [Calculation; 4] = [
        Calculation::Average,
        Calculation::Median,
        Calculation::Min,
        Calculation::Max,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Calculation::Average => "1",
            Calculation::Median => "2",
            Calculation::Min => "3",
            Calculation::Max => "4",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code.trim())
    }

    pub fn name(self) -> &'static str {
        match self {
            Calculation::Average => "Average",
            Calculation::Median => "Median",
            Calculation::Min => "Min",
            Calculation::Max => "Max",
        }
    }
}

impl fmt::Display for Calculation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A min or max reading and when it was measured.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extreme {
    pub value: f64,
    pub timestamp: NaiveDateTime,
}

/// Result of a live calculation. Empty input gives `0.0` for the average and
/// `None` for everything else.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LiveOutcome {
    Average(f64),
    Median(Option<f64>),
    Min(Option<Extreme>),
    Max(Option<Extreme>),
}

fn extreme<F>(readings: &[Reading], better: F) -> Option<Extreme>
where
    F: Fn(f64, f64) -> bool,
{
    readings
        .iter()
        .filter_map(|r| r.value.map(|v| (v, r.timestamp)))
        .fold(None, |best: Option<Extreme>, (value, timestamp)| match best {
            Some(b) if !better(value, b.value) => Some(b),
            _ => Some(Extreme { value, timestamp }),
        })
}

/// Applies `calculation` to the readings.
pub fn calculate(calculation: Calculation, readings: &[Reading]) -> LiveOutcome {
    let values: Vec<f64> = readings.iter().filter_map(|r| r.value).collect();

    match calculation {
        Calculation::Average => LiveOutcome::Average(mean(&values)),
        Calculation::Median => LiveOutcome::Median(median(&values)),
        Calculation::Min => LiveOutcome::Min(extreme(readings, |a, b| a < b)),
        Calculation::Max => LiveOutcome::Max(extreme(readings, |a, b| a > b)),
    }
}

/// Fetches readings for the window ending at `now` and reduces them.
#[tracing::instrument(skip(client, base_url), fields(station = %station, pollutant = %pollutant))]
pub fn compute_over_window<C: HttpClient>(
    client: &C,
    base_url: &str,
    station: Station,
    pollutant: Pollutant,
    window: TimeWindow,
    calculation: Calculation,
    now: NaiveDateTime,
) -> LiveOutcome {
    let (start, end) = window.date_range(now);
    let readings = fetch_readings(
        client,
        base_url,
        station.site_code(),
        pollutant.species_code(),
        Some(start),
        Some(end),
    );

    let outcome = calculate(calculation, &readings);
    info!(
        readings = readings.len(),
        %start,
        %end,
        calculation = %calculation,
        "Live calculation complete"
    );
    outcome
}
