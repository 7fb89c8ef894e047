//! Console rendering of reporting and monitoring results.

use anyhow::Result;
use serde::Serialize;
use std::io::{self, Write};
use tracing::debug;

use crate::monitoring::{Extreme, LiveOutcome};
use crate::reporting::types::{BucketKind, BucketReport, PeakOutcome};
use crate::types::{Pollutant, Station};

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Logs a result as JSON at debug level.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    debug!("{}", serde_json::to_string(value)?);
    Ok(())
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        "no data".to_string()
    } else {
        format!("{value:.2}")
    }
}

fn bucket_label(kind: BucketKind, index: usize) -> String {
    match kind {
        BucketKind::DailyAverage | BucketKind::DailyMedian => format!("Day {}", index + 1),
        BucketKind::HourlyAverage => format!("{:02}:00:00", index + 1),
        BucketKind::MonthlyAverage => MONTHS
            .get(index)
            .map(|m| m.to_string())
            .unwrap_or_else(|| format!("Month {}", index + 1)),
    }
}

pub fn render_buckets<W: Write>(out: &mut W, report: &BucketReport) -> io::Result<()> {
    writeln!(
        out,
        "\n[This is the {} of {} in the {} station.]\n",
        report.kind.title(),
        report.pollutant,
        report.station
    )?;

    for (index, value) in report.values.iter().enumerate() {
        writeln!(
            out,
            "{:>12}: {}",
            bucket_label(report.kind, index),
            format_value(*value)
        )?;
    }
    Ok(())
}

pub fn render_peak<W: Write>(
    out: &mut W,
    station: Station,
    pollutant: Pollutant,
    outcome: &PeakOutcome,
) -> io::Result<()> {
    match outcome {
        PeakOutcome::Peak(peak) => writeln!(
            out,
            "\n[This is the peak level of {} in the {} station on the date {}.]\nPeak hour: {}  Value: {}\n",
            pollutant,
            station,
            peak.date,
            peak.time,
            format_value(peak.value)
        ),
        PeakOutcome::NoDataForDate(date) => writeln!(
            out,
            "No data available for the date {} at the {} station.",
            date, station
        ),
    }
}

pub fn render_missing_count<W: Write>(
    out: &mut W,
    station: Station,
    pollutant: Pollutant,
    count: usize,
) -> io::Result<()> {
    writeln!(
        out,
        "\nThe number of missing data points of {} in the {} station is: {}\n",
        pollutant, station, count
    )
}

pub fn render_fill<W: Write>(out: &mut W, replacement: f64, filled: usize) -> io::Result<()> {
    if filled == 0 {
        writeln!(out, "\nThere is no missing data left to replace.\n")
    } else {
        writeln!(
            out,
            "\nThe value {} now replaces {} missing data points.\n",
            replacement, filled
        )
    }
}

fn format_extreme(extreme: &Option<Extreme>) -> String {
    match extreme {
        Some(e) => format!(
            "{} and it occurred on {}",
            e.value,
            e.timestamp.format("%Y-%m-%d %H:%M:%S")
        ),
        None => "not available (no readings in this time frame)".to_string(),
    }
}

pub fn render_live<W: Write>(
    out: &mut W,
    station: Station,
    pollutant: Pollutant,
    outcome: &LiveOutcome,
) -> io::Result<()> {
    let (name, text) = match outcome {
        LiveOutcome::Average(avg) => ("Average", avg.to_string()),
        LiveOutcome::Median(median) => (
            "Median",
            median
                .map(|m| m.to_string())
                .unwrap_or_else(|| "not available (no readings in this time frame)".to_string()),
        ),
        LiveOutcome::Min(extreme) => ("Min", format_extreme(extreme)),
        LiveOutcome::Max(extreme) => ("Max", format_extreme(extreme)),
    };

    writeln!(
        out,
        "The {} {} concentration at {} is {}",
        name,
        pollutant.species_code(),
        station,
        text
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporting::types::PeakHour;
    use chrono::NaiveDate;

    fn rendered<F>(render: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        render(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&LiveOutcome::Median(None)).unwrap();
    }

    #[test]
    fn test_render_monthly_buckets() {
        let report = BucketReport {
            station: Station::NKensington,
            pollutant: Pollutant::Pm25,
            kind: BucketKind::MonthlyAverage,
            values: vec![1.234, f64::NAN],
        };
        let text = rendered(|out| render_buckets(out, &report));

        assert!(text.contains("monthly average of pm25 in the N Kensington station"));
        assert!(text.contains("January: 1.23"));
        assert!(text.contains("February: no data"));
    }

    #[test]
    fn test_render_hourly_labels() {
        assert_eq!(bucket_label(BucketKind::HourlyAverage, 0), "01:00:00");
        assert_eq!(bucket_label(BucketKind::HourlyAverage, 23), "24:00:00");
        assert_eq!(bucket_label(BucketKind::DailyMedian, 364), "Day 365");
    }

    #[test]
    fn test_render_peak_and_no_data() {
        let date = NaiveDate::from_ymd_opt(2021, 4, 2).unwrap();
        let peak = PeakOutcome::Peak(PeakHour {
            date,
            time: "09:00:00".to_string(),
            timestamp: date.and_hms_opt(8, 0, 0).unwrap(),
            value: 41.5,
        });

        let text = rendered(|out| render_peak(out, Station::Harlington, Pollutant::Pm10, &peak));
        assert!(text.contains("Peak hour: 09:00:00  Value: 41.50"));

        let none = PeakOutcome::NoDataForDate(date);
        let text = rendered(|out| render_peak(out, Station::Harlington, Pollutant::Pm10, &none));
        assert!(text.contains("No data available for the date 2021-04-02"));
    }

    #[test]
    fn test_render_live_extreme() {
        let timestamp = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(6, 0, 0)
            .unwrap();
        let outcome = LiveOutcome::Max(Some(Extreme { value: 17.5, timestamp }));
        let text = rendered(|out| render_live(out, Station::MaryleboneRoad, Pollutant::Pm10, &outcome));
        assert_eq!(
            text,
            "The Max PM10 concentration at Marylebone Road is 17.5 and it occurred on 2024-05-01 06:00:00\n"
        );

        let text = rendered(|out| {
            render_live(out, Station::MaryleboneRoad, Pollutant::Pm10, &LiveOutcome::Min(None))
        });
        assert!(text.contains("not available"));
    }
}
