use chrono::{Datelike, NaiveDate, NaiveDateTime};
use tracing::{info, warn};

use crate::error::{AquaError, Result};
use crate::reporting::types::{BucketKind, BucketReport, PeakHour, PeakOutcome};
use crate::reporting::utility::{nan_argmax, nan_mean, nan_median};
use crate::types::{DAYS_IN_MONTH, HOURS_PER_DAY, HOURS_PER_YEAR, Observation, Reading, Series};

/// Float column of the series with missing readings as NaN.
pub fn normalize(series: &Series) -> Vec<f64> {
    series
        .readings()
        .iter()
        .map(|r| r.value.unwrap_or(f64::NAN))
        .collect()
}

/// Mean of every consecutive 24-hour bucket. The last bucket may be shorter.
pub fn daily_average(series: &Series) -> Vec<f64> {
    let values = normalize(series);
    let average: Vec<f64> = values.chunks(HOURS_PER_DAY).map(nan_mean).collect();

    info!(
        days = average.len(),
        "This is the daily average of {} in the {} station",
        series.pollutant(),
        series.station()
    );
    average
}

/// Median of every consecutive 24-hour bucket.
pub fn daily_median(series: &Series) -> Vec<f64> {
    let values = normalize(series);
    let median: Vec<f64> = values.chunks(HOURS_PER_DAY).map(nan_median).collect();

    info!(
        days = median.len(),
        "This is the daily median of {} in the {} station",
        series.pollutant(),
        series.station()
    );
    median
}

/// Mean per hour of day: bucket `h` holds every reading at a position `p`
/// with `p % 24 == h`.
pub fn hourly_average(series: &Series) -> Vec<f64> {
    let values = normalize(series);
    let hourly: Vec<f64> = (0..HOURS_PER_DAY)
        .map(|hour| {
            let bucket: Vec<f64> = values
                .iter()
                .skip(hour)
                .step_by(HOURS_PER_DAY)
                .copied()
                .collect();
            nan_mean(&bucket)
        })
        .collect();

    info!(
        "This is the hourly average of {} in the {} station",
        series.pollutant(),
        series.station()
    );
    hourly
}

/// Splits a column into January..December runs of `days * 24` values.
/// Columns shorter than a year produce truncated or empty trailing buckets.
pub fn monthly_buckets(values: &[f64]) -> Vec<&[f64]> {
    let mut start = 0;
    DAYS_IN_MONTH
        .iter()
        .map(|days| {
            let begin = start.min(values.len());
            let end = (start + days * HOURS_PER_DAY).min(values.len());
            start += days * HOURS_PER_DAY;
            &values[begin..end]
        })
        .collect()
}

/// Mean per calendar month, assuming a January-start, non-leap year.
pub fn monthly_average(series: &Series) -> Vec<f64> {
    if !series.is_complete_year() {
        warn!(
            readings = series.len(),
            expected = HOURS_PER_YEAR,
            "Series is not a complete year; monthly buckets are truncated"
        );
    }

    let values = normalize(series);
    let monthly: Vec<f64> = monthly_buckets(&values)
        .into_iter()
        .map(nan_mean)
        .collect();

    info!(
        "This is the monthly average of {} in the {} station",
        series.pollutant(),
        series.station()
    );
    monthly
}

/// Runs one bucket aggregation and labels the result.
pub fn bucket_report(series: &Series, kind: BucketKind) -> BucketReport {
    let values = match kind {
        BucketKind::DailyAverage => daily_average(series),
        BucketKind::DailyMedian => daily_median(series),
        BucketKind::HourlyAverage => hourly_average(series),
        BucketKind::MonthlyAverage => monthly_average(series),
    };

    BucketReport {
        station: series.station(),
        pollutant: series.pollutant(),
        kind,
        values,
    }
}

/// Validates a `YYYY-MM-DD` date against the series year and `now`.
pub fn parse_report_date(input: &str, year: Option<i32>, now: NaiveDateTime) -> Result<NaiveDate> {
    let input = input.trim();
    let invalid = |reason: String| AquaError::InvalidDate {
        input: input.to_string(),
        reason,
    };

    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| invalid("expected the form yyyy-mm-dd".to_string()))?;

    if let Some(year) = year {
        if date.year() != year {
            return Err(invalid(format!("only year {year} is available")));
        }
    }

    if date.and_time(chrono::NaiveTime::MIN) > now {
        return Err(invalid("the date is in the future".to_string()));
    }

    Ok(date)
}

/// Finds the hour with the highest reading on `date`.
pub fn peak_hour_for_date(series: &Series, date: &str, now: NaiveDateTime) -> Result<PeakOutcome> {
    let date = parse_report_date(date, series.year(), now)?;

    let day: Vec<&Reading> = series
        .readings()
        .iter()
        .filter(|r| r.timestamp.date() == date)
        .collect();
    let values: Vec<f64> = day.iter().map(|r| r.value.unwrap_or(f64::NAN)).collect();

    let Some(index) = nan_argmax(&values) else {
        info!(
            %date,
            "No data available for the date at the {} station",
            series.station()
        );
        return Ok(PeakOutcome::NoDataForDate(date));
    };

    let reading = day[index];
    let peak = PeakHour {
        date,
        time: reading.hour_label(),
        timestamp: reading.timestamp,
        value: values[index],
    };

    info!(
        %date,
        time = %peak.time,
        value = peak.value,
        "This is the peak level of {} in the {} station",
        series.pollutant(),
        series.station()
    );
    Ok(PeakOutcome::Peak(peak))
}

/// Number of missing observations. Works on raw readings and on normalized
/// columns alike, so the count does not depend on normalization.
pub fn count_missing<T: Observation>(values: &[T]) -> usize {
    values.iter().filter(|v| v.is_missing()).count()
}

/// Returns a copy of the series with every missing reading replaced.
pub fn fill_missing(series: &Series, replacement: f64) -> Result<Series> {
    if !replacement.is_finite() {
        return Err(AquaError::NonNumericInput {
            index: 0,
            value: replacement.to_string(),
        });
    }

    let filled = count_missing(series.readings());
    let readings = series
        .readings()
        .iter()
        .map(|r| Reading::new(r.timestamp, Some(r.value.unwrap_or(replacement))))
        .collect();

    info!(
        filled,
        replacement,
        "Missing data of {} in the {} station replaced",
        series.pollutant(),
        series.station()
    );
    Ok(Series::new(series.station(), series.pollutant(), readings))
}

/// Parses interactive input for `fill_missing`.
pub fn parse_replacement(input: &str) -> Result<f64> {
    let input = input.trim();
    input
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| AquaError::NonNumericInput {
            index: 0,
            value: input.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Pollutant, Station};
    use chrono::Duration;

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn series_of(values: &[Option<f64>]) -> Series {
        let readings = values
            .iter()
            .enumerate()
            .map(|(i, v)| Reading::new(start() + Duration::hours(i as i64), *v))
            .collect();
        Series::new(Station::Harlington, Pollutant::NitricOxide, readings)
    }

    fn full_year() -> Series {
        let values: Vec<Option<f64>> = (0..HOURS_PER_YEAR)
            .map(|i| if i % 7 == 0 { None } else { Some((i % 24) as f64) })
            .collect();
        series_of(&values)
    }

    #[test]
    fn test_bucket_counts_for_full_year() {
        let series = full_year();
        assert_eq!(daily_average(&series).len(), 365);
        assert_eq!(daily_median(&series).len(), 365);
        assert_eq!(hourly_average(&series).len(), 24);
        assert_eq!(monthly_average(&series).len(), 12);

        let values = normalize(&series);
        let buckets = monthly_buckets(&values);
        assert_eq!(buckets.len(), 12);
        assert_eq!(buckets.iter().map(|b| b.len()).sum::<usize>(), HOURS_PER_YEAR);
        assert_eq!(buckets[1].len(), 28 * 24);
    }

    #[test]
    fn test_daily_average_skips_missing() {
        let pattern = [Some(1.0), Some(2.0), Some(3.0), None, Some(5.0), Some(6.0)];
        let day: Vec<Option<f64>> = pattern.iter().cycle().take(24).copied().collect();
        let series = series_of(&day);

        let present: Vec<f64> = day.iter().flatten().copied().collect();
        let expected = present.iter().sum::<f64>() / present.len() as f64;

        let average = daily_average(&series);
        assert_eq!(average.len(), 1);
        assert!((average[0] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_all_missing_bucket_is_nan() {
        let mut values = vec![None; 24];
        values.extend(std::iter::repeat_n(Some(2.0), 24));
        let series = series_of(&values);

        let average = daily_average(&series);
        assert!(average[0].is_nan());
        assert_eq!(average[1], 2.0);

        let median = daily_median(&series);
        assert!(median[0].is_nan());
        assert_eq!(median[1], 2.0);
    }

    #[test]
    fn test_partial_last_day() {
        let values: Vec<Option<f64>> = (0..30).map(|i| Some(i as f64)).collect();
        let average = daily_average(&series_of(&values));
        assert_eq!(average.len(), 2);
        assert_eq!(average[1], (24..30).sum::<i32>() as f64 / 6.0);
    }

    #[test]
    fn test_daily_median_even_bucket() {
        let mut values: Vec<Option<f64>> = (1..=24).map(|i| Some(i as f64)).collect();
        values[0] = None;
        // 2..=24 is 23 values, median is 13
        assert_eq!(daily_median(&series_of(&values))[0], 13.0);

        let values: Vec<Option<f64>> = (1..=24).map(|i| Some(i as f64)).collect();
        assert_eq!(daily_median(&series_of(&values))[0], 12.5);
    }

    #[test]
    fn test_hourly_average_interleaves_days() {
        let values: Vec<Option<f64>> = (0..48)
            .map(|i| if i == 24 + 5 { None } else { Some((i / 24 * 10 + i % 24) as f64) })
            .collect();
        let hourly = hourly_average(&series_of(&values));

        assert_eq!(hourly.len(), 24);
        assert_eq!(hourly[0], 5.0);
        assert_eq!(hourly[5], 5.0);
        assert_eq!(hourly[23], 28.0);
    }

    #[test]
    fn test_monthly_average_degrades_on_short_series() {
        let values = vec![Some(4.0); 40 * 24];
        let monthly = monthly_average(&series_of(&values));

        assert_eq!(monthly.len(), 12);
        assert_eq!(monthly[0], 4.0);
        assert_eq!(monthly[1], 4.0);
        assert!(monthly[2..].iter().all(|m| m.is_nan()));
    }

    #[test]
    fn test_monthly_average_values() {
        let series = full_year();
        let monthly = monthly_average(&series);
        let values = normalize(&series);
        assert_eq!(monthly[0], nan_mean(&values[..31 * 24]));
        assert_eq!(monthly[11], nan_mean(&values[HOURS_PER_YEAR - 31 * 24..]));
    }

    #[test]
    fn test_aggregation_does_not_mutate_source() {
        let series = full_year();
        let before = series.clone();
        daily_average(&series);
        hourly_average(&series);
        monthly_average(&series);
        assert_eq!(series, before);
    }

    #[test]
    fn test_peak_hour_picks_first_maximum() {
        let mut values: Vec<Option<f64>> = vec![Some(1.0); 48];
        values[24 + 3] = Some(9.0);
        values[24 + 7] = Some(9.0);
        values[24 + 10] = None;
        let series = series_of(&values);

        match peak_hour_for_date(&series, "2021-01-02", now()).unwrap() {
            PeakOutcome::Peak(peak) => {
                assert_eq!(peak.value, 9.0);
                assert_eq!(peak.time, "04:00:00");
                assert_eq!(peak.date, NaiveDate::from_ymd_opt(2021, 1, 2).unwrap());
            }
            other => panic!("expected a peak, got {other:?}"),
        }
    }

    #[test]
    fn test_peak_hour_no_rows_for_date() {
        let series = series_of(&vec![Some(1.0); 24]);
        let outcome = peak_hour_for_date(&series, "2021-05-05", now()).unwrap();
        assert_eq!(
            outcome,
            PeakOutcome::NoDataForDate(NaiveDate::from_ymd_opt(2021, 5, 5).unwrap())
        );
    }

    #[test]
    fn test_peak_hour_all_missing_day() {
        let series = series_of(&vec![None; 24]);
        assert!(matches!(
            peak_hour_for_date(&series, "2021-01-01", now()).unwrap(),
            PeakOutcome::NoDataForDate(_)
        ));
    }

    #[test]
    fn test_peak_hour_rejects_invalid_dates() {
        let series = series_of(&vec![Some(1.0); 24]);
        for input in ["2021/01/01", "2021-02-30", "yesterday", "2020-01-01"] {
            assert!(
                matches!(
                    peak_hour_for_date(&series, input, now()),
                    Err(AquaError::InvalidDate { .. })
                ),
                "{input} should be rejected"
            );
        }

        let early = NaiveDate::from_ymd_opt(2021, 1, 1)
            .unwrap()
            .and_hms_opt(6, 0, 0)
            .unwrap();
        assert!(matches!(
            peak_hour_for_date(&series, "2021-01-02", early),
            Err(AquaError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_count_missing_independent_of_normalization() {
        let series = full_year();
        let raw = count_missing(series.readings());
        let normalized = count_missing(&normalize(&series));
        assert_eq!(raw, normalized);
        assert_eq!(raw, HOURS_PER_YEAR.div_ceil(7));
    }

    #[test]
    fn test_fill_missing_is_idempotent() {
        let series = series_of(&[Some(1.0), None, Some(3.0), None]);
        let once = fill_missing(&series, 0.5).unwrap();
        let twice = fill_missing(&once, 0.5).unwrap();

        assert_eq!(count_missing(once.readings()), 0);
        assert_eq!(once, twice);
        assert_eq!(once.readings()[1].value, Some(0.5));
        assert_eq!(once.readings()[2].value, Some(3.0));
        // source untouched
        assert_eq!(count_missing(series.readings()), 2);
    }

    #[test]
    fn test_fill_missing_rejects_non_finite() {
        let series = series_of(&[None]);
        assert!(matches!(
            fill_missing(&series, f64::NAN),
            Err(AquaError::NonNumericInput { .. })
        ));
    }

    #[test]
    fn test_parse_replacement() {
        assert_eq!(parse_replacement(" 2.5 ").unwrap(), 2.5);
        assert_eq!(parse_replacement("-3").unwrap(), -3.0);
        assert!(parse_replacement("abc").is_err());
        assert!(parse_replacement("NaN").is_err());
        assert!(parse_replacement("").is_err());
    }

    #[test]
    fn test_bucket_report_labels() {
        let series = full_year();
        let report = bucket_report(&series, BucketKind::HourlyAverage);
        assert_eq!(report.station, Station::Harlington);
        assert_eq!(report.pollutant, Pollutant::NitricOxide);
        assert_eq!(report.values.len(), 24);
    }
}
