//! Station table loading.
//!
//! Each station has one CSV with `date`, `time` and one column per pollutant
//! key. Cells holding `No data` (or nothing) are missing readings.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{AquaError, Result};
use crate::types::{HOURS_PER_YEAR, NO_DATA, Pollutant, Reading, Series, Station};

/// A single row deserialized from a station CSV file.
#[derive(Debug, Deserialize)]
struct StationRecord {
    date: String,
    time: String,
    no: String,
    pm10: String,
    pm25: String,
}

#[derive(Debug, Clone, PartialEq)]
struct TableRow {
    timestamp: NaiveDateTime,
    no: Option<f64>,
    pm10: Option<f64>,
    pm25: Option<f64>,
}

/// Every pollutant column of one station's table.
#[derive(Debug, Clone, PartialEq)]
pub struct StationTable {
    station: Station,
    rows: Vec<TableRow>,
}

impl StationTable {
    pub fn station(&self) -> Station {
        self.station
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Extracts the series for one pollutant column.
    pub fn series(&self, pollutant: Pollutant) -> Series {
        let readings = self
            .rows
            .iter()
            .map(|row| {
                let value = match pollutant {
                    Pollutant::NitricOxide => row.no,
                    Pollutant::Pm10 => row.pm10,
                    Pollutant::Pm25 => row.pm25,
                };
                Reading::new(row.timestamp, value)
            })
            .collect();

        Series::new(self.station, pollutant, readings)
    }
}

/// Loads `<data_dir>/Pollution-London <station>.csv`.
#[tracing::instrument(fields(station = %station))]
pub fn load_station(data_dir: &Path, station: Station) -> Result<StationTable> {
    let path = data_dir.join(station.file_name());
    debug!(path = %path.display(), "Opening station table");

    let file = File::open(&path)?;
    let table = load_table(file, station)?;

    info!(rows = table.len(), "Station table loaded");
    Ok(table)
}

/// Parses a station table from any reader.
pub fn load_table<R: Read>(reader: R, station: Station) -> Result<StationTable> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for (index, result) in rdr.deserialize().enumerate() {
        let record: StationRecord = result?;
        // Header is line 1.
        let row = index + 2;

        rows.push(TableRow {
            timestamp: parse_timestamp(&record.date, &record.time, row)?,
            no: parse_cell(&record.no, row, "no")?,
            pm10: parse_cell(&record.pm10, row, "pm10")?,
            pm25: parse_cell(&record.pm25, row, "pm25")?,
        });
    }

    if rows.len() != HOURS_PER_YEAR {
        warn!(
            station = %station,
            rows = rows.len(),
            expected = HOURS_PER_YEAR,
            "Station table does not cover a complete non-leap year; monthly buckets will be truncated"
        );
    }

    Ok(StationTable { station, rows })
}

fn parse_cell(cell: &str, row: usize, column: &str) -> Result<Option<f64>> {
    let cell = cell.trim();
    if cell.is_empty() || cell == NO_DATA {
        return Ok(None);
    }

    cell.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Some)
        .ok_or_else(|| AquaError::InvalidCell {
            row,
            column: column.to_string(),
            value: cell.to_string(),
        })
}

/// Combines the date cell and the hour-ending time cell into the start of
/// the measurement hour.
fn parse_timestamp(date: &str, time: &str, row: usize) -> Result<NaiveDateTime> {
    let date_cell = date.trim();
    let date = NaiveDate::parse_from_str(date_cell, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date_cell, "%d/%m/%Y"))
        .map_err(|_| AquaError::InvalidCell {
            row,
            column: "date".to_string(),
            value: date_cell.to_string(),
        })?;

    let time_cell = time.trim();
    let invalid_time = || AquaError::InvalidCell {
        row,
        column: "time".to_string(),
        value: time_cell.to_string(),
    };

    let end = if time_cell == "24:00:00" || time_cell == "24:00" {
        date.succ_opt().ok_or_else(invalid_time)?.and_time(NaiveTime::MIN)
    } else {
        let time = NaiveTime::parse_from_str(time_cell, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(time_cell, "%H:%M"))
            .map_err(|_| invalid_time())?;
        date.and_time(time)
    };

    Ok(end - Duration::hours(1))
}
