//! Domain types shared by the reporting and monitoring components.

use chrono::{Datelike, Duration, NaiveDateTime, Timelike};
use serde::Serialize;
use std::fmt;

/// Readings per day in an hourly series.
pub const HOURS_PER_DAY: usize = 24;

/// Readings in a complete, non-leap, January-start year.
pub const HOURS_PER_YEAR: usize = 8760;

/// Days per month for the non-leap year the historical tables cover.
pub const DAYS_IN_MONTH: [usize; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Cell text the station tables use for a missing reading.
pub const NO_DATA: &str = "No data";

/// One of the three monitoring stations with historical tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Station {
    Harlington,
    MaryleboneRoad,
    NKensington,
}

impl Station {
    pub const ALL: [Station; 3] = [
        Station::Harlington,
        Station::MaryleboneRoad,
        Station::NKensington,
    ];

    /// Menu key.
    pub fn key(self) -> &'static str {
        match self {
            Station::Harlington => "H",
            Station::MaryleboneRoad => "M",
            Station::NKensington => "NK",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Station::Harlington => "Harlington",
            Station::MaryleboneRoad => "Marylebone Road",
            Station::NKensington => "N Kensington",
        }
    }

    /// LondonAir site code used by the live feed.
    pub fn site_code(self) -> &'static str {
        match self {
            Station::Harlington => "LH0",
            Station::MaryleboneRoad => "MR8",
            Station::NKensington => "KC1",
        }
    }

    pub fn file_name(self) -> String {
        format!("Pollution-London {}.csv", self.name())
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.key().eq_ignore_ascii_case(key.trim()))
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pollutant measured at every station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Pollutant {
    NitricOxide,
    Pm10,
    Pm25,
}

impl Pollutant {
    pub const ALL: [Pollutant; 3] = [Pollutant::NitricOxide, Pollutant::Pm10, Pollutant::Pm25];

    /// Column name in the station tables.
    pub fn key(self) -> &'static str {
        match self {
            Pollutant::NitricOxide => "no",
            Pollutant::Pm10 => "pm10",
            Pollutant::Pm25 => "pm25",
        }
    }

    /// LondonAir species code.
    pub fn species_code(self) -> &'static str {
        match self {
            Pollutant::NitricOxide => "NO",
            Pollutant::Pm10 => "PM10",
            Pollutant::Pm25 => "PM25",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Pollutant::NitricOxide => "nitric oxide",
            Pollutant::Pm10 => "PM10 inhalable particulate matter",
            Pollutant::Pm25 => "PM2.5 inhalable particulate matter",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.key().eq_ignore_ascii_case(key.trim()))
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// An hourly reading. `timestamp` is the start of the measurement hour and
/// `value` is `None` when the station reported no data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub timestamp: NaiveDateTime,
    pub value: Option<f64>,
}

impl Reading {
    pub fn new(timestamp: NaiveDateTime, value: Option<f64>) -> Self {
        Self { timestamp, value }
    }

    /// Hour-ending label as printed in the station tables, `01:00:00` through
    /// `24:00:00`.
    pub fn hour_label(&self) -> String {
        let end = self.timestamp + Duration::hours(1);
        if end.hour() == 0 && end.minute() == 0 && end.second() == 0 {
            "24:00:00".to_string()
        } else {
            end.format("%H:%M:%S").to_string()
        }
    }
}

/// Something that may stand for a missing observation.
pub trait Observation {
    fn is_missing(&self) -> bool;
}

impl Observation for Option<f64> {
    fn is_missing(&self) -> bool {
        self.is_none()
    }
}

impl Observation for f64 {
    fn is_missing(&self) -> bool {
        self.is_nan()
    }
}

impl Observation for Reading {
    fn is_missing(&self) -> bool {
        self.value.is_none()
    }
}

/// Ordered hourly readings for one station and pollutant.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    station: Station,
    pollutant: Pollutant,
    readings: Vec<Reading>,
}

impl Series {
    pub fn new(station: Station, pollutant: Pollutant, readings: Vec<Reading>) -> Self {
        Self {
            station,
            pollutant,
            readings,
        }
    }

    pub fn station(&self) -> Station {
        self.station
    }

    pub fn pollutant(&self) -> Pollutant {
        self.pollutant
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Calendar year of the first reading.
    pub fn year(&self) -> Option<i32> {
        self.readings.first().map(|r| r.timestamp.year())
    }

    /// Whether the series satisfies the 8760-hour layout the monthly
    /// buckets assume.
    pub fn is_complete_year(&self) -> bool {
        self.readings.len() == HOURS_PER_YEAR
    }

    pub fn into_readings(self) -> Vec<Reading> {
        self.readings
    }
}
