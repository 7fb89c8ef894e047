use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{AquaError, Result};
use crate::reporting::source::{StationTable, load_station};
use crate::types::{Pollutant, Series, Station};

/// Selection state and loaded data for one interactive run.
///
/// Station tables are loaded on first use and never modified. Imputed
/// series are kept separately as working copies that shadow the table.
pub struct Session {
    data_dir: PathBuf,
    tables: HashMap<Station, StationTable>,
    working: HashMap<(Station, Pollutant), Series>,
    station: Option<Station>,
    pollutant: Option<Pollutant>,
}

impl Session {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            tables: HashMap::new(),
            working: HashMap::new(),
            station: None,
            pollutant: None,
        }
    }

    /// Registers an already-loaded table.
    pub fn with_table(mut self, table: StationTable) -> Self {
        self.tables.insert(table.station(), table);
        self
    }

    pub fn select(&mut self, station: Station, pollutant: Pollutant) {
        self.station = Some(station);
        self.pollutant = Some(pollutant);
    }

    pub fn selection(&self) -> Option<(Station, Pollutant)> {
        self.station.zip(self.pollutant)
    }

    /// The series for the current selection, preferring a working copy.
    pub fn series(&mut self) -> Result<Series> {
        let (station, pollutant) = self
            .selection()
            .ok_or_else(|| AquaError::InvalidSelection("no station and pollutant selected".into()))?;

        if let Some(series) = self.working.get(&(station, pollutant)) {
            return Ok(series.clone());
        }

        if !self.tables.contains_key(&station) {
            let table = load_station(&self.data_dir, station)?;
            self.tables.insert(station, table);
        }

        self.tables
            .get(&station)
            .map(|table| table.series(pollutant))
            .ok_or_else(|| AquaError::InvalidSelection(format!("no table for {station}")))
    }

    /// Stores an imputed series as the working copy for its station and pollutant.
    pub fn store_working(&mut self, series: Series) {
        self.working
            .insert((series.station(), series.pollutant()), series);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporting::aggregate::{count_missing, fill_missing};
    use crate::reporting::source::load_table;

    const CSV: &str = "date,time,no,pm10,pm25\n2021-01-01,01:00:00,No data,1,2\n";

    #[test]
    fn test_series_requires_selection() {
        let mut session = Session::new("data");
        assert!(matches!(session.series(), Err(AquaError::InvalidSelection(_))));
    }

    #[test]
    fn test_working_copy_shadows_table() {
        let table = load_table(CSV.as_bytes(), Station::Harlington).unwrap();
        let mut session = Session::new("data").with_table(table);
        session.select(Station::Harlington, Pollutant::NitricOxide);

        let series = session.series().unwrap();
        assert_eq!(count_missing(series.readings()), 1);

        session.store_working(fill_missing(&series, 9.0).unwrap());
        assert_eq!(count_missing(session.series().unwrap().readings()), 0);

        // other pollutants still come from the table
        session.select(Station::Harlington, Pollutant::Pm10);
        assert_eq!(session.series().unwrap().readings()[0].value, Some(1.0));
    }

    #[test]
    fn test_missing_table_file_is_an_error() {
        let mut session = Session::new(std::env::temp_dir().join("aqua_monitor_missing_data"));
        session.select(Station::NKensington, Pollutant::Pm25);
        assert!(matches!(session.series(), Err(AquaError::Io(_))));
    }
}
