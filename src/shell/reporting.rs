use std::io::{BufRead, Write};
use tracing::{error, info};

use super::prompt::{MenuOption, Selection};
use super::{Flow, Shell, pollutant_options};
use crate::error::Result;
use crate::fetch::HttpClient;
use crate::output::{print_json, render_buckets, render_fill, render_missing_count, render_peak};
use crate::reporting::aggregate::{
    bucket_report, count_missing, fill_missing, parse_replacement, parse_report_date,
    peak_hour_for_date,
};
use crate::reporting::types::BucketKind;
use crate::types::Series;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportChoice {
    Buckets(BucketKind),
    PeakHour,
    CountMissing,
    FillMissing,
}

fn report_options() -> Vec<MenuOption<ReportChoice>> {
    vec![
        MenuOption::new("1", "Daily Average", ReportChoice::Buckets(BucketKind::DailyAverage)),
        MenuOption::new("2", "Daily Median", ReportChoice::Buckets(BucketKind::DailyMedian)),
        MenuOption::new("3", "Hourly Average", ReportChoice::Buckets(BucketKind::HourlyAverage)),
        MenuOption::new("4", "Monthly Average", ReportChoice::Buckets(BucketKind::MonthlyAverage)),
        MenuOption::new("5", "Peak Hour Date", ReportChoice::PeakHour),
        MenuOption::new("6", "Count Missing Data", ReportChoice::CountMissing),
        MenuOption::new("7", "Fill Missing Data", ReportChoice::FillMissing),
    ]
}

impl<R: BufRead, W: Write, C: HttpClient> Shell<R, W, C> {
    pub(super) fn reporting_menu(&mut self) -> Result<Flow> {
        let proceed = [MenuOption::new("P", "Proceed to calculations", ())];

        loop {
            match self.prompter.select(
                "Welcome to the PR (Pollutant Reporting) module. What would you like to do?",
                &proceed,
            )? {
                Selection::Chosen(()) => {}
                Selection::Back => return Ok(Flow::Continue),
                Selection::Quit => return Ok(Flow::Quit),
            }

            let station = match self.select_station()? {
                Selection::Chosen(station) => station,
                Selection::Back => continue,
                Selection::Quit => return Ok(Flow::Quit),
            };

            let pollutant = match self
                .prompter
                .select("Select a pollutant", &pollutant_options(false))?
            {
                Selection::Chosen(pollutant) => pollutant,
                Selection::Back => continue,
                Selection::Quit => return Ok(Flow::Quit),
            };

            self.session.select(station, pollutant);
            info!(station = %station, pollutant = %pollutant, "Reporting selection");

            if self.calculation_loop()? == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }
    }

    fn calculation_loop(&mut self) -> Result<Flow> {
        let options = report_options();

        loop {
            let choice = match self
                .prompter
                .select("Please select a calculation", &options)?
            {
                Selection::Chosen(choice) => choice,
                Selection::Back => return Ok(Flow::Continue),
                Selection::Quit => return Ok(Flow::Quit),
            };

            let series = match self.session.series() {
                Ok(series) => series,
                Err(e) => {
                    error!(error = %e, "Could not load station data");
                    writeln!(self.prompter.output(), "Could not load station data: {e}")?;
                    return Ok(Flow::Continue);
                }
            };

            if self.run_report(choice, &series)? == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }
    }

    fn run_report(&mut self, choice: ReportChoice, series: &Series) -> Result<Flow> {
        let station = series.station();
        let pollutant = series.pollutant();

        match choice {
            ReportChoice::Buckets(kind) => {
                let report = bucket_report(series, kind);
                if let Err(e) = print_json(&report) {
                    error!(error = %e, "Could not serialize report");
                }
                render_buckets(self.prompter.output(), &report)?;
            }
            ReportChoice::PeakHour => {
                let now = self.now();
                let year = series.year();
                let message = match year {
                    Some(year) => format!("Please enter a date in {year} (yyyy-mm-dd): "),
                    None => "Please enter a date (yyyy-mm-dd): ".to_string(),
                };

                let date = match self
                    .prompter
                    .read_valid(&message, |input| parse_report_date(input, year, now))?
                {
                    Selection::Chosen(date) => date,
                    Selection::Back => return Ok(Flow::Continue),
                    Selection::Quit => return Ok(Flow::Quit),
                };

                let outcome = peak_hour_for_date(series, &date.format("%Y-%m-%d").to_string(), now)?;
                render_peak(self.prompter.output(), station, pollutant, &outcome)?;
            }
            ReportChoice::CountMissing => {
                let count = count_missing(series.readings());
                render_missing_count(self.prompter.output(), station, pollutant, count)?;
            }
            ReportChoice::FillMissing => {
                let replacement = match self
                    .prompter
                    .read_valid("Please enter the replacement value (integer or float): ", parse_replacement)?
                {
                    Selection::Chosen(value) => value,
                    Selection::Back => return Ok(Flow::Continue),
                    Selection::Quit => return Ok(Flow::Quit),
                };

                let missing = count_missing(series.readings());
                let filled = fill_missing(series, replacement)?;
                self.session.store_working(filled);
                render_fill(self.prompter.output(), replacement, missing)?;
            }
        }

        Ok(Flow::Continue)
    }
}
