//! Menu-driven console shell.
//!
//! The shell owns all interactivity: it asks for station, pollutant and
//! calculation, then hands explicit parameters to the reporting and
//! monitoring components.

mod monitoring;
pub mod prompt;
mod reporting;
pub mod session;

use chrono::{NaiveDateTime, Utc};
use std::io::{BufRead, Write};
use tracing::info;

use crate::config::AppConfig;
use crate::error::Result;
use crate::fetch::HttpClient;
use crate::types::{Pollutant, Station};
use prompt::{MenuOption, Prompter, Selection};
use session::Session;

/// Whether a sub-menu returned normally or the user asked to quit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MainChoice {
    Reporting,
    Monitoring,
    About,
}

pub struct Shell<R, W, C> {
    prompter: Prompter<R, W>,
    client: C,
    config: AppConfig,
    session: Session,
    clock: fn() -> NaiveDateTime,
}

fn utc_now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

impl<R: BufRead, W: Write, C: HttpClient> Shell<R, W, C> {
    pub fn new(input: R, output: W, client: C, config: AppConfig) -> Self {
        Self {
            prompter: Prompter::new(input, output, config.max_attempts),
            client,
            session: Session::new(config.data_dir.clone()),
            config,
            clock: utc_now,
        }
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    /// Replaces the clock used for date validation and live windows.
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }

    /// Runs the main menu until the user quits or input ends.
    pub fn run(&mut self) -> Result<()> {
        info!("Shell started");
        let options = [
            MenuOption::new("R", "the PR (Pollutant Reporting) module", MainChoice::Reporting),
            MenuOption::new("M", "the RM (Real-time Monitoring) module", MainChoice::Monitoring),
            MenuOption::new("A", "About", MainChoice::About),
        ];

        loop {
            let title = "Welcome to AQUA (Air Quality Analytics)! Please use the following keys.";
            let flow = match self.prompter.select(title, &options)? {
                Selection::Chosen(MainChoice::Reporting) => self.reporting_menu()?,
                Selection::Chosen(MainChoice::Monitoring) => self.monitoring_menu()?,
                Selection::Chosen(MainChoice::About) => self.about()?,
                Selection::Back => Flow::Continue,
                Selection::Quit => Flow::Quit,
            };

            if flow == Flow::Quit {
                break;
            }
        }

        writeln!(
            self.prompter.output(),
            "Thank you for using AQUA (Air Quality Analytics). Have a nice day!"
        )?;
        info!("Shell finished");
        Ok(())
    }

    fn about(&mut self) -> Result<Flow> {
        let out = self.prompter.output();
        writeln!(out, "\nAQUA (Air Quality Analytics) {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(
            out,
            "Historical reporting for {} stations and live LondonAir monitoring.",
            Station::ALL.len()
        )?;
        writeln!(out, "Live data source: {}", self.config.api_base_url)?;
        Ok(Flow::Continue)
    }

    fn select_station(&mut self) -> Result<Selection<Station>> {
        let options: Vec<_> = Station::ALL
            .into_iter()
            .map(|s| MenuOption::new(s.key(), s.name(), s))
            .collect();
        self.prompter.select("Select a monitoring station", &options)
    }

    fn now(&self) -> NaiveDateTime {
        (self.clock)()
    }
}

/// Pollutant menu keyed by column name or by position.
fn pollutant_options(by_position: bool) -> Vec<MenuOption<Pollutant>> {
    Pollutant::ALL
        .into_iter()
        .enumerate()
        .map(|(i, p)| {
            let key = if by_position {
                (i + 1).to_string()
            } else {
                p.key().to_string()
            };
            MenuOption::new(key, p.description(), p)
        })
        .collect()
}
