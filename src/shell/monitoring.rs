use std::io::{BufRead, Write};
use tracing::error;

use super::prompt::{MenuOption, Selection};
use super::{Flow, Shell, pollutant_options};
use crate::error::Result;
use crate::fetch::HttpClient;
use crate::monitoring::{Calculation, TimeWindow, compute_over_window};
use crate::output::{print_json, render_live};

impl<R: BufRead, W: Write, C: HttpClient> Shell<R, W, C> {
    pub(super) fn monitoring_menu(&mut self) -> Result<Flow> {
        let proceed = [MenuOption::new("P", "Proceed to monitor", ())];

        loop {
            match self.prompter.select(
                "Welcome to the RM (Real-time Monitoring) module. What would you like to do?",
                &proceed,
            )? {
                Selection::Chosen(()) => {}
                Selection::Back => return Ok(Flow::Continue),
                Selection::Quit => return Ok(Flow::Quit),
            }

            if self.monitor()? == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }
    }

    /// One pass of station, pollutant, window and calculation selection.
    /// Backing out of a later prompt restarts at the station prompt.
    fn monitor(&mut self) -> Result<Flow> {
        let windows: Vec<_> = TimeWindow::CHOICES
            .into_iter()
            .map(|w| MenuOption::new(w.code(), w.label(), w.code()))
            .collect();
        let calculations: Vec<_> = Calculation::ALL
            .into_iter()
            .map(|c| MenuOption::new(c.code(), c.name(), c))
            .collect();

        loop {
            let station = match self.select_station()? {
                Selection::Chosen(station) => station,
                Selection::Back => return Ok(Flow::Continue),
                Selection::Quit => return Ok(Flow::Quit),
            };

            let pollutant = match self
                .prompter
                .select("Select a pollutant", &pollutant_options(true))?
            {
                Selection::Chosen(pollutant) => pollutant,
                Selection::Back => continue,
                Selection::Quit => return Ok(Flow::Quit),
            };

            let window = match self.prompter.select("Select a time frame", &windows)? {
                Selection::Chosen(code) => TimeWindow::from_code(code),
                Selection::Back => continue,
                Selection::Quit => return Ok(Flow::Quit),
            };

            let calculation = match self.prompter.select("Select a calculation", &calculations)? {
                Selection::Chosen(calculation) => calculation,
                Selection::Back => continue,
                Selection::Quit => return Ok(Flow::Quit),
            };

            let outcome = compute_over_window(
                &self.client,
                &self.config.api_base_url,
                station,
                pollutant,
                window,
                calculation,
                self.now(),
            );
            if let Err(e) = print_json(&outcome) {
                error!(error = %e, "Could not serialize live outcome");
            }
            render_live(self.prompter.output(), station, pollutant, &outcome)?;
        }
    }
}
