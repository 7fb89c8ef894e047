//! Bounded console prompts.

use std::io::{BufRead, Write};
use tracing::{debug, warn};

use crate::error::Result;

/// Answer to a prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<T> {
    Chosen(T),
    Back,
    Quit,
}

/// One selectable entry of a menu.
#[derive(Debug, Clone)]
pub struct MenuOption<T> {
    pub key: String,
    pub label: String,
    pub value: T,
}

impl<T> MenuOption<T> {
    pub fn new(key: impl Into<String>, label: impl Into<String>, value: T) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            value,
        }
    }
}

/// Reads answers from `input` and writes prompts to `output`.
///
/// Every prompt accepts `B` (back) and `Q` (quit). Invalid answers re-display
/// the prompt up to `max_attempts` times, after which the prompt answers
/// [`Selection::Back`]. End of input answers [`Selection::Quit`].
pub struct Prompter<R, W> {
    input: R,
    output: W,
    max_attempts: usize,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W, max_attempts: usize) -> Self {
        Self {
            input,
            output,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Writes `message` and reads one trimmed line. `None` at end of input.
    pub fn read_line(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            debug!("End of input");
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Shows `title` and the options, then waits for a valid key.
    pub fn select<T: Clone>(&mut self, title: &str, options: &[MenuOption<T>]) -> Result<Selection<T>> {
        for _ in 0..self.max_attempts {
            writeln!(self.output, "\n{title}")?;
            for option in options {
                writeln!(self.output, "- Press [{}] for {}", option.key, option.label)?;
            }
            writeln!(self.output, "- Press [B] to go back")?;
            writeln!(self.output, "- Press [Q] to quit")?;

            let Some(answer) = self.read_line("\nEnter here: ")? else {
                return Ok(Selection::Quit);
            };

            if let Some(signal) = navigation(&answer) {
                return Ok(signal);
            }

            if let Some(option) = options
                .iter()
                .find(|o| o.key.eq_ignore_ascii_case(&answer))
            {
                return Ok(Selection::Chosen(option.value.clone()));
            }

            debug!(answer = %answer, "Invalid selection");
            writeln!(self.output, "Invalid selection {answer:?}, please try again.")?;
        }

        self.give_up()
    }

    /// Asks for free-form input until `parse` accepts it.
    pub fn read_valid<T, F>(&mut self, message: &str, parse: F) -> Result<Selection<T>>
    where
        F: Fn(&str) -> Result<T>,
    {
        for _ in 0..self.max_attempts {
            let Some(answer) = self.read_line(message)? else {
                return Ok(Selection::Quit);
            };

            if let Some(signal) = navigation(&answer) {
                return Ok(signal);
            }

            match parse(&answer) {
                Ok(value) => return Ok(Selection::Chosen(value)),
                Err(e) => writeln!(self.output, "{e}. Please try again ([B] back, [Q] quit).")?,
            }
        }

        self.give_up()
    }

    fn give_up<T>(&mut self) -> Result<Selection<T>> {
        warn!(attempts = self.max_attempts, "Too many invalid answers, going back");
        writeln!(self.output, "Too many invalid answers, going back.")?;
        Ok(Selection::Back)
    }
}

fn navigation<T>(answer: &str) -> Option<Selection<T>> {
    if answer.eq_ignore_ascii_case("B") {
        Some(Selection::Back)
    } else if answer.eq_ignore_ascii_case("Q") {
        Some(Selection::Quit)
    } else {
        None
    }
}
