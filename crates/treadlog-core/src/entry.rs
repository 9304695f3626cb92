//! Interactive session entry.
//!
//! Walks the user through date, weight, duration, distance and rise, one
//! field at a time. A bad answer re-asks the same field; `q` at any field
//! ends the whole flow without writing anything for the current entry.
//!
//! The collector is generic over its input and output so the whole flow
//! can be driven from a byte buffer.

use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use crate::error::Result;
use crate::session::{parse_duration, SessionRecord, DATE_FORMAT};
use crate::storage::CsvStore;

const BANNER: &str = "🏃\u{200d}♂️ Treadmill Session Logger";
const FAREWELL: &str = "Quitting gracefully. 💚";
const GOODBYE: &str = "Quitting gracefully. Bye for now! 💚";

const DATE_PROMPT: &str = "Date (DD-MM-YYYY, leave blank for today or 'q' to quit): ";
const WEIGHT_PROMPT: &str = "Your weight in lbs (e.g., 180.0, or 'q' to quit): ";
const DURATION_PROMPT: &str = "Duration (min:sec, or 'q' to quit): ";
const DISTANCE_PROMPT: &str = "Distance in miles (e.g., 1.25, or 'q' to quit): ";
const RISE_PROMPT: &str = "Front rise in inches (e.g., 3.0, leave blank for 0): ";
const REPEAT_PROMPT: &str = "Add another? (y/n/q to quit) [default n]: ";

const INVALID_WEIGHT: &str = "❗ Invalid weight. Please enter a number.";
const INVALID_DURATION: &str =
    "❗ Invalid format. Please enter time as minutes:seconds (e.g., 30:15)";
const INVALID_DISTANCE: &str = "❗ Invalid distance. Please enter a number.";
const INVALID_RISE: &str = "❗ Invalid number. Please enter a number.";

/// Answer to a single prompt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Answer<T> {
    /// A valid value for the field
    Value(T),
    /// The user asked to quit (or input ended)
    Quit,
}

/// How the logging loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogEnd {
    /// `q` at a field prompt, or end of input
    Quit,
    /// Anything but `y` at the "add another" prompt
    Declined,
}

/// Summary of one logging run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogOutcome {
    /// Sessions appended to the store
    pub logged: usize,
    pub ended_by: LogEnd,
}

/// Today's local date in the store's date format.
pub fn today_local() -> String {
    chrono::Local::now().format(DATE_FORMAT).to_string()
}

/// Prompt-driven collector for treadmill sessions.
pub struct EntryCollector<R, W> {
    input: R,
    output: W,
    today: fn() -> String,
}

impl<R: BufRead, W: Write> EntryCollector<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            today: today_local,
        }
    }

    /// Replace the source of the blank-date default.
    pub fn with_today(mut self, today: fn() -> String) -> Self {
        self.today = today;
        self
    }

    /// Run the prompt loop, appending each completed session to `store`.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be read or written, or if a
    /// session cannot be appended to the store.
    pub fn run(&mut self, store: &mut CsvStore) -> Result<LogOutcome> {
        writeln!(self.output, "{BANNER}")?;
        let mut logged = 0;

        loop {
            let record = match self.collect()? {
                Answer::Value(record) => record,
                Answer::Quit => {
                    writeln!(self.output, "{FAREWELL}")?;
                    return Ok(LogOutcome {
                        logged,
                        ended_by: LogEnd::Quit,
                    });
                }
            };

            writeln!(
                self.output,
                "Estimated calories burned: {} cal",
                show_float(record.calories)
            )?;
            store.append(&record)?;
            logged += 1;
            info!(date = %record.date, calories = record.calories, "logged session");
            writeln!(self.output, "✅ Logged session on {}.", record.date)?;

            let again = self.read_answer(REPEAT_PROMPT)?.unwrap_or_default();
            if !again.eq_ignore_ascii_case("y") {
                writeln!(self.output, "{GOODBYE}")?;
                return Ok(LogOutcome {
                    logged,
                    ended_by: LogEnd::Declined,
                });
            }
        }
    }

    /// Ask every field of one session in order.
    pub fn collect(&mut self) -> io::Result<Answer<SessionRecord>> {
        writeln!(self.output, "\n--- New Entry ---")?;

        let Answer::Value(date) = self.ask_date()? else {
            return Ok(Answer::Quit);
        };
        let Answer::Value(weight) = self.ask(WEIGHT_PROMPT, INVALID_WEIGHT, parse_number)? else {
            return Ok(Answer::Quit);
        };
        let Answer::Value(duration) = self.ask(DURATION_PROMPT, INVALID_DURATION, parse_duration)?
        else {
            return Ok(Answer::Quit);
        };
        let Answer::Value(distance) = self.ask(DISTANCE_PROMPT, INVALID_DISTANCE, parse_number)?
        else {
            return Ok(Answer::Quit);
        };
        let Answer::Value(rise) = self.ask(RISE_PROMPT, INVALID_RISE, parse_rise)? else {
            return Ok(Answer::Quit);
        };

        Ok(Answer::Value(SessionRecord::new(
            date, weight, duration, distance, rise,
        )))
    }

    fn ask_date(&mut self) -> io::Result<Answer<String>> {
        let Some(line) = self.read_answer(DATE_PROMPT)? else {
            return Ok(Answer::Quit);
        };
        // the date is free text: only an exact `q` quits and only an empty answer defaults
        if line.eq_ignore_ascii_case("q") {
            return Ok(Answer::Quit);
        }
        if line.is_empty() {
            Ok(Answer::Value((self.today)()))
        } else {
            Ok(Answer::Value(line))
        }
    }

    /// Ask one field until it parses or the user quits.
    fn ask<T>(
        &mut self,
        prompt: &str,
        invalid: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> io::Result<Answer<T>> {
        loop {
            let Some(line) = self.read_answer(prompt)? else {
                return Ok(Answer::Quit);
            };
            if is_quit(&line) {
                return Ok(Answer::Quit);
            }
            match parse(&line) {
                Some(value) => return Ok(Answer::Value(value)),
                None => {
                    debug!(input = %line, "rejected answer");
                    writeln!(self.output, "{invalid}")?;
                }
            }
        }
    }

    /// Print `prompt` and read one line. `None` means input is exhausted.
    fn read_answer(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}

fn is_quit(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("q")
}

/// Whole numbers keep one decimal (`176.0`), others print as-is (`175.54`).
fn show_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

fn parse_number(answer: &str) -> Option<f64> {
    answer.trim().parse().ok()
}

fn parse_rise(answer: &str) -> Option<f64> {
    let answer = answer.trim();
    if answer.is_empty() {
        Some(0.0)
    } else {
        answer.parse().ok()
    }
}
