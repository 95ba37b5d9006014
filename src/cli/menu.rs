use std::io::{self, BufRead, Write};

use anyhow::Result;
use tracing::{debug, info, instrument, warn};

use crate::{
    store::{
        entities::{EntryDate, MetricEntry},
        record_store::RecordStore,
    },
    utils::clock::Clock,
};

use super::output::{
    print_chart, print_entries, print_error, print_info, print_success, print_summary,
    print_warning, Palette,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Add,
    List,
    Summary,
    Chart,
    Exit,
}

impl TryFrom<i32> for MenuChoice {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Add),
            2 => Ok(Self::List),
            3 => Ok(Self::Summary),
            4 => Ok(Self::Chart),
            5 => Ok(Self::Exit),
            other => Err(other),
        }
    }
}

/// Reasons a new record couldn't be collected.
#[derive(Debug)]
enum PromptError {
    /// The answer couldn't be parsed. Only the current record is abandoned.
    Invalid(anyhow::Error),
    /// Input ended in the middle of a prompt.
    Closed,
    Io(io::Error),
}

impl From<io::Error> for PromptError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Interactive session over a [RecordStore]. Reads answers line by line from `input` and prints
/// everything to `output`.
pub struct Menu<R, W> {
    input: R,
    output: W,
    palette: Palette,
    date_provider: Box<dyn Clock>,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W, palette: Palette, date_provider: Box<dyn Clock>) -> Self {
        Self {
            input,
            output,
            palette,
            date_provider,
        }
    }

    /// Runs the menu until the user exits or input ends. The store is cleared afterwards either
    /// way.
    #[instrument(skip_all)]
    pub fn run(&mut self, store: &mut RecordStore) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(line) = self.read_line()? else {
                debug!("Input closed, leaving the menu");
                break;
            };
            let choice = match line.parse::<i32>().map(MenuChoice::try_from) {
                Ok(Ok(choice)) => choice,
                Ok(Err(choice)) => {
                    warn!("Unknown menu choice {choice}");
                    print_warning(
                        &mut self.output,
                        &self.palette,
                        "Invalid choice. Please try again.",
                    )?;
                    continue;
                }
                Err(_) => {
                    print_error(
                        &mut self.output,
                        &self.palette,
                        "Invalid input. Please enter a number from the menu.",
                    )?;
                    continue;
                }
            };
            debug!("Selected {choice:?}");

            match choice {
                MenuChoice::Add => {
                    if !self.add_record(store)? {
                        break;
                    }
                }
                MenuChoice::List => print_entries(&mut self.output, &self.palette, store)?,
                MenuChoice::Summary => {
                    print_summary(&mut self.output, &self.palette, store.summarize().as_ref())?
                }
                MenuChoice::Chart => {
                    print_chart(&mut self.output, &self.palette, &store.visualize())?
                }
                MenuChoice::Exit => break,
            }
        }

        store.clear();
        print_info(
            &mut self.output,
            &self.palette,
            "All records released. Exiting program.",
        )?;
        self.output.flush()?;
        Ok(())
    }

    /// Returns `false` when input ended and the session should stop.
    fn add_record(&mut self, store: &mut RecordStore) -> Result<bool> {
        writeln!(self.output, "\n--- Add New Health Record ---")?;
        match self.collect_entry() {
            Ok(entry) => {
                let date = entry.date.clone();
                store.append(entry);
                info!("Added record for {date}");
                print_success(
                    &mut self.output,
                    &self.palette,
                    &format!("Record for {date} successfully added."),
                )?;
                Ok(true)
            }
            Err(PromptError::Invalid(e)) => {
                warn!("Abandoned record {e:#}");
                print_error(&mut self.output, &self.palette, &format!("Invalid input. {e:#}"))?;
                Ok(true)
            }
            Err(PromptError::Closed) => Ok(false),
            Err(PromptError::Io(e)) => Err(e.into()),
        }
    }

    fn collect_entry(&mut self) -> Result<MetricEntry, PromptError> {
        let default_date = self.date_provider.today();
        let question = match &default_date {
            Some(date) => format!("Enter Date (YYYY-MM-DD) [Default: {date}]: "),
            None => "Enter Date (YYYY-MM-DD): ".to_string(),
        };
        let date = self.prompt(&question, |answer| match default_date {
            Some(date) if answer.is_empty() => Ok(date),
            _ => answer.parse::<EntryDate>(),
        })?;
        let steps = self.prompt("Enter Step Count: ", parse_number)?;
        let calories_burned = self.prompt("Enter Calories Burned: ", parse_number)?;
        let sleep_hours = self.prompt("Enter Sleep Hours (e.g., 7.5): ", parse_number)?;
        Ok(MetricEntry::new(date, steps, calories_burned, sleep_hours))
    }

    fn prompt<T>(
        &mut self,
        question: &str,
        parse: impl FnOnce(&str) -> anyhow::Result<T>,
    ) -> Result<T, PromptError> {
        write!(self.output, "{question}")?;
        let answer = self.read_line()?.ok_or(PromptError::Closed)?;
        parse(&answer).map_err(PromptError::Invalid)
    }

    /// Reads a trimmed line. Returns [None] at the end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn print_menu(&mut self) -> io::Result<()> {
        let banner = "============================================";
        writeln!(self.output, "\n{banner}")?;
        writeln!(
            self.output,
            "{}",
            self.palette.header.paint("  Personal Health Metrics Tracker")
        )?;
        writeln!(self.output, "{banner}")?;
        writeln!(self.output, "1. Add New Daily Record (Steps, Calories, Sleep)")?;
        writeln!(self.output, "2. View All Historical Records")?;
        writeln!(
            self.output,
            "3. Calculate and View Summary Statistics (Averages/Totals/Min/Max)"
        )?;
        writeln!(self.output, "4. Visualize Step Count (Text Bar Chart)")?;
        writeln!(self.output, "5. Exit and Cleanup")?;
        write!(self.output, "Enter your choice: ")
    }
}

fn parse_number<T>(answer: &str) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    answer
        .parse::<T>()
        .map_err(|e| anyhow::anyhow!("Can't read {answer:?} as a number: {e}"))
}
