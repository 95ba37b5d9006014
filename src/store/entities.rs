use std::{fmt::Display, str::FromStr};

use anyhow::{anyhow, Context};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::time::date_to_entry_name;

/// Length of a `YYYY-MM-DD` date.
pub const DATE_LENGTH: usize = 10;

/// Day label of an entry in `YYYY-MM-DD` form. Only the shape is checked, so `2025-02-31` is
/// accepted. Anything longer or shorter is rejected instead of being cut to fit.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntryDate(Box<str>);

impl EntryDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for EntryDate {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != DATE_LENGTH {
            return Err(anyhow!(
                "Date {s:?} should be exactly {DATE_LENGTH} characters (YYYY-MM-DD)"
            ));
        }
        let well_formed = s.char_indices().all(|(i, c)| match i {
            4 | 7 => c == '-',
            _ => c.is_ascii_digit(),
        });
        if !well_formed {
            return Err(anyhow!("Date {s:?} doesn't match YYYY-MM-DD"));
        }
        Ok(Self(s.into()))
    }
}

/// Fails for years that don't fit into four digits, chrono prints those as `+10000-01-01`.
impl TryFrom<NaiveDate> for EntryDate {
    type Error = anyhow::Error;

    fn try_from(value: NaiveDate) -> Result<Self, Self::Error> {
        date_to_entry_name(value).parse()
    }
}

impl TryFrom<String> for EntryDate {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EntryDate> for String {
    fn from(value: EntryDate) -> Self {
        value.0.into()
    }
}

impl Display for EntryDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

/// Health metrics recorded for a single day.
#[derive(PartialEq, Debug, Clone, Serialize)]
pub struct MetricEntry {
    pub date: EntryDate,
    pub steps: i32,
    pub calories_burned: i32,
    pub sleep_hours: f64,
}

impl MetricEntry {
    pub fn new(date: EntryDate, steps: i32, calories_burned: i32, sleep_hours: f64) -> Self {
        Self {
            date,
            steps,
            calories_burned,
            sleep_hours,
        }
    }
}

/// Parses `DATE,STEPS,CALORIES,SLEEP`, which is how entries are passed on the command line.
impl FromStr for MetricEntry {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = s.split(',').map(str::trim).collect::<Vec<_>>();
        let [date, steps, calories, sleep] = fields[..] else {
            return Err(anyhow!(
                "Expected DATE,STEPS,CALORIES,SLEEP but got {} fields in {s:?}",
                fields.len()
            ));
        };
        Ok(Self {
            date: date.parse()?,
            steps: steps
                .parse()
                .with_context(|| format!("Invalid step count {steps:?}"))?,
            calories_burned: calories
                .parse()
                .with_context(|| format!("Invalid calories {calories:?}"))?,
            sleep_hours: sleep
                .parse()
                .with_context(|| format!("Invalid sleep hours {sleep:?}"))?,
        })
    }
}

/// The three days every new session starts with unless asked not to.
pub fn fixture_entries() -> Vec<MetricEntry> {
    [
        ("2025-01-01", 12500, 2500, 7.5),
        ("2025-01-02", 7800, 1800, 6.0),
        ("2025-01-03", 15200, 3000, 8.2),
    ]
    .into_iter()
    .map(|(date, steps, calories, sleep)| MetricEntry {
        date: EntryDate(date.into()),
        steps,
        calories_burned: calories,
        sleep_hours: sleep,
    })
    .collect()
}
