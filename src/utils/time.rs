use chrono::{Local, NaiveDate};

use crate::store::entities::EntryDate;

/// This is the standard way of converting a date to a string in healthlog.
pub fn date_to_entry_name(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Local date of today, used as the default date for new entries. [None] only if the local clock
/// is past year 9999.
pub fn today() -> Option<EntryDate> {
    EntryDate::try_from(Local::now().date_naive()).ok()
}
