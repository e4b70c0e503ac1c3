//! Report generators. Each one walks the entries of a date range, runs the
//! entry aggregator and groups the results differently.

pub mod general;
pub mod period;
pub mod person;

use crate::core::range::DateRange;
use crate::models::entry::DailyLogEntry;
use tracing::warn;

pub use general::{GeneralReport, GeneralSummary, general_report};
pub use period::{PeriodReport, period_report};
pub use person::{PersonFilter, PersonReport, person_report};

/// Entries whose date lies in `range`, sorted by date. Entries without a
/// readable date are skipped.
pub(crate) fn entries_in_range<'a>(
    entries: &'a [DailyLogEntry],
    range: &DateRange,
) -> Vec<&'a DailyLogEntry> {
    let mut selected: Vec<(chrono::NaiveDate, &DailyLogEntry)> = entries
        .iter()
        .filter_map(|e| match e.day() {
            Some(day) => Some((day, e)),
            None => {
                warn!(entry = %e.id, "entry without a valid date skipped");
                None
            }
        })
        .filter(|(day, _)| range.contains(*day))
        .collect();

    selected.sort_by_key(|(day, _)| *day);
    selected.into_iter().map(|(_, e)| e).collect()
}
