use crate::core::range::DateRange;
use crate::core::report::general_report;
use crate::db::Storage;
use crate::db::log::audit;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::xlsx::export_xlsx;
use crate::models::entry::DailyLogEntry;
use crate::models::settings::{AggregationConfig, app_name};
use crate::ui::messages::{info, success, warning};
use std::path::Path;

/// High-level export of the general report.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the general report of `range` to `file`.
    ///
    /// - `file` must be an absolute path
    /// - `range`: `None`, `"all"` or a range expression (`YYYY`, `YYYY-MM`,
    ///   `YYYY-MM-DD`, or two of the same form joined by `:`)
    ///
    /// Returns `false` when nothing was written because the range is empty.
    pub fn export(
        store: &mut dyn Storage,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        force: bool,
        username: &str,
    ) -> AppResult<bool> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::InvalidInput(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let range = match range {
            Some(r) if !r.trim().eq_ignore_ascii_case("all") => Some(DateRange::parse(r)?),
            _ => None,
        };

        let entries = store.get_all_entries(range.as_ref())?;
        let range = match range.or_else(|| span_of(&entries)) {
            Some(r) => r,
            None => {
                warning("No entries found for selected range.");
                return Ok(false);
            }
        };

        let settings = store.all_settings()?;
        let cfg = AggregationConfig::from_settings(&settings);
        let report = general_report(&entries, &range, &cfg);

        if report.daily_breakdown.is_empty() {
            warning("No entries found for selected range.");
            return Ok(false);
        }

        ensure_writable(path, force)?;

        info(format!("Writing {format} for {range} to {}", path.display()));
        match format {
            ExportFormat::Csv => export_csv(&report, path)?,
            ExportFormat::Json => export_json(&report, path)?,
            ExportFormat::Xlsx => export_xlsx(&report, path, &app_name(&settings))?,
        }
        success(format!("{format} export completed: {}", path.display()));

        audit(
            store,
            username,
            "export",
            &format!("{format} {range} -> {}", path.display()),
        )?;
        Ok(true)
    }
}

/// First to last date of the given entries.
fn span_of(entries: &[DailyLogEntry]) -> Option<DateRange> {
    let days: Vec<_> = entries.iter().filter_map(|e| e.day()).collect();
    let start = days.iter().min()?;
    let end = days.iter().max()?;
    DateRange::new(*start, *end).ok()
}
