// src/export/json_csv.rs

use crate::core::report::GeneralReport;
use crate::errors::{AppError, AppResult};
use crate::export::model::{get_headers, report_to_table};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export the whole report, pretty-printed.
pub(crate) fn export_json(report: &GeneralReport, path: &Path) -> AppResult<()> {
    let json_data = serde_json::to_string_pretty(report)?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    Ok(())
}

/// Export the daily rows plus the totals row.
pub(crate) fn export_csv(report: &GeneralReport, path: &Path) -> AppResult<()> {
    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::Export(format!("CSV open error: {e}")))?;

    wtr.write_record(get_headers())
        .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    for row in report_to_table(report) {
        wtr.write_record(&row)
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }

    wtr.flush()?;

    Ok(())
}
