//! CSV report files

use crate::output::Table;
use chrono::{DateTime, Local};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Timestamp embedded in report file names
pub const REPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// File name for a report generated at `at`
pub fn report_file_name(report_name: &str, at: DateTime<Local>) -> String {
    format!("{}_{}.csv", report_name, at.format(REPORT_TIMESTAMP_FORMAT))
}

/// Formats a table as CSV
///
/// Every field is quoted, embedded quotes are doubled and lines end with `\n`.
pub fn format_csv(table: &Table) -> String {
    let mut text = String::new();
    for row in table.iter() {
        let fields: Vec<String> = row
            .iter()
            .map(|field| format!("\"{}\"", field.replace('"', "\"\"")))
            .collect();
        text.push_str(&fields.join(","));
        text.push('\n');
    }
    text
}

/// Writes `table` to `<results_dir>/<report_name>_<timestamp>.csv`
///
/// The results directory is created when missing.
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written file
/// * `Err(io::Error)` - Directory creation or write failed
pub fn write_csv_report(
    table: &Table,
    results_dir: &Path,
    report_name: &str,
    at: DateTime<Local>,
) -> io::Result<PathBuf> {
    std::fs::create_dir_all(results_dir)?;
    let path = results_dir.join(report_file_name(report_name, at));

    let mut file = File::create(&path)?;
    file.write_all(format_csv(table).as_bytes())?;
    file.flush()?;

    Ok(path)
}
