//! Output module for presenting report tables
//!
//! This module handles:
//! - Plain space-joined rows on stdout (the default)
//! - Bordered, aligned tables on stdout (`pretty`)
//! - Timestamped CSV reports under the results directory (`file`)

mod csv;
mod pretty;
mod table;

pub use self::csv::{format_csv, report_file_name, write_csv_report, REPORT_TIMESTAMP_FORMAT};
pub use pretty::format_pretty;
pub use table::Table;

use crate::ScrapeError;
use chrono::Local;
use clap::ValueEnum;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Optional presentation selected with `--output`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Bordered table on stdout
    Pretty,
    /// CSV file under the results directory
    File,
}

/// Renders `table` to stdout or a report file
///
/// # Arguments
///
/// * `table` - The report table, header first
/// * `format` - `None` prints plain rows
/// * `report_name` - Used in the report file name
/// * `results_dir` - Where `file` reports are written
///
/// # Returns
///
/// * `Ok(Some(path))` - A report file was written
/// * `Ok(None)` - The table went to stdout
/// * `Err(ScrapeError)` - Writing failed
pub fn render(
    table: &Table,
    format: Option<OutputFormat>,
    report_name: &str,
    results_dir: &Path,
) -> Result<Option<PathBuf>, ScrapeError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render_to(table, format, report_name, results_dir, &mut out)
}

/// Same as [`render`] with an explicit stdout replacement
pub fn render_to<W: Write>(
    table: &Table,
    format: Option<OutputFormat>,
    report_name: &str,
    results_dir: &Path,
    out: &mut W,
) -> Result<Option<PathBuf>, ScrapeError> {
    match format {
        Some(OutputFormat::Pretty) => {
            out.write_all(format_pretty(table).as_bytes())?;
            out.flush()?;
            Ok(None)
        }
        Some(OutputFormat::File) => {
            let path = write_csv_report(table, results_dir, report_name, Local::now())?;
            tracing::info!("Results saved to file: {}", path.display());
            Ok(Some(path))
        }
        None => {
            out.write_all(format_plain(table).as_bytes())?;
            out.flush()?;
            Ok(None)
        }
    }
}

/// One line per row, values joined by a single space
pub fn format_plain(table: &Table) -> String {
    let mut text = String::new();
    for row in table.iter() {
        text.push_str(&row.join(" "));
        text.push('\n');
    }
    text
}
