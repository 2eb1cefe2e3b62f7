//! Bordered text tables

use crate::output::Table;
use unicode_width::UnicodeWidthStr;

/// Formats a table with `+---+` rules and left-aligned `| cell |` columns
///
/// Rows keep their input order; the header is separated by a rule.
pub fn format_pretty(table: &Table) -> String {
    let mut widths: Vec<usize> = vec![0; table.width()];
    for row in table.iter() {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let rule = {
        let mut line = String::from("+");
        for width in &widths {
            line.push_str(&"-".repeat(width + 2));
            line.push('+');
        }
        line.push('\n');
        line
    };

    let format_row = |row: &[String]| {
        let mut line = String::from("|");
        for (cell, width) in row.iter().zip(&widths) {
            line.push(' ');
            line.push_str(cell);
            line.push_str(&" ".repeat(width - cell.width()));
            line.push_str(" |");
        }
        line.push('\n');
        line
    };

    let mut text = String::new();
    text.push_str(&rule);
    text.push_str(&format_row(table.header()));
    text.push_str(&rule);
    for row in table.rows() {
        text.push_str(&format_row(row));
    }
    text.push_str(&rule);
    text
}
