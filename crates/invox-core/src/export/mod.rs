//! CSV export of a located line-item table.
//!
//! The analysis service tends to insert line breaks inside cell values for
//! no particular reason, which makes the raw CSV hard to read. The exporter
//! flattens those out and appends a "Date" column carrying the document
//! date, so each exported row is self-describing.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::ExportError;
use crate::models::document::Table;

/// Label of the appended date column.
pub const DATE_COLUMN: &str = "Date";

/// Output rendering of the document date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Remove line breaks from a cell value.
///
/// Cell text arrives with the service's escaping already applied, so line
/// breaks show up as the literal two-character sequences `\n` and `\r`.
/// Raw control characters are flattened too, in case a value slips through
/// unescaped.
fn clean_cell(value: &str) -> String {
    value
        .replace("\\n", " ")
        .replace("\\r", " ")
        .replace(['\n', '\r'], " ")
}

/// Build the output rows for a table: cleaned cells plus the appended date
/// column.
///
/// The grid is materialized without header splitting so row 0 goes through
/// the same cleaning pass as the data rows; the cost is assembling the new
/// column's header cell by hand. Row 0 gets the literal [`DATE_COLUMN`]
/// label, every other row the date formatted as [`DATE_FORMAT`], or the
/// empty string when no date was located.
pub fn build_output_rows(
    table: &Table,
    date: Option<NaiveDate>,
) -> Result<Vec<Vec<String>>, ExportError> {
    let grid = table.to_grid(false);
    if grid.rows.is_empty() {
        return Err(ExportError::EmptyTable);
    }

    let date_value = date
        .map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default();

    let rows = grid
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut out: Vec<String> = row.iter().map(|cell| clean_cell(cell)).collect();
            out.push(if i == 0 {
                DATE_COLUMN.to_string()
            } else {
                date_value.clone()
            });
            out
        })
        .collect();

    Ok(rows)
}

/// Export a table as CSV to an arbitrary writer.
///
/// Row 0 IS the header and is written literally; no extra header line and no
/// index column are emitted. Output is deterministic for a given
/// table/date pair.
pub fn export_table<W: Write>(
    table: &Table,
    date: Option<NaiveDate>,
    writer: W,
) -> Result<(), ExportError> {
    let rows = build_output_rows(table, date)?;

    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in &rows {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;

    debug!(rows = rows.len(), "exported table");
    Ok(())
}

/// Export a table as CSV to a file path.
pub fn export_table_to_path(
    table: &Table,
    date: Option<NaiveDate>,
    path: &Path,
) -> Result<(), ExportError> {
    let file = File::create(path)?;
    export_table(table, date, BufWriter::new(file))
}
