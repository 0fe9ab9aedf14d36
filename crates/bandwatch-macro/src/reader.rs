//! Reader for ONS consumer price inflation CSV exports.
//!
//! The export starts with a short preamble, has one row per month with the
//! year written only on its first month, and ends with a footer row. Header
//! cells may contain line breaks.

use crate::types::{InflationRecord, InflationSeries};
use crate::{MacroError, Result};
use chrono::NaiveDate;
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Preamble lines before the header.
pub const PREAMBLE_LINES: usize = 3;

/// Header of the month-on-month rate column.
pub const ONE_MONTH_COLUMN: &str = "CPI 1- month rate";

/// Header of the year-on-year rate column.
pub const TWELVE_MONTH_COLUMN: &str = "CPI 12- month rate";

/// Header text with whitespace (line breaks included) removed, lowercased.
fn normalize(header: &str) -> String {
    header
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Cells of a column as text, blanks carried down from the row above.
fn forward_filled(column: &Column) -> Result<Vec<Option<String>>> {
    let mut last: Option<String> = None;
    Ok(column
        .as_materialized_series()
        .str()?
        .into_iter()
        .map(|cell| {
            if let Some(cell) = cell.map(str::trim).filter(|c| !c.is_empty()) {
                last = Some(cell.to_string());
            }
            last.clone()
        })
        .collect())
}

fn find_column<'a>(columns: &'a [Column], header: &str) -> Result<&'a Column> {
    let wanted = normalize(header);
    columns
        .iter()
        .find(|c| normalize(c.name().as_str()) == wanted)
        .ok_or_else(|| MacroError::MissingColumn(header.to_string()))
}

fn parse_rate(cell: Option<&str>, column: &str, row: usize) -> Result<f64> {
    let text = cell.unwrap_or_default();
    text.parse().map_err(|_| MacroError::InvalidValue {
        column: column.to_string(),
        row,
        value: text.to_string(),
    })
}

/// Parses an inflation table from CSV bytes.
///
/// The first column holds the year and the second the month abbreviation;
/// the rate columns are found by header, ignoring whitespace and case. The
/// final row is a footer and is dropped.
///
/// # Errors
///
/// Returns [`MacroError::MissingColumn`] when a rate column is absent,
/// [`MacroError::InvalidDate`] or [`MacroError::InvalidValue`] for a bad
/// cell, and [`MacroError::NoData`] when only the footer row is present.
pub fn parse_inflation_csv(bytes: Vec<u8>) -> Result<InflationSeries> {
    let raw = CsvReadOptions::default()
        .with_has_header(true)
        .with_skip_rows(PREAMBLE_LINES)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|opts| opts.with_truncate_ragged_lines(true))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()?;

    let columns = raw.get_columns();
    if columns.len() < 2 {
        return Err(MacroError::MissingColumn("year and month".to_string()));
    }

    let years = forward_filled(&columns[0])?;
    let months = forward_filled(&columns[1])?;
    let one_month = forward_filled(find_column(columns, ONE_MONTH_COLUMN)?)?;
    let twelve_month = forward_filled(find_column(columns, TWELVE_MONTH_COLUMN)?)?;

    let data_rows = raw.height().saturating_sub(1);
    if data_rows == 0 {
        return Err(MacroError::NoData);
    }

    let mut records = Vec::with_capacity(data_rows);
    for i in 0..data_rows {
        let row = i + 1;
        let year = years[i].as_deref().unwrap_or_default();
        let month: String = months[i]
            .as_deref()
            .unwrap_or_default()
            .chars()
            .filter(|c| *c != ' ')
            .collect();
        let text = format!("1 {month} {year}");
        let date = NaiveDate::parse_from_str(&text, "%d %b %Y")
            .map_err(|_| MacroError::InvalidDate { row, value: text })?;

        records.push(InflationRecord {
            date,
            one_month: parse_rate(one_month[i].as_deref(), ONE_MONTH_COLUMN, row)?,
            twelve_month: parse_rate(twelve_month[i].as_deref(), TWELVE_MONTH_COLUMN, row)?,
        });
    }

    debug!(months = records.len(), "parsed inflation table");
    Ok(InflationSeries::new(records))
}

/// Reads an inflation table from a CSV file.
///
/// # Errors
///
/// Returns [`MacroError::Io`] if the file cannot be read, otherwise as
/// [`parse_inflation_csv`].
pub fn read_inflation_csv(path: impl AsRef<Path>) -> Result<InflationSeries> {
    parse_inflation_csv(std::fs::read(path)?)
}
