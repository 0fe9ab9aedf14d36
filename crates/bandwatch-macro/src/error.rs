//! Error types for the inflation reader.

use thiserror::Error;

/// Errors that can occur when reading an inflation table.
#[derive(Debug, Error)]
pub enum MacroError {
    /// A rate column was not found in the header.
    #[error("Column not found: {0}")]
    MissingColumn(String),

    /// A year/month pair did not form a date.
    #[error("Invalid date on row {row}: {value}")]
    InvalidDate {
        /// Data row, counted from 1 after the header.
        row: usize,
        /// The text that failed to parse.
        value: String,
    },

    /// A rate cell was not a number.
    #[error("Invalid value in {column} on row {row}: {value}")]
    InvalidValue {
        /// Column name as written in the header.
        column: String,
        /// Data row, counted from 1 after the header.
        row: usize,
        /// The text that failed to parse.
        value: String,
    },

    /// The table had no data rows.
    #[error("No data rows in inflation table")]
    NoData,

    /// CSV parsing failed.
    #[error("Failed to parse CSV: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Reading the file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
