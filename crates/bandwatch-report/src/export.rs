//! Tabular export of breach results.
//!
//! Results are laid out as a polars [`DataFrame`] with one row per
//! ticker-date and a block of columns per moving-average window, named after
//! the window length:
//!
//! | column | type |
//! |--------|------|
//! | `Date` | date |
//! | `Ticker` | str |
//! | `Price` | f64 |
//! | `MA{w}` | f64 |
//! | `Delta_MA{w}_Pct` | f64 |
//! | `MA{w}_Breach` | i32 |
//! | `Total_Breach` | i32 |
//! | `Signal` | str, empty when there is no signal |

use bandwatch_signals::breach::TickerSignalRow;
use bandwatch_traits::{BandwatchError, Result};
use bandwatch_traits::types::epoch_days;
use polars::prelude::*;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Name of the date column.
pub const DATE: &str = "Date";
/// Name of the ticker column.
pub const TICKER: &str = "Ticker";
/// Name of the price column.
pub const PRICE: &str = "Price";
/// Name of the net breach column.
pub const TOTAL_BREACH: &str = "Total_Breach";
/// Name of the absolute net breach column of the signals export.
pub const TOTAL_BREACH_ABS: &str = "Total_Breach_ABS";
/// Name of the signal column.
pub const SIGNAL: &str = "Signal";

/// Moving-average column for a window.
pub fn ma_column(window: usize) -> String {
    format!("MA{window}")
}

/// Percentage delta column for a window.
pub fn delta_column(window: usize) -> String {
    format!("Delta_MA{window}_Pct")
}

/// Breach flag column for a window.
pub fn breach_column(window: usize) -> String {
    format!("MA{window}_Breach")
}

/// Window lengths present in the rows, taken from the first row.
fn windows_of(rows: &[TickerSignalRow]) -> Vec<usize> {
    rows.first()
        .map(|r| r.windows.iter().map(|w| w.window).collect())
        .unwrap_or_default()
}

/// Full result table.
///
/// # Errors
///
/// Returns [`BandwatchError::InvalidData`] when rows disagree on their
/// windows, and Polars errors if the frame cannot be built.
pub fn results_frame(rows: &[TickerSignalRow]) -> Result<DataFrame> {
    let windows = windows_of(rows);

    let days: Vec<i32> = rows.iter().map(|r| epoch_days(r.date)).collect();
    let mut columns = vec![
        Column::new(DATE.into(), days).cast(&DataType::Date)?,
        Column::new(
            TICKER.into(),
            rows.iter().map(|r| r.ticker.as_str()).collect::<Vec<_>>(),
        ),
        Column::new(PRICE.into(), rows.iter().map(|r| r.price).collect::<Vec<_>>()),
    ];

    for (idx, &window) in windows.iter().enumerate() {
        let mut ma = Vec::with_capacity(rows.len());
        let mut delta = Vec::with_capacity(rows.len());
        let mut breach = Vec::with_capacity(rows.len());
        for row in rows {
            let reading = row
                .windows
                .get(idx)
                .filter(|r| r.window == window)
                .ok_or_else(|| {
                    BandwatchError::InvalidData(format!(
                        "{} on {} has no MA{window} reading",
                        row.ticker, row.date
                    ))
                })?;
            ma.push(reading.moving_average);
            delta.push(reading.delta_pct);
            breach.push(i32::from(reading.breach));
        }
        columns.push(Column::new(ma_column(window).into(), ma));
        columns.push(Column::new(delta_column(window).into(), delta));
        columns.push(Column::new(breach_column(window).into(), breach));
    }

    columns.push(Column::new(
        TOTAL_BREACH.into(),
        rows.iter().map(|r| r.total_breach).collect::<Vec<_>>(),
    ));
    columns.push(Column::new(
        SIGNAL.into(),
        rows.iter()
            .map(|r| r.signal.map(|s| s.as_str()))
            .collect::<Vec<_>>(),
    ));

    Ok(DataFrame::new(columns)?)
}

/// Columns written by [`write_csv`].
fn export_columns(rows: &[TickerSignalRow]) -> Vec<String> {
    let mut columns = vec![DATE.to_string(), TICKER.to_string(), PRICE.to_string()];
    columns.extend(windows_of(rows).into_iter().map(breach_column));
    columns.push(TOTAL_BREACH.to_string());
    columns.push(SIGNAL.to_string());
    columns
}

/// The export table: date, ticker, price, breach flags, net breach and signal.
///
/// # Errors
///
/// Same as [`results_frame`].
pub fn export_frame(rows: &[TickerSignalRow]) -> Result<DataFrame> {
    Ok(results_frame(rows)?.select(export_columns(rows))?)
}

/// Rows carrying a signal, with an extra `Total_Breach_ABS` column.
///
/// # Errors
///
/// Same as [`results_frame`].
pub fn signals_frame(rows: &[TickerSignalRow]) -> Result<DataFrame> {
    let signalled: Vec<TickerSignalRow> =
        rows.iter().filter(|r| r.signal.is_some()).cloned().collect();

    let mut frame = export_frame(&signalled)?;
    let abs: Vec<i32> = signalled.iter().map(|r| r.total_breach.abs()).collect();
    frame.with_column(Column::new(TOTAL_BREACH_ABS.into(), abs))?;
    Ok(frame)
}

fn write_frame<W: Write>(mut frame: DataFrame, writer: W) -> Result<()> {
    CsvWriter::new(writer)
        .include_header(true)
        .finish(&mut frame)?;
    Ok(())
}

/// Writes the export table as CSV.
///
/// # Errors
///
/// Returns an error if the table cannot be built or written.
pub fn write_csv<W: Write>(rows: &[TickerSignalRow], writer: W) -> Result<()> {
    write_frame(export_frame(rows)?, writer)
}

/// Writes the signals-only table as CSV.
///
/// # Errors
///
/// Returns an error if the table cannot be built or written.
pub fn write_signals_csv<W: Write>(rows: &[TickerSignalRow], writer: W) -> Result<()> {
    write_frame(signals_frame(rows)?, writer)
}

/// Writes the export table to a CSV file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_csv_path(rows: &[TickerSignalRow], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    write_csv(rows, File::create(path)?)?;
    info!(path = %path.display(), rows = rows.len(), "wrote results");
    Ok(())
}

/// Writes the signals-only table to a CSV file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_signals_csv_path(rows: &[TickerSignalRow], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    write_signals_csv(rows, File::create(path)?)?;
    info!(path = %path.display(), "wrote signals");
    Ok(())
}
