//! UK consumer price inflation tables for bandwatch.
//!
//! This crate reads the CPI time series export published by the Office for
//! National Statistics into an [`InflationSeries`] of monthly 1-month and
//! 12-month rates.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bandwatch_macro::read_inflation_csv;
//!
//! let series = read_inflation_csv("data/cpi.csv")?;
//! if let Some(latest) = series.latest() {
//!     println!("{}: {:.1}%", latest.date.format("%b %Y"), latest.twelve_month);
//! }
//! ```

mod error;
mod reader;
mod types;

pub use error::MacroError;
pub use reader::{
    ONE_MONTH_COLUMN, PREAMBLE_LINES, TWELVE_MONTH_COLUMN, parse_inflation_csv,
    read_inflation_csv,
};
pub use types::*;

/// Result type for inflation table operations.
pub type Result<T> = std::result::Result<T, MacroError>;
