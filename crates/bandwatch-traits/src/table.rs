//! Multi-ticker price tables.
//!
//! [`PriceTable`] wraps a long-format Polars `DataFrame` with one row per
//! (date, ticker) observation. Tables can be loaded from CSV in either of the
//! layouts price exports commonly use:
//!
//! - **wide**: a date column followed by one price column per ticker
//!   (`Date,AAPL,MSFT,...`); blank or `NaN` cells are missing days
//! - **long**: `date`, `ticker` (or `symbol`) and `price` (or `close`,
//!   `adj close`) columns, matched case-insensitively
//!
//! A cell that cannot be read as a price (or, in the long layout, as a date)
//! is held against its ticker: the table still loads and only
//! [`PriceTable::series`] for that ticker fails.

use crate::types::{
    Date, PricePoint, PriceSeries, Ticker, date_from_epoch_days, epoch_days, parse_date,
};
use crate::{BandwatchError, Result};
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, warn};

/// Name of the date column in the normalized frame.
pub const DATE_COLUMN: &str = "date";
/// Name of the ticker column in the normalized frame.
pub const TICKER_COLUMN: &str = "ticker";
/// Name of the price column in the normalized frame.
pub const PRICE_COLUMN: &str = "price";

const TICKER_ALIASES: &[&str] = &["ticker", "symbol"];
const PRICE_ALIASES: &[&str] = &["price", "adj close", "adj_close", "close"];

/// A dates x tickers price table.
///
/// # Schema
///
/// - `date`: Polars `Date`
/// - `ticker`: string
/// - `price`: `f64`
///
/// The ticker list is kept separately so that a ticker whose column held no
/// prices at all still resolves to an empty [`PriceSeries`] rather than a
/// missing ticker. Tickers with an unreadable cell are listed too, together
/// with the first bad cell seen.
///
/// # Example
///
/// ```no_run
/// use bandwatch_traits::PriceTable;
///
/// let table = PriceTable::from_csv_path("prices.csv").unwrap();
/// for ticker in table.tickers() {
///     let series = table.series(ticker).unwrap();
///     println!("{ticker}: {} rows", series.len());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PriceTable {
    data: DataFrame,
    tickers: Vec<Ticker>,
    rejected: Vec<(Ticker, BadCell)>,
}

/// First unreadable cell of a ticker.
#[derive(Debug, Clone, PartialEq, Eq)]
enum BadCell {
    Price(String),
    Date(String),
}

impl BadCell {
    fn to_error(&self, ticker: &str) -> BandwatchError {
        match self {
            Self::Price(cell) => BandwatchError::InvalidData(format!("{ticker}: {cell}")),
            Self::Date(cell) => BandwatchError::InvalidDate(format!("{ticker}: {cell}")),
        }
    }
}

impl PriceTable {
    /// Wraps an already normalized frame.
    ///
    /// # Errors
    ///
    /// Returns [`BandwatchError::MissingColumn`] if any of `date`, `ticker` or
    /// `price` is absent, or a Polars error if a column has the wrong type.
    pub fn from_frame(data: DataFrame) -> Result<Self> {
        for col in [DATE_COLUMN, TICKER_COLUMN, PRICE_COLUMN] {
            if data.column(col).is_err() {
                return Err(BandwatchError::MissingColumn(col.to_string()));
            }
        }

        data.column(PRICE_COLUMN)?.as_materialized_series().f64()?;
        data.column(DATE_COLUMN)?.as_materialized_series().date()?;

        let mut tickers: Vec<Ticker> = Vec::new();
        for ticker in data
            .column(TICKER_COLUMN)?
            .as_materialized_series()
            .str()?
            .into_iter()
            .flatten()
        {
            if !tickers.iter().any(|t| t == ticker) {
                tickers.push(ticker.to_string());
            }
        }

        Ok(Self {
            data,
            tickers,
            rejected: Vec::new(),
        })
    }

    /// Builds a table from individual series.
    ///
    /// # Errors
    ///
    /// Returns a Polars error if the frame cannot be assembled.
    pub fn from_series(series: &[PriceSeries]) -> Result<Self> {
        let mut builder = FrameBuilder::default();
        for s in series {
            builder.declare(s.ticker());
            for point in s.points() {
                builder.push(point.date, s.ticker(), point.price);
            }
        }
        builder.finish()
    }

    /// Loads a table from a CSV file, detecting the layout from its header.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, and the errors of
    /// [`PriceTable::from_csv_bytes`] otherwise.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        debug!(path = %path.display(), bytes = bytes.len(), "read price file");
        Self::from_csv_bytes(bytes)
    }

    /// Loads a table from in-memory CSV content.
    ///
    /// # Errors
    ///
    /// Returns [`BandwatchError::InvalidDate`] for an unparseable cell in the
    /// shared date column of a wide table, [`BandwatchError::InvalidData`] for
    /// a header with no price columns, and Polars errors for malformed CSV.
    /// Bad price cells, and bad date cells of a long table, only fail the
    /// ticker they belong to.
    pub fn from_csv_bytes(bytes: Vec<u8>) -> Result<Self> {
        // Every column is read as text; dates and prices are parsed here so
        // that both layouts go through the same cleaning rules.
        let raw = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;

        let names: Vec<String> = raw
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();

        let find = |aliases: &[&str]| {
            names
                .iter()
                .position(|n| aliases.contains(&n.trim().to_lowercase().as_str()))
        };

        match (find(TICKER_ALIASES), find(PRICE_ALIASES)) {
            (Some(ticker_idx), Some(price_idx)) => {
                let date_idx = find(&["date"]).unwrap_or(0);
                Self::from_long(&raw, date_idx, ticker_idx, price_idx)
            }
            (Some(_), None) => Err(BandwatchError::MissingColumn(PRICE_COLUMN.to_string())),
            _ => Self::from_wide(&raw),
        }
    }

    fn from_long(
        raw: &DataFrame,
        date_idx: usize,
        ticker_idx: usize,
        price_idx: usize,
    ) -> Result<Self> {
        let columns = raw.get_columns();
        let dates = text_values(&columns[date_idx])?;
        let tickers = text_values(&columns[ticker_idx])?;
        let prices = text_values(&columns[price_idx])?;

        let mut builder = FrameBuilder::default();
        for ((date, ticker), price) in dates.iter().zip(&tickers).zip(&prices) {
            let Some(ticker) = ticker.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
                continue;
            };
            builder.declare(ticker);
            let Some(date) = date.as_deref() else {
                continue;
            };
            let price = match parse_price(price.as_deref()) {
                Ok(Some(price)) => price,
                Ok(None) => continue,
                Err(bad) => {
                    builder.reject(ticker, bad);
                    continue;
                }
            };
            match parse_date(date) {
                Ok(date) => builder.push(date, ticker, price),
                Err(_) => builder.reject(ticker, BadCell::Date(format!("bad date '{date}'"))),
            }
        }
        builder.finish()
    }

    fn from_wide(raw: &DataFrame) -> Result<Self> {
        let columns = raw.get_columns();
        if columns.len() < 2 {
            return Err(BandwatchError::InvalidData(
                "price table needs a date column and at least one ticker column".to_string(),
            ));
        }

        let dates = text_values(&columns[0])?
            .into_iter()
            .map(|d| d.as_deref().map(parse_date).transpose())
            .collect::<Result<Vec<Option<Date>>>>()?;

        let mut builder = FrameBuilder::default();
        for column in &columns[1..] {
            let ticker = column.name().as_str().trim().to_string();
            builder.declare(&ticker);
            for (date, cell) in dates.iter().zip(text_values(column)?) {
                let Some(date) = date else { continue };
                match parse_price(cell.as_deref()) {
                    Ok(Some(price)) => builder.push(*date, &ticker, price),
                    Ok(None) => {}
                    Err(bad) => builder.reject(&ticker, bad),
                }
            }
        }
        builder.finish()
    }

    /// Returns a reference to the underlying DataFrame.
    pub const fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Consumes self and returns the underlying DataFrame.
    pub fn into_inner(self) -> DataFrame {
        self.data
    }

    /// Number of (date, ticker) observations.
    pub fn len(&self) -> usize {
        self.data.height()
    }

    /// Whether the table holds no observations.
    pub fn is_empty(&self) -> bool {
        self.data.height() == 0
    }

    /// Tickers in the order they first appear.
    pub fn tickers(&self) -> &[Ticker] {
        &self.tickers
    }

    /// Tickers holding an unreadable cell.
    pub fn rejected(&self) -> impl Iterator<Item = &str> {
        self.rejected.iter().map(|(ticker, _)| ticker.as_str())
    }

    /// Whether the table knows about `ticker`.
    pub fn contains(&self, ticker: &str) -> bool {
        self.tickers.iter().any(|t| t == ticker)
    }

    /// Extracts one ticker's date-sorted history.
    ///
    /// # Errors
    ///
    /// Returns [`BandwatchError::MissingTicker`] if the ticker is not part of
    /// the table, [`BandwatchError::InvalidData`] if one of its price cells
    /// was unreadable or its observations do not form a valid series
    /// (duplicate dates, non-positive prices), and
    /// [`BandwatchError::InvalidDate`] for an unreadable date in a long table.
    pub fn series(&self, ticker: &str) -> Result<PriceSeries> {
        if !self.contains(ticker) {
            return Err(BandwatchError::MissingTicker(ticker.to_string()));
        }
        if let Some((_, bad)) = self.rejected.iter().find(|(t, _)| t == ticker) {
            return Err(bad.to_error(ticker));
        }

        let mask = self
            .data
            .column(TICKER_COLUMN)?
            .as_materialized_series()
            .str()?
            .equal(ticker);

        let filtered = self.data.filter(&mask)?;
        let sorted = filtered.sort([DATE_COLUMN], Default::default())?;

        let days = sorted.column(DATE_COLUMN)?.cast(&DataType::Int32)?;
        let days = days.as_materialized_series().i32()?;
        let prices = sorted.column(PRICE_COLUMN)?.as_materialized_series().f64()?;

        let mut points = Vec::with_capacity(sorted.height());
        for (day, price) in days.into_iter().zip(prices.into_iter()) {
            let (Some(day), Some(price)) = (day, price) else {
                continue;
            };
            let date = date_from_epoch_days(day)
                .ok_or_else(|| BandwatchError::InvalidDate(format!("day offset {day}")))?;
            points.push(PricePoint::new(date, price));
        }

        PriceSeries::new(ticker, points)
    }
}

impl AsRef<DataFrame> for PriceTable {
    fn as_ref(&self) -> &DataFrame {
        &self.data
    }
}

/// Accumulates normalized rows and the ticker list.
#[derive(Debug, Default)]
struct FrameBuilder {
    tickers: Vec<Ticker>,
    days: Vec<i32>,
    row_tickers: Vec<String>,
    prices: Vec<f64>,
    rejected: Vec<(Ticker, BadCell)>,
}

impl FrameBuilder {
    fn declare(&mut self, ticker: &str) {
        if !self.tickers.iter().any(|t| t == ticker) {
            self.tickers.push(ticker.to_string());
        }
    }

    /// Keeps the first bad cell of each ticker.
    fn reject(&mut self, ticker: &str, bad: BadCell) {
        if !self.rejected.iter().any(|(t, _)| t == ticker) {
            warn!(ticker, ?bad, "unreadable cell, ticker will fail");
            self.rejected.push((ticker.to_string(), bad));
        }
    }

    fn push(&mut self, date: Date, ticker: &str, price: f64) {
        self.days.push(epoch_days(date));
        self.row_tickers.push(ticker.to_string());
        self.prices.push(price);
    }

    fn finish(self) -> Result<PriceTable> {
        let date = Column::new(DATE_COLUMN.into(), self.days).cast(&DataType::Date)?;
        let data = DataFrame::new(vec![
            date,
            Column::new(TICKER_COLUMN.into(), self.row_tickers),
            Column::new(PRICE_COLUMN.into(), self.prices),
        ])?;
        debug!(rows = data.height(), tickers = self.tickers.len(), "built price table");
        Ok(PriceTable {
            data,
            tickers: self.tickers,
            rejected: self.rejected,
        })
    }
}

fn text_values(column: &Column) -> Result<Vec<Option<String>>> {
    Ok(column
        .as_materialized_series()
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

/// Blank, `NaN` and `null` cells are missing observations. Infinite values
/// are bad cells, like text.
fn parse_price(cell: Option<&str>) -> std::result::Result<Option<f64>, BadCell> {
    let Some(cell) = cell.map(str::trim) else {
        return Ok(None);
    };
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") || cell.eq_ignore_ascii_case("null") {
        return Ok(None);
    }
    match cell.parse::<f64>() {
        Ok(price) if price.is_finite() => Ok(Some(price)),
        _ => Err(BadCell::Price(format!("bad price '{cell}'"))),
    }
}
