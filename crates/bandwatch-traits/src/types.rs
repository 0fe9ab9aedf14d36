//! Common types used throughout the bandwatch workspace.
//!
//! This module defines the date and ticker aliases and [`PriceSeries`], the
//! date-ordered price history of a single ticker that every model consumes.

use crate::{BandwatchError, Result};
use chrono::{Datelike, NaiveDateTime};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A market ticker identifier such as "AAPL" or "BRK-B".
pub type Ticker = String;

/// Days between 0001-01-01 (CE day 1) and the Unix epoch.
const UNIX_EPOCH_FROM_CE: i32 = 719_163;

/// Converts a polars `Date` value (days since the Unix epoch) to a [`Date`].
#[must_use]
pub fn date_from_epoch_days(days: i32) -> Option<Date> {
    Date::from_num_days_from_ce_opt(days + UNIX_EPOCH_FROM_CE)
}

/// Converts a [`Date`] to days since the Unix epoch, the physical
/// representation of a polars `Date` column.
#[must_use]
pub fn epoch_days(date: Date) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_FROM_CE
}

/// Parse a date as written by common price exports.
///
/// Accepts `YYYY-MM-DD`, a timestamp whose first ten characters are
/// `YYYY-MM-DD` (e.g. `2024-01-02 00:00:00`), and `DD/MM/YYYY`.
pub fn parse_date(raw: &str) -> Result<Date> {
    let s = raw.trim();
    if let Ok(date) = Date::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(datetime.date());
    }
    if s.len() > 10
        && s.is_char_boundary(10)
        && let Ok(date) = Date::parse_from_str(&s[..10], "%Y-%m-%d")
    {
        return Ok(date);
    }
    Date::parse_from_str(s, "%d/%m/%Y")
        .map_err(|e| BandwatchError::InvalidDate(format!("'{raw}': {e}")))
}

/// A single observation of a ticker's price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Trading date.
    pub date: Date,
    /// Closing (adjusted) price.
    pub price: f64,
}

impl PricePoint {
    /// Creates a new price point.
    #[must_use]
    pub const fn new(date: Date, price: f64) -> Self {
        Self { date, price }
    }
}

/// Date-ordered price history for one ticker.
///
/// Dates are strictly increasing. Gaps are allowed: a missing trading day is
/// simply absent from the series. Prices are finite and positive.
///
/// # Example
///
/// ```
/// use bandwatch_traits::{Date, PriceSeries};
///
/// let d = |day| Date::from_ymd_opt(2024, 1, day).unwrap();
/// let series = PriceSeries::from_pairs("AAPL", [(d(2), 185.6), (d(3), 184.3)]).unwrap();
/// assert_eq!(series.len(), 2);
/// assert_eq!(series.ticker(), "AAPL");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    ticker: Ticker,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Creates a series, validating ordering and price values.
    ///
    /// # Errors
    ///
    /// Returns [`BandwatchError::InvalidData`] if dates are not strictly
    /// increasing or a price is non-finite or not positive.
    pub fn new(ticker: impl Into<Ticker>, points: Vec<PricePoint>) -> Result<Self> {
        let ticker = ticker.into();

        if let Some(bad) = points.iter().find(|p| !p.price.is_finite() || p.price <= 0.0) {
            return Err(BandwatchError::InvalidData(format!(
                "{ticker}: price {} on {} is not a positive finite number",
                bad.price, bad.date
            )));
        }

        if let Some(pair) = points.windows(2).find(|w| w[0].date >= w[1].date) {
            return Err(BandwatchError::InvalidData(format!(
                "{ticker}: dates must be strictly increasing ({} then {})",
                pair[0].date, pair[1].date
            )));
        }

        Ok(Self { ticker, points })
    }

    /// Creates a series from `(date, price)` pairs.
    ///
    /// # Errors
    ///
    /// Same conditions as [`PriceSeries::new`].
    pub fn from_pairs(
        ticker: impl Into<Ticker>,
        pairs: impl IntoIterator<Item = (Date, f64)>,
    ) -> Result<Self> {
        let points = pairs
            .into_iter()
            .map(|(date, price)| PricePoint::new(date, price))
            .collect();
        Self::new(ticker, points)
    }

    /// Creates a series with no observations.
    #[must_use]
    pub fn empty(ticker: impl Into<Ticker>) -> Self {
        Self {
            ticker: ticker.into(),
            points: Vec::new(),
        }
    }

    /// The ticker this series belongs to.
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Number of observations.
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no observations.
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The observations in date order.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// The most recent observation.
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Prices as an array, in date order.
    pub fn prices(&self) -> Array1<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    /// Restricts the series to `start..=end`; open bounds keep everything on
    /// that side.
    #[must_use]
    pub fn between(&self, start: Option<Date>, end: Option<Date>) -> Self {
        let points = self
            .points
            .iter()
            .filter(|p| start.is_none_or(|s| p.date >= s) && end.is_none_or(|e| p.date <= e))
            .copied()
            .collect();
        Self {
            ticker: self.ticker.clone(),
            points,
        }
    }
}
