//! Single-ticker technical scorecard.
//!
//! Each day collects votes from a handful of conditions: the distance of the
//! price from several strict rolling means, plus the price change over a fixed
//! lag, which counts with a larger weight. A condition votes SELL when it is
//! at or above the uptick and BUY when it is at or below minus the downtick.
//! Days whose vote count on either side reaches the tolerance are "big moves".

use crate::breach::Signal;
use bandwatch_traits::stats::{pct_change, rolling_mean};
use bandwatch_traits::{BandwatchError, Date, PriceSeries, Result, SeriesModel, Ticker};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Parameters of the scorecard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorecardConfig {
    /// Rolling mean windows whose distance votes once each.
    pub windows: Vec<usize>,

    /// Lag of the price change condition, in rows (default: 30)
    pub change_lag: usize,

    /// Votes cast by the price change condition (default: 2)
    pub change_weight: u32,

    /// Fraction at or above which a condition votes SELL (default: 0.01)
    pub uptick: f64,

    /// Fraction at or below whose negation a condition votes BUY (default: 0.075)
    pub downtick: f64,

    /// Votes on one side that make a big move (default: 5)
    pub tolerance: u32,
}

impl Default for ScorecardConfig {
    fn default() -> Self {
        Self {
            windows: vec![5, 30, 90, 180],
            change_lag: 30,
            change_weight: 2,
            uptick: 0.01,
            downtick: 0.075,
            tolerance: 5,
        }
    }
}

impl ScorecardConfig {
    /// Set the big move tolerance.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: u32) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Most votes a single side can collect in one day.
    #[must_use]
    pub fn max_votes(&self) -> u32 {
        u32::try_from(self.windows.len())
            .unwrap_or(u32::MAX)
            .saturating_add(self.change_weight)
    }

    /// Longest history any condition needs.
    #[must_use]
    pub fn lookback(&self) -> usize {
        self.windows
            .iter()
            .copied()
            .max()
            .unwrap_or(0)
            .max(self.change_lag + 1)
    }

    /// Checks the parameters.
    ///
    /// # Errors
    ///
    /// Returns [`BandwatchError::InvalidConfig`] when a window or the lag is
    /// zero, a tick is not a positive finite fraction, or the tolerance
    /// exceeds [`max_votes`](Self::max_votes).
    pub fn validate(&self) -> Result<()> {
        if self.windows.contains(&0) {
            return Err(BandwatchError::InvalidConfig(
                "scorecard windows must be positive".to_string(),
            ));
        }
        if self.change_lag == 0 {
            return Err(BandwatchError::InvalidConfig(
                "change lag must be positive".to_string(),
            ));
        }
        for (name, tick) in [("uptick", self.uptick), ("downtick", self.downtick)] {
            if !tick.is_finite() || tick <= 0.0 {
                return Err(BandwatchError::InvalidConfig(format!(
                    "{name} must be a positive fraction, got {tick}"
                )));
            }
        }
        if self.tolerance > self.max_votes() {
            return Err(BandwatchError::InvalidConfig(format!(
                "tolerance {} exceeds the {} available votes",
                self.tolerance,
                self.max_votes()
            )));
        }
        Ok(())
    }
}

/// Distance of the price from one rolling mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowDistance {
    /// Window length in rows.
    pub window: usize,
    /// Rolling mean, undefined during warm-up.
    pub moving_average: Option<f64>,
    /// `(price - ma) / ma`, undefined during warm-up.
    pub distance: Option<f64>,
}

/// Scorecard for one ticker on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorecardRow {
    /// Ticker symbol.
    pub ticker: Ticker,
    /// Trading date.
    pub date: Date,
    /// Price on that date.
    pub price: f64,
    /// One distance per configured window.
    pub distances: Vec<WindowDistance>,
    /// Price change over the configured lag, as a fraction.
    pub change: Option<f64>,
    /// Conditions at or below minus the downtick.
    pub buy_votes: u32,
    /// Conditions at or above the uptick.
    pub sell_votes: u32,
    /// `sell_votes - buy_votes`.
    pub combined: i32,
    /// `combined` one row earlier.
    pub combined_prev: Option<i32>,
    /// `combined` two rows earlier.
    pub combined_prev2: Option<i32>,
}

impl ScorecardRow {
    /// Whether either side reached `tolerance`.
    #[must_use]
    pub const fn is_big_move(&self, tolerance: u32) -> bool {
        self.buy_votes >= tolerance || self.sell_votes >= tolerance
    }

    /// Direction of a big move: BUY wins when both sides qualify.
    #[must_use]
    pub const fn direction(&self, tolerance: u32) -> Option<Signal> {
        if self.buy_votes >= tolerance {
            Some(Signal::Buy)
        } else if self.sell_votes >= tolerance {
            Some(Signal::Sell)
        } else {
            None
        }
    }
}

/// Scores every day of a ticker's history.
///
/// # Errors
///
/// Returns [`BandwatchError::InvalidConfig`] for an invalid configuration and
/// [`BandwatchError::EmptySeries`] when `series` has no rows.
pub fn score_series(
    series: &PriceSeries,
    config: &ScorecardConfig,
) -> Result<Vec<ScorecardRow>> {
    config.validate()?;

    if series.is_empty() {
        return Err(BandwatchError::EmptySeries(series.ticker().to_string()));
    }

    let prices = series.prices();
    let means: Vec<(usize, Vec<Option<f64>>)> = config
        .windows
        .iter()
        .map(|&w| (w, rolling_mean(&prices, w)))
        .collect();
    let changes = pct_change(&prices, config.change_lag);

    let mut rows: Vec<ScorecardRow> = series
        .points()
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let distances: Vec<WindowDistance> = means
                .iter()
                .map(|(window, mean)| WindowDistance {
                    window: *window,
                    moving_average: mean[i],
                    distance: mean[i].map(|ma| (point.price - ma) / ma),
                })
                .collect();
            let change = changes[i];

            let mut buy_votes = 0;
            let mut sell_votes = 0;
            let conditions = distances
                .iter()
                .map(|d| (d.distance, 1))
                .chain(std::iter::once((change, config.change_weight)));
            for (value, weight) in conditions {
                let Some(value) = value else { continue };
                if value >= config.uptick {
                    sell_votes += weight;
                }
                if value <= -config.downtick {
                    buy_votes += weight;
                }
            }

            ScorecardRow {
                ticker: series.ticker().to_string(),
                date: point.date,
                price: point.price,
                distances,
                change,
                buy_votes,
                sell_votes,
                combined: sell_votes as i32 - buy_votes as i32,
                combined_prev: None,
                combined_prev2: None,
            }
        })
        .collect();

    let combined: Vec<i32> = rows.iter().map(|r| r.combined).collect();
    for (i, row) in rows.iter_mut().enumerate() {
        row.combined_prev = i.checked_sub(1).map(|j| combined[j]);
        row.combined_prev2 = i.checked_sub(2).map(|j| combined[j]);
    }

    debug!(
        ticker = series.ticker(),
        rows = rows.len(),
        big_moves = rows.iter().filter(|r| r.is_big_move(config.tolerance)).count(),
        "scored series"
    );

    Ok(rows)
}

/// Rows dated within `[start, end]`; either bound may be open.
///
/// Rows must be in date order.
pub fn date_range(
    rows: &[ScorecardRow],
    start: Option<Date>,
    end: Option<Date>,
) -> &[ScorecardRow] {
    let lo = start.map_or(0, |s| rows.partition_point(|r| r.date < s));
    let hi = end.map_or(rows.len(), |e| rows.partition_point(|r| r.date <= e));
    &rows[lo..hi.max(lo)]
}

/// The most recent big move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LastSignal {
    /// Date of the move.
    pub date: Date,
    /// Price on that date.
    pub price: f64,
    /// Side of the move.
    pub direction: Signal,
}

/// Headline figures of a scored history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorecardSummary {
    /// Ticker symbol.
    pub ticker: Ticker,
    /// Most recent date.
    pub last_date: Date,
    /// Most recent price.
    pub last_price: f64,
    /// Mean price over every scored day.
    pub average_price: f64,
    /// Number of big moves.
    pub big_moves: usize,
    /// Most recent big move, if any.
    pub last_signal: Option<LastSignal>,
}

/// Summarizes scored rows; `None` when there are none.
pub fn summarize(rows: &[ScorecardRow], tolerance: u32) -> Option<ScorecardSummary> {
    let last = rows.last()?;
    let last_signal = rows.iter().rev().find_map(|r| {
        r.direction(tolerance).map(|direction| LastSignal {
            date: r.date,
            price: r.price,
            direction,
        })
    });

    Some(ScorecardSummary {
        ticker: last.ticker.clone(),
        last_date: last.date,
        last_price: last.price,
        average_price: rows.iter().map(|r| r.price).sum::<f64>() / rows.len() as f64,
        big_moves: rows.iter().filter(|r| r.is_big_move(tolerance)).count(),
        last_signal,
    })
}

/// The scorecard as a [`SeriesModel`].
#[derive(Debug, Clone, Default)]
pub struct TechnicalScorecard {
    config: ScorecardConfig,
}

impl TechnicalScorecard {
    /// Create a scorecard with the given configuration.
    #[must_use]
    pub const fn new(config: ScorecardConfig) -> Self {
        Self { config }
    }

    /// The model configuration.
    #[must_use]
    pub const fn config(&self) -> &ScorecardConfig {
        &self.config
    }
}

impl SeriesModel for TechnicalScorecard {
    type Row = ScorecardRow;

    fn name(&self) -> &str {
        "technical_scorecard"
    }

    fn lookback(&self) -> usize {
        self.config.lookback()
    }

    fn validate(&self) -> Result<()> {
        self.config.validate()
    }

    fn evaluate(&self, series: &PriceSeries) -> Result<Vec<ScorecardRow>> {
        score_series(series, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn start() -> Date {
        Date::from_ymd_opt(2023, 1, 1).unwrap()
    }

    fn series(prices: &[f64]) -> PriceSeries {
        PriceSeries::from_pairs(
            "TEST",
            prices
                .iter()
                .enumerate()
                .map(|(i, &p)| (start() + chrono::Duration::days(i as i64), p)),
        )
        .unwrap()
    }

    fn flat_then(last: f64, len: usize) -> PriceSeries {
        let mut prices = vec![100.0; len - 1];
        prices.push(last);
        series(&prices)
    }

    #[test]
    fn test_default_config() {
        let config = ScorecardConfig::default();
        assert_eq!(config.max_votes(), 6);
        assert_eq!(config.lookback(), 180);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tolerance_range() {
        assert!(ScorecardConfig::default().with_tolerance(0).validate().is_ok());
        assert!(ScorecardConfig::default().with_tolerance(6).validate().is_ok());
        assert!(matches!(
            ScorecardConfig::default().with_tolerance(7).validate(),
            Err(BandwatchError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_bad_ticks() {
        let config = ScorecardConfig {
            downtick: -0.1,
            ..ScorecardConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ScorecardConfig {
            windows: vec![5, 0],
            ..ScorecardConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_flat_series_never_votes() {
        let rows = score_series(&series(&[100.0; 200]), &ScorecardConfig::default()).unwrap();
        assert_eq!(rows.len(), 200);
        assert!(rows.iter().all(|r| r.buy_votes == 0 && r.sell_votes == 0));
        assert_eq!(rows[199].distances[3].distance, Some(0.0));
    }

    #[test]
    fn test_jump_collects_every_sell_vote() {
        let rows = score_series(&flat_then(120.0, 200), &ScorecardConfig::default()).unwrap();
        let last = rows.last().unwrap();

        assert_eq!(last.sell_votes, 6);
        assert_eq!(last.buy_votes, 0);
        assert_eq!(last.combined, 6);
        assert_relative_eq!(last.change.unwrap(), 0.2, epsilon = 1e-12);
        assert_relative_eq!(last.distances[0].moving_average.unwrap(), 104.0, epsilon = 1e-9);
        assert_eq!(last.direction(5), Some(Signal::Sell));
    }

    #[test]
    fn test_drop_collects_every_buy_vote() {
        let rows = score_series(&flat_then(80.0, 200), &ScorecardConfig::default()).unwrap();
        let last = rows.last().unwrap();

        assert_eq!(last.buy_votes, 6);
        assert_eq!(last.sell_votes, 0);
        assert_eq!(last.combined, -6);
        assert_eq!(last.direction(5), Some(Signal::Buy));
    }

    #[test]
    fn test_lagged_combined_votes() {
        let mut prices = vec![100.0; 199];
        prices.push(80.0);
        prices.extend([100.0; 2]);
        let rows = score_series(&series(&prices), &ScorecardConfig::default()).unwrap();

        assert_eq!(rows[0].combined_prev, None);
        assert_eq!(rows[1].combined_prev, Some(rows[0].combined));
        assert_eq!(rows[1].combined_prev2, None);
        assert_eq!(rows[200].combined_prev, Some(-6));
        assert_eq!(rows[201].combined_prev2, Some(-6));
        assert_eq!(rows[201].combined_prev, Some(rows[200].combined));
    }

    #[test]
    fn test_warm_up_values_do_not_vote() {
        let rows = score_series(&flat_then(120.0, 11), &ScorecardConfig::default()).unwrap();
        let last = rows.last().unwrap();

        assert!(last.change.is_none());
        assert!(last.distances[1].distance.is_none());
        assert_eq!(last.sell_votes, 1);
        assert!(!last.is_big_move(5));
    }

    #[test]
    fn test_summarize_finds_last_big_move() {
        let mut prices = vec![100.0; 199];
        prices.push(80.0);
        prices.extend([100.0; 5]);
        let rows = score_series(&series(&prices), &ScorecardConfig::default()).unwrap();

        let summary = summarize(&rows, 5).unwrap();
        assert_eq!(summary.last_price, 100.0);
        assert_eq!(summary.last_date, rows[204].date);
        assert_relative_eq!(summary.average_price, (204.0 * 100.0 + 80.0) / 205.0);
        let last_signal = summary.last_signal.unwrap();
        assert_eq!(last_signal.direction, Signal::Buy);
        assert_eq!(last_signal.price, 80.0);
        assert_eq!(last_signal.date, rows[199].date);
    }

    #[test]
    fn test_summarize_without_moves() {
        let rows = score_series(&series(&[100.0; 10]), &ScorecardConfig::default()).unwrap();
        let summary = summarize(&rows, 5).unwrap();
        assert_eq!(summary.big_moves, 0);
        assert!(summary.last_signal.is_none());
        assert!(summarize(&[], 5).is_none());
    }

    #[test]
    fn test_date_range() {
        let rows = score_series(&series(&[100.0; 10]), &ScorecardConfig::default()).unwrap();
        let d = |offset| start() + chrono::Duration::days(offset);

        assert_eq!(date_range(&rows, Some(d(2)), Some(d(4))).len(), 3);
        assert_eq!(date_range(&rows, None, Some(d(0))).len(), 1);
        assert_eq!(date_range(&rows, Some(d(8)), None).len(), 2);
        assert!(date_range(&rows, Some(d(5)), Some(d(3))).is_empty());
    }

    #[test]
    fn test_empty_series() {
        let model = TechnicalScorecard::default();
        assert_eq!(model.name(), "technical_scorecard");
        assert!(matches!(
            model.evaluate(&PriceSeries::empty("NONE")),
            Err(BandwatchError::EmptySeries(_))
        ));
    }
}
