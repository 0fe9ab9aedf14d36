//! Breach computation over a single ticker's price history.

use super::config::BreachConfig;
use bandwatch_traits::stats::{window_count, window_sums};
use bandwatch_traits::{BandwatchError, Date, PriceSeries, Result, SeriesModel, Ticker};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Aggregate trading signal raised by summed breaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    /// Price is stretched below its moving averages.
    Buy,
    /// Price is stretched above its moving averages.
    Sell,
}

impl Signal {
    /// The label written to result tables.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }

    /// Classifies a net breach count against a limit.
    ///
    /// SELL when `total_breach >= limit`, BUY when `total_breach <= -limit`,
    /// otherwise no signal. With `limit >= 1` the two cases cannot overlap.
    #[must_use]
    pub fn from_total_breach(total_breach: i32, limit: u32) -> Option<Self> {
        let total = i64::from(total_breach);
        let limit = i64::from(limit);
        if total >= limit {
            Some(Self::Sell)
        } else if total <= -limit {
            Some(Self::Buy)
        } else {
            None
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Breach flag for a percentage deviation: `+1` at or above the threshold,
/// `-1` at or below its negation, `0` otherwise.
#[must_use]
pub fn breach_flag(delta_pct: f64, threshold_pct: f64) -> i8 {
    if delta_pct >= threshold_pct {
        1
    } else if delta_pct <= -threshold_pct {
        -1
    } else {
        0
    }
}

/// One window's reading on one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowReading {
    /// Window length in trading days.
    pub window: usize,
    /// Moving average (expanding mean during warm-up).
    pub moving_average: f64,
    /// Deviation of the price from the moving average, in percent.
    pub delta_pct: f64,
    /// Breach flag in {-1, 0, +1}.
    pub breach: i8,
}

/// Breach results for one ticker on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerSignalRow {
    /// Ticker symbol.
    pub ticker: Ticker,
    /// Trading date.
    pub date: Date,
    /// Price on that date.
    pub price: f64,
    /// One reading per configured window, in ascending window order.
    pub windows: Vec<WindowReading>,
    /// Sum of the per-window breach flags.
    pub total_breach: i32,
    /// Signal raised by `total_breach`, if any.
    pub signal: Option<Signal>,
}

impl TickerSignalRow {
    /// The reading for a given window length.
    pub fn window(&self, window: usize) -> Option<&WindowReading> {
        self.windows.iter().find(|r| r.window == window)
    }

    /// Signal label as written to tables; empty when there is no signal.
    pub fn signal_label(&self) -> &'static str {
        self.signal.map_or("", |s| s.as_str())
    }
}

/// Computes per-day breach flags and signals for one ticker.
///
/// For each window `w` with threshold `t` and each index `i`:
///
/// - the moving average is the mean of `prices[max(0, i-w+1) ..= i]`, so the
///   first `w-1` days use an expanding mean of every price seen so far
/// - the delta is `(price - ma) / ma * 100`
/// - the flag is `+1` if `delta >= t`, `-1` if `delta <= -t`, else `0`
///
/// `total_breach` sums the flags and the signal follows
/// [`Signal::from_total_breach`].
///
/// # Errors
///
/// Returns [`BandwatchError::InvalidConfig`] for an invalid configuration and
/// [`BandwatchError::EmptySeries`] when `series` has no rows.
///
/// # Example
///
/// ```
/// use bandwatch_signals::breach::{BreachConfig, MovingAverageConfig, compute_breaches};
/// use bandwatch_traits::{Date, PriceSeries};
///
/// let d = |day| Date::from_ymd_opt(2024, 1, day).unwrap();
/// let series = PriceSeries::from_pairs(
///     "DEMO",
///     [(d(1), 10.0), (d(2), 10.0), (d(3), 10.0), (d(4), 10.0), (d(5), 20.0)],
/// )
/// .unwrap();
/// let config = BreachConfig::new(MovingAverageConfig::new().with_window(3, 50.0), 1);
///
/// let rows = compute_breaches(&series, &config).unwrap();
/// assert_eq!(rows[4].windows[0].breach, 1);
/// ```
pub fn compute_breaches(
    series: &PriceSeries,
    config: &BreachConfig,
) -> Result<Vec<TickerSignalRow>> {
    config.validate()?;

    if series.is_empty() {
        return Err(BandwatchError::EmptySeries(series.ticker().to_string()));
    }

    let prices = series.prices();
    let sums: Vec<(usize, f64, _)> = config
        .moving_averages
        .iter()
        .map(|(window, threshold)| (window, threshold, window_sums(&prices, window)))
        .collect();

    let rows: Vec<TickerSignalRow> = series
        .points()
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let windows: Vec<WindowReading> = sums
                .iter()
                .map(|(window, threshold, window_sum)| {
                    let count = window_count(i, *window) as f64;
                    let sum = window_sum[i];
                    // (p - s/n) / (s/n) == (p*n - s) / s; avoids rounding the mean first
                    let delta_pct = (point.price * count - sum) / sum * 100.0;
                    WindowReading {
                        window: *window,
                        moving_average: sum / count,
                        delta_pct,
                        breach: breach_flag(delta_pct, *threshold),
                    }
                })
                .collect();

            let total_breach: i32 = windows.iter().map(|r| i32::from(r.breach)).sum();

            TickerSignalRow {
                ticker: series.ticker().to_string(),
                date: point.date,
                price: point.price,
                windows,
                total_breach,
                signal: Signal::from_total_breach(total_breach, config.breach_limit),
            }
        })
        .collect();

    debug!(
        ticker = series.ticker(),
        rows = rows.len(),
        signals = rows.iter().filter(|r| r.signal.is_some()).count(),
        "computed breaches"
    );

    Ok(rows)
}

/// The breach engine as a [`SeriesModel`].
#[derive(Debug, Clone, Default)]
pub struct MovingAverageBreach {
    config: BreachConfig,
}

impl MovingAverageBreach {
    /// Create a new breach model with the given configuration.
    #[must_use]
    pub const fn new(config: BreachConfig) -> Self {
        Self { config }
    }

    /// The model configuration.
    #[must_use]
    pub const fn config(&self) -> &BreachConfig {
        &self.config
    }
}

impl SeriesModel for MovingAverageBreach {
    type Row = TickerSignalRow;

    fn name(&self) -> &str {
        "ma_breach"
    }

    fn lookback(&self) -> usize {
        self.config.moving_averages.max_window()
    }

    fn validate(&self) -> Result<()> {
        self.config.validate()
    }

    fn evaluate(&self, series: &PriceSeries) -> Result<Vec<TickerSignalRow>> {
        compute_breaches(series, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breach::MovingAverageConfig;
    use approx::assert_relative_eq;

    fn series(prices: &[f64]) -> PriceSeries {
        let start = Date::from_ymd_opt(2024, 1, 1).unwrap();
        PriceSeries::from_pairs(
            "TEST",
            prices
                .iter()
                .enumerate()
                .map(|(i, &p)| (start + chrono::Duration::days(i as i64), p)),
        )
        .unwrap()
    }

    fn single_window(window: usize, threshold: f64, limit: u32) -> BreachConfig {
        BreachConfig::new(
            MovingAverageConfig::new().with_window(window, threshold),
            limit,
        )
    }

    /// A deterministic, bumpy price path.
    fn wavy(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| {
                let x = i as f64;
                100.0 + 8.0 * (x / 3.0).sin() + 5.0 * (x / 11.0).cos() + 0.1 * x
            })
            .collect()
    }

    #[test]
    fn test_step_up_breaches_upper_threshold() {
        let rows = compute_breaches(
            &series(&[10.0, 10.0, 10.0, 10.0, 20.0]),
            &single_window(3, 50.0, 1),
        )
        .unwrap();

        let last = &rows[4].windows[0];
        assert_relative_eq!(last.moving_average, 40.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(last.delta_pct, 50.0, epsilon = 1e-9);
        assert_eq!(last.breach, 1);
        assert_eq!(rows[4].total_breach, 1);
        assert_eq!(rows[4].signal, Some(Signal::Sell));

        for row in &rows[..4] {
            assert_eq!(row.total_breach, 0);
            assert_eq!(row.signal, None);
        }
    }

    #[test]
    fn test_step_down_breaches_lower_threshold() {
        let rows = compute_breaches(
            &series(&[10.0, 10.0, 10.0, 10.0, 5.0]),
            &single_window(3, 20.0, 1),
        )
        .unwrap();

        let last = &rows[4].windows[0];
        assert_relative_eq!(last.delta_pct, -40.0, epsilon = 1e-9);
        assert_eq!(last.breach, -1);
        assert_eq!(rows[4].signal, Some(Signal::Buy));
    }

    #[test]
    fn test_warm_up_uses_expanding_mean() {
        let rows = compute_breaches(
            &series(&[2.0, 4.0, 6.0, 8.0, 10.0]),
            &single_window(3, 100.0, 1),
        )
        .unwrap();

        let ma: Vec<f64> = rows.iter().map(|r| r.windows[0].moving_average).collect();
        assert_relative_eq!(ma[0], 2.0);
        assert_relative_eq!(ma[1], 3.0);
        assert_relative_eq!(ma[2], 4.0);
        assert_relative_eq!(ma[3], 6.0);
        assert_relative_eq!(ma[4], 8.0);
    }

    #[test]
    fn test_moving_average_matches_trailing_mean() {
        let prices = wavy(120);
        let config = BreachConfig::new(
            MovingAverageConfig::new()
                .with_window(5, 1.0)
                .with_window(20, 2.0)
                .with_window(60, 3.0),
            2,
        );
        let rows = compute_breaches(&series(&prices), &config).unwrap();

        for (i, row) in rows.iter().enumerate() {
            for reading in &row.windows {
                let start = (i + 1).saturating_sub(reading.window);
                let slice = &prices[start..=i];
                let expected = slice.iter().sum::<f64>() / slice.len() as f64;
                assert_relative_eq!(reading.moving_average, expected, epsilon = 1e-9);
                assert_relative_eq!(
                    reading.delta_pct,
                    (prices[i] - expected) / expected * 100.0,
                    epsilon = 1e-7
                );
            }
        }
    }

    #[test]
    fn test_window_longer_than_series() {
        let rows = compute_breaches(&series(&[1.0, 2.0, 3.0]), &single_window(50, 10.0, 1))
            .unwrap();
        assert_relative_eq!(rows[2].windows[0].moving_average, 2.0);
    }

    #[test]
    fn test_total_breach_and_signal_invariants() {
        let prices = wavy(200);
        let config = BreachConfig::new(
            MovingAverageConfig::new()
                .with_window(3, 0.5)
                .with_window(5, 1.0)
                .with_window(10, 2.0)
                .with_window(20, 3.0),
            2,
        );
        let rows = compute_breaches(&series(&prices), &config).unwrap();
        let n = config.moving_averages.len() as i32;

        let mut seen_buy = false;
        let mut seen_sell = false;
        for row in &rows {
            let sum: i32 = row.windows.iter().map(|r| i32::from(r.breach)).sum();
            assert_eq!(row.total_breach, sum);
            assert!((-n..=n).contains(&row.total_breach));

            match row.signal {
                Some(Signal::Sell) => {
                    seen_sell = true;
                    assert!(row.total_breach >= 2);
                }
                Some(Signal::Buy) => {
                    seen_buy = true;
                    assert!(row.total_breach <= -2);
                }
                None => assert!(row.total_breach.abs() < 2),
            }
        }
        assert!(seen_buy && seen_sell);
    }

    #[test]
    fn test_rows_follow_series_order() {
        let s = series(&[5.0, 6.0, 7.0]);
        let rows = compute_breaches(&s, &BreachConfig::default()).unwrap();
        assert_eq!(rows.len(), 3);
        for (row, point) in rows.iter().zip(s.points()) {
            assert_eq!(row.date, point.date);
            assert_eq!(row.ticker, "TEST");
            assert_eq!(row.windows.len(), 5);
        }
        assert_eq!(
            rows[0].windows.iter().map(|r| r.window).collect::<Vec<_>>(),
            vec![5, 10, 15, 20, 100]
        );
    }

    #[test]
    fn test_empty_series() {
        let result = compute_breaches(&PriceSeries::empty("NONE"), &BreachConfig::default());
        assert!(matches!(result, Err(BandwatchError::EmptySeries(t)) if t == "NONE"));
    }

    #[test]
    fn test_invalid_config_rejected_before_empty_check() {
        let result = compute_breaches(&PriceSeries::empty("NONE"), &single_window(0, 1.0, 1));
        assert!(matches!(result, Err(BandwatchError::InvalidConfig(_))));
    }

    #[test]
    fn test_breach_flag_boundaries() {
        assert_eq!(breach_flag(2.0, 2.0), 1);
        assert_eq!(breach_flag(-2.0, 2.0), -1);
        assert_eq!(breach_flag(1.999, 2.0), 0);
        assert_eq!(breach_flag(-1.999, 2.0), 0);
    }

    #[test]
    fn test_signal_classification() {
        assert_eq!(Signal::from_total_breach(4, 4), Some(Signal::Sell));
        assert_eq!(Signal::from_total_breach(5, 4), Some(Signal::Sell));
        assert_eq!(Signal::from_total_breach(-4, 4), Some(Signal::Buy));
        assert_eq!(Signal::from_total_breach(3, 4), None);
        assert_eq!(Signal::from_total_breach(-3, 4), None);
        assert_eq!(Signal::Buy.to_string(), "BUY");
    }

    #[test]
    fn test_model_wrapper() {
        let model = MovingAverageBreach::default();
        assert_eq!(model.name(), "ma_breach");
        assert_eq!(model.lookback(), 100);
        assert!(model.validate().is_ok());

        let rows = model.evaluate(&series(&[1.0, 2.0])).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].signal_label(), rows[1].signal.map_or("", |s| s.as_str()));
        assert!(rows[1].window(5).is_some());
        assert!(rows[1].window(7).is_none());
    }
}
