//! Chart marker classification for breach days.
//!
//! A chart of a ticker's price draws a marker on every day whose net breach
//! reaches the tolerance. The first day of a run gets a distinct "start"
//! marker; following days on the same side get "continuation" markers. A day
//! inside the tolerance ends the run.
//!
//! Classification is a fold over date-ordered rows through [`MarkerState`].

use crate::breach::{Signal, TickerSignalRow};
use bandwatch_traits::Date;
use serde::{Deserialize, Serialize};

/// Default number of trailing rows a chart shows.
pub const DEFAULT_VISIBLE_POINTS: usize = 100;

/// Default net breach magnitude that gets a marker.
pub const DEFAULT_TOLERANCE: u32 = 4;

/// Classification of a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerKind {
    /// First day of a run on the given side.
    Start(Signal),
    /// Later day of a run on the given side.
    Continuation(Signal),
    /// Day inside the tolerance; no marker, ends any run.
    Reset,
}

impl MarkerKind {
    /// Side of the marker, if one is drawn.
    #[must_use]
    pub const fn side(&self) -> Option<Signal> {
        match self {
            Self::Start(side) | Self::Continuation(side) => Some(*side),
            Self::Reset => None,
        }
    }

    /// Short label for tabular output.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Start(_) => "start",
            Self::Continuation(_) => "continuation",
            Self::Reset => "reset",
        }
    }
}

/// Run state carried between days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerState {
    /// No run in progress.
    #[default]
    Idle,
    /// Run of days at or below `-tolerance`.
    BuyRun,
    /// Run of days at or above `+tolerance`.
    SellRun,
}

impl MarkerState {
    /// Advances the state by one day and classifies that day.
    #[must_use]
    pub fn step(self, total_breach: i32, tolerance: u32) -> (Self, MarkerKind) {
        let breach = i64::from(total_breach);
        let tolerance = i64::from(tolerance);

        if breach <= -tolerance {
            let kind = if self == Self::BuyRun {
                MarkerKind::Continuation(Signal::Buy)
            } else {
                MarkerKind::Start(Signal::Buy)
            };
            (Self::BuyRun, kind)
        } else if breach >= tolerance {
            let kind = if self == Self::SellRun {
                MarkerKind::Continuation(Signal::Sell)
            } else {
                MarkerKind::Start(Signal::Sell)
            };
            (Self::SellRun, kind)
        } else {
            (Self::Idle, MarkerKind::Reset)
        }
    }
}

/// Classifies a sequence of net breach counts.
///
/// # Example
///
/// ```
/// use bandwatch_signals::breach::Signal;
/// use bandwatch_signals::markers::{MarkerKind, classify_breaches};
///
/// let kinds = classify_breaches([-5, -5, -5, 2], 4);
/// assert_eq!(
///     kinds,
///     vec![
///         MarkerKind::Start(Signal::Buy),
///         MarkerKind::Continuation(Signal::Buy),
///         MarkerKind::Continuation(Signal::Buy),
///         MarkerKind::Reset,
///     ]
/// );
/// ```
pub fn classify_breaches(
    breaches: impl IntoIterator<Item = i32>,
    tolerance: u32,
) -> Vec<MarkerKind> {
    breaches
        .into_iter()
        .scan(MarkerState::Idle, |state, breach| {
            let (next, kind) = state.step(breach, tolerance);
            *state = next;
            Some(kind)
        })
        .collect()
}

/// A classified day ready to be drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Trading date.
    pub date: Date,
    /// Price on that date (the marker's y position).
    pub price: f64,
    /// Net breach count of the day.
    pub total_breach: i32,
    /// Marker classification.
    pub kind: MarkerKind,
}

/// Classifies every row, including in-tolerance days as [`MarkerKind::Reset`].
///
/// Rows are expected in date order. When the ticker changes between
/// consecutive rows the run state starts over, so concatenated per-ticker
/// results can be passed directly.
pub fn plot_annotations(rows: &[TickerSignalRow], tolerance: u32) -> Vec<Annotation> {
    let mut state = MarkerState::Idle;
    let mut previous_ticker: Option<&str> = None;

    rows.iter()
        .map(|row| {
            if previous_ticker.is_some_and(|t| t != row.ticker) {
                state = MarkerState::Idle;
            }
            previous_ticker = Some(row.ticker.as_str());

            let (next, kind) = state.step(row.total_breach, tolerance);
            state = next;
            Annotation {
                date: row.date,
                price: row.price,
                total_breach: row.total_breach,
                kind,
            }
        })
        .collect()
}

/// The drawn markers only: [`plot_annotations`] without the resets.
pub fn markers(rows: &[TickerSignalRow], tolerance: u32) -> Vec<Annotation> {
    plot_annotations(rows, tolerance)
        .into_iter()
        .filter(|a| a.kind != MarkerKind::Reset)
        .collect()
}

/// The last `n` rows (all rows when fewer are available).
pub fn tail<T>(rows: &[T], n: usize) -> &[T] {
    &rows[rows.len().saturating_sub(n)..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breach::WindowReading;

    fn row(ticker: &str, day: u32, total_breach: i32) -> TickerSignalRow {
        TickerSignalRow {
            ticker: ticker.to_string(),
            date: Date::from_ymd_opt(2024, 3, day).unwrap(),
            price: 100.0 + f64::from(day),
            windows: vec![WindowReading {
                window: 5,
                moving_average: 100.0,
                delta_pct: 0.0,
                breach: 0,
            }],
            total_breach,
            signal: None,
        }
    }

    #[test]
    fn test_buy_run_then_reset() {
        let kinds = classify_breaches([-5, -5, -5, 2], 4);
        assert_eq!(
            kinds,
            vec![
                MarkerKind::Start(Signal::Buy),
                MarkerKind::Continuation(Signal::Buy),
                MarkerKind::Continuation(Signal::Buy),
                MarkerKind::Reset,
            ]
        );
    }

    #[test]
    fn test_sell_run_is_symmetric() {
        let kinds = classify_breaches([4, 5, 0, 4], 4);
        assert_eq!(
            kinds,
            vec![
                MarkerKind::Start(Signal::Sell),
                MarkerKind::Continuation(Signal::Sell),
                MarkerKind::Reset,
                MarkerKind::Start(Signal::Sell),
            ]
        );
    }

    #[test]
    fn test_side_flip_starts_new_run() {
        let kinds = classify_breaches([-4, 4, -4], 4);
        assert_eq!(
            kinds,
            vec![
                MarkerKind::Start(Signal::Buy),
                MarkerKind::Start(Signal::Sell),
                MarkerKind::Start(Signal::Buy),
            ]
        );
    }

    #[test]
    fn test_state_transitions() {
        let (state, kind) = MarkerState::Idle.step(-3, 3);
        assert_eq!(state, MarkerState::BuyRun);
        assert_eq!(kind.label(), "start");

        let (state, kind) = state.step(-3, 3);
        assert_eq!(state, MarkerState::BuyRun);
        assert_eq!(kind.label(), "continuation");
        assert_eq!(kind.side(), Some(Signal::Buy));

        let (state, kind) = state.step(2, 3);
        assert_eq!(state, MarkerState::Idle);
        assert_eq!(kind.side(), None);
    }

    #[test]
    fn test_plot_annotations_carries_row_data() {
        let rows = vec![row("AAPL", 1, -5), row("AAPL", 2, -5), row("AAPL", 3, 0)];
        let annotations = plot_annotations(&rows, 4);

        assert_eq!(annotations.len(), 3);
        assert_eq!(annotations[0].price, 101.0);
        assert_eq!(annotations[1].date, Date::from_ymd_opt(2024, 3, 2).unwrap());
        assert_eq!(annotations[1].kind, MarkerKind::Continuation(Signal::Buy));
        assert_eq!(annotations[2].kind, MarkerKind::Reset);
    }

    #[test]
    fn test_state_resets_between_tickers() {
        let rows = vec![row("AAPL", 1, 5), row("MSFT", 1, 5)];
        let annotations = plot_annotations(&rows, 4);
        assert_eq!(annotations[1].kind, MarkerKind::Start(Signal::Sell));
    }

    #[test]
    fn test_markers_drop_resets() {
        let rows = vec![row("AAPL", 1, 0), row("AAPL", 2, 6), row("AAPL", 3, 1)];
        let drawn = markers(&rows, 4);
        assert_eq!(drawn.len(), 1);
        assert_eq!(drawn[0].total_breach, 6);
    }

    #[test]
    fn test_tail() {
        let values = [1, 2, 3, 4, 5];
        assert_eq!(tail(&values, 2), &[4, 5]);
        assert_eq!(tail(&values, 10), &values);
        assert!(tail(&values, 0).is_empty());
    }
}
