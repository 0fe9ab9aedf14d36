//! The day's signals across all tickers.

use bandwatch_signals::breach::{Signal, TickerSignalRow};
use bandwatch_traits::Date;
use serde::Serialize;
use std::cmp::Reverse;

/// Rows carrying a signal on the most recent date of a run.
///
/// Each side is ordered by `|total_breach|` descending, then by ticker.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SignalBoard {
    /// Most recent date seen across all rows, if any.
    pub date: Option<Date>,
    /// BUY rows on that date.
    pub buys: Vec<TickerSignalRow>,
    /// SELL rows on that date.
    pub sells: Vec<TickerSignalRow>,
}

impl SignalBoard {
    /// Builds the board from every row of a run.
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a TickerSignalRow>) -> Self {
        let rows: Vec<&TickerSignalRow> = rows.into_iter().collect();
        let Some(date) = rows.iter().map(|r| r.date).max() else {
            return Self::default();
        };

        let mut board = Self {
            date: Some(date),
            ..Self::default()
        };
        for row in rows.into_iter().filter(|r| r.date == date) {
            match row.signal {
                Some(Signal::Buy) => board.buys.push(row.clone()),
                Some(Signal::Sell) => board.sells.push(row.clone()),
                None => {}
            }
        }

        for side in [&mut board.buys, &mut board.sells] {
            side.sort_by(|a, b| {
                Reverse(a.total_breach.unsigned_abs())
                    .cmp(&Reverse(b.total_breach.unsigned_abs()))
                    .then_with(|| a.ticker.cmp(&b.ticker))
            });
        }
        board
    }

    /// BUY rows followed by SELL rows.
    pub fn iter(&self) -> impl Iterator<Item = &TickerSignalRow> {
        self.buys.iter().chain(&self.sells)
    }

    /// Number of signals on the board.
    pub fn len(&self) -> usize {
        self.buys.len() + self.sells.len()
    }

    /// Whether there are no signals on the board.
    pub fn is_empty(&self) -> bool {
        self.buys.is_empty() && self.sells.is_empty()
    }
}
