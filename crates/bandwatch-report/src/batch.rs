//! Multi-ticker batch runs with per-ticker failure isolation.

use bandwatch_traits::{BandwatchError, PriceTable, Result, SeriesModel, Ticker};
use tracing::{info, warn};

/// A ticker whose evaluation failed.
#[derive(Debug)]
pub struct TickerFailure {
    /// Ticker symbol.
    pub ticker: Ticker,
    /// Why evaluation failed.
    pub error: BandwatchError,
}

/// Results of running one model over every ticker of a table.
///
/// Tickers keep the order of the table. A ticker with no rows is present
/// with an empty result; a ticker whose evaluation failed is listed in
/// [`failures`](Self::failures) instead.
#[derive(Debug)]
pub struct BatchReport<R> {
    model: String,
    results: Vec<(Ticker, Vec<R>)>,
    failures: Vec<TickerFailure>,
}

impl<R> BatchReport<R> {
    /// Name of the model that produced the report.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Tickers with a result, in table order.
    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.results.iter().map(|(t, _)| t.as_str())
    }

    /// Per-ticker results, in table order.
    pub fn results(&self) -> impl Iterator<Item = (&str, &[R])> {
        self.results.iter().map(|(t, r)| (t.as_str(), r.as_slice()))
    }

    /// Every row of every ticker, in table order.
    pub fn all_rows(&self) -> impl Iterator<Item = &R> {
        self.results.iter().flat_map(|(_, rows)| rows)
    }

    /// Tickers whose evaluation failed.
    pub fn failures(&self) -> &[TickerFailure] {
        &self.failures
    }

    /// Number of tickers with a result.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether no ticker produced a result.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Rows computed for `ticker`.
    ///
    /// # Errors
    ///
    /// Returns [`BandwatchError::MissingTicker`] if the ticker was not part
    /// of the run, and [`BandwatchError::Other`] if its evaluation failed.
    pub fn rows(&self, ticker: &str) -> Result<&[R]> {
        if let Some((_, rows)) = self.results.iter().find(|(t, _)| t == ticker) {
            return Ok(rows);
        }
        match self.failures.iter().find(|f| f.ticker == ticker) {
            Some(failure) => Err(BandwatchError::Other(format!(
                "{ticker} failed: {}",
                failure.error
            ))),
            None => Err(BandwatchError::MissingTicker(ticker.to_string())),
        }
    }

    /// The most recent row of each ticker that has any.
    pub fn latest(&self) -> Vec<&R> {
        self.results
            .iter()
            .filter_map(|(_, rows)| rows.last())
            .collect()
    }
}

/// Runs `model` over every ticker of `table`.
///
/// The model configuration is validated once up front. Each ticker is then
/// evaluated independently: an empty series yields an empty result, and any
/// other per-ticker error is recorded in [`BatchReport::failures`] without
/// stopping the run.
///
/// # Errors
///
/// Returns [`BandwatchError::InvalidConfig`] if the model configuration is
/// invalid. No ticker is evaluated in that case.
pub fn run_batch<M: SeriesModel>(model: &M, table: &PriceTable) -> Result<BatchReport<M::Row>> {
    model.validate()?;

    let mut results = Vec::with_capacity(table.tickers().len());
    let mut failures = Vec::new();

    for ticker in table.tickers() {
        match table.series(ticker).and_then(|series| model.evaluate(&series)) {
            Ok(rows) => results.push((ticker.clone(), rows)),
            Err(BandwatchError::EmptySeries(_)) => {
                warn!(ticker = %ticker, model = model.name(), "no prices, empty result");
                results.push((ticker.clone(), Vec::new()));
            }
            Err(error) if error.is_ticker_local() => {
                warn!(ticker = %ticker, model = model.name(), %error, "ticker failed");
                failures.push(TickerFailure {
                    ticker: ticker.clone(),
                    error,
                });
            }
            Err(error) => return Err(error),
        }
    }

    info!(
        model = model.name(),
        tickers = results.len(),
        failed = failures.len(),
        "batch complete"
    );

    Ok(BatchReport {
        model: model.name().to_string(),
        results,
        failures,
    })
}
