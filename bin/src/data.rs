//! Data loading utilities for the bandwatch CLI.

use anyhow::{Context, Result};
use bandwatch_traits::{PriceSeries, PriceTable};
use std::path::Path;
use tracing::info;

/// Load a wide or long price CSV.
pub(crate) fn load_table(path: &Path) -> Result<PriceTable> {
    let table = PriceTable::from_csv_path(path)
        .with_context(|| format!("loading prices from {}", path.display()))?;
    info!(
        path = %path.display(),
        rows = table.len(),
        tickers = table.tickers().len(),
        "loaded price table"
    );
    Ok(table)
}

/// Load one ticker's history from a price CSV.
pub(crate) fn load_series(path: &Path, ticker: &str) -> Result<PriceSeries> {
    let table = load_table(path)?;
    let series = table
        .series(ticker)
        .with_context(|| format!("reading {ticker} from {}", path.display()))?;
    Ok(series)
}
