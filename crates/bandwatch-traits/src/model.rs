//! Series model trait for per-ticker signal computation.
//!
//! This module defines the `SeriesModel` trait, the seam between the signal
//! implementations and the code that runs them across a universe of tickers.
//! A model turns one ticker's [`PriceSeries`] into a row per date.

use crate::{PriceSeries, Result};

/// A signal model evaluated independently for each ticker.
///
/// Implementations must be pure functions of their configuration and the
/// input series, and thread-safe (`Send + Sync`) so they can be shared
/// freely.
///
/// # Example
///
/// ```no_run
/// use bandwatch_traits::{PriceSeries, Result, SeriesModel};
///
/// struct LastPrice;
///
/// impl SeriesModel for LastPrice {
///     type Row = f64;
///
///     fn name(&self) -> &str {
///         "last_price"
///     }
///
///     fn lookback(&self) -> usize {
///         1
///     }
///
///     fn validate(&self) -> Result<()> {
///         Ok(())
///     }
///
///     fn evaluate(&self, series: &PriceSeries) -> Result<Vec<f64>> {
///         Ok(series.last().map(|p| p.price).into_iter().collect())
///     }
/// }
/// ```
pub trait SeriesModel: Send + Sync {
    /// Output produced for each date of the input series.
    type Row: Send;

    /// Returns the name of this model.
    ///
    /// Used for identification in logging and listings.
    fn name(&self) -> &str;

    /// Returns the longest window, in trading days, the model looks back over.
    fn lookback(&self) -> usize;

    /// Checks the model configuration.
    ///
    /// Called once before a multi-ticker run so that a bad configuration is
    /// rejected before any computation.
    ///
    /// # Errors
    ///
    /// Returns [`BandwatchError::InvalidConfig`](crate::BandwatchError::InvalidConfig)
    /// describing the offending parameter.
    fn validate(&self) -> Result<()>;

    /// Computes one row per observation of `series`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the series is
    /// unusable (for example empty).
    fn evaluate(&self, series: &PriceSeries) -> Result<Vec<Self::Row>>;
}
