//! Error types for the bandwatch workspace.
//!
//! Every failure a model, table or export can hit is expressed as a
//! [`BandwatchError`]. Per-ticker failures are kept local by the batch runner,
//! so most variants name the ticker they belong to.

use thiserror::Error;

/// The main error type for bandwatch operations.
#[derive(Debug, Error)]
pub enum BandwatchError {
    /// A model configuration was rejected before any computation ran.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A ticker had no price rows to evaluate.
    #[error("Empty price series for {0}")]
    EmptySeries(String),

    /// A ticker was requested that is not part of the table or the results.
    #[error("Ticker not found: {0}")]
    MissingTicker(String),

    /// Error when a required column is missing from the data.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Error due to invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Error when a date is out of range or cannot be parsed.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Error reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl BandwatchError {
    /// Returns true for errors that concern a single ticker's data and must
    /// not abort a multi-ticker run.
    #[must_use]
    pub const fn is_ticker_local(&self) -> bool {
        !matches!(self, Self::InvalidConfig(_))
    }
}

impl From<String> for BandwatchError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for BandwatchError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for bandwatch operations.
///
/// This is a convenience type that uses [`BandwatchError`] as the error type.
pub type Result<T> = std::result::Result<T, BandwatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BandwatchError::InvalidConfig("window must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: window must be positive"
        );

        let err = BandwatchError::EmptySeries("AAPL".to_string());
        assert_eq!(err.to_string(), "Empty price series for AAPL");

        let err = BandwatchError::MissingTicker("ZZZZ".to_string());
        assert_eq!(err.to_string(), "Ticker not found: ZZZZ");
    }

    #[test]
    fn test_error_from_string() {
        let err: BandwatchError = "boom".into();
        assert!(matches!(err, BandwatchError::Other(_)));

        let err: BandwatchError = String::from("boom").into();
        assert_eq!(err.to_string(), "Error: boom");
    }

    #[test]
    fn test_ticker_local() {
        assert!(!BandwatchError::InvalidConfig("x".into()).is_ticker_local());
        assert!(BandwatchError::EmptySeries("x".into()).is_ticker_local());
        assert!(BandwatchError::InvalidData("x".into()).is_ticker_local());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "prices.csv");
        let err: BandwatchError = io.into();
        assert!(matches!(err, BandwatchError::Io(_)));
    }
}
