#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/virenps/bandwatch/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # bandwatch
//!
//! bandwatch is an umbrella crate that re-exports all bandwatch sub-crates for
//! convenience.
//!
//! ## Crate Organization
//!
//! - [`traits`] - Core types and the [`SeriesModel`] trait
//! - [`signals`] - Breach engine, chart markers and technical scorecard
//! - [`report`] - Batch runner, signal board and CSV export
//! - [`inflation`] - UK CPI inflation tables
//!
//! ## Pipeline
//!
//! 1. A [`PriceTable`] is loaded from a wide or long CSV
//! 2. A model evaluates each ticker's [`PriceSeries`] independently
//! 3. The batch report is summarized on a [`SignalBoard`] and exported

/// Version information for the bandwatch crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Types
// ============================================================================

/// Core types for bandwatch.
///
/// - [`SeriesModel`] - A model evaluated over one ticker's history
/// - [`PriceSeries`] / [`PriceTable`] - Price inputs
/// - [`BandwatchError`] - The shared error type
pub mod traits {
    pub use bandwatch_traits::*;
}

pub use bandwatch_traits::{BandwatchError, PriceSeries, PriceTable, Result, SeriesModel};
pub use bandwatch_traits::types::{Date, Ticker};

// ============================================================================
// Models
// ============================================================================

/// Signal models.
///
/// ## Available Models
///
/// - **MovingAverageBreach**: net count of moving-average threshold breaches,
///   raising BUY when stretched below and SELL when stretched above
/// - **TechnicalScorecard**: votes from rolling-mean distances and the
///   monthly price change
///
/// Breach rows can be classified into chart markers with
/// [`markers::plot_annotations`](bandwatch_signals::markers::plot_annotations).
pub mod signals {
    pub use bandwatch_signals::*;
}

pub use bandwatch_signals::{
    BreachConfig, MovingAverageBreach, ScorecardConfig, Signal, TechnicalScorecard,
    TickerSignalRow,
};

// ============================================================================
// Reporting
// ============================================================================

/// Batch runs and exports.
///
/// A failing ticker never aborts a batch; it is listed in
/// [`BatchReport::failures`](bandwatch_report::BatchReport::failures).
pub mod report {
    pub use bandwatch_report::*;
}

pub use bandwatch_report::{BatchReport, SignalBoard, run_batch};

// ============================================================================
// Macro Data
// ============================================================================

/// UK CPI inflation tables.
pub mod inflation {
    pub use bandwatch_macro::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use bandwatch::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BandwatchError, BatchReport, BreachConfig, MovingAverageBreach, PriceSeries, PriceTable,
        Result, ScorecardConfig, SeriesModel, Signal, SignalBoard, TechnicalScorecard,
        TickerSignalRow, run_batch,
    };
}

// ============================================================================
// Tests
// ============================================================================
