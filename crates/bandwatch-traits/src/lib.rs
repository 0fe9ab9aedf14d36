#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/virenps/bandwatch/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types for the bandwatch moving-average signal toolkit.
//!
//! This crate provides the foundational abstractions shared by the signal
//! models, the batch runner and the CLI.

/// The version of the bandwatch-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod model;
pub mod stats;
pub mod table;
pub mod types;

// Re-exports
pub use error::{BandwatchError, Result};
pub use model::SeriesModel;
pub use table::PriceTable;
pub use types::{Date, PricePoint, PriceSeries, Ticker, parse_date};
