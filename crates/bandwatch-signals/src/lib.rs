//! Signal models for the bandwatch toolkit.
//!
//! This crate provides the concrete models run over price histories:
//! - Breach: moving-average threshold breaches summed into BUY/SELL signals
//! - Markers: run classification of breach days for charting
//! - Scorecard: single-ticker technical voting over rolling means
//!
//! # Example
//!
//! ```
//! use bandwatch_signals::breach::MovingAverageBreach;
//! use bandwatch_signals::registry::available_models;
//! use bandwatch_traits::SeriesModel;
//!
//! // Create a model with default configuration
//! let model = MovingAverageBreach::default();
//! assert_eq!(model.lookback(), 100);
//!
//! // Discover available models
//! let models = available_models();
//! assert!(models.iter().any(|m| m.name == model.name()));
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod breach;
pub mod markers;
pub mod registry;
pub mod scorecard;

// Re-export key types
pub use breach::{BreachConfig, MovingAverageBreach, Signal, TickerSignalRow};
pub use registry::{ModelCategory, ModelInfo};
pub use scorecard::{ScorecardConfig, TechnicalScorecard};
