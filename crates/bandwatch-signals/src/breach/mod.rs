//! Moving-average breach signals.
//!
//! A ticker breaches a moving average when its price deviates from it by at
//! least the window's threshold percentage. Flags from every configured
//! window are summed per day, and a large enough net count raises a BUY
//! (stretched below) or SELL (stretched above) signal.

mod config;
mod engine;

pub use config::{BreachConfig, MovingAverageConfig};
pub use engine::{
    MovingAverageBreach, Signal, TickerSignalRow, WindowReading, breach_flag, compute_breaches,
};
