//! Configuration for the moving-average breach engine.

use bandwatch_traits::{BandwatchError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Moving-average windows and their breach thresholds.
///
/// Maps a window length in trading days to the percentage deviation from
/// that window's moving average that counts as a breach. Windows are kept in
/// ascending order, which fixes the column order of exported tables.
///
/// Serializes as a plain map, e.g. `{"5": 1.75, "20": 4.0}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovingAverageConfig(BTreeMap<usize, f64>);

impl MovingAverageConfig {
    /// An empty configuration. Must be populated before use.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Adds (or replaces) a window, builder style.
    #[must_use]
    pub fn with_window(mut self, window: usize, threshold_pct: f64) -> Self {
        self.0.insert(window, threshold_pct);
        self
    }

    /// Adds (or replaces) a window.
    pub fn insert(&mut self, window: usize, threshold_pct: f64) {
        self.0.insert(window, threshold_pct);
    }

    /// `(window, threshold_pct)` pairs in ascending window order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.0.iter().map(|(&w, &t)| (w, t))
    }

    /// Window lengths in ascending order.
    pub fn windows(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.keys().copied()
    }

    /// Number of configured windows.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no windows are configured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The longest configured window, or 0 when empty.
    pub fn max_window(&self) -> usize {
        self.0.keys().next_back().copied().unwrap_or(0)
    }

    /// Checks every window and threshold.
    ///
    /// # Errors
    ///
    /// Returns [`BandwatchError::InvalidConfig`] if no windows are configured,
    /// a window is zero, or a threshold is not a positive finite number.
    pub fn validate(&self) -> Result<()> {
        if self.0.is_empty() {
            return Err(BandwatchError::InvalidConfig(
                "at least one moving-average window is required".to_string(),
            ));
        }
        for (&window, &threshold) in &self.0 {
            if window == 0 {
                return Err(BandwatchError::InvalidConfig(
                    "moving-average window must be positive".to_string(),
                ));
            }
            if !threshold.is_finite() || threshold <= 0.0 {
                return Err(BandwatchError::InvalidConfig(format!(
                    "threshold for MA{window} must be a positive percentage, got {threshold}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for MovingAverageConfig {
    fn default() -> Self {
        Self::new()
            .with_window(5, 1.75)
            .with_window(10, 2.75)
            .with_window(15, 3.5)
            .with_window(20, 4.0)
            .with_window(100, 8.0)
    }
}

impl FromIterator<(usize, f64)> for MovingAverageConfig {
    fn from_iter<I: IntoIterator<Item = (usize, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Full configuration of the breach engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreachConfig {
    /// Windows and thresholds to test.
    pub moving_averages: MovingAverageConfig,

    /// Net breach count at which a SELL (or, negated, a BUY) is raised
    /// (default: 4)
    pub breach_limit: u32,
}

impl Default for BreachConfig {
    fn default() -> Self {
        Self {
            moving_averages: MovingAverageConfig::default(),
            breach_limit: 4,
        }
    }
}

impl BreachConfig {
    /// Creates a configuration from windows and a breach limit.
    #[must_use]
    pub const fn new(moving_averages: MovingAverageConfig, breach_limit: u32) -> Self {
        Self {
            moving_averages,
            breach_limit,
        }
    }

    /// Checks the windows and the breach limit.
    ///
    /// # Errors
    ///
    /// Returns [`BandwatchError::InvalidConfig`] for a bad window or
    /// threshold, or a breach limit of zero (which would make every neutral
    /// day both a BUY and a SELL).
    pub fn validate(&self) -> Result<()> {
        self.moving_averages.validate()?;
        if self.breach_limit == 0 {
            return Err(BandwatchError::InvalidConfig(
                "breach limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
