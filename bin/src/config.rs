//! CLI configuration file.

use anyhow::{Context, Result};
use bandwatch_signals::breach::BreachConfig;
use bandwatch_signals::markers::{DEFAULT_TOLERANCE, DEFAULT_VISIBLE_POINTS};
use bandwatch_signals::scorecard::ScorecardConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Chart marker settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct MarkerSettings {
    /// Net breach magnitude that gets a marker (default: 4)
    pub(crate) tolerance: u32,
    /// Trailing rows considered (default: 100)
    pub(crate) points: usize,
}

impl Default for MarkerSettings {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            points: DEFAULT_VISIBLE_POINTS,
        }
    }
}

/// Settings for every subcommand, read from a JSON file.
///
/// Every section is optional:
///
/// ```json
/// {
///   "breach": { "moving_averages": { "5": 1.75, "20": 4.0 }, "breach_limit": 2 },
///   "markers": { "tolerance": 3, "points": 250 },
///   "scorecard": { "tolerance": 4 }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub(crate) breach: BreachConfig,
    pub(crate) markers: MarkerSettings,
    pub(crate) scorecard: ScorecardConfig,
}

impl AppConfig {
    /// Loads the configuration, falling back to defaults when no file is
    /// given or the file does not exist.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            warn!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_json(&text)
            .with_context(|| format!("loading config {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parses and validates a JSON configuration.
    pub(crate) fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every model section.
    pub(crate) fn validate(&self) -> Result<()> {
        self.breach.validate()?;
        self.scorecard.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.markers.tolerance, 4);
        assert_eq!(config.markers.points, 100);
        assert_eq!(config.breach.breach_limit, 4);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = Path::new("/nonexistent/bandwatch.json");
        assert_eq!(AppConfig::load(Some(path)).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_partial_json() {
        let config =
            AppConfig::from_json(r#"{"breach": {"breach_limit": 2}, "markers": {"points": 30}}"#)
                .unwrap();
        assert_eq!(config.breach.breach_limit, 2);
        assert_eq!(config.breach.moving_averages.len(), 5);
        assert_eq!(config.markers.points, 30);
        assert_eq!(config.markers.tolerance, 4);
        assert_eq!(config.scorecard.tolerance, 5);
    }

    #[test]
    fn test_invalid_sections_are_rejected() {
        assert!(AppConfig::from_json(r#"{"breach": {"breach_limit": 0}}"#).is_err());
        assert!(AppConfig::from_json(r#"{"scorecard": {"tolerance": 9}}"#).is_err());
        assert!(AppConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path =
            std::env::temp_dir().join(format!("bandwatch-config-{}.json", std::process::id()));
        fs::write(&path, r#"{"markers": {"tolerance": 2}}"#).unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.markers.tolerance, 2);
    }
}
