//! Model registry for discovering available models.
//!
//! This module provides metadata for every model in the bandwatch-signals
//! library.

use serde::{Deserialize, Serialize};

/// Model category classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelCategory {
    /// Multi-ticker screens run over a whole price table
    Screen,
    /// Single-ticker technical indicators
    Technical,
}

impl ModelCategory {
    /// Get a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &str {
        match self {
            Self::Screen => "Cross-ticker screens producing BUY/SELL signals",
            Self::Technical => "Technical analysis indicators for a single ticker",
        }
    }
}

/// Metadata about a model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Unique identifier for the model
    pub name: &'static str,

    /// Category classification
    pub category: ModelCategory,

    /// Human-readable description
    pub description: &'static str,

    /// Longest window of the default configuration, in rows
    pub typical_lookback: usize,
}

/// Get information about all available models.
#[must_use]
pub fn available_models() -> Vec<ModelInfo> {
    vec![
        ModelInfo {
            name: "ma_breach",
            category: ModelCategory::Screen,
            description: "Net count of moving-average threshold breaches",
            typical_lookback: 100,
        },
        ModelInfo {
            name: "technical_scorecard",
            category: ModelCategory::Technical,
            description: "Rolling-mean distance and monthly change votes",
            typical_lookback: 180,
        },
    ]
}

/// Get all models in a specific category.
#[must_use]
pub fn models_by_category(category: ModelCategory) -> Vec<ModelInfo> {
    available_models()
        .into_iter()
        .filter(|info| info.category == category)
        .collect()
}

/// Get information about a specific model by name.
#[must_use]
pub fn model_info(name: &str) -> Option<ModelInfo> {
    available_models()
        .into_iter()
        .find(|info| info.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breach::MovingAverageBreach;
    use crate::scorecard::TechnicalScorecard;
    use bandwatch_traits::SeriesModel;

    #[test]
    fn test_available_models() {
        let models = available_models();
        assert_eq!(models.len(), 2);
        assert_eq!(models_by_category(ModelCategory::Screen).len(), 1);
        assert_eq!(models_by_category(ModelCategory::Technical).len(), 1);
    }

    #[test]
    fn test_registry_matches_models() {
        let breach = MovingAverageBreach::default();
        let info = model_info(breach.name()).unwrap();
        assert_eq!(info.typical_lookback, breach.lookback());

        let scorecard = TechnicalScorecard::default();
        let info = model_info(scorecard.name()).unwrap();
        assert_eq!(info.typical_lookback, scorecard.lookback());
    }

    #[test]
    fn test_unknown_model() {
        assert!(model_info("nonexistent_model").is_none());
    }

    #[test]
    fn test_category_descriptions() {
        assert!(!ModelCategory::Screen.description().is_empty());
        assert!(!ModelCategory::Technical.description().is_empty());
    }
}
