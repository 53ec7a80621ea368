//! Engine configuration.
//!
//! All numeric constants of the scoring model are tunable defaults. Only the
//! relative ordering they produce is relied upon.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::result::{PinpointError, PinpointResult};

/// Relative weight of each scoring factor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ScoreWeights {
    /// Match-count factor
    pub uniqueness: f64,
    /// Fragility heuristics
    pub stability: f64,
    /// Per-type prior
    pub type_reliability: f64,
    /// Naming pattern analysis
    pub pattern: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            uniqueness: 0.40,
            stability: 0.35,
            type_reliability: 0.15,
            pattern: 0.10,
        }
    }
}

impl ScoreWeights {
    /// Sum of all weights
    #[must_use]
    pub fn total(&self) -> f64 {
        self.uniqueness + self.stability + self.type_reliability + self.pattern
    }
}

/// Configuration for the locator engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Factor weights
    pub weights: ScoreWeights,
    /// Scores below this get a fragility warning
    pub fragile_threshold: u8,
    /// Stability sub-score at or above which a strategy is stable
    pub stable_threshold: f64,
    /// Ancestors walked when building hierarchical CSS selectors
    pub max_ancestor_depth: usize,
    /// Ancestors walked when building ARIA hierarchies
    pub max_hierarchy_depth: usize,
    /// Text content kept in element snapshots
    pub max_text_length: usize,
    /// Longest text used in XPath text predicates
    pub max_text_predicate_length: usize,
    /// Capacity of the in-memory history
    pub history_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            fragile_threshold: 50,
            stable_threshold: 0.5,
            max_ancestor_depth: 5,
            max_hierarchy_depth: 10,
            max_text_length: 100,
            max_text_predicate_length: 50,
            history_limit: 50,
        }
    }
}

impl EngineConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set factor weights
    #[must_use]
    pub const fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Set fragile threshold
    #[must_use]
    pub const fn with_fragile_threshold(mut self, threshold: u8) -> Self {
        self.fragile_threshold = threshold;
        self
    }

    /// Set stable threshold
    #[must_use]
    pub const fn with_stable_threshold(mut self, threshold: f64) -> Self {
        self.stable_threshold = threshold;
        self
    }

    /// Set CSS ancestor depth cap
    #[must_use]
    pub const fn with_max_ancestor_depth(mut self, depth: usize) -> Self {
        self.max_ancestor_depth = depth;
        self
    }

    /// Set ARIA hierarchy depth cap
    #[must_use]
    pub const fn with_max_hierarchy_depth(mut self, depth: usize) -> Self {
        self.max_hierarchy_depth = depth;
        self
    }

    /// Set snapshot text length
    #[must_use]
    pub const fn with_max_text_length(mut self, len: usize) -> Self {
        self.max_text_length = len;
        self
    }

    /// Set history capacity
    #[must_use]
    pub const fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> PinpointResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file
    pub fn from_path(path: impl AsRef<Path>) -> PinpointResult<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> PinpointResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> PinpointResult<()> {
        let w = &self.weights;
        let all = [w.uniqueness, w.stability, w.type_reliability, w.pattern];
        if all.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(PinpointError::invalid_config(
                "weights must be finite and non-negative",
            ));
        }
        if (w.total() - 1.0).abs() > 0.001 {
            return Err(PinpointError::invalid_config(format!(
                "weights must sum to 1.0, got {:.3}",
                w.total()
            )));
        }
        if !(0.0..=1.0).contains(&self.stable_threshold) {
            return Err(PinpointError::invalid_config(
                "stable_threshold must be within [0, 1]",
            ));
        }
        if self.fragile_threshold > 100 {
            return Err(PinpointError::invalid_config(
                "fragile_threshold must be within [0, 100]",
            ));
        }
        if self.history_limit == 0 {
            return Err(PinpointError::invalid_config("history_limit must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod default_tests {
        use super::*;

        #[test]
        fn test_default_weights_sum_to_one() {
            let w = ScoreWeights::default();
            assert!((w.total() - 1.0).abs() < 1e-9);
            assert!(w.uniqueness > w.stability);
            assert!(w.stability > w.type_reliability);
            assert!(w.type_reliability > w.pattern);
        }

        #[test]
        fn test_default_config_is_valid() {
            assert!(EngineConfig::default().validate().is_ok());
        }

        #[test]
        fn test_builders() {
            let config = EngineConfig::new()
                .with_fragile_threshold(60)
                .with_stable_threshold(0.7)
                .with_max_ancestor_depth(3)
                .with_max_hierarchy_depth(4)
                .with_max_text_length(20)
                .with_history_limit(5);
            assert_eq!(config.fragile_threshold, 60);
            assert_eq!(config.stable_threshold, 0.7);
            assert_eq!(config.max_ancestor_depth, 3);
            assert_eq!(config.max_hierarchy_depth, 4);
            assert_eq!(config.max_text_length, 20);
            assert_eq!(config.history_limit, 5);
        }
    }

    mod validation_tests {
        use super::*;

        #[test]
        fn test_rejects_weights_not_summing_to_one() {
            let config = EngineConfig::new().with_weights(ScoreWeights {
                uniqueness: 0.5,
                stability: 0.5,
                type_reliability: 0.5,
                pattern: 0.0,
            });
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("sum to 1.0"));
        }

        #[test]
        fn test_rejects_negative_weight() {
            let config = EngineConfig::new().with_weights(ScoreWeights {
                uniqueness: 1.2,
                stability: -0.2,
                type_reliability: 0.0,
                pattern: 0.0,
            });
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_rejects_out_of_range_thresholds() {
            assert!(EngineConfig::new().with_stable_threshold(1.5).validate().is_err());
            assert!(EngineConfig::new().with_fragile_threshold(101).validate().is_err());
            assert!(EngineConfig::new().with_history_limit(0).validate().is_err());
        }
    }

    mod yaml_tests {
        use super::*;

        #[test]
        fn test_partial_yaml_uses_defaults() {
            let config = EngineConfig::from_yaml_str("fragile_threshold: 40\n").unwrap();
            assert_eq!(config.fragile_threshold, 40);
            assert_eq!(config.max_ancestor_depth, 5);
            assert_eq!(config.weights, ScoreWeights::default());
        }

        #[test]
        fn test_yaml_weights() {
            let yaml = "weights:\n  uniqueness: 0.5\n  stability: 0.3\n  type_reliability: 0.1\n  pattern: 0.1\n";
            let config = EngineConfig::from_yaml_str(yaml).unwrap();
            assert_eq!(config.weights.uniqueness, 0.5);
        }

        #[test]
        fn test_invalid_yaml_weights_rejected() {
            let yaml = "weights:\n  uniqueness: 0.9\n";
            assert!(EngineConfig::from_yaml_str(yaml).is_err());
        }

        #[test]
        fn test_from_path() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("pinpoint.yaml");
            std::fs::write(&path, EngineConfig::default().to_yaml().unwrap()).unwrap();
            let config = EngineConfig::from_path(&path).unwrap();
            assert_eq!(config, EngineConfig::default());
        }

        #[test]
        fn test_from_missing_path_is_io_error() {
            let err = EngineConfig::from_path("/nonexistent/pinpoint.yaml").unwrap_err();
            assert!(matches!(err, PinpointError::Io(_)));
        }
    }
}
