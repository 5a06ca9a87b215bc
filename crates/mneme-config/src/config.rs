//! Root configuration aggregate and loading

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::components::{ExtractionConfig, InferenceConfig, TraversalConfig};
use crate::error::ConfigError;

/// Top-level engine configuration.
///
/// Every section is optional in the source file; omitted sections take their
/// documented defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Entity extraction scoring and thresholds
    #[serde(default)]
    pub extraction: ExtractionConfig,
    /// Relationship inference strategies
    #[serde(default)]
    pub inference: InferenceConfig,
    /// Path finding bounds
    #[serde(default)]
    pub traversal: TraversalConfig,
}

impl GraphConfig {
    /// Parse a configuration from a TOML document.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML configuration file.
    #[cfg(feature = "toml")]
    pub fn load_from_path(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "loaded graph config");
        Self::from_toml_str(&raw)
    }

    /// Check that every weight and threshold is inside its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let unit = |name: &str, value: f32| -> Result<(), ConfigError> {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Validation(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
            Ok(())
        };

        unit("extraction.base_confidence", self.extraction.base_confidence)?;
        unit("extraction.confidence_cap", self.extraction.confidence_cap)?;
        unit("extraction.min_confidence", self.extraction.min_confidence)?;
        for (entity_type, threshold) in &self.extraction.min_confidence_overrides {
            unit(
                &format!("extraction.min_confidence_overrides.{entity_type}"),
                *threshold,
            )?;
        }
        if self.extraction.base_confidence > self.extraction.confidence_cap {
            return Err(ConfigError::Validation(format!(
                "extraction.base_confidence ({}) exceeds confidence_cap ({})",
                self.extraction.base_confidence, self.extraction.confidence_cap
            )));
        }

        unit(
            "inference.pattern_base_confidence",
            self.inference.pattern_base_confidence,
        )?;
        unit("inference.prior_confidence", self.inference.prior_confidence)?;
        for (archetype, strength) in &self.inference.archetype_strengths {
            unit(
                &format!("inference.archetype_strengths.{archetype}"),
                *strength,
            )?;
        }

        if self.traversal.max_paths == 0 {
            return Err(ConfigError::Validation(
                "traversal.max_paths must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        GraphConfig::default().validate().unwrap();
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config = GraphConfig::from_toml_str("").unwrap();
        assert_eq!(config.extraction.confidence_cap, 0.95);
        assert_eq!(config.traversal.default_max_depth, 3);
    }

    #[test]
    fn sectioned_toml_overrides_fields() {
        let raw = r#"
[extraction]
title_bonus = 0.25

[traversal]
default_max_depth = 5
"#;
        let config = GraphConfig::from_toml_str(raw).unwrap();
        assert_eq!(config.extraction.title_bonus, 0.25);
        assert_eq!(config.traversal.default_max_depth, 5);
        assert_eq!(config.traversal.max_paths, 10);
    }

    #[test]
    fn out_of_range_weight_is_rejected() {
        let result = GraphConfig::from_toml_str("[extraction]\nbase_confidence = 1.5");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn zero_max_paths_is_rejected() {
        let result = GraphConfig::from_toml_str("[traversal]\nmax_paths = 0");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn load_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mneme.toml");
        std::fs::write(&path, "[extraction]\nmin_confidence = 0.55\n").unwrap();

        let config = GraphConfig::load_from_path(&path).unwrap();
        assert_eq!(config.extraction.min_confidence, 0.55);
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = GraphConfig::load_from_path("/nonexistent/mneme.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
