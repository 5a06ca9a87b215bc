//! Relationship inference configuration

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Settings for the two inference strategies.
///
/// Pattern-derived relationships (textual co-occurrence) share one base
/// confidence; their strengths are per-archetype and overridable here.
/// Type-pair priors fire without textual evidence and carry a lower
/// confidence of their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Confidence assigned to every pattern-derived relationship
    #[serde(default = "default_pattern_base_confidence")]
    pub pattern_base_confidence: f32,
    /// Confidence assigned to type-pair prior relationships
    #[serde(default = "default_prior_confidence")]
    pub prior_confidence: f32,
    /// Strength overrides per relationship archetype, keyed by type name
    #[serde(default = "default_archetype_strengths")]
    pub archetype_strengths: HashMap<String, f32>,
    /// Fallback window (chars) when no sentence boundary brackets a trigger
    #[serde(default = "default_sentence_window_chars")]
    pub sentence_window_chars: usize,
    /// Whether type-pair priors run at all
    #[serde(default = "default_enable_type_priors")]
    pub enable_type_priors: bool,
}

fn default_pattern_base_confidence() -> f32 {
    0.6
}

fn default_prior_confidence() -> f32 {
    0.5
}

fn default_archetype_strengths() -> HashMap<String, f32> {
    HashMap::from([
        ("created_by".to_string(), 0.8),
        ("belongs_to".to_string(), 0.9),
        ("depends_on".to_string(), 0.7),
        ("implements".to_string(), 0.7),
        ("contains".to_string(), 0.7),
        ("works_on".to_string(), 0.6),
        ("uses".to_string(), 0.6),
        ("calls".to_string(), 0.6),
        ("manages".to_string(), 0.6),
        ("extends".to_string(), 0.6),
        ("collaborates_with".to_string(), 0.5),
    ])
}

fn default_sentence_window_chars() -> usize {
    160
}

fn default_enable_type_priors() -> bool {
    true
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            pattern_base_confidence: default_pattern_base_confidence(),
            prior_confidence: default_prior_confidence(),
            archetype_strengths: default_archetype_strengths(),
            sentence_window_chars: default_sentence_window_chars(),
            enable_type_priors: default_enable_type_priors(),
        }
    }
}

impl InferenceConfig {
    /// Strength for one archetype, falling back when not configured.
    pub fn archetype_strength(&self, relationship_type: &str, fallback: f32) -> f32 {
        self.archetype_strengths
            .get(relationship_type)
            .copied()
            .unwrap_or(fallback)
    }
}
