//! Entity extraction configuration with sensible defaults

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Confidence scoring and filtering settings for entity extraction.
///
/// Scores start at `base_confidence`, accumulate context bonuses, and are
/// clamped to `confidence_cap`. Candidates below their type's minimum are
/// dropped before resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Starting score for every candidate before bonuses
    #[serde(default = "default_base_confidence")]
    pub base_confidence: f32,
    /// Hard upper bound on extraction confidence; never reaches certainty
    #[serde(default = "default_confidence_cap")]
    pub confidence_cap: f32,
    /// Bonus per distinct type trigger word near the match
    #[serde(default = "default_trigger_bonus")]
    pub trigger_bonus: f32,
    /// How far around the match (in chars, each side) trigger words count
    #[serde(default = "default_trigger_window_chars")]
    pub trigger_window_chars: usize,
    /// Bonus when the candidate name appears in the record title
    #[serde(default = "default_title_bonus")]
    pub title_bonus: f32,
    /// Bonus per body occurrence beyond the first
    #[serde(default = "default_repeat_mention_bonus")]
    pub repeat_mention_bonus: f32,
    /// Cap on the accumulated repeat-mention bonus
    #[serde(default = "default_repeat_mention_bonus_cap")]
    pub repeat_mention_bonus_cap: f32,
    /// Bonus when the record kind is relevant to the entity type
    #[serde(default = "default_kind_relevance_bonus")]
    pub kind_relevance_bonus: f32,
    /// Bonus when a metadata value equals the candidate name
    #[serde(default = "default_metadata_exact_bonus")]
    pub metadata_exact_bonus: f32,
    /// Bonus when a metadata value merely contains the candidate name
    #[serde(default = "default_metadata_partial_bonus")]
    pub metadata_partial_bonus: f32,
    /// Bonus when the candidate name matches one of the record tags
    #[serde(default = "default_tag_match_bonus")]
    pub tag_match_bonus: f32,
    /// Bonus for proper-noun shape on person/organization/technology names
    #[serde(default = "default_proper_noun_bonus")]
    pub proper_noun_bonus: f32,
    /// Acceptance threshold applied when no per-type override exists
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f32,
    /// Per-type threshold overrides, keyed by entity type name
    #[serde(default = "default_min_confidence_overrides")]
    pub min_confidence_overrides: HashMap<String, f32>,
    /// Upper bound on matches examined per pattern in one record
    #[serde(default = "default_max_matches_per_pattern")]
    pub max_matches_per_pattern: usize,
}

fn default_base_confidence() -> f32 {
    0.5
}

fn default_confidence_cap() -> f32 {
    0.95
}

fn default_trigger_bonus() -> f32 {
    0.1
}

fn default_trigger_window_chars() -> usize {
    100
}

fn default_title_bonus() -> f32 {
    0.2
}

fn default_repeat_mention_bonus() -> f32 {
    0.05
}

fn default_repeat_mention_bonus_cap() -> f32 {
    0.2
}

fn default_kind_relevance_bonus() -> f32 {
    0.15
}

fn default_metadata_exact_bonus() -> f32 {
    0.2
}

fn default_metadata_partial_bonus() -> f32 {
    0.1
}

fn default_tag_match_bonus() -> f32 {
    0.1
}

fn default_proper_noun_bonus() -> f32 {
    0.1
}

fn default_min_confidence() -> f32 {
    0.5
}

fn default_min_confidence_overrides() -> HashMap<String, f32> {
    // Paths and document titles false-positive easily; concepts are fuzzy
    // by nature and get a looser gate.
    HashMap::from([
        ("file".to_string(), 0.6),
        ("document".to_string(), 0.6),
        ("concept".to_string(), 0.45),
    ])
}

fn default_max_matches_per_pattern() -> usize {
    64
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            base_confidence: default_base_confidence(),
            confidence_cap: default_confidence_cap(),
            trigger_bonus: default_trigger_bonus(),
            trigger_window_chars: default_trigger_window_chars(),
            title_bonus: default_title_bonus(),
            repeat_mention_bonus: default_repeat_mention_bonus(),
            repeat_mention_bonus_cap: default_repeat_mention_bonus_cap(),
            kind_relevance_bonus: default_kind_relevance_bonus(),
            metadata_exact_bonus: default_metadata_exact_bonus(),
            metadata_partial_bonus: default_metadata_partial_bonus(),
            tag_match_bonus: default_tag_match_bonus(),
            proper_noun_bonus: default_proper_noun_bonus(),
            min_confidence: default_min_confidence(),
            min_confidence_overrides: default_min_confidence_overrides(),
            max_matches_per_pattern: default_max_matches_per_pattern(),
        }
    }
}

impl ExtractionConfig {
    /// Acceptance threshold for one entity type, honoring overrides.
    pub fn min_confidence_for(&self, entity_type: &str) -> f32 {
        self.min_confidence_overrides
            .get(entity_type)
            .copied()
            .unwrap_or(self.min_confidence)
    }
}
