//! Pattern-driven entity extraction with confidence scoring.

use std::collections::HashMap;

use tracing::debug;

use mneme_config::ExtractionConfig;
use mneme_core::{EntityType, MemoryRecord};

use super::patterns::{entity_patterns, relevant_kinds, trigger_words};
use crate::text::window_around;

/// Radius of the context snippet stored as an observation, in bytes around
/// the first mention (clamped to char boundaries).
const SNIPPET_RADIUS: usize = 60;

/// An extracted entity mention, scored but not yet resolved against the
/// graph.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityCandidate {
    pub name: String,
    pub entity_type: EntityType,
    pub confidence: f32,
    pub observations: Vec<String>,
    /// Byte offset of the first mention in the record's scan text. Mention
    /// order breaks direction ties during relationship inference.
    pub first_offset: usize,
}

struct CandidateAccum {
    name: String,
    entity_type: EntityType,
    offsets: Vec<usize>,
}

/// Scans record text against the pattern table and scores each candidate.
///
/// Extraction is synchronous, allocation-only work. It cannot fail: a
/// candidate that does not survive cleaning, validation, or the confidence
/// threshold is dropped with a debug log, never an error.
#[derive(Debug, Clone, Default)]
pub struct EntityExtractor {
    config: ExtractionConfig,
}

impl EntityExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Extract scored entity candidates from one record.
    ///
    /// Candidates sharing `(type, lowercased name)` are merged in-pass. A
    /// name claimed by an earlier pattern family is skipped by later
    /// families, so the specific rows at the top of the table win over the
    /// loose shapes at the bottom.
    pub fn extract(&self, record: &MemoryRecord) -> Vec<EntityCandidate> {
        let text = record.scan_text();

        let mut claimed: HashMap<String, EntityType> = HashMap::new();
        let mut accums: HashMap<(EntityType, String), CandidateAccum> = HashMap::new();
        let mut order: Vec<(EntityType, String)> = Vec::new();

        for pattern in entity_patterns() {
            for caps in pattern
                .regex
                .captures_iter(&text)
                .take(self.config.max_matches_per_pattern)
            {
                let group = caps.get(1).filter(|g| !g.as_str().trim().is_empty());
                let mention = match group.or_else(|| caps.get(0)) {
                    Some(m) => m,
                    None => continue,
                };

                let name = pattern.cleaning.apply(mention.as_str());
                if name.is_empty() || !pattern.validation.check(&name) {
                    debug!(raw = mention.as_str(), "candidate rejected by validation");
                    continue;
                }

                let name_lower = name.to_lowercase();
                match claimed.get(&name_lower) {
                    // An earlier family already owns this name
                    Some(owner) if *owner != pattern.entity_type => continue,
                    Some(_) => {}
                    None => {
                        claimed.insert(name_lower.clone(), pattern.entity_type);
                    }
                }

                let key = (pattern.entity_type, name_lower);
                let accum = accums.entry(key.clone()).or_insert_with(|| {
                    order.push(key);
                    CandidateAccum {
                        name,
                        entity_type: pattern.entity_type,
                        offsets: Vec::new(),
                    }
                });
                if !accum.offsets.contains(&mention.start()) {
                    accum.offsets.push(mention.start());
                }
            }
        }

        let mut candidates = Vec::with_capacity(order.len());
        for key in &order {
            let accum = match accums.get(key) {
                Some(a) => a,
                None => continue,
            };
            let first_offset = match accum.offsets.iter().min() {
                Some(&offset) => offset,
                None => continue,
            };

            let confidence = self.score(record, &text, accum, first_offset);
            let threshold = self.config.min_confidence_for(accum.entity_type.as_str());
            if confidence < threshold {
                debug!(
                    name = %accum.name,
                    entity_type = %accum.entity_type,
                    confidence,
                    threshold,
                    "candidate below confidence threshold"
                );
                continue;
            }

            candidates.push(EntityCandidate {
                name: accum.name.clone(),
                entity_type: accum.entity_type,
                confidence,
                observations: vec![observation(record, &text, first_offset)],
                first_offset,
            });
        }

        candidates.sort_by(|a, b| {
            a.first_offset
                .cmp(&b.first_offset)
                .then_with(|| a.name.cmp(&b.name))
        });
        candidates
    }

    fn score(
        &self,
        record: &MemoryRecord,
        text: &str,
        accum: &CandidateAccum,
        first_offset: usize,
    ) -> f32 {
        let cfg = &self.config;
        let name_lower = accum.name.to_lowercase();
        let mut score = cfg.base_confidence;

        // Distinct trigger words near the first mention
        let window =
            window_around(text, first_offset, cfg.trigger_window_chars).to_lowercase();
        for trigger in trigger_words(accum.entity_type) {
            if window.contains(trigger) {
                score += cfg.trigger_bonus;
            }
        }

        if record.title.to_lowercase().contains(&name_lower) {
            score += cfg.title_bonus;
        }

        let repeats = accum.offsets.len().saturating_sub(1) as f32 * cfg.repeat_mention_bonus;
        score += repeats.min(cfg.repeat_mention_bonus_cap);

        if relevant_kinds(accum.entity_type).contains(&record.kind) {
            score += cfg.kind_relevance_bonus;
        }

        let mut meta_exact = false;
        let mut meta_partial = false;
        for value in record.metadata.values() {
            let value_lower = value.to_lowercase();
            if value_lower == name_lower {
                meta_exact = true;
                break;
            }
            if value_lower.contains(&name_lower) {
                meta_partial = true;
            }
        }
        if meta_exact {
            score += cfg.metadata_exact_bonus;
        } else if meta_partial {
            score += cfg.metadata_partial_bonus;
        }

        let tag_hit = record.tags.iter().any(|tag| {
            let tag_lower = tag.to_lowercase();
            tag_lower == name_lower || (tag_lower.len() >= 3 && name_lower.contains(&tag_lower))
        });
        if tag_hit {
            score += cfg.tag_match_bonus;
        }

        if matches!(
            accum.entity_type,
            EntityType::Person | EntityType::Organization | EntityType::Technology
        ) && has_proper_noun_shape(&accum.name)
        {
            score += cfg.proper_noun_bonus;
        }

        score.clamp(0.0, cfg.confidence_cap)
    }
}

fn has_proper_noun_shape(name: &str) -> bool {
    let starts_upper = name.chars().next().map_or(false, |c| c.is_uppercase());
    let letters: Vec<char> = name.chars().filter(|c| c.is_alphabetic()).collect();
    let shouting = letters.len() > 1 && letters.iter().all(|c| c.is_uppercase());
    starts_upper && !shouting
}

/// One-line mention description kept on the entity.
fn observation(record: &MemoryRecord, text: &str, offset: usize) -> String {
    let window = window_around(text, offset, SNIPPET_RADIUS);
    let snippet = window.split_whitespace().collect::<Vec<_>>().join(" ");
    format!("Mentioned in {} '{}': {}", record.kind, record.title, snippet)
}
