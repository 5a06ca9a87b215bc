//! Entity types for the knowledge graph.
//!
//! An [`Entity`] is a deduplicated node: one row per `(lowercased name,
//! entity type)` pair, accumulated across every record that mentions it.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// The closed set of entity kinds the extractor can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Person,
    Project,
    Technology,
    Concept,
    Organization,
    File,
    Repository,
    Api,
    Database,
    Service,
    Location,
    Site,
    Document,
}

impl EntityType {
    /// All entity types, in declaration order.
    pub const ALL: [EntityType; 13] = [
        EntityType::Person,
        EntityType::Project,
        EntityType::Technology,
        EntityType::Concept,
        EntityType::Organization,
        EntityType::File,
        EntityType::Repository,
        EntityType::Api,
        EntityType::Database,
        EntityType::Service,
        EntityType::Location,
        EntityType::Site,
        EntityType::Document,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Person => "person",
            EntityType::Project => "project",
            EntityType::Technology => "technology",
            EntityType::Concept => "concept",
            EntityType::Organization => "organization",
            EntityType::File => "file",
            EntityType::Repository => "repository",
            EntityType::Api => "api",
            EntityType::Database => "database",
            EntityType::Service => "service",
            EntityType::Location => "location",
            EntityType::Site => "site",
            EntityType::Document => "document",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn default_confidence() -> f32 {
    0.5
}

/// A node in the knowledge graph.
///
/// Confidence is monotonic: merges may only raise it, and it is capped below
/// certainty by the extraction layer. `source_record_ids` keeps provenance as
/// an ordered set so serialized output is deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: Uuid,
    pub name: String,
    pub entity_type: EntityType,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub properties: HashMap<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub observations: Vec<String>,
    #[serde(default = "default_confidence")]
    pub confidence: f32,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub source_record_ids: BTreeSet<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Entity {
    /// Create a new entity with a generated id and default confidence.
    pub fn new(name: impl Into<String>, entity_type: EntityType) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            entity_type,
            properties: HashMap::new(),
            observations: Vec::new(),
            confidence: default_confidence(),
            source_record_ids: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }

    #[must_use]
    pub fn with_observation(mut self, observation: impl Into<String>) -> Self {
        self.observations.push(observation.into());
        self
    }

    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn with_source_record(mut self, record_id: impl Into<String>) -> Self {
        self.source_record_ids.insert(record_id.into());
        self
    }

    /// Uniqueness key for entity resolution: `(lowercased name, type)`.
    pub fn dedup_key(&self) -> String {
        dedup_key(&self.name, self.entity_type)
    }
}

/// Build the resolution key for a `(name, type)` pair without an `Entity`.
pub fn dedup_key(name: &str, entity_type: EntityType) -> String {
    format!("{}:{}", entity_type.as_str(), name.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_type_serializes_snake_case() {
        let json = serde_json::to_string(&EntityType::Organization).unwrap();
        assert_eq!(json, "\"organization\"");

        let parsed: EntityType = serde_json::from_str("\"technology\"").unwrap();
        assert_eq!(parsed, EntityType::Technology);
    }

    #[test]
    fn entity_type_covers_all_variants() {
        assert_eq!(EntityType::ALL.len(), 13);
        for entity_type in EntityType::ALL {
            assert!(!entity_type.as_str().is_empty());
        }
    }

    #[test]
    fn dedup_key_is_case_insensitive_on_name() {
        let a = Entity::new("React", EntityType::Technology);
        let b = Entity::new("react", EntityType::Technology);
        assert_eq!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn dedup_key_distinguishes_types() {
        let a = Entity::new("Mercury", EntityType::Project);
        let b = Entity::new("Mercury", EntityType::Technology);
        assert_ne!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn builder_methods_accumulate() {
        let entity = Entity::new("Ada Lovelace", EntityType::Person)
            .with_confidence(0.8)
            .with_observation("mentioned in meeting notes")
            .with_source_record("rec-1")
            .with_property("role", serde_json::json!("engineer"));

        assert_eq!(entity.confidence, 0.8);
        assert_eq!(entity.observations.len(), 1);
        assert!(entity.source_record_ids.contains("rec-1"));
        assert_eq!(entity.properties["role"], serde_json::json!("engineer"));
    }
}
