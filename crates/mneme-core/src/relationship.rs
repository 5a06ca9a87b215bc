//! Relationship types for the knowledge graph.
//!
//! A [`Relationship`] is a directed, typed edge between two entities. The
//! graph holds at most one edge per `(from, to, type)` triple; re-inference
//! merges provenance into the existing edge instead of inserting a duplicate.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// The closed set of relationship kinds the inferrer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    WorksOn,
    CreatedBy,
    DependsOn,
    RelatedTo,
    BelongsTo,
    Implements,
    Uses,
    Calls,
    Extends,
    Contains,
    Manages,
    CollaboratesWith,
}

impl RelationshipType {
    /// All relationship types, in declaration order.
    pub const ALL: [RelationshipType; 12] = [
        RelationshipType::WorksOn,
        RelationshipType::CreatedBy,
        RelationshipType::DependsOn,
        RelationshipType::RelatedTo,
        RelationshipType::BelongsTo,
        RelationshipType::Implements,
        RelationshipType::Uses,
        RelationshipType::Calls,
        RelationshipType::Extends,
        RelationshipType::Contains,
        RelationshipType::Manages,
        RelationshipType::CollaboratesWith,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipType::WorksOn => "works_on",
            RelationshipType::CreatedBy => "created_by",
            RelationshipType::DependsOn => "depends_on",
            RelationshipType::RelatedTo => "related_to",
            RelationshipType::BelongsTo => "belongs_to",
            RelationshipType::Implements => "implements",
            RelationshipType::Uses => "uses",
            RelationshipType::Calls => "calls",
            RelationshipType::Extends => "extends",
            RelationshipType::Contains => "contains",
            RelationshipType::Manages => "manages",
            RelationshipType::CollaboratesWith => "collaborates_with",
        }
    }
}

impl std::fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which edges to fetch relative to an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Outgoing,
    Incoming,
    Both,
}

fn default_strength() -> f32 {
    0.5
}

fn default_rel_confidence() -> f32 {
    0.5
}

/// A directed, typed edge between two entities.
///
/// `strength` ranks the edge when traversing; `confidence` records how sure
/// the inference was. Both live in `[0, 1]` and only rise on merge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    pub id: Uuid,
    pub from_entity_id: Uuid,
    pub to_entity_id: Uuid,
    pub relationship_type: RelationshipType,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub properties: HashMap<String, Value>,
    #[serde(default = "default_strength")]
    pub strength: f32,
    #[serde(default = "default_rel_confidence")]
    pub confidence: f32,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub source_record_ids: BTreeSet<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Relationship {
    /// Create a new edge with a generated id and default strength/confidence.
    pub fn new(from: Uuid, to: Uuid, relationship_type: RelationshipType) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            from_entity_id: from,
            to_entity_id: to,
            relationship_type,
            properties: HashMap::new(),
            strength: default_strength(),
            confidence: default_rel_confidence(),
            source_record_ids: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub fn with_strength(mut self, strength: f32) -> Self {
        self.strength = strength;
        self
    }

    #[must_use]
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
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

    /// Uniqueness key for edge deduplication: the full `(from, to, type)` triple.
    pub fn triple_key(&self) -> String {
        triple_key(self.from_entity_id, self.to_entity_id, self.relationship_type)
    }

    /// True when `entity_id` is either endpoint.
    pub fn touches(&self, entity_id: Uuid) -> bool {
        self.from_entity_id == entity_id || self.to_entity_id == entity_id
    }
}

/// Build the deduplication key for a `(from, to, type)` triple.
pub fn triple_key(from: Uuid, to: Uuid, relationship_type: RelationshipType) -> String {
    format!("{}:{}:{}", from, to, relationship_type.as_str())
}
