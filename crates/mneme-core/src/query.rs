//! Read models returned by the query surface.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::Entity;

/// A scored hit from entity search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitySearchResult {
    #[serde(flatten)]
    pub entity: Entity,
    /// Combined text relevance and connectivity score. Higher is better.
    pub score: f64,
    /// Number of edges touching the entity at search time.
    pub connection_count: usize,
}

/// An ordered walk from one entity to another.
///
/// `entity_ids` always has one more element than `relationship_ids`; the
/// trivial self-path has a single entity and no relationships.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipPath {
    pub entity_ids: Vec<Uuid>,
    pub relationship_ids: Vec<Uuid>,
    /// Product of edge strengths along the path; 1.0 for the trivial path.
    pub strength: f32,
}

impl RelationshipPath {
    /// A path containing only the start entity.
    pub fn trivial(entity_id: Uuid) -> Self {
        Self {
            entity_ids: vec![entity_id],
            relationship_ids: Vec::new(),
            strength: 1.0,
        }
    }

    pub fn hop_count(&self) -> usize {
        self.relationship_ids.len()
    }
}

/// Aggregate shape of the graph at a point in time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphStatistics {
    pub entity_count: usize,
    pub relationship_count: usize,
    /// Entity counts keyed by `EntityType::as_str()`.
    pub entities_by_type: HashMap<String, usize>,
    /// Relationship counts keyed by `RelationshipType::as_str()`.
    pub relationships_by_type: HashMap<String, usize>,
    pub avg_relationships_per_entity: f64,
}
