//! Whole-graph statistics from a single snapshot read.

use std::collections::HashMap;

use mneme_core::{GraphResult, GraphStatistics, GraphStore};

/// Count entities and relationships by type and derive the density figure.
pub async fn statistics<S>(store: &S) -> GraphResult<GraphStatistics>
where
    S: GraphStore + ?Sized,
{
    let entities = store.all_entities().await?;
    let relationships = store.all_relationships().await?;

    let mut entities_by_type: HashMap<String, usize> = HashMap::new();
    for entity in &entities {
        *entities_by_type
            .entry(entity.entity_type.as_str().to_string())
            .or_insert(0) += 1;
    }

    let mut relationships_by_type: HashMap<String, usize> = HashMap::new();
    for relationship in &relationships {
        *relationships_by_type
            .entry(relationship.relationship_type.as_str().to_string())
            .or_insert(0) += 1;
    }

    let entity_count = entities.len();
    let relationship_count = relationships.len();
    let avg_relationships_per_entity = if entity_count == 0 {
        0.0
    } else {
        relationship_count as f64 / entity_count as f64
    };

    Ok(GraphStatistics {
        entity_count,
        relationship_count,
        entities_by_type,
        relationships_by_type,
        avg_relationships_per_entity,
    })
}
