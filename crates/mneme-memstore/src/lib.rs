//! # Mneme Memory Store
//!
//! In-memory [`GraphStore`] backend over concurrent maps. Used by tests and
//! benches, and by embedding callers that do not bring a durable backend.
//!
//! Secondary indexes keep the two hot lookups O(1): entity resolution by
//! `(lowercased name, type)` and edge deduplication by `(from, to, type)`.
//! Reads collect a snapshot at call time; they never block writers.

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use mneme_core::{
    dedup_key, triple_key, Direction, Entity, EntityStore, EntityType, GraphError, GraphResult,
    Relationship, RelationshipStore, RelationshipType,
};

/// Concurrent in-memory graph storage.
#[derive(Debug, Default)]
pub struct MemoryGraphStore {
    entities: DashMap<Uuid, Entity>,
    entity_index: DashMap<String, Uuid>,
    relationships: DashMap<Uuid, Relationship>,
    relationship_index: DashMap<String, Uuid>,
}

impl MemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntityStore for MemoryGraphStore {
    async fn insert_entity(&self, entity: Entity) -> GraphResult<Uuid> {
        let id = entity.id;
        debug!(name = %entity.name, entity_type = %entity.entity_type, "storing entity");
        self.entity_index.insert(entity.dedup_key(), id);
        self.entities.insert(id, entity);
        Ok(id)
    }

    async fn get_entity(&self, id: Uuid) -> GraphResult<Option<Entity>> {
        Ok(self.entities.get(&id).map(|e| e.clone()))
    }

    async fn update_entity(&self, id: Uuid, entity: Entity) -> GraphResult<()> {
        let Some(existing) = self.entities.get(&id).map(|e| e.clone()) else {
            return Err(GraphError::InvalidOperation(format!(
                "Entity {} does not exist",
                id
            )));
        };
        // A rename or retype moves the entity under a new resolution key.
        let old_key = existing.dedup_key();
        let new_key = entity.dedup_key();
        if old_key != new_key {
            self.entity_index.remove(&old_key);
        }
        self.entity_index.insert(new_key, id);
        self.entities.insert(id, entity);
        Ok(())
    }

    async fn find_by_name_and_type(
        &self,
        name: &str,
        entity_type: EntityType,
    ) -> GraphResult<Option<Entity>> {
        let key = dedup_key(name, entity_type);
        let Some(id) = self.entity_index.get(&key).map(|id| *id) else {
            return Ok(None);
        };
        Ok(self.entities.get(&id).map(|e| e.clone()))
    }

    async fn entities_by_type(
        &self,
        entity_type: EntityType,
        limit: usize,
    ) -> GraphResult<Vec<Entity>> {
        Ok(self
            .entities
            .iter()
            .filter(|e| e.entity_type == entity_type)
            .take(limit)
            .map(|e| e.clone())
            .collect())
    }

    async fn all_entities(&self) -> GraphResult<Vec<Entity>> {
        Ok(self.entities.iter().map(|e| e.clone()).collect())
    }

    async fn entity_count(&self) -> GraphResult<usize> {
        Ok(self.entities.len())
    }
}

#[async_trait]
impl RelationshipStore for MemoryGraphStore {
    async fn insert_relationship(&self, relationship: Relationship) -> GraphResult<Uuid> {
        if !self.entities.contains_key(&relationship.from_entity_id)
            || !self.entities.contains_key(&relationship.to_entity_id)
        {
            return Err(GraphError::MissingEndpoint {
                from: relationship.from_entity_id,
                to: relationship.to_entity_id,
            });
        }
        let id = relationship.id;
        debug!(
            from = %relationship.from_entity_id,
            to = %relationship.to_entity_id,
            relationship_type = %relationship.relationship_type,
            "storing relationship"
        );
        self.relationship_index
            .insert(relationship.triple_key(), id);
        self.relationships.insert(id, relationship);
        Ok(id)
    }

    async fn get_relationship(&self, id: Uuid) -> GraphResult<Option<Relationship>> {
        Ok(self.relationships.get(&id).map(|r| r.clone()))
    }

    async fn update_relationship(&self, id: Uuid, relationship: Relationship) -> GraphResult<()> {
        let Some(existing) = self.relationships.get(&id).map(|r| r.clone()) else {
            return Err(GraphError::InvalidOperation(format!(
                "Relationship {} does not exist",
                id
            )));
        };
        let old_key = existing.triple_key();
        let new_key = relationship.triple_key();
        if old_key != new_key {
            self.relationship_index.remove(&old_key);
        }
        self.relationship_index.insert(new_key, id);
        self.relationships.insert(id, relationship);
        Ok(())
    }

    async fn find_relationship(
        &self,
        from: Uuid,
        to: Uuid,
        relationship_type: RelationshipType,
    ) -> GraphResult<Option<Relationship>> {
        let key = triple_key(from, to, relationship_type);
        let Some(id) = self.relationship_index.get(&key).map(|id| *id) else {
            return Ok(None);
        };
        Ok(self.relationships.get(&id).map(|r| r.clone()))
    }

    async fn relationships_for_entity(
        &self,
        entity_id: Uuid,
        direction: Direction,
    ) -> GraphResult<Vec<Relationship>> {
        Ok(self
            .relationships
            .iter()
            .filter(|r| match direction {
                Direction::Outgoing => r.from_entity_id == entity_id,
                Direction::Incoming => r.to_entity_id == entity_id,
                Direction::Both => r.touches(entity_id),
            })
            .map(|r| r.clone())
            .collect())
    }

    async fn all_relationships(&self) -> GraphResult<Vec<Relationship>> {
        Ok(self.relationships.iter().map(|r| r.clone()).collect())
    }

    async fn relationship_count(&self) -> GraphResult<usize> {
        Ok(self.relationships.len())
    }
}
