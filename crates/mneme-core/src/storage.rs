//! Graph Storage Traits
//!
//! Trait abstractions for knowledge graph storage following the Interface
//! Segregation Principle. Each trait covers one concern so backends can be
//! composed and tested independently.
//!
//! ## Architecture
//!
//! - **EntityStore**: entity CRUD plus the `(name, type)` resolution lookup
//! - **RelationshipStore**: edge CRUD plus triple lookup and per-entity queries
//! - **GraphStore**: marker alias for backends that provide both
//!
//! ## Design Principles
//!
//! 1. **Interface Segregation**: small, focused traits instead of one large interface
//! 2. **Database Agnostic**: traits work with any backend (memory, embedded, remote)
//! 3. **Testable**: mock implementations enable unit testing without a backend
//! 4. **Misses are not errors**: lookups return `Ok(None)` or empty vectors

use async_trait::async_trait;
use uuid::Uuid;

use crate::entity::{Entity, EntityType};
use crate::error::GraphResult;
use crate::relationship::{Direction, Relationship, RelationshipType};

/// Entity persistence operations
///
/// The `(name, type)` lookup is the hot path for entity resolution: callers
/// check it before deciding between insert and merge. Implementations must
/// match names case-insensitively.
///
/// # Examples
///
/// ```rust,ignore
/// use mneme_core::{Entity, EntityType, EntityStore, GraphResult};
///
/// async fn upsert<S: EntityStore>(store: &S, name: &str) -> GraphResult<()> {
///     match store.find_by_name_and_type(name, EntityType::Technology).await? {
///         Some(existing) => { /* merge into existing */ }
///         None => {
///             store.insert_entity(Entity::new(name, EntityType::Technology)).await?;
///         }
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Store a new entity
    ///
    /// # Returns
    ///
    /// Returns the entity id on success
    ///
    /// # Errors
    ///
    /// Returns `GraphError::Backend` if the storage operation fails
    async fn insert_entity(&self, entity: Entity) -> GraphResult<Uuid>;

    /// Retrieve an entity by id
    ///
    /// # Returns
    ///
    /// Returns `Some(Entity)` if found, `None` if not found
    async fn get_entity(&self, id: Uuid) -> GraphResult<Option<Entity>>;

    /// Replace an existing entity
    ///
    /// # Errors
    ///
    /// Returns `GraphError::InvalidOperation` if no entity with `id` exists
    async fn update_entity(&self, id: Uuid, entity: Entity) -> GraphResult<()>;

    /// Look up an entity by its resolution key
    ///
    /// Name matching is case-insensitive; `entity_type` must match exactly.
    async fn find_by_name_and_type(
        &self,
        name: &str,
        entity_type: EntityType,
    ) -> GraphResult<Option<Entity>>;

    /// List entities of one type, up to `limit`
    async fn entities_by_type(
        &self,
        entity_type: EntityType,
        limit: usize,
    ) -> GraphResult<Vec<Entity>>;

    /// Snapshot of every stored entity
    async fn all_entities(&self) -> GraphResult<Vec<Entity>>;

    /// Number of stored entities
    async fn entity_count(&self) -> GraphResult<usize>;
}

/// Relationship persistence operations
///
/// The triple lookup (`find_relationship`) is the hot path for edge
/// deduplication: inference checks it before deciding between insert and
/// provenance merge.
#[async_trait]
pub trait RelationshipStore: Send + Sync {
    /// Store a new relationship
    ///
    /// # Errors
    ///
    /// Returns `GraphError::MissingEndpoint` if either endpoint entity is not
    /// stored, `GraphError::Backend` if the storage operation fails
    async fn insert_relationship(&self, relationship: Relationship) -> GraphResult<Uuid>;

    /// Retrieve a relationship by id
    async fn get_relationship(&self, id: Uuid) -> GraphResult<Option<Relationship>>;

    /// Replace an existing relationship
    ///
    /// # Errors
    ///
    /// Returns `GraphError::InvalidOperation` if no relationship with `id` exists
    async fn update_relationship(&self, id: Uuid, relationship: Relationship) -> GraphResult<()>;

    /// Look up an edge by its `(from, to, type)` triple
    async fn find_relationship(
        &self,
        from: Uuid,
        to: Uuid,
        relationship_type: RelationshipType,
    ) -> GraphResult<Option<Relationship>>;

    /// Edges touching an entity, filtered by direction
    async fn relationships_for_entity(
        &self,
        entity_id: Uuid,
        direction: Direction,
    ) -> GraphResult<Vec<Relationship>>;

    /// Snapshot of every stored relationship
    async fn all_relationships(&self) -> GraphResult<Vec<Relationship>>;

    /// Number of stored relationships
    async fn relationship_count(&self) -> GraphResult<usize>;
}

/// Combined storage for backends that hold both sides of the graph.
///
/// Blanket-implemented, so any type providing both traits is a `GraphStore`.
pub trait GraphStore: EntityStore + RelationshipStore {}

impl<T: EntityStore + RelationshipStore> GraphStore for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Mock implementation of both storage traits for testing
    struct MockGraphStore {
        entities: Arc<Mutex<HashMap<Uuid, Entity>>>,
        relationships: Arc<Mutex<HashMap<Uuid, Relationship>>>,
    }

    impl MockGraphStore {
        fn new() -> Self {
            Self {
                entities: Arc::new(Mutex::new(HashMap::new())),
                relationships: Arc::new(Mutex::new(HashMap::new())),
            }
        }
    }

    #[async_trait]
    impl EntityStore for MockGraphStore {
        async fn insert_entity(&self, entity: Entity) -> GraphResult<Uuid> {
            let id = entity.id;
            self.entities.lock().unwrap().insert(id, entity);
            Ok(id)
        }

        async fn get_entity(&self, id: Uuid) -> GraphResult<Option<Entity>> {
            Ok(self.entities.lock().unwrap().get(&id).cloned())
        }

        async fn update_entity(&self, id: Uuid, entity: Entity) -> GraphResult<()> {
            let mut entities = self.entities.lock().unwrap();
            if !entities.contains_key(&id) {
                return Err(GraphError::InvalidOperation(format!(
                    "Entity {} does not exist",
                    id
                )));
            }
            entities.insert(id, entity);
            Ok(())
        }

        async fn find_by_name_and_type(
            &self,
            name: &str,
            entity_type: EntityType,
        ) -> GraphResult<Option<Entity>> {
            let name_lower = name.to_lowercase();
            Ok(self
                .entities
                .lock()
                .unwrap()
                .values()
                .find(|e| e.entity_type == entity_type && e.name.to_lowercase() == name_lower)
                .cloned())
        }

        async fn entities_by_type(
            &self,
            entity_type: EntityType,
            limit: usize,
        ) -> GraphResult<Vec<Entity>> {
            Ok(self
                .entities
                .lock()
                .unwrap()
                .values()
                .filter(|e| e.entity_type == entity_type)
                .take(limit)
                .cloned()
                .collect())
        }

        async fn all_entities(&self) -> GraphResult<Vec<Entity>> {
            Ok(self.entities.lock().unwrap().values().cloned().collect())
        }

        async fn entity_count(&self) -> GraphResult<usize> {
            Ok(self.entities.lock().unwrap().len())
        }
    }

    #[async_trait]
    impl RelationshipStore for MockGraphStore {
        async fn insert_relationship(&self, relationship: Relationship) -> GraphResult<Uuid> {
            let entities = self.entities.lock().unwrap();
            if !entities.contains_key(&relationship.from_entity_id)
                || !entities.contains_key(&relationship.to_entity_id)
            {
                return Err(GraphError::MissingEndpoint {
                    from: relationship.from_entity_id,
                    to: relationship.to_entity_id,
                });
            }
            drop(entities);
            let id = relationship.id;
            self.relationships.lock().unwrap().insert(id, relationship);
            Ok(id)
        }

        async fn get_relationship(&self, id: Uuid) -> GraphResult<Option<Relationship>> {
            Ok(self.relationships.lock().unwrap().get(&id).cloned())
        }

        async fn update_relationship(
            &self,
            id: Uuid,
            relationship: Relationship,
        ) -> GraphResult<()> {
            let mut relationships = self.relationships.lock().unwrap();
            if !relationships.contains_key(&id) {
                return Err(GraphError::InvalidOperation(format!(
                    "Relationship {} does not exist",
                    id
                )));
            }
            relationships.insert(id, relationship);
            Ok(())
        }

        async fn find_relationship(
            &self,
            from: Uuid,
            to: Uuid,
            relationship_type: RelationshipType,
        ) -> GraphResult<Option<Relationship>> {
            Ok(self
                .relationships
                .lock()
                .unwrap()
                .values()
                .find(|r| {
                    r.from_entity_id == from
                        && r.to_entity_id == to
                        && r.relationship_type == relationship_type
                })
                .cloned())
        }

        async fn relationships_for_entity(
            &self,
            entity_id: Uuid,
            direction: Direction,
        ) -> GraphResult<Vec<Relationship>> {
            Ok(self
                .relationships
                .lock()
                .unwrap()
                .values()
                .filter(|r| match direction {
                    Direction::Outgoing => r.from_entity_id == entity_id,
                    Direction::Incoming => r.to_entity_id == entity_id,
                    Direction::Both => r.touches(entity_id),
                })
                .cloned()
                .collect())
        }

        async fn all_relationships(&self) -> GraphResult<Vec<Relationship>> {
            Ok(self
                .relationships
                .lock()
                .unwrap()
                .values()
                .cloned()
                .collect())
        }

        async fn relationship_count(&self) -> GraphResult<usize> {
            Ok(self.relationships.lock().unwrap().len())
        }
    }

    #[tokio::test]
    async fn test_entity_store_trait() {
        let store = MockGraphStore::new();

        let entity = Entity::new("React", EntityType::Technology).with_confidence(0.7);
        let id = store.insert_entity(entity).await.unwrap();

        let retrieved = store.get_entity(id).await.unwrap();
        assert!(retrieved.is_some());
        let retrieved = retrieved.unwrap();
        assert_eq!(retrieved.name, "React");
        assert_eq!(retrieved.entity_type, EntityType::Technology);

        // Resolution lookup is case-insensitive on name
        let found = store
            .find_by_name_and_type("react", EntityType::Technology)
            .await
            .unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().id, id);

        // Same name under a different type misses
        let missed = store
            .find_by_name_and_type("react", EntityType::Project)
            .await
            .unwrap();
        assert!(missed.is_none());

        // Update replaces in place
        let mut updated = retrieved.clone();
        updated.confidence = 0.9;
        store.update_entity(id, updated).await.unwrap();
        let after = store.get_entity(id).await.unwrap().unwrap();
        assert_eq!(after.confidence, 0.9);
    }

    #[tokio::test]
    async fn test_update_missing_entity_is_invalid() {
        let store = MockGraphStore::new();
        let ghost = Entity::new("Ghost", EntityType::Concept);
        let result = store.update_entity(ghost.id, ghost).await;
        assert!(matches!(result, Err(GraphError::InvalidOperation(_))));
    }

    #[tokio::test]
    async fn test_relationship_store_trait() {
        let store = MockGraphStore::new();

        let alice = Entity::new("Alice", EntityType::Person);
        let mneme = Entity::new("Mneme", EntityType::Project);
        let alice_id = store.insert_entity(alice).await.unwrap();
        let mneme_id = store.insert_entity(mneme).await.unwrap();

        let edge = Relationship::new(alice_id, mneme_id, RelationshipType::WorksOn);
        store.insert_relationship(edge).await.unwrap();

        let found = store
            .find_relationship(alice_id, mneme_id, RelationshipType::WorksOn)
            .await
            .unwrap();
        assert!(found.is_some());

        // Triple lookup is direction-sensitive
        let reverse = store
            .find_relationship(mneme_id, alice_id, RelationshipType::WorksOn)
            .await
            .unwrap();
        assert!(reverse.is_none());

        let outgoing = store
            .relationships_for_entity(alice_id, Direction::Outgoing)
            .await
            .unwrap();
        assert_eq!(outgoing.len(), 1);

        let incoming = store
            .relationships_for_entity(alice_id, Direction::Incoming)
            .await
            .unwrap();
        assert!(incoming.is_empty());

        let both = store
            .relationships_for_entity(mneme_id, Direction::Both)
            .await
            .unwrap();
        assert_eq!(both.len(), 1);
    }

    #[tokio::test]
    async fn test_relationship_requires_endpoints() {
        let store = MockGraphStore::new();
        let edge = Relationship::new(Uuid::new_v4(), Uuid::new_v4(), RelationshipType::Uses);
        let result = store.insert_relationship(edge).await;
        assert!(matches!(result, Err(GraphError::MissingEndpoint { .. })));
    }

    #[tokio::test]
    async fn test_graph_store_is_object_safe() {
        let store: Arc<dyn GraphStore> = Arc::new(MockGraphStore::new());
        assert_eq!(store.entity_count().await.unwrap(), 0);
        assert_eq!(store.relationship_count().await.unwrap(), 0);
    }
}
