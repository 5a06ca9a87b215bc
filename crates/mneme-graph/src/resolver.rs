//! Entity resolution: extraction candidates merge into the graph.
//!
//! Resolution is keyed on `(lowercased name, entity type)`. An existing
//! entity absorbs the new mention (confidence only rises, provenance
//! accumulates); a miss inserts a fresh entity. The read-check-write
//! sequence per key runs under a keyed async lock so concurrent ingestion
//! of the same name cannot create duplicates, whatever the backend.

use chrono::Utc;
use tracing::debug;

use mneme_core::{dedup_key, Entity, EntityStore, GraphResult, MemoryRecord};

use crate::extract::EntityCandidate;
use crate::keyed_lock::KeyedMutex;

/// A resolved entity plus where its first mention sat in the record text.
///
/// Mention order breaks direction ties during relationship inference.
#[derive(Debug, Clone)]
pub struct ResolvedEntity {
    pub entity: Entity,
    pub first_offset: usize,
}

/// Upserts extraction candidates into an entity store.
#[derive(Debug, Default)]
pub struct EntityResolver {
    locks: KeyedMutex,
}

impl EntityResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one candidate into the graph, returning the stored entity.
    pub async fn upsert<S>(
        &self,
        store: &S,
        record: &MemoryRecord,
        candidate: &EntityCandidate,
    ) -> GraphResult<ResolvedEntity>
    where
        S: EntityStore + ?Sized,
    {
        let key = dedup_key(&candidate.name, candidate.entity_type);
        let _held = self.locks.lock(&key).await;

        let entity = match store
            .find_by_name_and_type(&candidate.name, candidate.entity_type)
            .await?
        {
            Some(mut entity) => {
                merge_candidate(&mut entity, record, candidate);
                store.update_entity(entity.id, entity.clone()).await?;
                debug!(name = %entity.name, id = %entity.id, "merged mention into existing entity");
                entity
            }
            None => {
                let mut entity = Entity::new(&candidate.name, candidate.entity_type)
                    .with_confidence(candidate.confidence)
                    .with_source_record(&record.id);
                for observation in &candidate.observations {
                    entity = entity.with_observation(observation);
                }
                store.insert_entity(entity.clone()).await?;
                debug!(name = %entity.name, id = %entity.id, "inserted new entity");
                entity
            }
        };

        Ok(ResolvedEntity {
            entity,
            first_offset: candidate.first_offset,
        })
    }
}

/// Fold a new mention into an existing entity. Confidence keeps the max,
/// observations stay unique and ordered, provenance unions.
fn merge_candidate(entity: &mut Entity, record: &MemoryRecord, candidate: &EntityCandidate) {
    entity.confidence = entity.confidence.max(candidate.confidence);
    for observation in &candidate.observations {
        if !entity.observations.contains(observation) {
            entity.observations.push(observation.clone());
        }
    }
    entity.source_record_ids.insert(record.id.clone());
    entity.updated_at = Utc::now();
}
