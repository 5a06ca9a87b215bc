//! Two-strategy relationship inference over one record's entities.
//!
//! Strategy A looks for archetype trigger phrases and fires when both
//! entity names share the trigger's sentence. Strategy B fires on entity
//! type pairings alone. Both funnel through one triple-keyed upsert that
//! merges provenance instead of duplicating edges.

use std::collections::HashSet;

use chrono::Utc;
use serde_json::json;
use tracing::debug;

use mneme_config::InferenceConfig;
use mneme_core::{
    triple_key, GraphResult, GraphStore, MemoryRecord, Relationship, RelationshipType,
};

use super::rules::{archetypes, direction_rule, prior_for};
use crate::keyed_lock::KeyedMutex;
use crate::resolver::ResolvedEntity;
use crate::text::sentence_span;

/// Infers and persists relationships among a record's resolved entities.
#[derive(Debug, Default)]
pub struct RelationshipInferrer {
    config: InferenceConfig,
    locks: KeyedMutex,
}

impl RelationshipInferrer {
    pub fn new(config: InferenceConfig) -> Self {
        Self {
            config,
            locks: KeyedMutex::new(),
        }
    }

    /// Run both strategies over every unordered entity pair of one record.
    ///
    /// Returns the touched relationships (existing rows count once even when
    /// both strategies land on the same triple).
    pub async fn infer<S>(
        &self,
        store: &S,
        record: &MemoryRecord,
        resolved: &[ResolvedEntity],
    ) -> GraphResult<Vec<Relationship>>
    where
        S: GraphStore + ?Sized,
    {
        if resolved.len() < 2 {
            return Ok(Vec::new());
        }

        let text = record.scan_text();
        let mut touched = Vec::new();

        for i in 0..resolved.len() {
            for j in (i + 1)..resolved.len() {
                let (a, b) = (&resolved[i], &resolved[j]);
                if a.entity.id == b.entity.id {
                    continue;
                }
                // Mention order is the direction tie-breaker, so normalize
                // the pair to it up front.
                let (first, second) = if a.first_offset <= b.first_offset {
                    (a, b)
                } else {
                    (b, a)
                };
                self.infer_pair(store, record, &text, first, second, &mut touched)
                    .await?;
            }
        }

        let mut seen = HashSet::new();
        touched.retain(|rel| seen.insert(rel.id));

        if !touched.is_empty() {
            debug!(
                record_id = %record.id,
                count = touched.len(),
                "inferred relationships for record"
            );
        }
        Ok(touched)
    }

    async fn infer_pair<S>(
        &self,
        store: &S,
        record: &MemoryRecord,
        text: &str,
        first: &ResolvedEntity,
        second: &ResolvedEntity,
        touched: &mut Vec<Relationship>,
    ) -> GraphResult<()>
    where
        S: GraphStore + ?Sized,
    {
        let first_name = first.entity.name.to_lowercase();
        let second_name = second.entity.name.to_lowercase();

        for archetype in archetypes() {
            let mut fired = false;
            for hit in archetype.trigger.find_iter(text) {
                let span =
                    sentence_span(text, hit.start(), hit.end(), self.config.sentence_window_chars)
                        .to_lowercase();
                if span.contains(&first_name) && span.contains(&second_name) {
                    fired = true;
                    break;
                }
            }
            if !fired {
                continue;
            }
            let (from, to) = match orient(archetype.relationship_type, first, second) {
                Some(pair) => pair,
                // Role mismatch on a directed archetype: the trigger was
                // about something else
                None => continue,
            };
            let strength = self
                .config
                .archetype_strength(archetype.relationship_type.as_str(), archetype.strength);
            let rel = self
                .upsert(
                    store,
                    record,
                    from,
                    to,
                    archetype.relationship_type,
                    strength,
                    self.config.pattern_base_confidence,
                    "pattern",
                )
                .await?;
            touched.push(rel);
        }

        if self.config.enable_type_priors {
            if let Some((row, first_is_from)) =
                prior_for(first.entity.entity_type, second.entity.entity_type)
            {
                let (from, to) = if first_is_from {
                    (first, second)
                } else {
                    (second, first)
                };
                let rel = self
                    .upsert(
                        store,
                        record,
                        from,
                        to,
                        row.relationship_type,
                        row.strength,
                        self.config.prior_confidence,
                        "type_prior",
                    )
                    .await?;
                touched.push(rel);
            }
        }

        Ok(())
    }

    /// Insert the edge or merge provenance into the existing row, under the
    /// triple's keyed lock.
    #[allow(clippy::too_many_arguments)]
    async fn upsert<S>(
        &self,
        store: &S,
        record: &MemoryRecord,
        from: &ResolvedEntity,
        to: &ResolvedEntity,
        relationship_type: RelationshipType,
        strength: f32,
        confidence: f32,
        method: &str,
    ) -> GraphResult<Relationship>
    where
        S: GraphStore + ?Sized,
    {
        let key = triple_key(from.entity.id, to.entity.id, relationship_type);
        let _held = self.locks.lock(&key).await;

        match store
            .find_relationship(from.entity.id, to.entity.id, relationship_type)
            .await?
        {
            Some(mut rel) => {
                rel.strength = rel.strength.max(strength);
                rel.confidence = rel.confidence.max(confidence);
                rel.source_record_ids.insert(record.id.clone());
                rel.updated_at = Utc::now();
                store.update_relationship(rel.id, rel.clone()).await?;
                Ok(rel)
            }
            None => {
                let rel = Relationship::new(from.entity.id, to.entity.id, relationship_type)
                    .with_strength(strength)
                    .with_confidence(confidence)
                    .with_source_record(&record.id)
                    .with_property("inferred_by", json!(method))
                    .with_property("inferred_from_record", json!(record.id));
                store.insert_relationship(rel.clone()).await?;
                debug!(
                    from = %from.entity.name,
                    to = %to.entity.name,
                    relationship_type = %relationship_type,
                    method,
                    "inferred new relationship"
                );
                Ok(rel)
            }
        }
    }
}

/// Resolve edge direction for a pair, honoring canonical type roles.
///
/// Archetypes without a direction rule, and pairs where both orientations
/// fit, follow mention order. A directed archetype where neither
/// orientation fits does not apply to the pair at all.
fn orient<'a>(
    relationship_type: RelationshipType,
    first: &'a ResolvedEntity,
    second: &'a ResolvedEntity,
) -> Option<(&'a ResolvedEntity, &'a ResolvedEntity)> {
    let rule = match direction_rule(relationship_type) {
        Some(rule) => rule,
        None => return Some((first, second)),
    };
    let forward = rule.from_roles.contains(&first.entity.entity_type)
        && rule.to_roles.contains(&second.entity.entity_type);
    let backward = rule.from_roles.contains(&second.entity.entity_type)
        && rule.to_roles.contains(&first.entity.entity_type);
    match (forward, backward) {
        (true, false) => Some((first, second)),
        (false, true) => Some((second, first)),
        (true, true) => Some((first, second)),
        (false, false) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mneme_core::{Entity, EntityStore, EntityType, RelationshipStore};
    use mneme_memstore::MemoryGraphStore;

    async fn seed(
        store: &MemoryGraphStore,
        name: &str,
        entity_type: EntityType,
        first_offset: usize,
    ) -> ResolvedEntity {
        let entity = Entity::new(name, entity_type);
        store
            .insert_entity(entity.clone())
            .await
            .expect("seed entity");
        ResolvedEntity {
            entity,
            first_offset,
        }
    }

    #[tokio::test]
    async fn created_by_direction_ignores_sentence_order() {
        let store = MemoryGraphStore::new();
        let inferrer = RelationshipInferrer::default();
        let person = seed(&store, "John Doe", EntityType::Person, 0).await;
        let api = seed(&store, "payment-service", EntityType::Api, 10).await;

        for (record_id, content) in [
            ("r1", "John Doe created the payment-service API."),
            ("r2", "The payment-service API was created by John Doe."),
        ] {
            let record = MemoryRecord::new(record_id, "Notes", content);

            let rels = inferrer
                .infer(&store, &record, &[person.clone(), api.clone()])
                .await
                .expect("inference");

            let created: Vec<_> = rels
                .iter()
                .filter(|r| r.relationship_type == RelationshipType::CreatedBy)
                .collect();
            assert_eq!(created.len(), 1, "one created_by edge for {record_id}");
            assert_eq!(created[0].from_entity_id, api.entity.id);
            assert_eq!(created[0].to_entity_id, person.entity.id);
        }
    }

    #[tokio::test]
    async fn duplicate_triple_merges_provenance() {
        let store = MemoryGraphStore::new();
        let inferrer = RelationshipInferrer::default();
        let service = seed(&store, "payment-service", EntityType::Service, 0).await;
        let redis = seed(&store, "Redis", EntityType::Database, 20).await;
        let entities = [service.clone(), redis.clone()];

        for record_id in ["r1", "r2"] {
            let record =
                MemoryRecord::new(record_id, "Caching", "payment-service uses Redis for sessions.");
            inferrer
                .infer(&store, &record, &entities)
                .await
                .expect("inference");
        }

        assert_eq!(store.relationship_count().await.expect("count"), 1);
        let rel = store
            .find_relationship(service.entity.id, redis.entity.id, RelationshipType::Uses)
            .await
            .expect("find")
            .expect("uses edge exists");
        assert!(rel.source_record_ids.contains("r1"));
        assert!(rel.source_record_ids.contains("r2"));
    }

    #[tokio::test]
    async fn type_prior_fires_without_textual_cue() {
        let store = MemoryGraphStore::new();
        let inferrer = RelationshipInferrer::default();
        let hook = seed(&store, "useEffect", EntityType::Concept, 0).await;
        let react = seed(&store, "React", EntityType::Technology, 10).await;
        let record = MemoryRecord::new("r1", "Hooks", "useEffect pairs well with React.");

        let rels = inferrer
            .infer(&store, &record, &[hook.clone(), react.clone()])
            .await
            .expect("inference");

        let related = rels
            .iter()
            .find(|r| r.relationship_type == RelationshipType::RelatedTo)
            .expect("concept-technology prior");
        assert_eq!(related.from_entity_id, hook.entity.id);
        assert_eq!(related.to_entity_id, react.entity.id);
    }

    #[tokio::test]
    async fn role_mismatch_suppresses_directed_archetype() {
        let store = MemoryGraphStore::new();
        let inferrer = RelationshipInferrer::default();
        let service = seed(&store, "billing-service", EntityType::Service, 0).await;
        let react = seed(&store, "React", EntityType::Technology, 25).await;
        // "built" triggers created_by, but neither side is a person or org
        let record = MemoryRecord::new("r1", "Stack", "billing-service was built with React.");

        let rels = inferrer
            .infer(&store, &record, &[service.clone(), react.clone()])
            .await
            .expect("inference");

        assert!(rels
            .iter()
            .all(|r| r.relationship_type != RelationshipType::CreatedBy));
        // The service-technology prior still applies
        let uses = rels
            .iter()
            .find(|r| r.relationship_type == RelationshipType::Uses)
            .expect("uses prior");
        assert_eq!(uses.from_entity_id, service.entity.id);
        assert_eq!(uses.to_entity_id, react.entity.id);
    }

    #[test]
    fn mention_order_breaks_symmetric_ties() {
        let alice = ResolvedEntity {
            entity: Entity::new("Alice", EntityType::Person),
            first_offset: 0,
        };
        let bob = ResolvedEntity {
            entity: Entity::new("Bob", EntityType::Person),
            first_offset: 10,
        };
        let (from, to) =
            orient(RelationshipType::CollaboratesWith, &alice, &bob).expect("symmetric pair");
        assert_eq!(from.entity.id, alice.entity.id);
        assert_eq!(to.entity.id, bob.entity.id);
    }
}
