//! The engine facade: one ingestion entry point plus the read surface.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};
use uuid::Uuid;

use mneme_config::GraphConfig;
use mneme_core::{
    Direction, Entity, EntitySearchResult, EntityType, GraphResult, GraphStatistics, GraphStore,
    MemoryRecord, Relationship, RelationshipPath,
};

use crate::extract::EntityExtractor;
use crate::infer::RelationshipInferrer;
use crate::resolver::{EntityResolver, ResolvedEntity};
use crate::search;
use crate::traverse::{self, PathFinder};

/// Knowledge graph engine over a pluggable storage backend.
///
/// Writes go through [`extract_and_link_entities`]; everything else is a
/// side-effect-free read over a snapshot taken at call start, safe to run
/// concurrently with ingestion.
///
/// [`extract_and_link_entities`]: KnowledgeGraphEngine::extract_and_link_entities
pub struct KnowledgeGraphEngine<S: GraphStore> {
    store: Arc<S>,
    config: GraphConfig,
    extractor: EntityExtractor,
    resolver: EntityResolver,
    inferrer: RelationshipInferrer,
    path_finder: PathFinder,
}

impl<S: GraphStore> KnowledgeGraphEngine<S> {
    pub fn new(store: Arc<S>, config: GraphConfig) -> Self {
        let extractor = EntityExtractor::new(config.extraction.clone());
        let inferrer = RelationshipInferrer::new(config.inference.clone());
        let path_finder = PathFinder::new(config.traversal.clone());
        Self {
            store,
            config,
            extractor,
            resolver: EntityResolver::new(),
            inferrer,
            path_finder,
        }
    }

    /// Run one extraction, resolution, and inference pass for a record.
    ///
    /// Infallible by contract: the caller's record write must never fail
    /// because of graph augmentation. Storage trouble degrades to a logged
    /// warning and a partial (possibly empty) entity list.
    pub async fn extract_and_link_entities(&self, record: &MemoryRecord) -> Vec<Entity> {
        let started = Instant::now();
        let candidates = self.extractor.extract(record);
        if candidates.is_empty() {
            debug!(record_id = %record.id, "no entity candidates in record");
            return Vec::new();
        }
        let candidate_count = candidates.len();

        let mut resolved: Vec<ResolvedEntity> = Vec::with_capacity(candidates.len());
        for candidate in &candidates {
            match self
                .resolver
                .upsert(self.store.as_ref(), record, candidate)
                .await
            {
                Ok(entity) => resolved.push(entity),
                Err(err) => warn!(
                    record_id = %record.id,
                    name = %candidate.name,
                    error = %err,
                    "entity resolution failed, skipping candidate"
                ),
            }
        }

        let relationship_count = match self
            .inferrer
            .infer(self.store.as_ref(), record, &resolved)
            .await
        {
            Ok(relationships) => relationships.len(),
            Err(err) => {
                warn!(
                    record_id = %record.id,
                    error = %err,
                    "relationship inference failed for record"
                );
                0
            }
        };

        let entities: Vec<Entity> = resolved.into_iter().map(|r| r.entity).collect();
        info!(
            record_id = %record.id,
            candidates = candidate_count,
            entities = entities.len(),
            relationships = relationship_count,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "linked record into knowledge graph"
        );
        entities
    }

    /// Keyword search across entity names and observations.
    pub async fn search_entities(
        &self,
        query: &str,
        limit: usize,
        type_filter: Option<EntityType>,
    ) -> GraphResult<Vec<EntitySearchResult>> {
        search::search_entities(self.store.as_ref(), query, limit, type_filter).await
    }

    pub async fn get_entity(&self, id: Uuid) -> GraphResult<Option<Entity>> {
        self.store.get_entity(id).await
    }

    pub async fn get_entities_by_type(
        &self,
        entity_type: EntityType,
        limit: usize,
    ) -> GraphResult<Vec<Entity>> {
        self.store.entities_by_type(entity_type, limit).await
    }

    pub async fn get_entity_relationships(
        &self,
        entity_id: Uuid,
        direction: Direction,
    ) -> GraphResult<Vec<Relationship>> {
        self.store.relationships_for_entity(entity_id, direction).await
    }

    /// Strength-ranked paths between two entities.
    ///
    /// `max_depth` of `None` uses the configured default hop bound.
    pub async fn find_relationship_path(
        &self,
        from: Uuid,
        to: Uuid,
        max_depth: Option<usize>,
    ) -> GraphResult<Vec<RelationshipPath>> {
        let depth = max_depth.unwrap_or(self.config.traversal.default_max_depth);
        self.path_finder
            .find_paths(self.store.as_ref(), from, to, depth)
            .await
    }

    /// Whole-graph counts for health and diagnostics.
    pub async fn graph_statistics(&self) -> GraphResult<GraphStatistics> {
        traverse::statistics(self.store.as_ref()).await
    }
}
