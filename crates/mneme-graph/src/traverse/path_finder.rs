//! Bounded-depth path finding over an in-memory adjacency index.
//!
//! The index is rebuilt from a full relationship snapshot at every call, so
//! traversal sees one consistent view and never holds the store hot while
//! walking. No storage-side recursive queries are involved.

use std::collections::HashMap;

use uuid::Uuid;

use mneme_config::TraversalConfig;
use mneme_core::{GraphResult, GraphStore, RelationshipPath, RelationshipStore};

struct Edge {
    relationship_id: Uuid,
    to: Uuid,
    strength: f32,
}

/// Outgoing-edge lists keyed by entity id, built from one snapshot.
struct AdjacencyIndex {
    edges: HashMap<Uuid, Vec<Edge>>,
}

impl AdjacencyIndex {
    async fn build<S>(store: &S) -> GraphResult<Self>
    where
        S: RelationshipStore + ?Sized,
    {
        let mut edges: HashMap<Uuid, Vec<Edge>> = HashMap::new();
        for rel in store.all_relationships().await? {
            edges.entry(rel.from_entity_id).or_default().push(Edge {
                relationship_id: rel.id,
                to: rel.to_entity_id,
                strength: rel.strength,
            });
        }
        Ok(Self { edges })
    }

    fn outgoing(&self, id: Uuid) -> &[Edge] {
        self.edges.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Depth-first path search along outgoing edges.
#[derive(Debug, Clone, Default)]
pub struct PathFinder {
    config: TraversalConfig,
}

impl PathFinder {
    pub fn new(config: TraversalConfig) -> Self {
        Self { config }
    }

    /// All paths from `from` to `to` within `max_depth` hops, sorted by hop
    /// count then descending strength, capped at the configured result count.
    ///
    /// `from == to` returns the trivial single-entity path at any depth.
    /// A zero depth or an unknown endpoint returns no paths.
    pub async fn find_paths<S>(
        &self,
        store: &S,
        from: Uuid,
        to: Uuid,
        max_depth: usize,
    ) -> GraphResult<Vec<RelationshipPath>>
    where
        S: GraphStore + ?Sized,
    {
        if store.get_entity(from).await?.is_none() || store.get_entity(to).await?.is_none() {
            return Ok(Vec::new());
        }
        if from == to {
            return Ok(vec![RelationshipPath::trivial(from)]);
        }
        if max_depth == 0 {
            return Ok(Vec::new());
        }

        let index = AdjacencyIndex::build(store).await?;
        let mut found = Vec::new();
        let mut entity_chain = vec![from];
        let mut relationship_chain = Vec::new();
        self.walk(
            &index,
            to,
            max_depth,
            &mut entity_chain,
            &mut relationship_chain,
            1.0,
            &mut found,
        );

        found.sort_by(|a, b| {
            a.hop_count().cmp(&b.hop_count()).then_with(|| {
                b.strength
                    .partial_cmp(&a.strength)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
        });
        found.truncate(self.config.max_paths);
        Ok(found)
    }

    #[allow(clippy::too_many_arguments)]
    fn walk(
        &self,
        index: &AdjacencyIndex,
        target: Uuid,
        remaining: usize,
        entity_chain: &mut Vec<Uuid>,
        relationship_chain: &mut Vec<Uuid>,
        strength: f32,
        found: &mut Vec<RelationshipPath>,
    ) {
        if remaining == 0 {
            return;
        }
        let current = match entity_chain.last() {
            Some(&id) => id,
            None => return,
        };
        let previous = entity_chain
            .len()
            .checked_sub(2)
            .map(|i| entity_chain[i]);

        for edge in index.outgoing(current) {
            // Local cycle guard: no immediate back-and-forth
            if Some(edge.to) == previous {
                continue;
            }
            let next_strength = strength * edge.strength;
            if edge.to == target {
                let mut entity_ids = entity_chain.clone();
                entity_ids.push(edge.to);
                let mut relationship_ids = relationship_chain.clone();
                relationship_ids.push(edge.relationship_id);
                found.push(RelationshipPath {
                    entity_ids,
                    relationship_ids,
                    strength: next_strength,
                });
                continue;
            }
            entity_chain.push(edge.to);
            relationship_chain.push(edge.relationship_id);
            self.walk(
                index,
                target,
                remaining - 1,
                entity_chain,
                relationship_chain,
                next_strength,
                found,
            );
            entity_chain.pop();
            relationship_chain.pop();
        }
    }
}
