//! # Mneme Knowledge Graph
//!
//! Graph engine for the Mneme personal memory system.
//!
//! This crate turns free-text memory records into a typed knowledge graph:
//! - **Entity extraction**: pattern-driven candidates with confidence scoring
//! - **Entity resolution**: dedup by `(lowercased name, type)` with merge
//! - **Relationship inference**: text archetypes plus type-pair priors
//! - **Traversal**: bounded-depth path finding and whole-graph statistics
//!
//! ## Architecture
//!
//! The engine sits on top of any [`GraphStore`](mneme_core::GraphStore)
//! backend:
//! 1. `extract_and_link_entities` scans a record for entity candidates
//! 2. Candidates resolve against stored entities, merging duplicates
//! 3. Relationships are inferred between the record's resolved entities
//! 4. Read operations (search, paths, statistics) run over store snapshots
//!
//! Ingestion never fails the caller: storage errors degrade to logged
//! warnings and a partial result.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use mneme_core::MemoryRecord;
//! use mneme_graph::create_engine;
//! use mneme_memstore::MemoryGraphStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let engine = create_engine(Arc::new(MemoryGraphStore::new()));
//!
//!     let record = MemoryRecord::new(
//!         "note-1",
//!         "Architecture decision",
//!         "John Doe created the payment-service API backed by Redis.",
//!     );
//!     let entities = engine.extract_and_link_entities(&record).await;
//!     println!("linked {} entities", entities.len());
//!
//!     let results = engine.search_entities("payment", 10, None).await?;
//!     for hit in results {
//!         println!("{} ({:.1})", hit.entity.name, hit.score);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - **engine**: [`KnowledgeGraphEngine`] facade (use the factory functions)
//! - **extract**: pattern table, candidate extraction, confidence scoring
//! - **resolver**: entity upsert with per-key serialization
//! - **infer**: relationship archetypes, direction rules, type priors
//! - **traverse**: path finding and graph statistics
//! - **search**: keyword relevance over names and observations

pub mod engine;
pub mod extract;
pub mod infer;
pub mod resolver;
pub mod search;
pub mod traverse;

mod keyed_lock;
mod text;

pub use engine::KnowledgeGraphEngine;
pub use extract::{EntityCandidate, EntityExtractor};
pub use infer::RelationshipInferrer;
pub use resolver::{EntityResolver, ResolvedEntity};
pub use traverse::PathFinder;

use std::sync::Arc;

use mneme_config::GraphConfig;
use mneme_core::GraphStore;

/// Create an engine over `store` with default configuration.
pub fn create_engine<S: GraphStore>(store: Arc<S>) -> KnowledgeGraphEngine<S> {
    KnowledgeGraphEngine::new(store, GraphConfig::default())
}

/// Create an engine with explicit configuration.
///
/// Use this when thresholds or traversal bounds come from a config file
/// rather than the built-in defaults.
pub fn create_engine_with_config<S: GraphStore>(
    store: Arc<S>,
    config: GraphConfig,
) -> KnowledgeGraphEngine<S> {
    KnowledgeGraphEngine::new(store, config)
}
