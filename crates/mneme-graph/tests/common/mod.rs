//! Common utilities for mneme-graph integration tests.

use std::sync::Arc;

use mneme_core::{Entity, EntityStore, EntityType};
use mneme_graph::{create_engine, KnowledgeGraphEngine};
use mneme_memstore::MemoryGraphStore;

fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// An engine over a fresh in-memory store, returning the store handle too so
/// tests can inspect what ingestion persisted.
pub fn create_test_engine() -> (Arc<MemoryGraphStore>, KnowledgeGraphEngine<MemoryGraphStore>) {
    init_test_logging();
    let store = Arc::new(MemoryGraphStore::new());
    let engine = create_engine(Arc::clone(&store));
    (store, engine)
}

/// Fetch a stored entity by resolution key, panicking with context when the
/// expected entity never made it into the store.
pub async fn stored_entity(
    store: &MemoryGraphStore,
    name: &str,
    entity_type: EntityType,
) -> Entity {
    store
        .find_by_name_and_type(name, entity_type)
        .await
        .expect("store lookup should not fail")
        .unwrap_or_else(|| panic!("entity '{name}' ({entity_type}) was not stored"))
}
