pub mod entity;
pub mod error;
pub mod query;
pub mod record;
pub mod relationship;
pub mod storage;

pub use entity::{dedup_key, Entity, EntityType};
pub use error::{GraphError, GraphResult};
pub use query::{EntitySearchResult, GraphStatistics, RelationshipPath};
pub use record::{MemoryRecord, RecordKind};
pub use relationship::{triple_key, Direction, Relationship, RelationshipType};

// Re-export storage traits (abstractions for Dependency Inversion)
pub use storage::{EntityStore, GraphStore, RelationshipStore};
