//! String-keyed async mutexes for serializing read-check-write sections.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// A map of independent async locks, one per key.
///
/// Upserts for the same resolution key (or relationship triple) take the
/// same lock, so concurrent ingestion cannot race a duplicate past the
/// read-check-write sequence. Entries are retained for the engine's
/// lifetime; the per-key cost is one `Arc<Mutex<()>>`.
#[derive(Debug, Default)]
pub(crate) struct KeyedMutex {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl KeyedMutex {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for `key`, creating it on first use.
    pub(crate) async fn lock(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(key.to_string())
            .or_default()
            .clone();
        lock.lock_owned().await
    }
}
