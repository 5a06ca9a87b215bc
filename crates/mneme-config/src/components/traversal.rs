//! Graph traversal configuration

use serde::{Deserialize, Serialize};

/// Bounds for path finding.
///
/// `default_max_depth` applies when a caller passes no explicit depth;
/// `max_paths` truncates the sorted result set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraversalConfig {
    /// Depth used when the caller does not specify one
    #[serde(default = "default_max_depth")]
    pub default_max_depth: usize,
    /// Maximum number of paths returned per query
    #[serde(default = "default_max_paths")]
    pub max_paths: usize,
}

fn default_max_depth() -> usize {
    3
}

fn default_max_paths() -> usize {
    10
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            default_max_depth: default_max_depth(),
            max_paths: default_max_paths(),
        }
    }
}
