//! Configuration for parallel stage execution.

use serde::{Deserialize, Serialize};

/// Configuration for parallel stage execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Maximum number of threads to use (0 = use all available).
    pub max_threads: usize,

    /// Whether to log per-task progress at debug level.
    pub track_progress: bool,

    /// Minimum parallelization threshold (tasks below this run sequentially).
    pub min_parallel_tasks: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            max_threads: 0,
            track_progress: true,
            min_parallel_tasks: 4,
        }
    }
}
