//! Type definitions for parallel processing
//!
//! Contains the pool configuration and the messages exchanged with workers.

use std::path::PathBuf;

use crate::aggregator::FileAggregate;
use crate::error::AnalyzerError;

/// Configuration for parallel processing
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Upper bound on worker threads; the pool never exceeds the file count
    pub num_workers: usize,
}

impl ParallelConfig {
    /// Pool size for `file_count` files
    pub fn pool_size(&self, file_count: usize) -> usize {
        self.num_workers.max(1).min(file_count)
    }
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_workers: num_cpus::get(),
        }
    }
}

/// Partial result of one file
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub aggregate: FileAggregate,
}

/// Message type for results flowing back from workers
pub(crate) type WorkerResult = Result<FileOutcome, AnalyzerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_size_is_bounded_by_files() {
        let config = ParallelConfig { num_workers: 8 };
        assert_eq!(config.pool_size(3), 3);
        assert_eq!(config.pool_size(20), 8);
        assert_eq!(config.pool_size(0), 0);

        let single = ParallelConfig { num_workers: 0 };
        assert_eq!(single.pool_size(5), 1);
    }
}
