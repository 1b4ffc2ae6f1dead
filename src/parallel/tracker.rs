//! Fold of worker results
//!
//! The orchestrating thread is the only writer, so the running aggregate
//! needs no locking. Arrival order varies between runs; the folded counts do
//! not, because merging is associative and commutative.

use crate::counts::AggregateCount;
use crate::stats::ProcessingStats;

use super::types::FileOutcome;

/// Running total of completed files
#[derive(Debug, Default)]
pub struct ResultFold {
    aggregate: AggregateCount,
    stats: ProcessingStats,
}

impl ResultFold {
    pub fn new(workers: usize) -> Self {
        let mut stats = ProcessingStats::new();
        stats.workers = workers;
        Self {
            aggregate: AggregateCount::new(),
            stats,
        }
    }

    /// Merge one completed file into the running total
    pub fn absorb(&mut self, outcome: FileOutcome) {
        tracing::debug!(
            file = %outcome.path.display(),
            handlers = outcome.aggregate.counts.len(),
            events = outcome.aggregate.stats.events_counted,
            "folding file result"
        );
        self.stats.add_file(outcome.aggregate.stats);
        self.aggregate.absorb(outcome.aggregate.counts);
    }

    pub fn files_processed(&self) -> usize {
        self.stats.files_processed
    }

    /// Final aggregate and run statistics
    pub fn finish(mut self) -> (AggregateCount, ProcessingStats) {
        self.stats.finish_processing();
        (self.aggregate, self.stats)
    }
}
