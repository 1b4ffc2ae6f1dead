//! Main parallel processor
//!
//! Contains the ParallelProcessor struct that fans files out to workers and
//! folds their results.

use crossbeam_channel::{bounded, unbounded};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use crate::counts::AggregateCount;
use crate::discovery::FileSet;
use crate::error::{AnalyzerError, DiscoveryError, Result};
use crate::parsers::LineClassifier;
use crate::stats::ProcessingStats;

use super::tracker::ResultFold;
use super::types::{ParallelConfig, WorkerResult};
use super::worker::worker_thread;

/// Main parallel processor
pub struct ParallelProcessor {
    config: ParallelConfig,
    classifier: Arc<dyn LineClassifier>,
}

impl ParallelProcessor {
    pub fn new(config: ParallelConfig, classifier: Arc<dyn LineClassifier>) -> Self {
        Self { config, classifier }
    }

    /// Aggregate every file of `files` and fold the partial counts.
    ///
    /// The first failing file fails the whole run. Workers still busy with a
    /// file finish it and exit on their own; nothing waits for them.
    pub fn process(&self, files: &FileSet) -> Result<(AggregateCount, ProcessingStats)> {
        if files.is_empty() {
            return Err(DiscoveryError::NoLogFiles.into());
        }

        let num_workers = self.config.pool_size(files.len());
        tracing::debug!(files = files.len(), workers = num_workers, "starting workers");

        // Every path is queued up front, so the bounded queue never blocks
        let (work_sender, work_receiver) = bounded(files.len());
        for path in files.iter() {
            // Cannot fail: `work_receiver` is alive until the workers take it
            let _ = work_sender.send(path.to_path_buf());
        }
        drop(work_sender);

        let (result_sender, result_receiver) = unbounded::<WorkerResult>();
        let stop = Arc::new(AtomicBool::new(false));

        // Start worker threads
        let mut worker_handles = Vec::with_capacity(num_workers);
        for worker_id in 0..num_workers {
            let work_receiver = work_receiver.clone();
            let result_sender = result_sender.clone();
            let classifier = Arc::clone(&self.classifier);
            let worker_stop = Arc::clone(&stop);

            let spawned = thread::Builder::new()
                .name(format!("reqstat-worker-{}", worker_id))
                .spawn(move || {
                    worker_thread(worker_id, work_receiver, result_sender, classifier, worker_stop)
                });
            match spawned {
                Ok(handle) => worker_handles.push(handle),
                Err(e) => {
                    stop.store(true, Ordering::Relaxed);
                    return Err(AnalyzerError::WorkerSpawn(e));
                }
            }
        }

        // Drop our sender so the receive loop ends once every worker is done
        drop(result_sender);
        drop(work_receiver);

        let mut fold = ResultFold::new(num_workers);
        for result in result_receiver.iter() {
            match result {
                Ok(outcome) => fold.absorb(outcome),
                Err(e) => {
                    stop.store(true, Ordering::Relaxed);
                    tracing::debug!(error = %e, "worker failed, abandoning run");
                    return Err(e);
                }
            }
        }

        // Full barrier: every worker has hung up, surface any panic
        for (worker_id, handle) in worker_handles.into_iter().enumerate() {
            if handle.join().is_err() {
                return Err(AnalyzerError::WorkerPanicked { worker_id });
            }
        }

        let (aggregate, stats) = fold.finish();
        tracing::info!(
            files = stats.files_processed,
            handlers = aggregate.len(),
            events = stats.lines.events_counted,
            "aggregation complete"
        );
        Ok((aggregate, stats))
    }
}
