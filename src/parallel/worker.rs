//! Worker thread for parallel processing
//!
//! Contains the worker loop that aggregates one file at a time.

use crossbeam_channel::{Receiver, Sender};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::aggregator::aggregate_file;
use crate::parsers::LineClassifier;

use super::types::{FileOutcome, WorkerResult};

/// Worker thread: drains the file queue until it is empty or the run stops
pub(crate) fn worker_thread(
    worker_id: usize,
    work_receiver: Receiver<PathBuf>,
    result_sender: Sender<WorkerResult>,
    classifier: Arc<dyn LineClassifier>,
    stop: Arc<AtomicBool>,
) {
    tracing::debug!(worker_id, "worker started");
    let mut files_done = 0usize;

    while let Ok(path) = work_receiver.recv() {
        if stop.load(Ordering::Relaxed) {
            break;
        }

        let result = aggregate_file(&path, classifier.as_ref())
            .map(|aggregate| FileOutcome { path, aggregate });
        let failed = result.is_err();

        // A closed result channel means the orchestrator already gave up
        if result_sender.send(result).is_err() || failed {
            break;
        }
        files_done += 1;
    }

    tracing::debug!(worker_id, files_done, "worker finished");
}
