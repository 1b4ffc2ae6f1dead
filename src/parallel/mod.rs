//! Parallel processing module for reqstat
//!
//! Each log file is an independent unit of work. Workers pull paths from a
//! shared queue, aggregate them privately and send the partial counts back;
//! the orchestrating thread folds those in whatever order they arrive.
//!
//! # Module Structure
//!
//! - `types`: Configuration and worker messages
//! - `tracker`: Fold of partial results into the run aggregate
//! - `worker`: Worker thread draining the file queue
//! - `processor`: Main ParallelProcessor orchestration

mod processor;
mod tracker;
mod types;
mod worker;

// Re-export public types
pub use processor::ParallelProcessor;
pub use tracker::ResultFold;
pub use types::{FileOutcome, ParallelConfig};
