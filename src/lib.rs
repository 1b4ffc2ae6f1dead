//! Core library for the reqstat request-log analyzer

pub mod aggregator;
pub mod cli;
pub mod config;
pub mod config_file;
pub mod counts;
pub mod discovery;
pub mod error;
pub mod parallel;
pub mod parsers;
pub mod platform;
pub mod report;
pub mod severity;
pub mod stats;

use std::path::PathBuf;
use std::sync::Arc;

pub use config::AnalyzerConfig;
pub use counts::{AggregateCount, HandlerCount};
pub use discovery::FileSet;
pub use error::{AnalyzerError, DiscoveryError, Result};
pub use parsers::{LineClassifier, RequestLineParser};
pub use severity::Severity;
pub use stats::ProcessingStats;

/// Everything a finished run produced
#[derive(Debug)]
pub struct Analysis {
    pub aggregate: AggregateCount,
    pub stats: ProcessingStats,
    pub report: String,
    /// Where the report was saved, when a report name was configured
    pub saved_to: Option<PathBuf>,
}

/// Discover, aggregate in parallel, render and optionally persist the report.
///
/// Any discovery, read or write failure aborts the run; no partial report is
/// produced.
pub fn analyze(config: &AnalyzerConfig) -> Result<Analysis> {
    let files = FileSet::discover(&config.input.paths)?;

    let classifier = Arc::new(RequestLineParser::with_channel_marker(
        config.processing.channel_marker.clone(),
    ));
    let processor = parallel::ParallelProcessor::new(config.parallel_config(), classifier);
    let (aggregate, stats) = processor.process(&files)?;

    let report = report::render_report(&aggregate);
    let saved_to = match &config.output.report_name {
        Some(name) => Some(report::write_report(
            &config.output.results_dir,
            name,
            &report,
        )?),
        None => None,
    };

    Ok(Analysis {
        aggregate,
        stats,
        report,
        saved_to,
    })
}
