//! Per-file aggregation
//!
//! One pass over a file, one classifier call per line. Lines are decoded
//! lossily so a stray invalid byte only affects the line it sits on.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::counts::AggregateCount;
use crate::error::{AnalyzerError, Result};
use crate::parsers::{LineClass, LineClassifier};
use crate::stats::FileStats;

/// Counts and line statistics of one file
#[derive(Debug, Clone, Default)]
pub struct FileAggregate {
    pub counts: AggregateCount,
    pub stats: FileStats,
}

/// Aggregate every line of `reader`.
///
/// `source` only labels diagnostics and errors.
pub fn aggregate_reader<R, C>(mut reader: R, classifier: &C, source: &Path) -> Result<FileAggregate>
where
    R: BufRead,
    C: LineClassifier + ?Sized,
{
    let mut result = FileAggregate::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let bytes_read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source_err| AnalyzerError::FileRead {
                path: source.to_path_buf(),
                source: source_err,
            })?;
        if bytes_read == 0 {
            break;
        }

        result.stats.lines_read += 1;
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\r', '\n']);

        match classifier.classify_detailed(line) {
            LineClass::Event(event) => {
                result.counts.record(event.severity, event.handler);
                result.stats.events_counted += 1;
            }
            LineClass::OtherChannel => result.stats.lines_other_channel += 1,
            LineClass::Malformed(reason) => {
                result.stats.lines_malformed += 1;
                tracing::debug!(
                    file = %source.display(),
                    line = result.stats.lines_read,
                    %reason,
                    "skipping malformed request record"
                );
            }
        }
    }

    Ok(result)
}

/// Open `path` and aggregate it
pub fn aggregate_file<C>(path: &Path, classifier: &C) -> Result<FileAggregate>
where
    C: LineClassifier + ?Sized,
{
    let file = File::open(path).map_err(|source| AnalyzerError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    aggregate_reader(BufReader::new(file), classifier, path)
}
