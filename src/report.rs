//! Report rendering and persistence
//!
//! Layout of a rendered report:
//!
//! ```text
//! Total requests: 35
//!
//! HANDLER         DEBUG       INFO        WARNING     ERROR       CRITICAL
//! handler_name    5           10          0           20          0
//!                 5           10          0           20          0
//! ```
//!
//! Count cells are left aligned and padded to the numeric column width. The
//! header's last title and the totals row carry no extra padding or newline.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::counts::{AggregateCount, HandlerCount};
use crate::error::{AnalyzerError, Result};
use crate::severity::Severity;

/// Directory reports are written to when no other is configured
pub const DEFAULT_RESULTS_DIR: &str = "results";

const HANDLER_TITLE: &str = "HANDLER";
const COLUMN_PADDING: usize = 4;
const MIN_COUNT_WIDTH: usize = 8;

/// Everything the rendered table needs, derived from a final aggregate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTable<'a> {
    pub rows: Vec<(&'a str, HandlerCount)>,
    pub totals: HandlerCount,
    pub total_requests: u64,
    pub handler_width: usize,
    pub count_width: usize,
}

impl<'a> ReportTable<'a> {
    pub fn from_aggregate(aggregate: &'a AggregateCount) -> Self {
        let rows: Vec<(&str, HandlerCount)> = aggregate
            .sorted_handlers()
            .into_iter()
            .map(|(name, counts)| (name, *counts))
            .collect();
        let totals = aggregate.severity_totals();

        let longest_name = rows
            .iter()
            .map(|(name, _)| name.chars().count())
            .max()
            .unwrap_or(0);
        let widest_total = totals.max().to_string().len();

        Self {
            rows,
            totals,
            total_requests: totals.request_total(),
            handler_width: longest_name + COLUMN_PADDING,
            count_width: widest_total.max(MIN_COUNT_WIDTH) + COLUMN_PADDING,
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let hw = self.handler_width;
        let cw = self.count_width;

        // Writing into a String cannot fail
        let _ = writeln!(out, "Total requests: {}", self.total_requests);
        out.push('\n');

        let _ = write!(out, "{:<hw$}", HANDLER_TITLE);
        for (column, severity) in Severity::ALL.iter().enumerate() {
            if column + 1 == Severity::COUNT {
                let _ = writeln!(out, "{}", severity.as_str());
            } else {
                let _ = write!(out, "{:<cw$}", severity.as_str());
            }
        }

        for (name, counts) in &self.rows {
            let _ = write!(out, "{:<hw$}", name);
            self.write_counts(&mut out, counts);
            out.push('\n');
        }

        let _ = write!(out, "{:<hw$}", "");
        self.write_counts(&mut out, &self.totals);
        out
    }

    fn write_counts(&self, out: &mut String, counts: &HandlerCount) {
        let cw = self.count_width;
        for (_, count) in counts.iter() {
            let _ = write!(out, "{:<cw$}", count);
        }
    }
}

/// Render the final aggregate as the report text
pub fn render_report(aggregate: &AggregateCount) -> String {
    ReportTable::from_aggregate(aggregate).render()
}

/// Path a report named `name` is written to inside `results_dir`
pub fn report_path(results_dir: &Path, name: &str) -> PathBuf {
    results_dir.join(format!("{}.txt", name))
}

/// Write `text` verbatim to `{results_dir}/{name}.txt`, creating the directory
pub fn write_report(results_dir: &Path, name: &str, text: &str) -> Result<PathBuf> {
    let path = report_path(results_dir, name);
    let to_error = |source| AnalyzerError::ReportWrite {
        path: path.clone(),
        source,
    };

    fs::create_dir_all(results_dir).map_err(to_error)?;
    fs::write(&path, text).map_err(to_error)?;

    tracing::debug!(path = %path.display(), bytes = text.len(), "report written");
    Ok(path)
}
