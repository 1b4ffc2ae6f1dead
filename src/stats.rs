use std::ops::AddAssign;
use std::time::{Duration, Instant};

/// Line counters for a single file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileStats {
    pub lines_read: usize,
    pub events_counted: usize,
    pub lines_other_channel: usize,
    pub lines_malformed: usize,
}

impl AddAssign for FileStats {
    fn add_assign(&mut self, other: FileStats) {
        self.lines_read += other.lines_read;
        self.events_counted += other.events_counted;
        self.lines_other_channel += other.lines_other_channel;
        self.lines_malformed += other.lines_malformed;
    }
}

/// Statistics collected during an analysis run
#[derive(Debug, Clone, Default)]
pub struct ProcessingStats {
    pub lines: FileStats,
    pub files_processed: usize,
    pub workers: usize,
    pub processing_time: Duration,
    pub start_time: Option<Instant>,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    pub fn add_file(&mut self, file: FileStats) {
        self.lines += file;
        self.files_processed += 1;
    }

    pub fn finish_processing(&mut self) {
        if let Some(start) = self.start_time {
            self.processing_time = start.elapsed();
        }
    }

    pub fn format_stats(&self) -> String {
        let mut output = format!(
            "Lines processed: {} total, {} counted, {} other channels",
            self.lines.lines_read, self.lines.events_counted, self.lines.lines_other_channel
        );

        if self.lines.lines_malformed > 0 {
            output.push_str(&format!(", {} malformed", self.lines.lines_malformed));
        }

        output.push_str(&format!(
            "; {} files on {} workers",
            self.files_processed, self.workers
        ));

        let processing_time_ms = self.processing_time.as_millis();
        output.push_str(&format!(" in {}ms", processing_time_ms));

        if processing_time_ms > 0 && self.lines.lines_read > 0 {
            let lines_per_sec = (self.lines.lines_read as f64 * 1000.0) / processing_time_ms as f64;
            output.push_str(&format!(" ({:.0} lines/s)", lines_per_sec));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_file_accumulates() {
        let mut stats = ProcessingStats::new();
        stats.add_file(FileStats {
            lines_read: 10,
            events_counted: 6,
            lines_other_channel: 3,
            lines_malformed: 1,
        });
        stats.add_file(FileStats {
            lines_read: 5,
            events_counted: 5,
            ..Default::default()
        });

        assert_eq!(stats.files_processed, 2);
        assert_eq!(stats.lines.lines_read, 15);
        assert_eq!(stats.lines.events_counted, 11);
        assert_eq!(stats.lines.lines_other_channel, 3);
        assert_eq!(stats.lines.lines_malformed, 1);
    }

    #[test]
    fn test_format_stats() {
        let stats = ProcessingStats {
            lines: FileStats {
                lines_read: 100,
                events_counted: 80,
                lines_other_channel: 18,
                lines_malformed: 2,
            },
            files_processed: 3,
            workers: 2,
            processing_time: Duration::from_millis(0),
            start_time: None,
        };

        assert_eq!(
            stats.format_stats(),
            "Lines processed: 100 total, 80 counted, 18 other channels, 2 malformed; 3 files on 2 workers in 0ms"
        );
    }
}
