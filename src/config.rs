use std::path::PathBuf;

use crate::parallel::ParallelConfig;

/// Main configuration struct for reqstat
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub processing: ProcessingConfig,
    pub performance: PerformanceConfig,
}

/// Input configuration
#[derive(Debug, Clone)]
pub struct InputConfig {
    pub paths: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Save the report as `{results_dir}/{report_name}.txt` when set
    pub report_name: Option<String>,
    pub results_dir: PathBuf,
    pub stats: bool,
}

/// Processing configuration
#[derive(Debug, Clone)]
pub struct ProcessingConfig {
    pub channel_marker: String,
}

/// Performance configuration
#[derive(Debug, Clone)]
pub struct PerformanceConfig {
    /// 0 selects one worker per CPU
    pub threads: usize,
}

impl AnalyzerConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(cli: &crate::cli::Cli) -> Self {
        Self {
            input: InputConfig {
                paths: cli.input_paths(),
            },
            output: OutputConfig {
                report_name: cli.report.clone(),
                results_dir: PathBuf::from(&cli.results_dir),
                stats: cli.stats,
            },
            processing: ProcessingConfig {
                channel_marker: cli.channel.clone(),
            },
            performance: PerformanceConfig {
                threads: cli.threads,
            },
        }
    }

    /// Configuration analyzing `paths` with every other setting at its default
    pub fn for_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: InputConfig {
                paths: paths.into_iter().map(Into::into).collect(),
            },
            ..Self::default()
        }
    }

    /// Worker thread upper bound, resolving 0 to the CPU count
    pub fn effective_threads(&self) -> usize {
        if self.performance.threads == 0 {
            num_cpus::get()
        } else {
            self.performance.threads
        }
    }

    pub fn parallel_config(&self) -> ParallelConfig {
        ParallelConfig {
            num_workers: self.effective_threads(),
        }
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            input: InputConfig {
                paths: vec![crate::cli::DEFAULT_INPUT.to_string()],
            },
            output: OutputConfig {
                report_name: None,
                results_dir: PathBuf::from(crate::report::DEFAULT_RESULTS_DIR),
                stats: false,
            },
            processing: ProcessingConfig {
                channel_marker: crate::parsers::request::DEFAULT_CHANNEL_MARKER.to_string(),
            },
            performance: PerformanceConfig { threads: 0 },
        }
    }
}
