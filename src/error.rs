use std::path::PathBuf;
use thiserror::Error;

/// Input paths could not be turned into a set of log files.
///
/// Every variant is fatal for the whole call; discovery never hands back a
/// partial file set.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("path does not exist: {}", path.display())]
    PathNotFound { path: PathBuf },

    #[error(
        "unsupported file type: {} (only .log, .txt, .logs are supported)",
        path.display()
    )]
    UnsupportedExtension { path: PathBuf },

    #[error("cannot list or resolve {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no log files found")]
    NoLogFiles,
}

/// Fatal errors of an analysis run
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error("failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write report {}: {source}", path.display())]
    ReportWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to start worker thread: {0}")]
    WorkerSpawn(std::io::Error),

    #[error("worker thread {worker_id} panicked")]
    WorkerPanicked { worker_id: usize },
}

impl AnalyzerError {
    /// True for the input-discovery kind of failure
    pub fn is_discovery(&self) -> bool {
        matches!(self, AnalyzerError::Discovery(_))
    }

    /// True when an accepted log file could not be opened or read
    pub fn is_file_read(&self) -> bool {
        matches!(self, AnalyzerError::FileRead { .. })
    }
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
