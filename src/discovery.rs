//! Input discovery
//!
//! Turns user-supplied files and directories into the de-duplicated set of
//! log files to analyze. Directories are listed one level deep.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::DiscoveryError;

/// File name suffixes accepted as log files
pub const ACCEPTED_EXTENSIONS: [&str; 3] = [".log", ".txt", ".logs"];

/// Whether a file name ends in one of the accepted extensions
pub fn has_accepted_extension(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .is_some_and(|name| ACCEPTED_EXTENSIONS.iter().any(|ext| name.ends_with(ext)))
}

/// Immutable set of absolute, existing log file paths.
///
/// Iteration order is an implementation detail and must not be relied on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSet {
    files: BTreeSet<PathBuf>,
}

impl FileSet {
    /// Discover log files from a single file or directory
    pub fn discover_one(input: impl AsRef<Path>) -> Result<Self, DiscoveryError> {
        Self::discover([input])
    }

    /// Discover log files from any number of files and directories.
    ///
    /// Fails as a whole when any entry is missing, any explicit file has an
    /// unsupported extension, or nothing is found at all.
    pub fn discover<I, P>(inputs: I) -> Result<Self, DiscoveryError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let inputs: Vec<P> = inputs.into_iter().collect();

        // Missing entries win over every other failure, whatever their position
        if let Some(missing) = inputs.iter().find(|input| !input.as_ref().exists()) {
            return Err(DiscoveryError::PathNotFound {
                path: missing.as_ref().to_path_buf(),
            });
        }

        let mut files = BTreeSet::new();
        for input in &inputs {
            let input = input.as_ref();
            if input.is_dir() {
                Self::collect_directory(input, &mut files)?;
            } else if has_accepted_extension(input) {
                files.insert(absolute(input)?);
            } else {
                return Err(DiscoveryError::UnsupportedExtension {
                    path: input.to_path_buf(),
                });
            }
        }

        if files.is_empty() {
            return Err(DiscoveryError::NoLogFiles);
        }

        tracing::debug!(files = files.len(), inputs = inputs.len(), "discovered log files");
        Ok(Self { files })
    }

    fn collect_directory(dir: &Path, files: &mut BTreeSet<PathBuf>) -> Result<(), DiscoveryError> {
        let unreadable = |source| DiscoveryError::Unreadable {
            path: dir.to_path_buf(),
            source,
        };

        for entry in fs::read_dir(dir).map_err(unreadable)? {
            let path = entry.map_err(unreadable)?.path();
            if path.is_file() && has_accepted_extension(&path) {
                files.insert(absolute(&path)?);
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(PathBuf::as_path)
    }
}

/// Canonical form, so one file reached through two routes is counted once
fn absolute(path: &Path) -> Result<PathBuf, DiscoveryError> {
    fs::canonicalize(path).map_err(|source| DiscoveryError::Unreadable {
        path: path.to_path_buf(),
        source,
    })
}
