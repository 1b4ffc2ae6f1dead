// tests/common/mod.rs
// Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

pub const DEBUG_LINE: &str =
    "2025-01-01 00:00:00,000 DEBUG django.request: GET handler_name 200 OK [127.0.0.1]";
pub const INFO_LINE: &str =
    "2025-01-01 00:00:00,000 INFO django.request: GET handler_name 201 OK [127.0.0.1]";
pub const ERROR_LINE: &str = "2025-01-01 00:00:00,000 ERROR django.request: Internal Server Error: handler_name [127.0.0.1] - DatabaseError: Deadlock detected";
pub const WARNING_LINE: &str = "2025-01-01 00:00:00,000 WARNING django.request: Not Found: /missing/ [127.0.0.1]";
pub const CRITICAL_LINE: &str = "2025-01-01 00:00:00,000 CRITICAL django.request: Service Unavailable: /health/ [127.0.0.1]";
pub const OTHER_CHANNEL_LINE: &str =
    "2025-01-01 00:00:00,000 INFO django.db.backends: (0.002) SELECT 1";

/// The classic sample: 5 DEBUG, 10 INFO, 20 ERROR for `handler_name`, plus
/// WARNING and CRITICAL lines that belong to other handlers
pub fn sample_log() -> String {
    let mut lines = Vec::new();
    lines.extend(std::iter::repeat(DEBUG_LINE).take(5));
    lines.extend(std::iter::repeat(INFO_LINE).take(10));
    lines.extend(std::iter::repeat(WARNING_LINE).take(15));
    lines.extend(std::iter::repeat(ERROR_LINE).take(20));
    lines.extend(std::iter::repeat(CRITICAL_LINE).take(25));
    lines.push(OTHER_CHANNEL_LINE);
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Scratch workspace that doubles as the working directory and HOME, so no
/// real user configuration leaks into a run
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to a path relative to the workspace, creating parents
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, content).expect("Failed to write fixture");
        path
    }

    /// reqstat command set up to run inside the workspace
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_reqstat"));
        cmd.args(args)
            .current_dir(self.path())
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"))
            .env_remove("RUST_LOG");
        cmd
    }

    /// Run reqstat inside the workspace
    pub fn run(&self, args: &[&str]) -> (String, String, i32) {
        let output = self
            .command(args)
            .output()
            .expect("Failed to execute reqstat");

        (
            String::from_utf8_lossy(&output.stdout).to_string(),
            String::from_utf8_lossy(&output.stderr).to_string(),
            output.status.code().unwrap_or(-1),
        )
    }
}

/// Count cells of the report row starting with `label`
pub fn row_counts(report: &str, label: &str) -> Option<Vec<u64>> {
    report
        .lines()
        .find(|line| line.split_whitespace().next() == Some(label))
        .map(|line| {
            line.split_whitespace()
                .skip(1)
                .map(|cell| cell.parse().expect("count cell"))
                .collect()
        })
}
