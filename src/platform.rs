use anyhow::{anyhow, Result};
use std::io::{self, Write};
use std::process;

/// Standard Unix exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    InvalidUsage = 2,
}

impl ExitCode {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn exit(self) -> ! {
        process::exit(self.code())
    }
}

/// Output wrapper that treats a closed reader as the end of output.
///
/// `reqstat logs/ | head -1` is a normal pipeline, not a failure: once the
/// reader has gone away every later write is dropped silently.
pub struct SafeOutput<W: Write> {
    inner: W,
    closed: bool,
}

impl SafeOutput<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> SafeOutput<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            closed: false,
        }
    }

    /// Whether the reader has closed the pipe
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn writeln(&mut self, data: &str) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        let result = writeln!(self.inner, "{}", data);
        self.check(result, "write to")
    }

    pub fn flush(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        let result = self.inner.flush();
        self.check(result, "flush")
    }

    fn check(&mut self, result: io::Result<()>, action: &str) -> Result<()> {
        match result {
            Ok(()) => Ok(()),
            Err(e) if is_broken_pipe(&e) => {
                tracing::debug!("output closed by reader");
                self.closed = true;
                Ok(())
            }
            Err(e) => Err(anyhow!("Failed to {} stdout: {}", action, e)),
        }
    }
}

/// Cross-platform broken pipe detection
pub fn is_broken_pipe(e: &io::Error) -> bool {
    #[cfg(windows)]
    {
        // ERROR_NO_DATA and ERROR_BROKEN_PIPE
        e.kind() == io::ErrorKind::BrokenPipe
            || e.raw_os_error() == Some(232)
            || e.raw_os_error() == Some(109)
    }
    #[cfg(not(windows))]
    {
        e.kind() == io::ErrorKind::BrokenPipe
    }
}
