use std::fmt;
use std::str::FromStr;

/// Log level of a request record.
///
/// The declaration order is the display order of the report columns and the
/// slot order inside [`crate::counts::HandlerCount`]. It carries no ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    pub const COUNT: usize = 5;

    /// Every severity in column order
    pub const ALL: [Severity; Severity::COUNT] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }

    /// Slot of this severity in a fixed five-entry record
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Whether records of this level are request outcomes.
    ///
    /// WARNING and CRITICAL records on the request channel describe security
    /// and operational events, so they stay out of the "Total requests" figure.
    pub fn counts_toward_requests(self) -> bool {
        matches!(self, Severity::Debug | Severity::Info | Severity::Error)
    }

    /// Records of these levels name their handler after a description segment
    pub(crate) fn uses_described_shape(self) -> bool {
        matches!(
            self,
            Severity::Warning | Severity::Error | Severity::Critical
        )
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a token is not one of the five level names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSeverity(pub String);

impl fmt::Display for UnknownSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown severity '{}'", self.0)
    }
}

impl std::error::Error for UnknownSeverity {}

impl FromStr for Severity {
    type Err = UnknownSeverity;

    /// Level tokens are matched exactly; `info` or `WARN` are not levels here.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|severity| severity.as_str() == token)
            .ok_or_else(|| UnknownSeverity(token.to_string()))
    }
}
