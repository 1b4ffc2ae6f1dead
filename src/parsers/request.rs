use std::fmt;

use crate::parsers::LineClassifier;
use crate::severity::Severity;

/// Marker of the request-logging channel in the default grammar
pub const DEFAULT_CHANNEL_MARKER: &str = "django.request:";

/// Separator between the logger, description and handler segments
const SEGMENT_SEPARATOR: &str = ": ";

/// Whitespace field holding the level in `DATE TIME LEVEL ...`
const LEVEL_FIELD: usize = 2;

/// Whitespace field holding the handler in `DATE TIME LEVEL LOGGER: METHOD HANDLER`
const HANDLER_FIELD: usize = 5;

/// Segment holding the handler in `DATE TIME LEVEL LOGGER: DESCRIPTION: HANDLER ...`
const HANDLER_SEGMENT: usize = 2;

/// A countable request record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestEvent<'a> {
    pub severity: Severity,
    pub handler: &'a str,
}

/// Why a line on the request channel could not be counted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedRecord {
    MissingLevel,
    UnknownLevel,
    MissingHandler,
}

impl fmt::Display for MalformedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            MalformedRecord::MissingLevel => "missing level field",
            MalformedRecord::UnknownLevel => "unrecognized level",
            MalformedRecord::MissingHandler => "missing handler",
        };
        f.write_str(reason)
    }
}

/// Outcome of classifying one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass<'a> {
    Event(RequestEvent<'a>),
    /// Line does not belong to the request channel
    OtherChannel,
    /// Request-channel line that does not fit either record shape; skipped
    Malformed(MalformedRecord),
}

/// Classifier for Django-style request log lines.
///
/// Two record shapes share the channel. DEBUG and INFO records carry the
/// handler as the sixth whitespace field:
///
/// ```text
/// 2025-01-01 00:00:00,000 INFO django.request: GET /api/v1/users/ 200 OK [10.0.0.1]
/// ```
///
/// WARNING, ERROR and CRITICAL records put a description first, and the
/// handler is the first word of the third `": "`-separated segment:
///
/// ```text
/// 2025-01-01 00:00:00,000 ERROR django.request: Internal Server Error: /api/v1/users/ [10.0.0.1] - ...
/// ```
#[derive(Debug, Clone)]
pub struct RequestLineParser {
    channel_marker: String,
}

impl RequestLineParser {
    pub fn new() -> Self {
        Self::with_channel_marker(DEFAULT_CHANNEL_MARKER)
    }

    pub fn with_channel_marker(marker: impl Into<String>) -> Self {
        Self {
            channel_marker: marker.into(),
        }
    }

    pub fn channel_marker(&self) -> &str {
        &self.channel_marker
    }

    fn handler_from_fields(line: &str) -> Option<&str> {
        line.split_whitespace().nth(HANDLER_FIELD)
    }

    fn handler_from_segments(line: &str) -> Option<&str> {
        line.split(SEGMENT_SEPARATOR)
            .nth(HANDLER_SEGMENT)?
            .split_whitespace()
            .next()
    }
}

impl Default for RequestLineParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LineClassifier for RequestLineParser {
    fn classify_detailed<'a>(&self, line: &'a str) -> LineClass<'a> {
        if !line.contains(self.channel_marker.as_str()) {
            return LineClass::OtherChannel;
        }

        let severity = match line.split_whitespace().nth(LEVEL_FIELD) {
            None => return LineClass::Malformed(MalformedRecord::MissingLevel),
            Some(token) => match token.parse::<Severity>() {
                Ok(severity) => severity,
                Err(_) => return LineClass::Malformed(MalformedRecord::UnknownLevel),
            },
        };

        let handler = if severity.uses_described_shape() {
            Self::handler_from_segments(line)
        } else {
            Self::handler_from_fields(line)
        };

        match handler {
            Some(handler) => LineClass::Event(RequestEvent { severity, handler }),
            None => LineClass::Malformed(MalformedRecord::MissingHandler),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(severity: Severity, handler: &str) -> Option<RequestEvent<'_>> {
        Some(RequestEvent { severity, handler })
    }

    #[test]
    fn test_info_record_uses_sixth_field() {
        let parser = RequestLineParser::new();
        let line = "2025-01-01 00:00:00,000 INFO django.request: GET handler_name 201 OK [127.0.0.1]";
        assert_eq!(
            parser.classify(line),
            event(Severity::Info, "handler_name")
        );
    }

    #[test]
    fn test_debug_record_uses_sixth_field() {
        let parser = RequestLineParser::new();
        let line = "2025-01-01 00:00:00,000 DEBUG django.request: GET /api/v1/cart/ 204 OK [127.0.0.1]\n";
        assert_eq!(parser.classify(line), event(Severity::Debug, "/api/v1/cart/"));
    }

    #[test]
    fn test_error_record_uses_third_segment() {
        let parser = RequestLineParser::new();
        let line = "2025-01-01 00:00:00,000 ERROR django.request: Internal Server Error: handler_name [127.0.0.1] - DatabaseError: Deadlock detected";
        assert_eq!(
            parser.classify(line),
            event(Severity::Error, "handler_name")
        );
    }

    #[test]
    fn test_warning_and_critical_use_third_segment() {
        let parser = RequestLineParser::new();
        let warning = "2025-03-28 12:44:46,000 WARNING django.request: Not Found: /admin/login/ [192.168.1.29]";
        let critical = "2025-03-28 12:44:46,000 CRITICAL django.request: Service Unavailable: /api/v1/payments/ [10.0.0.2]";
        assert_eq!(parser.classify(warning), event(Severity::Warning, "/admin/login/"));
        assert_eq!(
            parser.classify(critical),
            event(Severity::Critical, "/api/v1/payments/")
        );
    }

    #[test]
    fn test_other_channels_are_not_applicable() {
        let parser = RequestLineParser::new();
        let security = "2025-01-01 00:00:00,000 WARNING django.security: IntegrityError: duplicate key value violates unique constraint";
        let core = "2025-01-01 00:00:00,000 CRITICAL django.core.management: ConnectionError: Failed to connect to payment gateway";
        assert_eq!(parser.classify_detailed(security), LineClass::OtherChannel);
        assert_eq!(parser.classify_detailed(core), LineClass::OtherChannel);
        assert_eq!(parser.classify_detailed(""), LineClass::OtherChannel);
    }

    #[test]
    fn test_malformed_request_lines_are_skipped() {
        let parser = RequestLineParser::new();

        assert_eq!(
            parser.classify_detailed("django.request:"),
            LineClass::Malformed(MalformedRecord::MissingLevel)
        );
        assert_eq!(
            parser.classify_detailed("2025-01-01 00:00:00,000 NOTICE django.request: GET /x/ 200"),
            LineClass::Malformed(MalformedRecord::UnknownLevel)
        );
        assert_eq!(
            parser.classify_detailed("2025-01-01 00:00:00,000 INFO django.request: GET"),
            LineClass::Malformed(MalformedRecord::MissingHandler)
        );
        assert_eq!(
            parser.classify_detailed("2025-01-01 00:00:00,000 ERROR django.request: Internal Server Error"),
            LineClass::Malformed(MalformedRecord::MissingHandler)
        );
        assert_eq!(
            parser.classify_detailed("2025-01-01 00:00:00,000 ERROR django.request: Boom: "),
            LineClass::Malformed(MalformedRecord::MissingHandler)
        );
        assert_eq!(parser.classify("django.request: x y z"), None);
    }

    #[test]
    fn test_custom_channel_marker() {
        let parser = RequestLineParser::with_channel_marker("app.http:");
        let line = "2025-01-01 00:00:00,000 INFO app.http: POST /login/ 302 Found";
        assert_eq!(parser.channel_marker(), "app.http:");
        assert_eq!(parser.classify(line), event(Severity::Info, "/login/"));

        let django = "2025-01-01 00:00:00,000 INFO django.request: GET /x/ 200 OK";
        assert_eq!(parser.classify_detailed(django), LineClass::OtherChannel);
    }
}
