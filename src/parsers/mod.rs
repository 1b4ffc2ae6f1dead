pub mod request;

pub use request::{LineClass, MalformedRecord, RequestEvent, RequestLineParser};

/// Decides whether a single log line is a countable request event
pub trait LineClassifier: Send + Sync {
    fn classify_detailed<'a>(&self, line: &'a str) -> LineClass<'a>;

    /// Just the event, with "other channel" and "malformed" both mapped to `None`
    fn classify<'a>(&self, line: &'a str) -> Option<RequestEvent<'a>> {
        match self.classify_detailed(line) {
            LineClass::Event(event) => Some(event),
            LineClass::OtherChannel | LineClass::Malformed(_) => None,
        }
    }
}
