#![no_main]

use std::io::Cursor;
use std::path::Path;

use libfuzzer_sys::fuzz_target;
use reqstat::aggregator::aggregate_reader;
use reqstat::parsers::{LineClass, LineClassifier, RequestLineParser};

const MAX_INPUT_LEN: usize = 8192;

fuzz_target!(|data: &[u8]| {
    if data.len() > MAX_INPUT_LEN {
        return;
    }

    let parser = RequestLineParser::new();

    // Arbitrary bytes must aggregate without error
    let aggregate = match aggregate_reader(Cursor::new(data), &parser, Path::new("fuzz.log")) {
        Ok(aggregate) => aggregate,
        Err(e) => panic!("in-memory aggregation failed: {}", e),
    };
    let stats = aggregate.stats;
    assert_eq!(
        stats.lines_read,
        stats.events_counted + stats.lines_other_channel + stats.lines_malformed
    );
    assert_eq!(aggregate.counts.severity_totals().total(), stats.events_counted as u64);

    let text = String::from_utf8_lossy(data);
    for line in text.lines() {
        match parser.classify_detailed(line) {
            LineClass::Event(event) => {
                assert!(!event.handler.is_empty());
                assert!(line.contains(event.handler));
                assert!(line.contains(parser.channel_marker()));
            }
            LineClass::OtherChannel => assert!(!line.contains(parser.channel_marker())),
            LineClass::Malformed(_) => {}
        }
    }
});
